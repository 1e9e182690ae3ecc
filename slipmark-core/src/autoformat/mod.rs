//! Autoformat plugins
//!
//! Plugins watch key events and answer with a [`Change`] when a keystroke
//! completes (or undoes) a markdown shortcut. A plugin that returns `None`
//! leaves the key to the next plugin and finally to the editor's default
//! behaviour.
//!
//! Two plugins ship with the crate and run in this order:
//!
//! - [`InlinePlugin`]: delimited runs such as `**bold**` or `[label](href)`
//!   become inline nodes wrapped in a container block.
//! - [`BlockPrefixPlugin`]: prefixes such as `#`, `>` or `+` retype the block.

mod inline;
mod prefix;

pub use inline::{revert_literal, InlinePlugin};
pub use prefix::BlockPrefixPlugin;

use crate::editing::{Change, KeyEvent, Value};
use crate::error::GrammarError;
use crate::pattern::{AutoformatOptions, Grammar};
use std::sync::Arc;

/// A key handler that may claim a keystroke by returning a change.
pub trait AutoformatPlugin: Send + Sync {
    fn name(&self) -> &str;

    fn on_key_down(&self, event: &KeyEvent, value: &Value) -> Option<Change>;
}

/// The inline plugin followed by the block prefix plugin, sharing one
/// grammar built from `options`.
pub fn default_plugins(
    options: &AutoformatOptions,
) -> Result<Vec<Box<dyn AutoformatPlugin>>, GrammarError> {
    let grammar = Arc::new(Grammar::new(options)?);
    Ok(vec![
        Box::new(InlinePlugin::new(Arc::clone(&grammar))),
        Box::new(BlockPrefixPlugin::new(grammar)),
    ])
}
