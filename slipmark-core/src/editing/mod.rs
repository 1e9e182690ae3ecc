//! Editing session
//!
//! The read side an autoformat plugin sees ([`Value`]), the transform
//! builder it answers with ([`Change`]), key events, and the [`Editor`] that
//! ties them to a plugin stack.

mod change;
mod editor;
mod keys;
mod selection;
mod value;

pub use change::{Change, Operation};
pub use editor::{Editor, KeyOutcome};
pub use keys::{parse_key_script, Key, KeyEvent};
pub use selection::{Point, Selection};
pub use value::Value;
