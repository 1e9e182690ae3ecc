//! The editing session: a current snapshot plus the plugin stack.

use super::change::Change;
use super::keys::{Key, KeyEvent};
use super::value::Value;
use crate::autoformat::{default_plugins, AutoformatPlugin};
use crate::error::{GrammarError, TransformError};
use crate::pattern::AutoformatOptions;
use std::sync::Arc;

/// What happened to a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// A plugin claimed the key.
    Handled { plugin: String },
    /// No plugin claimed the key; the default edit was applied.
    Default,
    /// Nothing to do (e.g. backspace at the very start of the document).
    Ignored,
}

pub struct Editor {
    value: Arc<Value>,
    plugins: Vec<Box<dyn AutoformatPlugin>>,
}

impl Editor {
    pub fn new(value: Value, plugins: Vec<Box<dyn AutoformatPlugin>>) -> Self {
        Editor {
            value: Arc::new(value),
            plugins,
        }
    }

    /// An editor running the built-in plugins.
    pub fn with_options(value: Value, options: &AutoformatOptions) -> Result<Self, GrammarError> {
        Ok(Editor::new(value, default_plugins(options)?))
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The current snapshot. Snapshots are never mutated; each accepted edit
    /// replaces the pointer.
    pub fn snapshot(&self) -> Arc<Value> {
        Arc::clone(&self.value)
    }

    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|plugin| plugin.name()).collect()
    }

    /// Offer `event` to the plugins in order and commit the first change
    /// returned. Returns the name of the plugin that handled it.
    pub fn dispatch(&mut self, event: &KeyEvent) -> Result<Option<String>, TransformError> {
        for plugin in &self.plugins {
            if let Some(change) = plugin.on_key_down(event, &self.value) {
                self.value = Arc::new(self.value.apply(&change)?);
                return Ok(Some(plugin.name().to_string()));
            }
        }
        Ok(None)
    }

    /// Handle a key the way a host surface would: plugins first, then the
    /// default edit for the key.
    pub fn key_down(&mut self, event: &KeyEvent) -> Result<KeyOutcome, TransformError> {
        if let Some(plugin) = self.dispatch(event)? {
            return Ok(KeyOutcome::Handled { plugin });
        }
        match default_change(event, &self.value) {
            Some(change) => {
                self.value = Arc::new(self.value.apply(&change)?);
                Ok(KeyOutcome::Default)
            }
            None => Ok(KeyOutcome::Ignored),
        }
    }

    pub fn run_script(&mut self, events: &[KeyEvent]) -> Result<Vec<KeyOutcome>, TransformError> {
        events.iter().map(|event| self.key_down(event)).collect()
    }
}

fn default_change(event: &KeyEvent, value: &Value) -> Option<Change> {
    match event.key {
        Key::Char(_) => event
            .typed_char()
            .map(|c| Change::new().insert_text(c.to_string())),
        Key::Space => Some(Change::new().insert_text(" ")),
        Key::Enter => Some(Change::new().split_block()),
        Key::Backspace => {
            if value.is_expanded() {
                Some(Change::new().delete_selection())
            } else if value.start_offset() > 0 {
                Some(Change::new().delete_backward(1))
            } else {
                value
                    .previous_leaf_path(value.start_path())
                    .map(|_| Change::new().merge_with_previous())
            }
        }
    }
}
