//! Autoformat tests
//!
//! Key scripts typed into an [`Editor`] running the built-in plugins.

mod blocks;
mod inlines;
mod scenarios;

use slipmark_core::editing::{parse_key_script, Editor, KeyOutcome, Value};
use slipmark_core::model::Document;
use slipmark_core::pattern::AutoformatOptions;

/// An editor on a single empty paragraph.
pub fn editor() -> Editor {
    Editor::with_options(Value::default(), &AutoformatOptions::default()).unwrap()
}

/// An editor whose cursor sits at the end of a paragraph holding `text`.
pub fn editor_on(text: &str) -> Editor {
    Editor::with_options(
        Value::from_document(Document::from_paragraphs([text])),
        &AutoformatOptions::default(),
    )
    .unwrap()
}

pub fn type_script(editor: &mut Editor, script: &str) -> Vec<KeyOutcome> {
    let events = parse_key_script(script).expect("valid key script");
    editor.run_script(&events).expect("edits apply")
}
