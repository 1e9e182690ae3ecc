//! Key script replay.

use slipmark_config::SlipmarkConfig;
use slipmark_core::editing::{parse_key_script, Editor, KeyOutcome, Value};
use slipmark_core::model::Document;
use slipmark_core::pattern::AutoformatOptions;
use slipmark_core::{GrammarError, KeyScriptError, TransformError};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("invalid key script: {0}")]
    Script(#[from] KeyScriptError),
    #[error("invalid autoformat settings: {0}")]
    Grammar(#[from] GrammarError),
    #[error("key {step}: {source}")]
    Transform {
        step: usize,
        source: TransformError,
    },
}

/// Type `keys` into `doc` (an empty document when `None`) with the configured
/// shortcuts and return the resulting tree.
pub fn run(
    doc: Option<Document>,
    keys: &str,
    config: &SlipmarkConfig,
) -> Result<Document, ReplayError> {
    let events = parse_key_script(keys)?;
    let value = doc.map(Value::from_document).unwrap_or_default();
    let options = AutoformatOptions::from(&config.autoformat);
    let mut editor = Editor::with_options(value, &options)?;

    for (step, event) in events.iter().enumerate() {
        let outcome = editor
            .key_down(event)
            .map_err(|source| ReplayError::Transform { step, source })?;
        match outcome {
            KeyOutcome::Handled { plugin } => info!(step, ?event, %plugin, "shortcut"),
            outcome => debug!(step, ?event, ?outcome, "key"),
        }
    }
    Ok(editor.value().document().clone())
}
