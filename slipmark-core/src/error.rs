//! Error types for slipmark operations
//!
//! Autoformatting itself never fails: a shortcut that does not match simply
//! declines to act. The errors here cover the seams around it: decoding a
//! stored document, applying a transform that cannot apply, building the
//! shortcut grammar, and looking up output formats.

use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

/// Violations of the document tree invariants, reported while decoding.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{child} node is not allowed inside {parent}")]
    InvalidNesting {
        parent: String,
        child: &'static str,
    },
    #[error("link node at {path:?} has no href")]
    MissingHref { path: Vec<usize> },
    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ModelError> for FormatError {
    fn from(err: ModelError) -> Self {
        FormatError::ParseError(err.to_string())
    }
}

/// A transform operation that could not be applied to a snapshot.
///
/// When any operation of a change fails, the whole change is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("no leaf block at path {0:?}")]
    NoBlock(Vec<usize>),
    #[error("offset {offset} is outside the block text (length {len})")]
    OffsetOutOfRange { offset: usize, len: usize },
    #[error("selection spans more than one block")]
    SelectionSpansBlocks,
    #[error("cannot wrap an empty selection")]
    EmptySelection,
    #[error("block at {path:?} is not wrapped in a '{expected}' block")]
    NoWrapper { path: Vec<usize>, expected: String },
    #[error("there is no block before {0:?} to merge into")]
    NoPreviousBlock(Vec<usize>),
}

/// Errors raised while building the shortcut grammar.
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("invalid pattern for '{shortcut}': {source}")]
    Pattern {
        shortcut: &'static str,
        #[source]
        source: regex::Error,
    },
    #[error("unknown shortcut '{0}'")]
    UnknownShortcut(String),
}

/// Errors raised while parsing a key script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyScriptError {
    #[error("unknown key name '{{{0}}}'")]
    UnknownKey(String),
    #[error("unterminated key name starting at character {0}")]
    Unterminated(usize),
}
