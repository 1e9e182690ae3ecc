//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! The trait provides a uniform interface for parsing and serializing documents.

use crate::error::FormatError;
use crate::model::Document;
use std::collections::HashMap;

/// Trait for document formats
///
/// Implementors convert between a string representation and the document tree.
/// Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct Plain;
///
/// impl Format for Plain {
///     fn name(&self) -> &str {
///         "plain"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
///         Ok(doc.text())
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "html", "json")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["md", "markdown"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → Document)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Document → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a Document
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<Document, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a Document into source text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serialize a Document, optionally using extra parameters.
    ///
    /// Formats without options can rely on the default implementation, which
    /// delegates to [`Format::serialize`] and rejects any parameter.
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if options.is_empty() {
            self.serialize(doc)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}

/// Look up a boolean extra parameter (`true`/`false`, case-insensitive).
pub(crate) fn bool_option(
    options: &HashMap<String, String>,
    key: &str,
) -> Result<Option<bool>, FormatError> {
    match options.get(key).map(|v| v.to_ascii_lowercase()) {
        None => Ok(None),
        Some(v) if v == "true" => Ok(Some(true)),
        Some(v) if v == "false" => Ok(Some(false)),
        Some(v) => Err(FormatError::SerializationError(format!(
            "Invalid value '{v}' for '{key}' (expected true or false)"
        ))),
    }
}

/// Reject parameters a format does not know.
pub(crate) fn check_known_options(
    format: &str,
    options: &HashMap<String, String>,
    known: &[&str],
) -> Result<(), FormatError> {
    match options.keys().find(|key| !known.contains(&key.as_str())) {
        Some(key) => Err(FormatError::NotSupported(format!(
            "Format '{format}' does not support parameter '{key}'"
        ))),
        None => Ok(()),
    }
}
