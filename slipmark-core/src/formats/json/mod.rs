//! JSON format implementation
//!
//! The lossless encoding of the document tree: every node is an object
//! tagged by `kind` (`block`, `inline`, `text`), blocks and inlines carry
//! `type`, optional `data` and `nodes`, text nodes carry `ranges` of marked
//! runs. A document is `{ "nodes": [...] }`.
//!
//! Parsing validates nesting, so a document read here is one the editor and
//! the serializers accept.

use crate::error::FormatError;
use crate::format::Format;
use crate::model::Document;

/// Format implementation for the JSON tree encoding
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Document tree as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(Document::from_json(source)?)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        doc.to_json_pretty()
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}
