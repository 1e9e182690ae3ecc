//! Markdown format implementation
//!
//! Export only: the tree is walked and each node is emitted with the
//! markdown decoration of its type (see [`serializer`] for the full table).
//! There is no markdown parser; documents come from the editor or from the
//! JSON encoding.
//!
//! # Element Mapping Table
//!
//! | Node               | Markdown                     | Notes                                   |
//! |--------------------|------------------------------|-----------------------------------------|
//! | paragraph          | text line                    | Empty paragraphs emit a bare newline    |
//! | heading-one..six   | `#`..`######`                | Preceded by a blank line                |
//! | block-quote        | `> `                         |                                         |
//! | bulleted-list      | `- `                         | Wraps its list items                    |
//! | list-item          | `+ `                         | The prefix typed to create it           |
//! | code-block         | fenced with three backticks  | No info string                          |
//! | `*-container`      | content only                 | Editing anchors, no markup of their own |
//! | bold / italic      | `**x**` / `*x*`              | Underscore variants export as asterisks |
//! | code / strike      | `` `x` `` / `~~x~~`          |                                         |
//! | link               | `[x](href)`                  |                                         |
//!
//! # Lossy Conversions
//!
//! - Underscore delimiters are normalized to asterisks
//! - Leaf marks on text runs are not exported
//! - Unknown block and inline types export their content only
//!
//! # Parameters
//!
//! - `target`: `markdown` (default) or `html`. The html flavour leaves link
//!   targets out and keeps underscores for underlines, for pasting into a
//!   surface that renders its own markup.

pub mod serializer;

use crate::error::FormatError;
use crate::format::{check_known_options, Format};
use crate::model::Document;
use std::collections::HashMap;

pub use serializer::Target;

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown text export"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serializer::serialize_document(doc, Target::Markdown))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        check_known_options(self.name(), options, &["target"])?;
        let target = match options.get("target") {
            Some(value) => value.parse::<Target>().map_err(FormatError::SerializationError)?,
            None => Target::Markdown,
        };
        Ok(serializer::serialize_document(doc, target))
    }
}
