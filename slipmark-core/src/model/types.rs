//! Type tags for blocks and inlines.
//!
//! Tags travel as plain strings in the stored encoding (`"heading-two"`,
//! `"bold-container"`, `"link"`). Unknown strings decode to the `Other`
//! variants so documents written by newer editors still load and serialize.

use serde::{Deserialize, Serialize};
use std::fmt;

const HEADING_NAMES: [&str; 6] = [
    "heading-one",
    "heading-two",
    "heading-three",
    "heading-four",
    "heading-five",
    "heading-six",
];

/// Which character a bold or italic run was typed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    Asterisk,
    Underscore,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Asterisk => '*',
            Delimiter::Underscore => '_',
        }
    }
}

/// Inline families that get wrapped in a container block when created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkFamily {
    Link,
    Code,
    Bold,
    Italic,
    Strike,
}

impl MarkFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            MarkFamily::Link => "link",
            MarkFamily::Code => "code",
            MarkFamily::Bold => "bold",
            MarkFamily::Italic => "italic",
            MarkFamily::Strike => "strike",
        }
    }

    fn container_name(self) -> &'static str {
        match self {
            MarkFamily::Link => "link-container",
            MarkFamily::Code => "code-container",
            MarkFamily::Bold => "bold-container",
            MarkFamily::Italic => "italic-container",
            MarkFamily::Strike => "strike-container",
        }
    }
}

/// The type tag of a block node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    Paragraph,
    /// Heading level. Build it with [`BlockType::heading`]; anything outside
    /// `1..=6` is read back through [`BlockType::heading_level`] as the
    /// nearest valid level.
    Heading(u8),
    BlockQuote,
    BulletedList,
    ListItem,
    CodeBlock,
    /// Transient wrapper around a freshly created inline of this family.
    Container(MarkFamily),
    Other(String),
}

impl BlockType {
    /// Heading of the given level, if the level exists in markdown.
    pub fn heading(level: u8) -> Option<Self> {
        (1..=6).contains(&level).then_some(BlockType::Heading(level))
    }

    /// Level of a heading, clamped to `1..=6`.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            BlockType::Heading(level) => Some((*level).clamp(1, 6)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::Heading(_) => HEADING_NAMES[usize::from(self.heading_level().unwrap_or(1)) - 1],
            BlockType::BlockQuote => "block-quote",
            BlockType::BulletedList => "bulleted-list",
            BlockType::ListItem => "list-item",
            BlockType::CodeBlock => "code-block",
            BlockType::Container(family) => family.container_name(),
            BlockType::Other(name) => name,
        }
    }

    /// Types produced by the block prefix shortcuts.
    pub fn is_prefix_type(&self) -> bool {
        matches!(
            self,
            BlockType::Heading(_) | BlockType::BlockQuote | BlockType::ListItem | BlockType::CodeBlock
        )
    }

    pub fn container_family(&self) -> Option<MarkFamily> {
        match self {
            BlockType::Container(family) => Some(*family),
            _ => None,
        }
    }

    /// Blocks whose text must never be autoformatted.
    pub fn is_code(&self) -> bool {
        matches!(
            self,
            BlockType::CodeBlock | BlockType::Container(MarkFamily::Code)
        )
    }
}

impl From<&str> for BlockType {
    fn from(name: &str) -> Self {
        if let Some(index) = HEADING_NAMES.iter().position(|h| *h == name) {
            return BlockType::Heading(index as u8 + 1);
        }
        match name {
            "paragraph" => BlockType::Paragraph,
            "block-quote" => BlockType::BlockQuote,
            "bulleted-list" => BlockType::BulletedList,
            "list-item" => BlockType::ListItem,
            "code-block" => BlockType::CodeBlock,
            "link-container" => BlockType::Container(MarkFamily::Link),
            "code-container" => BlockType::Container(MarkFamily::Code),
            "bold-container" => BlockType::Container(MarkFamily::Bold),
            "italic-container" => BlockType::Container(MarkFamily::Italic),
            "strike-container" => BlockType::Container(MarkFamily::Strike),
            other => BlockType::Other(other.to_string()),
        }
    }
}

impl From<String> for BlockType {
    fn from(name: String) -> Self {
        match BlockType::from(name.as_str()) {
            BlockType::Other(_) => BlockType::Other(name),
            known => known,
        }
    }
}

impl From<BlockType> for String {
    fn from(ty: BlockType) -> Self {
        match ty {
            BlockType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The type tag of an inline node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InlineType {
    Link,
    Code,
    Bold(Delimiter),
    Italic(Delimiter),
    Strike,
    Other(String),
}

impl InlineType {
    pub fn as_str(&self) -> &str {
        match self {
            InlineType::Link => "link",
            InlineType::Code => "code",
            InlineType::Bold(Delimiter::Asterisk) => "bold",
            InlineType::Bold(Delimiter::Underscore) => "bold_underscore",
            InlineType::Italic(Delimiter::Asterisk) => "italic",
            InlineType::Italic(Delimiter::Underscore) => "underline",
            InlineType::Strike => "strike",
            InlineType::Other(name) => name,
        }
    }

    pub fn family(&self) -> Option<MarkFamily> {
        match self {
            InlineType::Link => Some(MarkFamily::Link),
            InlineType::Code => Some(MarkFamily::Code),
            InlineType::Bold(_) => Some(MarkFamily::Bold),
            InlineType::Italic(_) => Some(MarkFamily::Italic),
            InlineType::Strike => Some(MarkFamily::Strike),
            InlineType::Other(_) => None,
        }
    }

    /// The opening (and closing) delimiter typed around the text.
    ///
    /// Links have no single delimiter and return `None`.
    pub fn delimiter(&self) -> Option<&'static str> {
        match self {
            InlineType::Code => Some("`"),
            InlineType::Bold(Delimiter::Asterisk) => Some("**"),
            InlineType::Bold(Delimiter::Underscore) => Some("__"),
            InlineType::Italic(Delimiter::Asterisk) => Some("*"),
            InlineType::Italic(Delimiter::Underscore) => Some("_"),
            InlineType::Strike => Some("~~"),
            InlineType::Link | InlineType::Other(_) => None,
        }
    }
}

impl From<&str> for InlineType {
    fn from(name: &str) -> Self {
        match name {
            "link" => InlineType::Link,
            "code" => InlineType::Code,
            "bold" | "bold_asterisk" => InlineType::Bold(Delimiter::Asterisk),
            "bold_underscore" => InlineType::Bold(Delimiter::Underscore),
            "italic" | "italic_asterisk" => InlineType::Italic(Delimiter::Asterisk),
            "underline" | "italic_underscore" => InlineType::Italic(Delimiter::Underscore),
            "strike" => InlineType::Strike,
            other => InlineType::Other(other.to_string()),
        }
    }
}

impl From<String> for InlineType {
    fn from(name: String) -> Self {
        match InlineType::from(name.as_str()) {
            InlineType::Other(_) => InlineType::Other(name),
            known => known,
        }
    }
}

impl From<InlineType> for String {
    fn from(ty: InlineType) -> Self {
        match ty {
            InlineType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for InlineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
