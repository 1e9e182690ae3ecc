//! Document model
//!
//! A document is a tree of [`Node`]s tagged by kind. Blocks hold blocks,
//! inlines and texts; inlines hold inlines and texts; texts hold marked runs.
//! Type tags are closed enums with an `Other` fallback so unknown tags survive
//! a decode/encode round trip.

pub mod content;
pub mod nodes;
pub mod types;

pub use nodes::{
    Block, Data, Document, Inline, Leaf, Mark, Node, Text, DATA_HREF, DATA_PREFIX, DATA_TEXT,
};
pub use types::{BlockType, Delimiter, InlineType, MarkFamily};
