//! Core data structures for the document tree.

use super::types::{BlockType, InlineType};
use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Payload attached to a block or inline (`text`, `href`, `prefix`, ...).
pub type Data = BTreeMap<String, String>;

/// Key under which inlines store the text they were created from.
pub const DATA_TEXT: &str = "text";
/// Key under which links store their target.
pub const DATA_HREF: &str = "href";
/// Key under which prefix-typed blocks store the literal prefix they replaced.
pub const DATA_PREFIX: &str = "prefix";

/// A node of the document tree, tagged by its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Block(Block),
    Inline(Inline),
    Text(Text),
}

/// A paragraph-level node (paragraph, heading, list item, container, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub ty: BlockType,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: Data,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,
}

/// A formatting span inside a block (link, bold, code, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inline {
    #[serde(rename = "type")]
    pub ty: InlineType,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: Data,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,
}

/// A leaf holding runs of marked text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Text {
    #[serde(default, alias = "leaves")]
    pub ranges: Vec<Leaf>,
}

/// A run of text sharing the same marks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Leaf {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub ty: String,
}

impl Node {
    /// A text node holding a single unmarked run.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(Text::plain(text))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Node::Block(_) => "block",
            Node::Inline(_) => "inline",
            Node::Text(_) => "text",
        }
    }

    /// Concatenated text of the node and all its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => {
                for leaf in &text.ranges {
                    out.push_str(&leaf.text);
                }
            }
            Node::Block(Block { nodes, .. }) | Node::Inline(Inline { nodes, .. }) => {
                for child in nodes {
                    child.push_text(out);
                }
            }
        }
    }

    /// Length of the node text in chars.
    pub fn text_len(&self) -> usize {
        match self {
            Node::Text(text) => text.len(),
            Node::Block(Block { nodes, .. }) | Node::Inline(Inline { nodes, .. }) => {
                nodes.iter().map(Node::text_len).sum()
            }
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Node::Block(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_block_mut(&mut self) -> Option<&mut Block> {
        match self {
            Node::Block(block) => Some(block),
            _ => None,
        }
    }
}

impl From<Block> for Node {
    fn from(block: Block) -> Self {
        Node::Block(block)
    }
}

impl From<Inline> for Node {
    fn from(inline: Inline) -> Self {
        Node::Inline(inline)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl Block {
    pub fn new(ty: BlockType) -> Self {
        Block {
            ty,
            data: Data::new(),
            nodes: Vec::new(),
        }
    }

    /// A block holding a single text node, or no children for empty text.
    pub fn with_text(ty: BlockType, text: &str) -> Self {
        let nodes = if text.is_empty() {
            Vec::new()
        } else {
            vec![Node::text(text)]
        };
        Block::with_nodes(ty, nodes)
    }

    pub fn with_nodes(ty: BlockType, nodes: Vec<Node>) -> Self {
        Block {
            ty,
            data: Data::new(),
            nodes,
        }
    }

    pub fn text(&self) -> String {
        self.nodes.iter().map(Node::text_content).collect()
    }

    pub fn text_len(&self) -> usize {
        self.nodes.iter().map(Node::text_len).sum()
    }

    /// A leaf block holds no block children and is where the cursor lives.
    pub fn is_leaf(&self) -> bool {
        !self.nodes.iter().any(|n| matches!(n, Node::Block(_)))
    }
}

impl Inline {
    pub fn new(ty: InlineType, data: Data, nodes: Vec<Node>) -> Self {
        Inline { ty, data, nodes }
    }

    pub fn text(&self) -> String {
        self.nodes.iter().map(Node::text_content).collect()
    }

    pub fn text_len(&self) -> usize {
        self.nodes.iter().map(Node::text_len).sum()
    }
}

impl Text {
    pub fn plain(text: impl Into<String>) -> Self {
        Text {
            ranges: vec![Leaf {
                text: text.into(),
                marks: Vec::new(),
            }],
        }
    }

    pub fn len(&self) -> usize {
        self.ranges.iter().map(|l| l.text.chars().count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.iter().all(|l| l.text.is_empty())
    }
}

/// The root of the tree: an ordered list of top-level blocks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub nodes: Vec<Node>,
}

/// The stored editor state wraps the document one level deeper.
#[derive(Deserialize)]
struct StoredState {
    document: Document,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDocument {
    State(StoredState),
    Bare(Document),
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        Document { nodes }
    }

    /// A document made of plain paragraphs, one per line of `text`.
    pub fn from_paragraphs<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        Document {
            nodes: lines
                .into_iter()
                .map(|line| Node::Block(Block::with_text(BlockType::Paragraph, line)))
                .collect(),
        }
    }

    /// Decode the structural JSON encoding and check the tree invariants.
    ///
    /// Accepts either a bare document (`{"nodes": [...]}`) or a stored editor
    /// state (`{"document": {"nodes": [...]}}`).
    pub fn from_json(source: &str) -> Result<Document, ModelError> {
        let doc = match serde_json::from_str::<StoredDocument>(source)? {
            StoredDocument::State(state) => state.document,
            StoredDocument::Bare(doc) => doc,
        };
        doc.validate()?;
        Ok(doc)
    }

    pub fn to_json_pretty(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the nesting rules: the document and blocks hold blocks, inlines
    /// and texts; inlines hold inlines and texts; links carry an href.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut path = Vec::new();
        for (index, node) in self.nodes.iter().enumerate() {
            path.push(index);
            validate_node(node, &mut path)?;
            path.pop();
        }
        Ok(())
    }

    pub fn text(&self) -> String {
        self.nodes.iter().map(Node::text_content).collect()
    }

    /// The block at `path`, following block children only.
    pub fn block(&self, path: &[usize]) -> Option<&Block> {
        let (first, rest) = path.split_first()?;
        let mut block = self.nodes.get(*first)?.as_block()?;
        for index in rest {
            block = block.nodes.get(*index)?.as_block()?;
        }
        Some(block)
    }

    pub fn block_mut(&mut self, path: &[usize]) -> Option<&mut Block> {
        let (first, rest) = path.split_first()?;
        let mut block = self.nodes.get_mut(*first)?.as_block_mut()?;
        for index in rest {
            block = block.nodes.get_mut(*index)?.as_block_mut()?;
        }
        Some(block)
    }

    /// The child list that holds the node at `path` (the document's own list
    /// for top-level paths).
    pub fn siblings_mut(&mut self, path: &[usize]) -> Option<&mut Vec<Node>> {
        match path.split_last() {
            Some((_, [])) => Some(&mut self.nodes),
            Some((_, parent)) => self.block_mut(parent).map(|b| &mut b.nodes),
            None => None,
        }
    }

    /// Paths of all leaf blocks in document order.
    pub fn leaf_paths(&self) -> Vec<Vec<usize>> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        collect_leaf_paths(&self.nodes, &mut path, &mut out);
        out
    }
}

fn collect_leaf_paths(nodes: &[Node], path: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    for (index, node) in nodes.iter().enumerate() {
        if let Node::Block(block) = node {
            path.push(index);
            if block.is_leaf() {
                out.push(path.clone());
            } else {
                collect_leaf_paths(&block.nodes, path, out);
            }
            path.pop();
        }
    }
}

fn validate_node(node: &Node, path: &mut Vec<usize>) -> Result<(), ModelError> {
    let (parent, children, allows_blocks) = match node {
        Node::Text(_) => return Ok(()),
        Node::Block(block) => (block.ty.as_str(), &block.nodes, true),
        Node::Inline(inline) => {
            if inline.ty == InlineType::Link && !inline.data.contains_key(DATA_HREF) {
                return Err(ModelError::MissingHref { path: path.clone() });
            }
            (inline.ty.as_str(), &inline.nodes, false)
        }
    };
    for (index, child) in children.iter().enumerate() {
        if !allows_blocks && matches!(child, Node::Block(_)) {
            return Err(ModelError::InvalidNesting {
                parent: parent.to_string(),
                child: child.kind(),
            });
        }
        path.push(index);
        validate_node(child, path)?;
        path.pop();
    }
    Ok(())
}
