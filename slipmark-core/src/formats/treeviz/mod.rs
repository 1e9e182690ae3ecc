//! Treeviz formatter for document trees
//!
//! Treeviz is a visual representation of the tree, one node per line, with
//! box-drawing connectors encoding the nesting:
//!
//! <prefix><connector> <icon> <label>
//!
//! Blocks and inlines are labelled with their type, text nodes with their
//! content (truncated to 30 characters). Example:
//!
//! ```text
//! ⧉ Document (2 blocks)
//! ├─ § heading-one
//! │ └─ ◦ Title
//! └─ ▣ bold-container
//!   ├─ ◦ some
//!   └─ 𝐁 bold
//!     └─ ◦ text
//! ```
//!
//! # Parameters
//!
//! - `show-data`: when `true`, append each node's data as `{key=value, ...}`
//!   and each run's marks as `[mark, ...]`

use super::icons::get_icon;
use crate::error::FormatError;
use crate::format::{bool_option, check_known_options, Format};
use crate::model::{Data, Document, Node};
use std::collections::HashMap;

const MAX_LABEL: usize = 30;

fn truncate(text: &str) -> String {
    if text.chars().count() > MAX_LABEL {
        let head: String = text.chars().take(MAX_LABEL - 1).collect();
        format!("{head}…")
    } else {
        text.to_string()
    }
}

fn format_data(data: &Data) -> String {
    if data.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = data.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!(" {{{}}}", pairs.join(", "))
}

fn node_label(node: &Node, show_data: bool) -> (&'static str, String) {
    match node {
        Node::Block(block) => {
            let data = if show_data { format_data(&block.data) } else { String::new() };
            (get_icon(block.ty.as_str()), format!("{}{data}", block.ty.as_str()))
        }
        Node::Inline(inline) => {
            let data = if show_data { format_data(&inline.data) } else { String::new() };
            (get_icon(inline.ty.as_str()), format!("{}{data}", inline.ty.as_str()))
        }
        Node::Text(text) => {
            let content: String = text.ranges.iter().map(|l| l.text.as_str()).collect();
            let mut label = truncate(&content);
            if show_data {
                let marks: Vec<&str> = text
                    .ranges
                    .iter()
                    .flat_map(|l| l.marks.iter().map(|m| m.ty.as_str()))
                    .collect();
                if !marks.is_empty() {
                    label.push_str(&format!(" [{}]", marks.join(", ")));
                }
            }
            (get_icon("text"), label)
        }
    }
}

fn format_node(node: &Node, prefix: &str, is_last: bool, show_data: bool, output: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    let (icon, label) = node_label(node, show_data);
    output.push_str(&format!("{prefix}{connector} {icon} {label}\n"));

    let children = match node {
        Node::Block(block) => &block.nodes,
        Node::Inline(inline) => &inline.nodes,
        Node::Text(_) => return,
    };
    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    format_children(children, &child_prefix, show_data, output);
}

fn format_children(children: &[Node], prefix: &str, show_data: bool, output: &mut String) {
    let count = children.len();
    for (i, child) in children.iter().enumerate() {
        format_node(child, prefix, i + 1 == count, show_data, output);
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    render_tree(doc, false)
}

fn render_tree(doc: &Document, show_data: bool) -> String {
    let count = doc.nodes.len();
    let mut output = format!(
        "{} Document ({} block{})\n",
        get_icon("document"),
        count,
        if count == 1 { "" } else { "s" }
    );
    format_children(&doc.nodes, "", show_data, &mut output);
    output
}

/// Format implementation for treeviz format
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with connectors and Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        check_known_options(self.name(), options, &["show-data"])?;
        let show_data = bool_option(options, "show-data")?.unwrap_or(false);
        Ok(render_tree(doc, show_data))
    }
}
