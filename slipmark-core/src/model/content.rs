//! Char-offset editing of a leaf block's children.
//!
//! A leaf block's text is the concatenation of its texts and inlines. These
//! helpers cut, insert and wrap that text by char offset while keeping the
//! inline structure intact. Every helper leaves the list normalized: no empty
//! runs, no empty inlines, adjacent texts merged.

use super::nodes::{Data, Inline, Leaf, Node, Text};
use super::types::InlineType;

/// Total text length of `nodes` in chars.
pub fn text_len(nodes: &[Node]) -> usize {
    nodes.iter().map(Node::text_len).sum()
}

/// Split `nodes` at `offset`; inlines straddling the cut are split into two
/// inlines with the same type and data.
pub fn split_at(nodes: Vec<Node>, offset: usize) -> (Vec<Node>, Vec<Node>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut pos = 0;
    for node in nodes {
        let len = node.text_len();
        if pos + len <= offset {
            left.push(node);
        } else if pos >= offset {
            right.push(node);
        } else {
            let (head, tail) = split_node(node, offset - pos);
            left.push(head);
            right.push(tail);
        }
        pos += len;
    }
    (normalize(left), normalize(right))
}

fn split_node(node: Node, offset: usize) -> (Node, Node) {
    match node {
        Node::Text(text) => {
            let (head, tail) = split_text(text, offset);
            (Node::Text(head), Node::Text(tail))
        }
        Node::Inline(inline) => {
            let (head, tail) = split_at(inline.nodes, offset);
            (
                Node::Inline(Inline::new(inline.ty.clone(), inline.data.clone(), head)),
                Node::Inline(Inline::new(inline.ty, inline.data, tail)),
            )
        }
        // Leaf blocks never hold blocks; keep one whole on the left.
        block @ Node::Block(_) => (block, Node::Text(Text::default())),
    }
}

fn split_text(text: Text, offset: usize) -> (Text, Text) {
    let mut head = Vec::new();
    let mut tail = Vec::new();
    let mut pos = 0;
    for leaf in text.ranges {
        let len = leaf.text.chars().count();
        if pos + len <= offset {
            head.push(leaf);
        } else if pos >= offset {
            tail.push(leaf);
        } else {
            let at = byte_index(&leaf.text, offset - pos);
            head.push(Leaf {
                text: leaf.text[..at].to_string(),
                marks: leaf.marks.clone(),
            });
            tail.push(Leaf {
                text: leaf.text[at..].to_string(),
                marks: leaf.marks,
            });
        }
        pos += len;
    }
    (Text { ranges: head }, Text { ranges: tail })
}

/// Insert `insert` at `offset`.
///
/// At a boundary the text goes into an adjacent top-level text rather than
/// into a neighbouring inline, so typing after a link does not extend it.
pub fn insert_text(nodes: &mut Vec<Node>, offset: usize, insert: &str) {
    if insert.is_empty() {
        return;
    }
    if !insert_into_existing(nodes, offset, insert) {
        let index = boundary_index(nodes, offset);
        nodes.insert(index, Node::text(insert));
    }
    let owned = std::mem::take(nodes);
    *nodes = normalize(owned);
}

fn insert_into_existing(nodes: &mut [Node], offset: usize, insert: &str) -> bool {
    let mut pos = 0;
    for node in nodes.iter_mut() {
        let len = node.text_len();
        match node {
            Node::Text(text) if offset <= pos + len && offset >= pos => {
                insert_into_text(text, offset - pos, insert);
                return true;
            }
            Node::Inline(inline) if offset > pos && offset < pos + len => {
                if !insert_into_existing(&mut inline.nodes, offset - pos, insert) {
                    let index = boundary_index(&inline.nodes, offset - pos);
                    inline.nodes.insert(index, Node::text(insert));
                }
                return true;
            }
            _ => {}
        }
        pos += len;
    }
    false
}

fn insert_into_text(text: &mut Text, offset: usize, insert: &str) {
    let mut pos = 0;
    for leaf in text.ranges.iter_mut() {
        let len = leaf.text.chars().count();
        if offset <= pos + len {
            let at = byte_index(&leaf.text, offset - pos);
            leaf.text.insert_str(at, insert);
            return;
        }
        pos += len;
    }
    text.ranges.push(Leaf {
        text: insert.to_string(),
        marks: Vec::new(),
    });
}

/// Index of the first child starting at `offset`.
fn boundary_index(nodes: &[Node], offset: usize) -> usize {
    let mut pos = 0;
    for (index, node) in nodes.iter().enumerate() {
        if pos >= offset {
            return index;
        }
        pos += node.text_len();
    }
    nodes.len()
}

/// Remove the chars in `start..end`.
pub fn delete_range(nodes: &mut Vec<Node>, start: usize, end: usize) {
    if start >= end {
        return;
    }
    let owned = std::mem::take(nodes);
    let (mut left, rest) = split_at(owned, start);
    let (_, right) = split_at(rest, end - start);
    left.extend(right);
    *nodes = normalize(left);
}

/// Wrap the chars in `start..end` into a new inline.
pub fn wrap_range(nodes: &mut Vec<Node>, start: usize, end: usize, ty: InlineType, data: Data) {
    let owned = std::mem::take(nodes);
    let (mut left, rest) = split_at(owned, start);
    let (middle, right) = split_at(rest, end - start);
    left.push(Node::Inline(Inline::new(ty, data, middle)));
    left.extend(right);
    *nodes = normalize(left);
}

/// Find the first inline (searching depth-first) accepted by `matches`,
/// returning its char range within `nodes`.
pub fn find_inline<'a>(
    nodes: &'a [Node],
    matches: &dyn Fn(&Inline) -> bool,
) -> Option<(usize, usize, &'a Inline)> {
    let mut pos = 0;
    for node in nodes {
        let len = node.text_len();
        if let Node::Inline(inline) = node {
            if matches(inline) {
                return Some((pos, pos + len, inline));
            }
            if let Some((start, end, found)) = find_inline(&inline.nodes, matches) {
                return Some((pos + start, pos + end, found));
            }
        }
        pos += len;
    }
    None
}

/// Drop empty runs and inlines, merge adjacent texts and same-mark runs.
pub fn normalize(nodes: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Text(text) => {
                let ranges: Vec<Leaf> = text.ranges.into_iter().filter(|l| !l.text.is_empty()).collect();
                if ranges.is_empty() {
                    continue;
                }
                if let Some(Node::Text(previous)) = out.last_mut() {
                    previous.ranges.extend(ranges);
                    previous.ranges = merge_leaves(std::mem::take(&mut previous.ranges));
                } else {
                    out.push(Node::Text(Text {
                        ranges: merge_leaves(ranges),
                    }));
                }
            }
            Node::Inline(mut inline) => {
                inline.nodes = normalize(inline.nodes);
                if inline.nodes.is_empty() {
                    continue;
                }
                out.push(Node::Inline(inline));
            }
            block @ Node::Block(_) => out.push(block),
        }
    }
    out
}

fn merge_leaves(leaves: Vec<Leaf>) -> Vec<Leaf> {
    let mut out: Vec<Leaf> = Vec::with_capacity(leaves.len());
    for leaf in leaves {
        match out.last_mut() {
            Some(previous) if previous.marks == leaf.marks => previous.text.push_str(&leaf.text),
            _ => out.push(leaf),
        }
    }
    out
}

fn byte_index(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}
