//! Markdown serialization (document tree → markdown text)
//!
//! A node's emission wraps its content in the decoration for its type:
//!
//! | type                        | emission                    |
//! |-----------------------------|-----------------------------|
//! | paragraph                   | `{inner}\n`                 |
//! | heading-N                   | `\n{'#' × N} {inner}\n`     |
//! | block-quote                 | `\n> {inner}\n`             |
//! | bulleted-list               | `\n- {inner}\n`             |
//! | list-item                   | `\n+ {inner}\n`             |
//! | code-block                  | ``\n```\n{inner}\n```\n``   |
//! | italic, underline           | `*{inner}*`                 |
//! | bold, bold_underscore       | `**{inner}**`               |
//! | code                        | `` `{inner}` ``             |
//! | strike                      | `~~{inner}~~`               |
//! | link                        | `[{inner}]({href})`         |
//! | containers, unknown types   | `{inner}`                   |
//!
//! Decoration is skipped when the content is empty; an empty paragraph still
//! emits its newline. The HTML target differs only for links (content only,
//! the surrounding markup carries the href) and underlines (`_{inner}_`).

use crate::model::{Block, BlockType, Delimiter, Document, Inline, InlineType, Node, DATA_HREF};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Which flavour of markdown text to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Markdown,
    Html,
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Target::Markdown),
            "html" => Ok(Target::Html),
            other => Err(format!("unknown markdown target '{other}'")),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Target::Markdown => "markdown",
            Target::Html => "html",
        })
    }
}

/// Emit the content of `node`: its children's emissions, or a text node's
/// runs verbatim.
pub fn serialize(node: &Node, target: Target) -> String {
    let mut out = String::new();
    write_content(node, target, &mut out);
    out
}

/// Emit every top-level node of `doc`.
pub fn serialize_document(doc: &Document, target: Target) -> String {
    let mut out = String::new();
    for node in &doc.nodes {
        write_node(node, target, &mut out);
    }
    out
}

fn write_content(node: &Node, target: Target, out: &mut String) {
    match node {
        Node::Text(text) => {
            for leaf in &text.ranges {
                out.push_str(&leaf.text);
            }
        }
        Node::Block(Block { nodes, .. }) | Node::Inline(Inline { nodes, .. }) => {
            for child in nodes {
                write_node(child, target, out);
            }
        }
    }
}

fn write_node(node: &Node, target: Target, out: &mut String) {
    let inner = serialize(node, target);
    match node {
        Node::Text(_) => out.push_str(&inner),
        Node::Block(block) => write_block(&block.ty, &inner, out),
        Node::Inline(inline) => write_inline(inline, &inner, target, out),
    }
}

fn write_block(ty: &BlockType, inner: &str, out: &mut String) {
    if inner.is_empty() {
        if *ty == BlockType::Paragraph {
            out.push('\n');
        }
        return;
    }
    match ty {
        BlockType::Paragraph => {
            out.push_str(inner);
            out.push('\n');
        }
        BlockType::Heading(_) => {
            let level = ty.heading_level().unwrap_or(1);
            out.push('\n');
            out.extend(std::iter::repeat('#').take(usize::from(level)));
            out.push(' ');
            out.push_str(inner);
            out.push('\n');
        }
        BlockType::BlockQuote => push_line(out, "> ", inner),
        BlockType::BulletedList => push_line(out, "- ", inner),
        BlockType::ListItem => push_line(out, "+ ", inner),
        BlockType::CodeBlock => {
            out.push_str("\n```\n");
            out.push_str(inner);
            out.push_str("\n```\n");
        }
        BlockType::Container(_) | BlockType::Other(_) => out.push_str(inner),
    }
}

fn push_line(out: &mut String, marker: &str, inner: &str) {
    out.push('\n');
    out.push_str(marker);
    out.push_str(inner);
    out.push('\n');
}

fn write_inline(inline: &Inline, inner: &str, target: Target, out: &mut String) {
    if inner.is_empty() {
        return;
    }
    let (open, close) = match &inline.ty {
        InlineType::Italic(Delimiter::Underscore) if target == Target::Html => ("_", "_"),
        InlineType::Italic(_) => ("*", "*"),
        InlineType::Bold(_) => ("**", "**"),
        InlineType::Code => ("`", "`"),
        InlineType::Strike => ("~~", "~~"),
        InlineType::Link if target == Target::Markdown => {
            let href = inline.data.get(DATA_HREF).map(String::as_str).unwrap_or("");
            out.push('[');
            out.push_str(inner);
            out.push_str("](");
            out.push_str(href);
            out.push(')');
            return;
        }
        InlineType::Link | InlineType::Other(_) => ("", ""),
    };
    out.push_str(open);
    out.push_str(inner);
    out.push_str(close);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Data, MarkFamily};

    fn block(ty: BlockType, nodes: Vec<Node>) -> Node {
        Node::Block(Block::with_nodes(ty, nodes))
    }

    fn inline(ty: InlineType, text: &str) -> Node {
        Node::Inline(Inline::new(ty, Data::new(), vec![Node::text(text)]))
    }

    #[test]
    fn plain_paragraph_gets_newline() {
        let para = block(BlockType::Paragraph, vec![Node::text("hello world")]);
        assert_eq!(
            serialize_document(&Document::new(vec![para]), Target::Markdown),
            "hello world\n"
        );
    }

    #[test]
    fn serialize_emits_content_only() {
        let para = block(
            BlockType::Paragraph,
            vec![
                block(BlockType::Heading(1), vec![Node::text("Title")]),
                block(BlockType::Paragraph, vec![Node::text("body")]),
            ],
        );
        assert_eq!(serialize(&para, Target::Markdown), "\n# Title\nbody\n");
    }

    #[test]
    fn empty_blocks_skip_decoration() {
        let doc = Document::new(vec![
            block(BlockType::Heading(1), vec![]),
            block(BlockType::Paragraph, vec![]),
            block(BlockType::BlockQuote, vec![Node::text("")]),
        ]);
        assert_eq!(serialize_document(&doc, Target::Markdown), "\n");
    }

    #[test]
    fn block_decorations() {
        let doc = Document::new(vec![
            block(BlockType::Heading(3), vec![Node::text("h")]),
            block(BlockType::BlockQuote, vec![Node::text("q")]),
            block(BlockType::CodeBlock, vec![Node::text("let x;")]),
            block(
                BlockType::BulletedList,
                vec![block(BlockType::ListItem, vec![Node::text("i")])],
            ),
        ]);
        assert_eq!(
            serialize_document(&doc, Target::Markdown),
            "\n### h\n\n> q\n\n```\nlet x;\n```\n\n- \n+ i\n\n"
        );
    }

    #[test]
    fn heading_hashes_stay_within_markdown_levels() {
        let doc = Document::new(vec![
            block(BlockType::Heading(0), vec![Node::text("low")]),
            block(BlockType::Heading(9), vec![Node::text("deep")]),
        ]);
        assert_eq!(
            serialize_document(&doc, Target::Markdown),
            "\n# low\n\n###### deep\n"
        );
    }

    #[test]
    fn inline_decorations_inside_container() {
        let para = block(
            BlockType::Container(MarkFamily::Bold),
            vec![
                Node::text("a "),
                inline(InlineType::Bold(Delimiter::Underscore), "b"),
                inline(InlineType::Italic(Delimiter::Underscore), "c"),
                inline(InlineType::Strike, "d"),
                inline(InlineType::Code, "e"),
            ],
        );
        assert_eq!(serialize(&para, Target::Markdown), "a **b***c*~~d~~`e`");
        assert_eq!(serialize(&para, Target::Html), "a **b**_c_~~d~~`e`");
    }

    #[test]
    fn links_carry_href_in_markdown_only() {
        let mut data = Data::new();
        data.insert(DATA_HREF.into(), "http://x.io".into());
        let link = Node::Inline(Inline::new(InlineType::Link, data, vec![Node::text("label")]));
        let doc = Document::new(vec![
            block(BlockType::Container(MarkFamily::Link), vec![link]),
            block(BlockType::Paragraph, vec![]),
        ]);
        assert_eq!(
            serialize_document(&doc, Target::Markdown),
            "[label](http://x.io)\n"
        );
        assert_eq!(serialize_document(&doc, Target::Html), "label\n");
    }

    #[test]
    fn unknown_types_pass_through() {
        let doc = Document::new(vec![block(
            BlockType::Other("numbered-list".into()),
            vec![inline(InlineType::Other("sparkle".into()), "x")],
        )]);
        assert_eq!(serialize_document(&doc, Target::Markdown), "x");
    }

    #[test]
    fn target_parses_from_option_value() {
        assert_eq!("HTML".parse::<Target>().unwrap(), Target::Html);
        assert!("rtf".parse::<Target>().is_err());
    }
}
