//! HTML markup renderer
//!
//! Renders nodes to the markup an editing surface would display: semantic
//! elements for known types, `data-type` spans and divs for everything else.

use crate::model::{Block, BlockType, Inline, InlineType, Leaf, Text, DATA_HREF};
use crate::render::Renderer;

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    type Output = String;

    fn block(&self, block: &Block, children: Vec<String>) -> String {
        let inner = children.concat();
        match &block.ty {
            BlockType::Paragraph => element("p", &inner),
            BlockType::Heading(_) => {
                let level = block.ty.heading_level().unwrap_or(1);
                element(&format!("h{level}"), &inner)
            }
            BlockType::BlockQuote => element("blockquote", &inner),
            BlockType::BulletedList => element("ul", &inner),
            BlockType::ListItem => element("li", &inner),
            BlockType::CodeBlock => element("pre", &inner),
            ty @ BlockType::Container(_) => typed_element("span", ty.as_str(), &inner),
            BlockType::Other(name) => typed_element("div", name, &inner),
        }
    }

    fn inline(&self, inline: &Inline, children: Vec<String>) -> String {
        let inner = children.concat();
        match &inline.ty {
            InlineType::Link => {
                let href = inline.data.get(DATA_HREF).map(String::as_str).unwrap_or("");
                format!("<a href=\"{}\">{inner}</a>", escape(href))
            }
            InlineType::Code => element("code", &inner),
            InlineType::Bold(_) => element("strong", &inner),
            InlineType::Italic(_) => element("em", &inner),
            InlineType::Strike => element("del", &inner),
            InlineType::Other(name) => typed_element("span", name, &inner),
        }
    }

    fn text(&self, text: &Text) -> String {
        text.ranges.iter().map(render_leaf).collect()
    }
}

fn render_leaf(leaf: &Leaf) -> String {
    let mut out = escape(&leaf.text);
    for mark in &leaf.marks {
        out = match mark.ty.as_str() {
            "bold" => element("strong", &out),
            "italic" => element("em", &out),
            "underline" => element("u", &out),
            "code" => element("code", &out),
            "strike" | "strikethrough" => element("del", &out),
            other => format!("<span data-mark=\"{}\">{out}</span>", escape(other)),
        };
    }
    out
}

fn element(tag: &str, inner: &str) -> String {
    format!("<{tag}>{inner}</{tag}>")
}

fn typed_element(tag: &str, ty: &str, inner: &str) -> String {
    format!("<{tag} data-type=\"{}\">{inner}</{tag}>", escape(ty))
}

pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Data, Mark, MarkFamily, Node};
    use crate::render::render;

    #[test]
    fn escapes_text_and_attributes() {
        assert_eq!(escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn link_container_renders_anchor() {
        let mut data = Data::new();
        data.insert(DATA_HREF.into(), "http://x.io?a=1&b=2".into());
        let node = Node::Block(Block::with_nodes(
            BlockType::Container(MarkFamily::Link),
            vec![Node::Inline(Inline::new(InlineType::Link, data, vec![Node::text("x")]))],
        ));
        insta::assert_snapshot!(
            render(&HtmlRenderer, &node),
            @r#"<span data-type="link-container"><a href="http://x.io?a=1&amp;b=2">x</a></span>"#
        );
    }

    #[test]
    fn leaf_marks_nest_in_order() {
        let text = Text {
            ranges: vec![Leaf {
                text: "hi".into(),
                marks: vec![Mark { ty: "bold".into() }, Mark { ty: "italic".into() }],
            }],
        };
        assert_eq!(HtmlRenderer.text(&text), "<em><strong>hi</strong></em>");
    }
}
