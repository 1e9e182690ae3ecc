//! Export tests for HTML format (tree → markup)

use slipmark_core::format::Format;
use slipmark_core::formats::html::{HtmlFormat, HtmlRenderer};
use slipmark_core::model::{Block, BlockType, Document, Node};
use slipmark_core::render::render_document;

#[test]
fn list_renders_nested_elements() {
    let doc = Document::new(vec![Node::Block(Block::with_nodes(
        BlockType::BulletedList,
        vec![
            Node::Block(Block::with_text(BlockType::ListItem, "one")),
            Node::Block(Block::with_text(BlockType::ListItem, "two")),
        ],
    ))]);
    assert_eq!(
        render_document(&HtmlRenderer, &doc),
        vec!["<ul><li>one</li><li>two</li></ul>".to_string()]
    );
}

#[test]
fn unknown_block_keeps_its_type() {
    let doc = Document::new(vec![Node::Block(Block::with_text(
        BlockType::Other("numbered-list".into()),
        "x",
    ))]);
    insta::assert_snapshot!(
        HtmlFormat::default().serialize(&doc).unwrap(),
        @r#"<div class="editor"><div data-type="numbered-list">x</div></div>"#
    );
}
