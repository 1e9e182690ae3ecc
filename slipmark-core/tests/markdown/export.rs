//! Export tests for Markdown format (tree → markdown)

use slipmark_core::format::Format;
use slipmark_core::formats::markdown::serializer::{serialize, serialize_document, Target};
use slipmark_core::formats::markdown::MarkdownFormat;
use slipmark_core::model::{Block, BlockType, Document, Node};

fn block(ty: BlockType, nodes: Vec<Node>) -> Node {
    Node::Block(Block::with_nodes(ty, nodes))
}

#[test]
fn nested_heading_and_paragraph() {
    let node = block(
        BlockType::Paragraph,
        vec![
            block(BlockType::Heading(1), vec![Node::text("Title")]),
            block(BlockType::Paragraph, vec![Node::text("body")]),
        ],
    );
    assert_eq!(serialize(&node, Target::Markdown), "\n# Title\nbody\n");
}

#[test]
fn empty_paragraphs_keep_vertical_space() {
    let doc = Document::from_paragraphs(["a", "", "b"]);
    assert_eq!(MarkdownFormat.serialize(&doc).unwrap(), "a\n\nb\n");
}

#[test]
fn empty_decorated_blocks_collapse() {
    let doc = Document::new(vec![
        block(BlockType::Heading(2), vec![]),
        block(BlockType::BlockQuote, vec![]),
        block(BlockType::CodeBlock, vec![]),
        block(
            BlockType::BulletedList,
            vec![block(BlockType::ListItem, vec![])],
        ),
    ]);
    assert_eq!(serialize_document(&doc, Target::Markdown), "");
}

#[test]
fn stored_editor_state_exports() {
    let json = r#"{
        "document": {
            "nodes": [
                { "kind": "block", "type": "heading-two",
                  "nodes": [{ "kind": "text", "ranges": [{ "text": "Plan" }] }] },
                { "kind": "block", "type": "bold-container",
                  "nodes": [
                      { "kind": "text", "ranges": [{ "text": "be " }] },
                      { "kind": "inline", "type": "bold", "data": { "text": "brave" },
                        "nodes": [{ "kind": "text", "ranges": [{ "text": "brave" }] }] }
                  ] },
                { "kind": "block", "type": "paragraph" }
            ]
        }
    }"#;
    let doc = Document::from_json(json).unwrap();
    assert_eq!(
        MarkdownFormat.serialize(&doc).unwrap(),
        "\n## Plan\nbe **brave**\n"
    );
}
