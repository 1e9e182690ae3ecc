//! End-to-end typing scenarios, serialized to markdown at the end.

use super::{editor, type_script};
use slipmark_core::editing::KeyOutcome;
use slipmark_core::formats::markdown::serializer::{serialize_document, Target};
use slipmark_core::model::{BlockType, InlineType, MarkFamily, Node, DATA_HREF, DATA_TEXT};

#[test]
fn hash_space_makes_empty_heading() {
    let mut ed = editor();
    let outcomes = type_script(&mut ed, "# ");
    assert_eq!(
        outcomes[1],
        KeyOutcome::Handled {
            plugin: "block-prefix".into()
        }
    );

    let doc = ed.value().document();
    assert_eq!(doc.nodes.len(), 1);
    let heading = doc.block(&[0]).unwrap();
    assert_eq!(heading.ty, BlockType::Heading(1));
    assert_eq!(heading.text(), "");
    assert_eq!(serialize_document(doc, Target::Markdown), "");
}

#[test]
fn link_then_space_makes_link_container() {
    let mut ed = editor();
    let outcomes = type_script(&mut ed, "[label](http://x.io) ");
    assert_eq!(
        outcomes.last(),
        Some(&KeyOutcome::Handled {
            plugin: "inline".into()
        })
    );

    let doc = ed.value().document();
    let container = doc.block(&[0]).unwrap();
    assert_eq!(container.ty, BlockType::Container(MarkFamily::Link));
    let Node::Inline(link) = &container.nodes[0] else {
        panic!("expected a link inline, got {:?}", container.nodes);
    };
    assert_eq!(link.ty, InlineType::Link);
    assert_eq!(link.data.get(DATA_TEXT).map(String::as_str), Some("label"));
    assert_eq!(link.data.get(DATA_HREF).map(String::as_str), Some("http://x.io"));
    assert_eq!(
        serialize_document(doc, Target::Markdown),
        "[label](http://x.io)\n"
    );
}

#[test]
fn closing_backtick_makes_code_and_backspace_restores_it() {
    let mut ed = editor();
    type_script(&mut ed, "`code`");

    let container = ed.value().document().block(&[0]).unwrap();
    assert_eq!(container.ty, BlockType::Container(MarkFamily::Code));
    let Node::Inline(code) = &container.nodes[0] else {
        panic!("expected a code inline, got {:?}", container.nodes);
    };
    assert_eq!(code.ty, InlineType::Code);
    assert_eq!(code.text(), "code");

    let outcomes = type_script(&mut ed, "{backspace}");
    assert_eq!(
        outcomes[0],
        KeyOutcome::Handled {
            plugin: "inline".into()
        }
    );
    let doc = ed.value().document();
    assert_eq!(doc.nodes.len(), 1);
    let block = doc.block(&[0]).unwrap();
    assert_eq!(block.ty, BlockType::Paragraph);
    assert_eq!(block.text(), "`code");
}

#[test]
fn typing_continues_after_a_conversion() {
    let mut ed = editor();
    type_script(&mut ed, "so **bold**and on");
    let doc = ed.value().document();
    assert_eq!(doc.nodes.len(), 2);
    assert_eq!(doc.block(&[1]).unwrap().ty, BlockType::Paragraph);
    assert_eq!(
        serialize_document(doc, Target::Markdown),
        "so **bold**and on\n"
    );
}

#[test]
fn headings_and_quotes_export_to_markdown() {
    let mut ed = editor();
    type_script(&mut ed, "## Notes\n> quoted");
    let doc = ed.value().document();
    assert_eq!(
        serialize_document(doc, Target::Markdown),
        "\n## Notes\n\n> quoted\n"
    );
}
