//! Inline delimiter shortcuts typed through the editor.

use super::{editor, editor_on, type_script};
use slipmark_core::editing::{Editor, KeyEvent, KeyOutcome, Point, Selection, Value};
use slipmark_core::model::{
    Block, BlockType, Delimiter, Document, InlineType, MarkFamily, Node, DATA_PREFIX, DATA_TEXT,
};
use slipmark_core::pattern::AutoformatOptions;
use std::sync::Arc;

fn inline_of(block: &Block) -> (InlineType, String) {
    block
        .nodes
        .iter()
        .find_map(|node| match node {
            Node::Inline(inline) => Some((inline.ty.clone(), inline.text())),
            _ => None,
        })
        .expect("container holds an inline")
}

#[test]
fn bold_wins_over_two_italics() {
    let mut ed = editor();
    let outcomes = type_script(&mut ed, "**bold**");
    // Only the final asterisk converts; the half-closed `**bold*` does not.
    assert_eq!(
        outcomes
            .iter()
            .filter(|o| matches!(o, KeyOutcome::Handled { .. }))
            .count(),
        1
    );
    let container = ed.value().document().block(&[0]).unwrap();
    assert_eq!(container.ty, BlockType::Container(MarkFamily::Bold));
    assert_eq!(
        inline_of(container),
        (InlineType::Bold(Delimiter::Asterisk), "bold".to_string())
    );
}

#[test]
fn shifted_keys_close_strike_and_underline() {
    let mut ed = editor_on("~~old~");
    ed.key_down(&KeyEvent::shifted('`')).unwrap();
    let container = ed.value().document().block(&[0]).unwrap();
    assert_eq!(inline_of(container), (InlineType::Strike, "old".to_string()));

    let mut ed = editor_on("_soft");
    ed.key_down(&KeyEvent::shifted('-')).unwrap();
    let container = ed.value().document().block(&[0]).unwrap();
    assert_eq!(container.ty, BlockType::Container(MarkFamily::Italic));
    assert_eq!(
        inline_of(container),
        (InlineType::Italic(Delimiter::Underscore), "soft".to_string())
    );
}

#[test]
fn double_underscore_makes_bold() {
    let mut ed = editor();
    type_script(&mut ed, "__strong__");
    let container = ed.value().document().block(&[0]).unwrap();
    assert_eq!(
        inline_of(container),
        (InlineType::Bold(Delimiter::Underscore), "strong".to_string())
    );
}

#[test]
fn inline_payload_keeps_the_text() {
    let mut ed = editor();
    type_script(&mut ed, "*it*");
    let container = ed.value().document().block(&[0]).unwrap();
    let Node::Inline(italic) = &container.nodes[0] else {
        panic!("expected an inline");
    };
    assert_eq!(italic.data.get(DATA_TEXT).map(String::as_str), Some("it"));
}

#[test]
fn no_match_keeps_the_same_snapshot() {
    let mut ed = editor_on("nothing *here");
    let before = ed.snapshot();
    assert_eq!(ed.dispatch(&KeyEvent::char('`')).unwrap(), None);
    assert!(Arc::ptr_eq(&before, &ed.snapshot()));
}

#[test]
fn link_closing_paren_does_not_convert() {
    let mut ed = editor();
    let outcomes = type_script(&mut ed, "[a](http://b.c)");
    assert!(outcomes.iter().all(|o| *o == KeyOutcome::Default));
    assert_eq!(ed.value().document().block(&[0]).unwrap().ty, BlockType::Paragraph);
}

#[test]
fn link_with_invalid_href_stays_text() {
    let mut ed = editor_on("[a](b c)");
    assert_eq!(ed.key_down(&KeyEvent::space()).unwrap(), KeyOutcome::Default);
    assert_eq!(ed.value().document().text(), "[a](b c) ");
}

#[test]
fn enter_after_link_converts() {
    let mut ed = editor_on("[a](http://b.c)");
    let outcome = ed.key_down(&KeyEvent::enter()).unwrap();
    assert_eq!(
        outcome,
        KeyOutcome::Handled {
            plugin: "inline".into()
        }
    );
    let doc = ed.value().document();
    assert_eq!(doc.block(&[0]).unwrap().ty, BlockType::Container(MarkFamily::Link));
    assert_eq!(ed.value().start_path(), &[1]);
}

#[test]
fn expanded_selection_is_never_converted() {
    let doc = Document::from_paragraphs(["`code"]);
    let value = Value::with_selection(
        doc,
        Selection::new(Point::new(vec![0], 1), Point::new(vec![0], 5)),
    )
    .unwrap();
    let mut ed = Editor::with_options(value, &AutoformatOptions::default()).unwrap();
    assert_eq!(ed.dispatch(&KeyEvent::char('`')).unwrap(), None);
}

#[test]
fn disabled_shortcuts_stay_literal() {
    let options = AutoformatOptions {
        disabled: vec!["code".to_string(), "heading".to_string()],
        ..AutoformatOptions::default()
    };
    let mut ed = Editor::with_options(Value::default(), &options).unwrap();
    let outcomes = ed
        .run_script(&slipmark_core::editing::parse_key_script("# `x`").unwrap())
        .unwrap();
    assert!(outcomes.iter().all(|o| *o == KeyOutcome::Default));
    assert_eq!(ed.value().document().text(), "# `x`");
}

#[test]
fn unknown_disabled_name_is_rejected() {
    let options = AutoformatOptions {
        disabled: vec!["blink".to_string()],
        ..AutoformatOptions::default()
    };
    assert!(Editor::with_options(Value::default(), &options).is_err());
}

#[test]
fn strike_reverts_to_opening_delimiter_and_text() {
    let mut ed = editor();
    type_script(&mut ed, "~~gone~~");
    assert_eq!(
        ed.value().document().block(&[0]).unwrap().ty,
        BlockType::Container(MarkFamily::Strike)
    );
    type_script(&mut ed, "{backspace}");
    let doc = ed.value().document();
    assert_eq!(doc.nodes.len(), 1);
    assert_eq!(doc.block(&[0]).unwrap().text(), "~~gone");
    assert_eq!(ed.value().start_offset(), 6);
}

#[test]
fn conversion_in_a_heading_drops_its_prefix() {
    let mut ed = editor();
    type_script(&mut ed, "# so `x`");
    let container = ed.value().document().block(&[0]).unwrap();
    assert_eq!(container.ty, BlockType::Container(MarkFamily::Code));
    assert_eq!(container.data.get(DATA_PREFIX), None);

    type_script(&mut ed, "{backspace}");
    let doc = ed.value().document();
    assert_eq!(doc.nodes.len(), 1);
    let block = doc.block(&[0]).unwrap();
    assert_eq!(block.ty, BlockType::Paragraph);
    assert_eq!(block.text(), "so `x");
    assert!(block.data.is_empty());
    assert!(!doc.to_json_pretty().unwrap().contains("\"prefix\""));
}
