//! Block prefix shortcuts typed through the editor.

use super::{editor, editor_on, type_script};
use slipmark_core::editing::{KeyEvent, KeyOutcome};
use slipmark_core::model::{BlockType, DATA_PREFIX};

#[test]
fn every_heading_level() {
    for level in 1..=6u8 {
        let mut ed = editor();
        type_script(&mut ed, &format!("{} Title", "#".repeat(usize::from(level))));
        let block = ed.value().document().block(&[0]).unwrap();
        assert_eq!(block.ty, BlockType::Heading(level));
        assert_eq!(block.text(), "Title");
    }
}

#[test]
fn seven_hashes_stay_literal() {
    let mut ed = editor();
    let outcomes = type_script(&mut ed, "####### x");
    assert!(outcomes.iter().all(|o| *o == KeyOutcome::Default));
    assert_eq!(ed.value().document().text(), "####### x");
}

#[test]
fn prefix_is_stored_for_reversal() {
    let mut ed = editor();
    type_script(&mut ed, "> ");
    let block = ed.value().document().block(&[0]).unwrap();
    assert_eq!(block.ty, BlockType::BlockQuote);
    assert_eq!(block.data.get(DATA_PREFIX).map(String::as_str), Some(">"));
}

#[test]
fn list_item_is_wrapped_in_a_list() {
    let mut ed = editor();
    type_script(&mut ed, "+ milk");
    let doc = ed.value().document();
    assert_eq!(doc.block(&[0]).unwrap().ty, BlockType::BulletedList);
    let item = doc.block(&[0, 0]).unwrap();
    assert_eq!(item.ty, BlockType::ListItem);
    assert_eq!(item.text(), "milk");
    assert_eq!(ed.value().start_path(), &[0, 0]);
}

#[test]
fn plus_inside_a_list_item_is_literal() {
    let mut ed = editor();
    type_script(&mut ed, "+ +");
    let outcome = ed.key_down(&KeyEvent::space()).unwrap();
    assert_eq!(outcome, KeyOutcome::Default);
    let doc = ed.value().document();
    assert_eq!(doc.block(&[0, 0]).unwrap().text(), "+ ");
}

#[test]
fn backspace_at_start_of_list_item_lifts_it_out() {
    let mut ed = editor();
    type_script(&mut ed, "+ ");
    type_script(&mut ed, "{backspace}");
    let doc = ed.value().document();
    assert_eq!(doc.nodes.len(), 1);
    let block = doc.block(&[0]).unwrap();
    assert_eq!(block.ty, BlockType::Paragraph);
    assert_eq!(block.text(), "+");
    assert!(block.data.is_empty());
}

#[test]
fn enter_in_list_item_starts_a_paragraph() {
    let mut ed = editor();
    type_script(&mut ed, "+ one\nafter");
    let doc = ed.value().document();
    assert_eq!(doc.block(&[0, 0]).unwrap().ty, BlockType::ListItem);
    let next = doc.block(&[0, 1]).unwrap();
    assert_eq!(next.ty, BlockType::Paragraph);
    assert_eq!(next.text(), "after");
    assert!(next.data.is_empty());
}

#[test]
fn enter_on_empty_heading_drops_the_type() {
    let mut ed = editor();
    type_script(&mut ed, "# ");
    let outcome = ed.key_down(&KeyEvent::enter()).unwrap();
    assert_eq!(
        outcome,
        KeyOutcome::Handled {
            plugin: "block-prefix".into()
        }
    );
    let block = ed.value().document().block(&[0]).unwrap();
    assert_eq!(block.ty, BlockType::Paragraph);
    assert_eq!(block.text(), "");
}

#[test]
fn fence_then_enter_opens_code_block() {
    let mut ed = editor();
    type_script(&mut ed, "```\nlet x = *a*");
    let doc = ed.value().document();
    assert_eq!(doc.nodes.len(), 1);
    let block = doc.block(&[0]).unwrap();
    assert_eq!(block.ty, BlockType::CodeBlock);
    assert_eq!(block.text(), "let x = *a*");
}

#[test]
fn prefixes_do_nothing_inside_code_blocks() {
    let mut ed = editor();
    type_script(&mut ed, "``` ");
    assert_eq!(ed.value().document().block(&[0]).unwrap().ty, BlockType::CodeBlock);
    type_script(&mut ed, "# x");
    let block = ed.value().document().block(&[0]).unwrap();
    assert_eq!(block.ty, BlockType::CodeBlock);
    assert_eq!(block.text(), "# x");
}

#[test]
fn prefix_after_text_is_not_a_shortcut() {
    let mut ed = editor_on("see #");
    assert_eq!(ed.key_down(&KeyEvent::space()).unwrap(), KeyOutcome::Default);
    assert_eq!(ed.value().document().block(&[0]).unwrap().ty, BlockType::Paragraph);
}

#[test]
fn heading_then_enter_then_backspace() {
    let mut ed = editor();
    type_script(&mut ed, "# Title\n");
    let next = ed.value().document().block(&[1]).unwrap();
    assert_eq!(next.ty, BlockType::Heading(1));
    assert_eq!(next.data.get(DATA_PREFIX), None);

    type_script(&mut ed, "{backspace}");
    let doc = ed.value().document();
    assert_eq!(doc.block(&[0]).unwrap().ty, BlockType::Heading(1));
    assert_eq!(doc.block(&[0]).unwrap().text(), "Title");
    let block = doc.block(&[1]).unwrap();
    assert_eq!(block.ty, BlockType::Paragraph);
    assert_eq!(block.text(), "");
}

#[test]
fn second_code_line_backspace_does_not_restore_the_fence() {
    let mut ed = editor();
    type_script(&mut ed, "```\nlet x\n{backspace}");
    let doc = ed.value().document();
    assert_eq!(doc.nodes.len(), 2);
    let first = doc.block(&[0]).unwrap();
    assert_eq!(first.ty, BlockType::CodeBlock);
    assert_eq!(first.data.get(DATA_PREFIX).map(String::as_str), Some("```"));
    let block = doc.block(&[1]).unwrap();
    assert_eq!(block.ty, BlockType::Paragraph);
    assert_eq!(block.text(), "");
}

#[test]
fn only_the_prefixed_block_restores_its_prefix() {
    let mut ed = editor();
    type_script(&mut ed, "> a\nb");
    type_script(&mut ed, "{backspace}{backspace}");
    let doc = ed.value().document();
    assert_eq!(doc.block(&[1]).unwrap().ty, BlockType::Paragraph);
    assert_eq!(doc.block(&[1]).unwrap().text(), "");
    assert_eq!(doc.block(&[0]).unwrap().ty, BlockType::BlockQuote);
}
