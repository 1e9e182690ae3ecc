//! Block prefix shortcuts: `#`..`######`, `>`, `+` and code fences.
//!
//! Space after a prefix retypes the block and removes the prefix; the removed
//! text is kept in the block data so Backspace at the start of the block can
//! put it back exactly as typed.

use super::AutoformatPlugin;
use crate::editing::{Change, Key, KeyEvent, Value};
use crate::model::{Block, BlockType, Data, DATA_PREFIX};
use crate::pattern::Grammar;
use std::sync::Arc;
use tracing::{debug, trace};

pub struct BlockPrefixPlugin {
    grammar: Arc<Grammar>,
}

impl BlockPrefixPlugin {
    pub fn new(grammar: Arc<Grammar>) -> Self {
        BlockPrefixPlugin { grammar }
    }

    fn on_space(&self, value: &Value) -> Option<Change> {
        if value.is_expanded() {
            return None;
        }
        let block = value.start_block()?;
        let literal = value.text_before_cursor();
        let Some(ty) = self.grammar.block_prefix_type(&strip_whitespace(&literal)) else {
            trace!(text = %literal, "no block prefix");
            return None;
        };
        if block.ty == BlockType::CodeBlock {
            return None;
        }
        if ty == BlockType::ListItem && block.ty == BlockType::ListItem {
            return None;
        }

        debug!(block = %ty, prefix = %literal, "block prefix shortcut");
        let mut data = block.data.clone();
        data.insert(DATA_PREFIX.to_string(), literal);
        let mut change = Change::new().set_block(ty.clone()).set_block_data(data);
        if ty == BlockType::ListItem {
            change = change.wrap_block(BlockType::BulletedList);
        }
        Some(change.delete_to_block_start())
    }

    fn on_backspace(&self, value: &Value) -> Option<Change> {
        if value.is_expanded() || value.start_offset() != 0 {
            return None;
        }
        let block = value.start_block()?;
        if !block.ty.is_prefix_type() {
            return None;
        }
        debug!(block = %block.ty, "reverting block prefix");
        Some(revert(value, block, true))
    }

    fn on_enter(&self, value: &Value) -> Option<Change> {
        if value.is_expanded() {
            return None;
        }
        let block = value.start_block()?;
        let len = block.text_len();

        // Enter on an empty typed block leaves the block type behind.
        if value.start_offset() == 0 && len == 0 {
            return block.ty.is_prefix_type().then(|| revert(value, block, false));
        }
        if value.end_offset() != len {
            return None;
        }

        let literal = value.text_before_cursor();
        let fenced = self.grammar.block_prefix_type(&strip_whitespace(&literal))
            == Some(BlockType::CodeBlock);
        if fenced && block.ty != BlockType::CodeBlock {
            debug!(fence = %literal, "code fence");
            let mut data = block.data.clone();
            data.insert(DATA_PREFIX.to_string(), literal);
            return Some(
                Change::new()
                    .set_block(BlockType::CodeBlock)
                    .set_block_data(data)
                    .delete_to_block_start(),
            );
        }

        if block.ty == BlockType::ListItem {
            return Some(
                Change::new()
                    .split_block()
                    .set_block(BlockType::Paragraph)
                    .set_block_data(Data::new()),
            );
        }
        None
    }
}

impl AutoformatPlugin for BlockPrefixPlugin {
    fn name(&self) -> &str {
        "block-prefix"
    }

    fn on_key_down(&self, event: &KeyEvent, value: &Value) -> Option<Change> {
        match event.key {
            Key::Space => self.on_space(value),
            Key::Backspace => self.on_backspace(value),
            Key::Enter => self.on_enter(value),
            Key::Char(_) => None,
        }
    }
}

/// Turn a typed block back into a paragraph, lifting list items out of
/// their list and optionally restoring the prefix text.
fn revert(value: &Value, block: &Block, restore_prefix: bool) -> Change {
    let mut data = block.data.clone();
    let prefix = data.remove(DATA_PREFIX);
    let mut change = Change::new()
        .set_block(BlockType::Paragraph)
        .set_block_data(data);
    let in_list = value
        .start_parent()
        .is_some_and(|parent| parent.ty == BlockType::BulletedList);
    if block.ty == BlockType::ListItem && in_list {
        change = change.unwrap_block(BlockType::BulletedList);
    }
    match prefix {
        Some(prefix) if restore_prefix => change.insert_text(prefix),
        _ => change,
    }
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
