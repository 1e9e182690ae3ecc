//! Inline delimiter shortcuts.
//!
//! Typing the closing delimiter of `` `code` ``, `*italic*`, `_underline_`,
//! `**bold**`, `__bold__` or `~~strike~~`, or a space/enter after
//! `[label](href)`, replaces the literal with an inline node. The block is
//! retyped to the container of the inline's family and split, so typing
//! continues in a fresh paragraph.
//!
//! Backspace undoes the conversion when the cursor sits at the start of the
//! container, right after its inline, or at the start of the empty paragraph
//! the split left behind.

use super::AutoformatPlugin;
use crate::editing::{Change, Key, KeyEvent, Point, Selection, Value};
use crate::model::content;
use crate::model::{
    Block, BlockType, Data, Inline, InlineType, MarkFamily, DATA_HREF, DATA_PREFIX, DATA_TEXT,
};
use crate::pattern::{Grammar, Trigger};
use std::sync::Arc;
use tracing::{debug, trace};

pub struct InlinePlugin {
    grammar: Arc<Grammar>,
}

impl InlinePlugin {
    pub fn new(grammar: Arc<Grammar>) -> Self {
        InlinePlugin { grammar }
    }

    /// `typed` is the character about to be inserted, `None` for space and
    /// enter.
    fn convert(&self, value: &Value, typed: Option<char>) -> Option<Change> {
        let trigger = match typed {
            None => Trigger::Boundary,
            Some(c @ ('`' | '*' | '_' | '~')) => Trigger::Char(c),
            Some(_) => return None,
        };
        if value.is_expanded() {
            return None;
        }
        let block = value.start_block()?;
        if block.ty.is_code() {
            return None;
        }

        let mut probe = value.text_before_cursor();
        probe.extend(typed);
        let Some(shortcut) = self.grammar.classify(&probe, trigger) else {
            trace!(probe = %probe, "no inline shortcut");
            return None;
        };
        let found = self.grammar.get_data(&probe, shortcut)?;
        let container_data = without_prefix(block);
        let ty = shortcut.inline_type();
        let family = ty.family()?;
        debug!(shortcut = shortcut.name(), text = %found.text, "inline shortcut");

        // The trigger character was never inserted, so it is not deleted.
        let delete = found.matched.chars().count() - usize::from(typed.is_some());
        let text_len = isize::try_from(found.text.chars().count()).ok()?;
        let mut data = Data::new();
        data.insert(DATA_TEXT.to_string(), found.text.clone());
        if let Some(href) = found.href {
            data.insert(DATA_HREF.to_string(), href);
        }

        Some(
            Change::new()
                .delete_backward(delete)
                .insert_text(found.text)
                .extend(-text_len)
                .wrap_inline(ty, data)
                .collapse_to_end()
                .set_block(BlockType::Container(family))
                .set_block_data(container_data)
                .then(escape_container()),
        )
    }

    fn on_enter(&self, value: &Value) -> Option<Change> {
        if value.is_expanded() {
            return None;
        }
        if value.start_block()?.ty.container_family().is_some() {
            return Some(escape_container());
        }
        self.convert(value, None)
    }

    fn on_backspace(&self, value: &Value) -> Option<Change> {
        if value.is_expanded() {
            return None;
        }
        let offset = value.start_offset();
        let block = value.start_block()?;

        if let Some(family) = block.ty.container_family() {
            let (start, end, inline) = family_inline(block, family)?;
            if offset != 0 && offset != end {
                return None;
            }
            return revert(value.start_path(), block, start, end, inline, None);
        }

        // The empty paragraph produced by the conversion split.
        if offset != 0 || block.ty != BlockType::Paragraph || block.text_len() != 0 {
            return None;
        }
        let previous = value.previous_sibling()?;
        let family = previous.ty.container_family()?;
        let (start, end, inline) = family_inline(previous, family)?;
        let mut container_path = value.start_path().to_vec();
        let last = container_path.len() - 1;
        container_path[last] -= 1;
        revert(
            &container_path,
            previous,
            start,
            end,
            inline,
            Some(value.start_path().to_vec()),
        )
    }
}

impl AutoformatPlugin for InlinePlugin {
    fn name(&self) -> &str {
        "inline"
    }

    fn on_key_down(&self, event: &KeyEvent, value: &Value) -> Option<Change> {
        match event.key {
            Key::Space => self.convert(value, None),
            Key::Enter => self.on_enter(value),
            Key::Backspace => self.on_backspace(value),
            Key::Char(_) => self.convert(value, Some(event.typed_char()?)),
        }
    }
}

/// Split the block at the cursor and continue in a data-less paragraph.
fn escape_container() -> Change {
    Change::new()
        .split_block()
        .set_block(BlockType::Paragraph)
        .set_block_data(Data::new())
}

/// Block data with the typed block prefix dropped. A container or a
/// reverted paragraph has no prefix of its own to restore.
fn without_prefix(block: &Block) -> Data {
    let mut data = block.data.clone();
    data.remove(DATA_PREFIX);
    data
}

fn family_inline(block: &Block, family: MarkFamily) -> Option<(usize, usize, &Inline)> {
    content::find_inline(&block.nodes, &|inline| inline.ty.family() == Some(family))
}

/// Replace the inline at `start..end` of `container`, found at `path`, with
/// its markdown source.
fn revert(
    path: &[usize],
    container: &Block,
    start: usize,
    end: usize,
    inline: &Inline,
    remove: Option<Vec<usize>>,
) -> Option<Change> {
    let literal = revert_literal(inline)?;
    debug!(inline = %inline.ty, literal = %literal, "reverting inline shortcut");
    let mut change = Change::new();
    if let Some(remove) = remove {
        change = change.remove_block(remove);
    }
    Some(
        change
            .select(Selection::new(
                Point::new(path.to_vec(), start),
                Point::new(path.to_vec(), end),
            ))
            .delete_selection()
            .insert_text(literal)
            .set_block(BlockType::Paragraph)
            .set_block_data(without_prefix(container)),
    )
}

/// The markdown source put back on reversal: the full `[text](href)` for
/// links, otherwise the opening delimiter followed by the text (`**bold`,
/// `` `code ``).
pub fn revert_literal(inline: &Inline) -> Option<String> {
    let text = inline
        .data
        .get(DATA_TEXT)
        .cloned()
        .unwrap_or_else(|| inline.text());
    match &inline.ty {
        InlineType::Link => {
            let href = inline.data.get(DATA_HREF)?;
            Some(format!("[{text}]({href})"))
        }
        ty => {
            let delimiter = ty.delimiter()?;
            Some(format!("{delimiter}{text}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Delimiter, Document, Node};
    use crate::pattern::AutoformatOptions;

    fn plugin() -> InlinePlugin {
        InlinePlugin::new(Arc::new(Grammar::new(&AutoformatOptions::default()).unwrap()))
    }

    fn typed(text: &str) -> Value {
        Value::from_document(Document::from_paragraphs([text]))
    }

    fn press(value: &Value, event: KeyEvent) -> Value {
        let change = plugin().on_key_down(&event, value).unwrap();
        value.apply(&change).unwrap()
    }

    #[test]
    fn closing_backtick_makes_code() {
        let next = press(&typed("`code"), KeyEvent::char('`'));
        let container = next.document().block(&[0]).unwrap();
        assert_eq!(container.ty, BlockType::Container(MarkFamily::Code));
        let Node::Inline(code) = &container.nodes[0] else {
            panic!("expected code inline");
        };
        assert_eq!(code.ty, InlineType::Code);
        assert_eq!(code.text(), "code");
        assert_eq!(next.start_path(), &[1]);
        assert_eq!(next.start_block().unwrap().ty, BlockType::Paragraph);
    }

    #[test]
    fn shifted_eight_closes_bold() {
        let next = press(&typed("so **bold*"), KeyEvent::shifted('8'));
        let container = next.document().block(&[0]).unwrap();
        assert_eq!(container.ty, BlockType::Container(MarkFamily::Bold));
        assert_eq!(container.text(), "so bold");
        let (start, end, bold) = family_inline(container, MarkFamily::Bold).unwrap();
        assert_eq!((start, end), (3, 7));
        assert_eq!(bold.ty, InlineType::Bold(Delimiter::Asterisk));
    }

    #[test]
    fn plain_characters_are_not_handled() {
        assert!(plugin().on_key_down(&KeyEvent::char('a'), &typed("*x")).is_none());
        assert!(plugin().on_key_down(&KeyEvent::char('*'), &typed("*")).is_none());
    }

    #[test]
    fn code_blocks_are_left_alone() {
        let mut doc = Document::from_paragraphs(["`x"]);
        if let Some(block) = doc.block_mut(&[0]) {
            block.ty = BlockType::CodeBlock;
        }
        let value = Value::from_document(doc);
        assert!(plugin().on_key_down(&KeyEvent::char('`'), &value).is_none());
    }

    #[test]
    fn enter_in_container_escapes() {
        let converted = press(&typed("`x"), KeyEvent::char('`'));
        let back = Value::with_selection(
            converted.document().clone(),
            Selection::collapsed(Point::new(vec![0], 1)),
        )
        .unwrap();
        let next = press(&back, KeyEvent::enter());
        assert_eq!(next.document().nodes.len(), 3);
        assert_eq!(next.start_path(), &[1]);
    }

    #[test]
    fn backspace_at_container_start_reverts() {
        let converted = press(&typed("`code"), KeyEvent::char('`'));
        let at_start = Value::with_selection(
            converted.document().clone(),
            Selection::collapsed(Point::new(vec![0], 0)),
        )
        .unwrap();
        let reverted = press(&at_start, KeyEvent::backspace());
        let block = reverted.document().block(&[0]).unwrap();
        assert_eq!(block.ty, BlockType::Paragraph);
        assert_eq!(block.text(), "`code");
        assert_eq!(reverted.selection(), &Selection::collapsed(Point::new(vec![0], 5)));
    }

    #[test]
    fn backspace_in_fresh_paragraph_reverts_and_removes_it() {
        let converted = press(&typed("go [a](http://b.c)"), KeyEvent::space());
        let reverted = press(&converted, KeyEvent::backspace());
        assert_eq!(reverted.document(), typed("go [a](http://b.c)").document());
        assert_eq!(reverted.start_offset(), 18);
    }

    #[test]
    fn backspace_mid_container_is_not_handled() {
        let converted = press(&typed("ab `x"), KeyEvent::char('`'));
        let inside = Value::with_selection(
            converted.document().clone(),
            Selection::collapsed(Point::new(vec![0], 1)),
        )
        .unwrap();
        assert!(plugin().on_key_down(&KeyEvent::backspace(), &inside).is_none());
    }

    #[test]
    fn revert_literal_keeps_only_the_opening_delimiter() {
        let with_text = |ty: InlineType, text: &str| {
            let mut data = Data::new();
            data.insert(DATA_TEXT.into(), text.into());
            Inline::new(ty, data, vec![Node::text(text)])
        };
        assert_eq!(revert_literal(&with_text(InlineType::Code, "c")).unwrap(), "`c");
        assert_eq!(
            revert_literal(&with_text(InlineType::Bold(Delimiter::Underscore), "b")).unwrap(),
            "__b"
        );
        assert_eq!(
            revert_literal(&with_text(InlineType::Bold(Delimiter::Asterisk), "b")).unwrap(),
            "**b"
        );
        assert_eq!(revert_literal(&with_text(InlineType::Strike, "s")).unwrap(), "~~s");
        assert_eq!(revert_literal(&with_text(InlineType::Link, "l")), None);
    }
}
