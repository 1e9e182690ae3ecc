//! The transform builder.
//!
//! A [`Change`] is an ordered list of [`Operation`]s. Plugins build one per
//! keystroke; [`Value::apply`](super::Value::apply) replays it on a copy of the
//! snapshot and either commits all of it or none of it.

use super::selection::Selection;
use crate::model::{BlockType, Data, InlineType};

/// One step of a change. Steps act on the current selection unless they name
/// a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Delete the selection when expanded, otherwise up to `n` chars before
    /// the cursor within its block.
    DeleteBackward(usize),
    /// Insert text at the cursor, replacing the selection when expanded.
    InsertText(String),
    /// Move the focus by a signed number of chars within its block.
    Extend(isize),
    /// Wrap the selected range in a new inline.
    WrapInline { ty: InlineType, data: Data },
    CollapseToEnd,
    /// Delete from the start of the block up to the cursor.
    DeleteToBlockStart,
    DeleteSelection,
    Select(Selection),
    /// Retype the block at the selection start. Data is kept.
    SetBlock(BlockType),
    /// Replace the data of the block at the selection start.
    SetBlockData(Data),
    /// Wrap the block at the selection start in a new parent block.
    WrapBlock(BlockType),
    /// Lift the block at the selection start out of its parent, which must
    /// have the given type. The parent is split around it.
    UnwrapBlock(BlockType),
    /// Split the block at the cursor. The new block copies type and data,
    /// except the typed prefix.
    SplitBlock,
    /// Remove the block at a path, along with parents left empty.
    RemoveBlock(Vec<usize>),
    /// Append the cursor block's content to the previous leaf block.
    MergeWithPrevious,
}

/// An ordered, chainable list of operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Change {
    operations: Vec<Operation>,
}

impl Change {
    pub fn new() -> Self {
        Change::default()
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn push(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Append another change's operations after this one's.
    pub fn then(mut self, other: Change) -> Self {
        self.operations.extend(other.operations);
        self
    }

    pub fn delete_backward(self, n: usize) -> Self {
        self.push(Operation::DeleteBackward(n))
    }

    pub fn insert_text(self, text: impl Into<String>) -> Self {
        self.push(Operation::InsertText(text.into()))
    }

    pub fn extend(self, n: isize) -> Self {
        self.push(Operation::Extend(n))
    }

    pub fn wrap_inline(self, ty: InlineType, data: Data) -> Self {
        self.push(Operation::WrapInline { ty, data })
    }

    pub fn collapse_to_end(self) -> Self {
        self.push(Operation::CollapseToEnd)
    }

    pub fn delete_to_block_start(self) -> Self {
        self.push(Operation::DeleteToBlockStart)
    }

    pub fn delete_selection(self) -> Self {
        self.push(Operation::DeleteSelection)
    }

    pub fn select(self, selection: Selection) -> Self {
        self.push(Operation::Select(selection))
    }

    pub fn set_block(self, ty: BlockType) -> Self {
        self.push(Operation::SetBlock(ty))
    }

    pub fn set_block_data(self, data: Data) -> Self {
        self.push(Operation::SetBlockData(data))
    }

    pub fn wrap_block(self, ty: BlockType) -> Self {
        self.push(Operation::WrapBlock(ty))
    }

    pub fn unwrap_block(self, ty: BlockType) -> Self {
        self.push(Operation::UnwrapBlock(ty))
    }

    pub fn split_block(self) -> Self {
        self.push(Operation::SplitBlock)
    }

    pub fn remove_block(self, path: Vec<usize>) -> Self {
        self.push(Operation::RemoveBlock(path))
    }

    pub fn merge_with_previous(self) -> Self {
        self.push(Operation::MergeWithPrevious)
    }
}
