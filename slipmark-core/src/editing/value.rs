//! Immutable editor snapshots.
//!
//! A [`Value`] pairs a document with a selection that always points into a
//! leaf block. Applying a [`Change`] never touches the receiver: the
//! operations run against a copy, and the copy is returned only if every
//! operation succeeded.

use super::change::{Change, Operation};
use super::selection::{Point, Selection};
use crate::error::TransformError;
use crate::model::content;
use crate::model::{Block, BlockType, Document, Node, DATA_PREFIX};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    document: Document,
    selection: Selection,
}

impl Default for Value {
    fn default() -> Self {
        Value::from_document(Document::default())
    }
}

impl Value {
    /// Wrap a document with the cursor at the end of its last leaf block.
    /// An empty document gets a single empty paragraph.
    pub fn from_document(mut document: Document) -> Self {
        let path = match document.leaf_paths().pop() {
            Some(path) => path,
            None => {
                document
                    .nodes
                    .push(Node::Block(Block::new(BlockType::Paragraph)));
                vec![document.nodes.len() - 1]
            }
        };
        let offset = document.block(&path).map(Block::text_len).unwrap_or(0);
        Value {
            document,
            selection: Selection::collapsed(Point::new(path, offset)),
        }
    }

    pub fn with_selection(document: Document, selection: Selection) -> Result<Self, TransformError> {
        let value = Value {
            document,
            selection,
        };
        value.check_point(&value.selection.anchor)?;
        value.check_point(&value.selection.focus)?;
        Ok(value)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_expanded(&self) -> bool {
        self.selection.is_expanded()
    }

    pub fn start_path(&self) -> &[usize] {
        &self.selection.start().path
    }

    pub fn start_offset(&self) -> usize {
        self.selection.start().offset
    }

    pub fn end_offset(&self) -> usize {
        self.selection.end().offset
    }

    pub fn start_block(&self) -> Option<&Block> {
        self.document.block(self.start_path())
    }

    pub fn end_block(&self) -> Option<&Block> {
        self.document.block(&self.selection.end().path)
    }

    /// The block holding the start block, if it is nested.
    pub fn start_parent(&self) -> Option<&Block> {
        let (_, parent) = self.start_path().split_last()?;
        self.document.block(parent)
    }

    /// The sibling right before the start block, if it is a block.
    pub fn previous_sibling(&self) -> Option<&Block> {
        let (&index, parent) = self.start_path().split_last()?;
        let siblings = if parent.is_empty() {
            &self.document.nodes
        } else {
            &self.document.block(parent)?.nodes
        };
        siblings.get(index.checked_sub(1)?)?.as_block()
    }

    /// Text of the start block left of the selection start.
    pub fn text_before_cursor(&self) -> String {
        self.start_block()
            .map(|block| block.text().chars().take(self.start_offset()).collect())
            .unwrap_or_default()
    }

    /// The leaf block preceding `path` in document order.
    pub fn previous_leaf_path(&self, path: &[usize]) -> Option<Vec<usize>> {
        self.document
            .leaf_paths()
            .into_iter()
            .filter(|p| p.as_slice() < path)
            .last()
    }

    /// Replay `change` on a copy of this snapshot.
    pub fn apply(&self, change: &Change) -> Result<Value, TransformError> {
        let mut next = self.clone();
        for operation in change.operations() {
            next.apply_operation(operation)?;
        }
        next.check_point(&next.selection.anchor)?;
        next.check_point(&next.selection.focus)?;
        tracing::trace!(operations = change.operations().len(), "applied change");
        Ok(next)
    }

    fn apply_operation(&mut self, operation: &Operation) -> Result<(), TransformError> {
        match operation {
            Operation::DeleteBackward(n) => {
                if self.selection.is_expanded() {
                    return self.delete_selection();
                }
                let focus = self.selection.focus.clone();
                let block = self.leaf_mut(&focus.path)?;
                check_offset(block, focus.offset)?;
                let start = focus.offset.saturating_sub(*n);
                content::delete_range(&mut block.nodes, start, focus.offset);
                self.selection = Selection::collapsed(Point::new(focus.path, start));
            }
            Operation::InsertText(text) => {
                if self.selection.is_expanded() {
                    self.delete_selection()?;
                }
                let focus = self.selection.focus.clone();
                let block = self.leaf_mut(&focus.path)?;
                check_offset(block, focus.offset)?;
                content::insert_text(&mut block.nodes, focus.offset, text);
                let offset = focus.offset + text.chars().count();
                self.selection = Selection::collapsed(Point::new(focus.path, offset));
            }
            Operation::Extend(n) => {
                let focus = &self.selection.focus;
                let len = self.leaf(&focus.path)?.text_len();
                let target = focus
                    .offset
                    .checked_add_signed(*n)
                    .filter(|target| *target <= len)
                    .ok_or(TransformError::OffsetOutOfRange {
                        offset: focus.offset,
                        len,
                    })?;
                self.selection.focus.offset = target;
            }
            Operation::WrapInline { ty, data } => {
                if !self.selection.is_within_one_block() {
                    return Err(TransformError::SelectionSpansBlocks);
                }
                if self.selection.is_collapsed() {
                    return Err(TransformError::EmptySelection);
                }
                let start = self.selection.start().clone();
                let end = self.selection.end().offset;
                let block = self.leaf_mut(&start.path)?;
                check_offset(block, end)?;
                content::wrap_range(&mut block.nodes, start.offset, end, ty.clone(), data.clone());
            }
            Operation::CollapseToEnd => {
                self.selection = Selection::collapsed(self.selection.end().clone());
            }
            Operation::DeleteToBlockStart => {
                let start = self.selection.start().clone();
                let block = self.leaf_mut(&start.path)?;
                check_offset(block, start.offset)?;
                content::delete_range(&mut block.nodes, 0, start.offset);
                self.selection = Selection::collapsed(Point::new(start.path, 0));
            }
            Operation::DeleteSelection => self.delete_selection()?,
            Operation::Select(selection) => {
                self.check_point(&selection.anchor)?;
                self.check_point(&selection.focus)?;
                self.selection = selection.clone();
            }
            Operation::SetBlock(ty) => {
                let path = self.selection.start().path.clone();
                self.leaf_mut(&path)?.ty = ty.clone();
            }
            Operation::SetBlockData(data) => {
                let path = self.selection.start().path.clone();
                self.leaf_mut(&path)?.data = data.clone();
            }
            Operation::WrapBlock(ty) => self.wrap_block(ty)?,
            Operation::UnwrapBlock(ty) => self.unwrap_block(ty)?,
            Operation::SplitBlock => self.split_block()?,
            Operation::RemoveBlock(path) => self.remove_block(path)?,
            Operation::MergeWithPrevious => self.merge_with_previous()?,
        }
        Ok(())
    }

    fn leaf(&self, path: &[usize]) -> Result<&Block, TransformError> {
        self.document
            .block(path)
            .filter(|block| block.is_leaf())
            .ok_or_else(|| TransformError::NoBlock(path.to_vec()))
    }

    fn leaf_mut(&mut self, path: &[usize]) -> Result<&mut Block, TransformError> {
        match self.document.block_mut(path) {
            Some(block) if block.is_leaf() => Ok(block),
            _ => Err(TransformError::NoBlock(path.to_vec())),
        }
    }

    fn check_point(&self, point: &Point) -> Result<(), TransformError> {
        check_offset(self.leaf(&point.path)?, point.offset).map(|_| ())
    }

    fn delete_selection(&mut self) -> Result<(), TransformError> {
        if self.selection.is_collapsed() {
            return Ok(());
        }
        if !self.selection.is_within_one_block() {
            return Err(TransformError::SelectionSpansBlocks);
        }
        let start = self.selection.start().clone();
        let end = self.selection.end().offset;
        let block = self.leaf_mut(&start.path)?;
        check_offset(block, end)?;
        content::delete_range(&mut block.nodes, start.offset, end);
        self.selection = Selection::collapsed(start);
        Ok(())
    }

    fn wrap_block(&mut self, ty: &BlockType) -> Result<(), TransformError> {
        let path = self.selection.start().path.clone();
        let no_block = || TransformError::NoBlock(path.clone());
        let (&index, _) = path.split_last().ok_or_else(no_block)?;
        let siblings = self.document.siblings_mut(&path).ok_or_else(no_block)?;
        if !matches!(siblings.get(index), Some(Node::Block(_))) {
            return Err(no_block());
        }
        let node = siblings.remove(index);
        siblings.insert(index, Node::Block(Block::with_nodes(ty.clone(), vec![node])));

        for point in self.selection.points_mut() {
            if point.path.starts_with(&path) {
                point.path.insert(path.len(), 0);
            }
        }
        Ok(())
    }

    fn unwrap_block(&mut self, ty: &BlockType) -> Result<(), TransformError> {
        let path = self.selection.start().path.clone();
        let no_wrapper = || TransformError::NoWrapper {
            path: path.clone(),
            expected: ty.to_string(),
        };
        let (&index, parent_path) = path.split_last().ok_or_else(no_wrapper)?;
        let (&parent_index, _) = parent_path.split_last().ok_or_else(no_wrapper)?;
        if !self.document.block(parent_path).is_some_and(|parent| parent.ty == *ty) {
            return Err(no_wrapper());
        }

        let siblings = self.document.siblings_mut(parent_path).ok_or_else(no_wrapper)?;
        let Node::Block(parent) = siblings.remove(parent_index) else {
            return Err(no_wrapper());
        };
        let mut before = parent.nodes;
        let after = before.split_off(index + 1);
        let node = before.pop().ok_or_else(no_wrapper)?;

        let has_before = !before.is_empty();
        let mut replacement = Vec::with_capacity(3);
        if has_before {
            replacement.push(Node::Block(Block {
                ty: parent.ty.clone(),
                data: parent.data.clone(),
                nodes: before,
            }));
        }
        replacement.push(node);
        if !after.is_empty() {
            replacement.push(Node::Block(Block {
                ty: parent.ty,
                data: parent.data,
                nodes: after,
            }));
        }
        let inserted = replacement.len();
        siblings.splice(parent_index..parent_index, replacement);

        for point in self.selection.points_mut() {
            point.path = rebase_after_unwrap(&point.path, parent_path, index, has_before, inserted);
        }
        Ok(())
    }

    fn split_block(&mut self) -> Result<(), TransformError> {
        if self.selection.is_expanded() {
            self.delete_selection()?;
        }
        let focus = self.selection.focus.clone();
        let (&index, _) = focus
            .path
            .split_last()
            .ok_or_else(|| TransformError::NoBlock(focus.path.clone()))?;

        let block = self.leaf_mut(&focus.path)?;
        check_offset(block, focus.offset)?;
        let (left, right) = content::split_at(std::mem::take(&mut block.nodes), focus.offset);
        block.nodes = left;
        // The prefix belongs to the block it was typed into.
        let mut data = block.data.clone();
        data.remove(DATA_PREFIX);
        let new_block = Block {
            ty: block.ty.clone(),
            data,
            nodes: right,
        };

        let siblings = self
            .document
            .siblings_mut(&focus.path)
            .ok_or_else(|| TransformError::NoBlock(focus.path.clone()))?;
        siblings.insert(index + 1, Node::Block(new_block));

        let mut path = focus.path;
        let last = path.len() - 1;
        path[last] = index + 1;
        self.selection = Selection::collapsed(Point::new(path, 0));
        Ok(())
    }

    fn remove_block(&mut self, path: &[usize]) -> Result<(), TransformError> {
        if self.document.block(path).is_none() {
            return Err(TransformError::NoBlock(path.to_vec()));
        }
        let mut target = path.to_vec();
        while target.len() > 1 {
            let parent = &target[..target.len() - 1];
            if !self.document.block(parent).is_some_and(|p| p.nodes.len() == 1) {
                break;
            }
            target.pop();
        }
        let previous = self.previous_leaf_path(&target);

        let (&index, _) = target
            .split_last()
            .ok_or_else(|| TransformError::NoBlock(path.to_vec()))?;
        let siblings = self
            .document
            .siblings_mut(&target)
            .ok_or_else(|| TransformError::NoBlock(path.to_vec()))?;
        siblings.remove(index);

        // A cursor inside the removed subtree moves to the end of the leaf
        // before it, or to the start of the document.
        let fallback = match previous {
            Some(previous) => {
                let len = self.document.block(&previous).map(Block::text_len).unwrap_or(0);
                Point::new(previous, len)
            }
            None => self
                .document
                .leaf_paths()
                .into_iter()
                .next()
                .map(|first| Point::new(first, 0))
                .unwrap_or_default(),
        };
        let level = target.len() - 1;
        for point in self.selection.points_mut() {
            if point.path.starts_with(&target) {
                *point = fallback.clone();
            } else if point.path.len() > level
                && point.path[..level] == target[..level]
                && point.path[level] > index
            {
                point.path[level] -= 1;
            }
        }
        Ok(())
    }

    fn merge_with_previous(&mut self) -> Result<(), TransformError> {
        let path = self.selection.focus.path.clone();
        self.leaf(&path)?;
        let previous = self
            .previous_leaf_path(&path)
            .ok_or_else(|| TransformError::NoPreviousBlock(path.clone()))?;
        let offset = self.leaf(&previous)?.text_len();
        let moved = std::mem::take(&mut self.leaf_mut(&path)?.nodes);

        // `previous` sorts before `path`, so removing `path` keeps it valid.
        self.remove_block(&path)?;
        let target = self.leaf_mut(&previous)?;
        let mut nodes = std::mem::take(&mut target.nodes);
        nodes.extend(moved);
        target.nodes = content::normalize(nodes);
        self.selection = Selection::collapsed(Point::new(previous, offset));
        Ok(())
    }
}

fn check_offset(block: &Block, offset: usize) -> Result<usize, TransformError> {
    let len = block.text_len();
    if offset > len {
        return Err(TransformError::OffsetOutOfRange { offset, len });
    }
    Ok(len)
}

/// Where a path ends up once the child at `child` of the block at
/// `parent_path` has been lifted out and the parent split around it.
fn rebase_after_unwrap(
    path: &[usize],
    parent_path: &[usize],
    child: usize,
    has_before: bool,
    inserted: usize,
) -> Vec<usize> {
    let level = parent_path.len() - 1;
    let parent_index = parent_path[level];
    if path.len() <= level || path[..level] != parent_path[..level] {
        return path.to_vec();
    }
    if path[level] > parent_index {
        let mut out = path.to_vec();
        out[level] += inserted - 1;
        return out;
    }
    if path[level] < parent_index || path.len() == level + 1 {
        return path.to_vec();
    }

    let before = usize::from(has_before);
    let mut out = parent_path[..level].to_vec();
    let index = path[level + 1];
    if index < child {
        out.extend([parent_index, index]);
    } else if index == child {
        out.push(parent_index + before);
    } else {
        out.extend([parent_index + before + 1, index - child - 1]);
    }
    out.extend_from_slice(&path[level + 2..]);
    out
}
