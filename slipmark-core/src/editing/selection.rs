//! Cursor positions and selections.

/// A position inside a leaf block.
///
/// `path` indexes from the document root down to the leaf block; `offset`
/// counts chars in that block's concatenated text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Point {
    pub path: Vec<usize>,
    pub offset: usize,
}

impl Point {
    pub fn new(path: Vec<usize>, offset: usize) -> Self {
        Point { path, offset }
    }
}

/// An anchor/focus pair. The focus is where the caret is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,
}

impl Selection {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Selection { anchor, focus }
    }

    pub fn collapsed(point: Point) -> Self {
        Selection {
            anchor: point.clone(),
            focus: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn is_expanded(&self) -> bool {
        !self.is_collapsed()
    }

    /// The earlier of anchor and focus in document order.
    pub fn start(&self) -> &Point {
        if self.anchor <= self.focus {
            &self.anchor
        } else {
            &self.focus
        }
    }

    /// The later of anchor and focus in document order.
    pub fn end(&self) -> &Point {
        if self.anchor <= self.focus {
            &self.focus
        } else {
            &self.anchor
        }
    }

    pub fn is_within_one_block(&self) -> bool {
        self.anchor.path == self.focus.path
    }

    pub(crate) fn points_mut(&mut self) -> [&mut Point; 2] {
        [&mut self.anchor, &mut self.focus]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_end_follow_document_order() {
        let backwards = Selection::new(Point::new(vec![1], 2), Point::new(vec![0, 3], 9));
        assert_eq!(backwards.start(), &Point::new(vec![0, 3], 9));
        assert_eq!(backwards.end(), &Point::new(vec![1], 2));
        assert!(backwards.is_expanded());
        assert!(!backwards.is_within_one_block());
    }

    #[test]
    fn same_block_orders_by_offset() {
        let sel = Selection::new(Point::new(vec![2], 5), Point::new(vec![2], 1));
        assert_eq!(sel.start().offset, 1);
        assert_eq!(sel.end().offset, 5);
        assert!(sel.is_within_one_block());
    }
}
