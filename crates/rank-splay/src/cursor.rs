//! Bidirectional positions over a tree.
//!
//! A [`Cursor`] names a node, not a rank: after inserts, erases, splits,
//! merges or reversals elsewhere it still points at the same element, whose
//! rank may have changed. The sentinel of a tree is its `end` position.

use crate::forest::SplayForest;
use crate::util::{self, is_sentinel, resolve_path};

/// Position of an element (or the `end`) of a tree in a [`SplayForest`].
///
/// Equality is node identity. Navigation never splays, so walking a tree
/// with cursors leaves its balance untouched.
///
/// A cursor remembers the generation of its slot. Once the element is
/// erased (or the tree released) the cursor is stale for good, even after
/// the slot is reused by a new element; using it panics.
#[derive(Clone, Copy, Debug)]
pub struct Cursor {
    pub(crate) forest: u64,
    pub(crate) node: u32,
    pub(crate) generation: u32,
    /// Forest epoch at which the path above `node` was known to be free of
    /// reverse tags.
    pub(crate) epoch: u64,
}

impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.forest == other.forest
            && self.node == other.node
            && self.generation == other.generation
    }
}

impl Eq for Cursor {}

impl<T> SplayForest<T> {
    #[inline]
    pub(crate) fn cursor(&self, node: u32) -> Cursor {
        Cursor {
            forest: self.id(),
            node,
            generation: self.generations[node as usize],
            epoch: self.epoch,
        }
    }

    /// Checks that `cursor` belongs here and still names a live slot.
    pub(crate) fn check_cursor(&self, cursor: Cursor) -> u32 {
        assert_eq!(
            cursor.forest,
            self.id(),
            "cursor belongs to forest {} but was used with forest {}",
            cursor.forest,
            self.id()
        );
        let live = self.generations[cursor.node as usize] == cursor.generation
            && !self.nodes[cursor.node as usize].is_vacant();
        assert!(live, "cursor points at erased slot {}", cursor.node);
        cursor.node
    }

    /// Makes the path above the cursor node tag-free if a reversal happened
    /// since the cursor was produced.
    fn settle(&mut self, cursor: Cursor) -> u32 {
        let node = self.check_cursor(cursor);
        if cursor.epoch != self.epoch {
            resolve_path(&mut self.nodes, node);
        }
        node
    }

    /// Position following `cursor`; the last element is followed by `end`.
    ///
    /// Returns `None` when `cursor` already is `end`.
    pub fn next(&mut self, cursor: Cursor) -> Option<Cursor> {
        let node = self.settle(cursor);
        util::next(&mut self.nodes, node).map(|n| self.cursor(n))
    }

    /// Position preceding `cursor`; `end` is preceded by the last element.
    ///
    /// Returns `None` when `cursor` is the first position of its tree.
    pub fn prev(&mut self, cursor: Cursor) -> Option<Cursor> {
        let node = self.settle(cursor);
        util::prev(&mut self.nodes, node).map(|n| self.cursor(n))
    }

    /// Element at `cursor`, `None` for `end`.
    pub fn get(&self, cursor: Cursor) -> Option<&T> {
        let node = self.check_cursor(cursor);
        self.nodes[node as usize].value.as_ref()
    }

    pub fn get_mut(&mut self, cursor: Cursor) -> Option<&mut T> {
        let node = self.check_cursor(cursor);
        self.nodes[node as usize].value.as_mut()
    }

    pub fn is_end(&self, cursor: Cursor) -> bool {
        let node = self.check_cursor(cursor);
        is_sentinel(&self.nodes, node)
    }
}
