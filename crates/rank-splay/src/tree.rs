use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use crate::cursor::Cursor;
use crate::error::{SplayError, SplayResult};
use crate::forest::SplayForest;
use crate::iter::Iter;
use crate::node::ForestNode;
use crate::splay::{splay, toggle};
use crate::util::{
    find_node, find_node_readonly, get_l, leftmost, link, rank_of, resolve_path, rightmost,
    unlink, update, update_path,
};

/// Rank-keyed splay tree living in a [`SplayForest`].
///
/// The handle owns exactly one sentinel slot of its forest; the left child
/// of that sentinel is the real root. Handles are neither `Clone` nor
/// `Copy`, so no two handles can ever own the same nodes, and [`merge`]
/// consumes its right-hand side.
///
/// Every operation takes the forest explicitly, the same way the arena is
/// passed to the free functions in [`crate::splay`] and [`crate::util`].
///
/// Dropping a handle does not free its nodes: hand it to
/// [`SplayForest::release`] or [`merge`] it into another tree.
///
/// [`merge`]: RankSplayTree::merge
#[must_use = "dropping a tree handle leaks its nodes; pass it to SplayForest::release or merge it"]
pub struct RankSplayTree<T> {
    pub(crate) forest: u64,
    pub(crate) sentinel: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for RankSplayTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RankSplayTree")
            .field("forest", &self.forest)
            .field("sentinel", &self.sentinel)
            .finish()
    }
}

/// Node at a rank that is known to be in range.
fn locate<T>(nodes: &mut [ForestNode<T>], root: u32, index: usize) -> u32 {
    match find_node(nodes, root, index) {
        Some(node) => node,
        None => panic!("subtree sizes disagree with tree length at rank {index}"),
    }
}

impl<T> RankSplayTree<T> {
    pub(crate) fn from_sentinel(forest: u64, sentinel: u32) -> Self {
        Self {
            forest,
            sentinel,
            _marker: PhantomData,
        }
    }

    pub fn len(&self, forest: &SplayForest<T>) -> usize {
        forest.len_of(forest.sentinel(self))
    }

    pub fn is_empty(&self, forest: &SplayForest<T>) -> bool {
        forest.root(forest.sentinel(self)).is_none()
    }

    /// Finds the node at `index` without restructuring.
    fn node_at(&self, forest: &mut SplayForest<T>, index: usize) -> SplayResult<u32> {
        let sentinel = forest.sentinel(self);
        let len = forest.len_of(sentinel);
        match forest.root(sentinel) {
            Some(root) if index < len => Ok(locate(&mut forest.nodes, root, index)),
            _ => Err(SplayError::OutOfRange { index, len }),
        }
    }

    /// Mutable access to the element at `index`.
    ///
    /// The accessed node is splayed to the root, so repeated or nearby
    /// accesses get cheaper.
    pub fn at<'f>(&self, forest: &'f mut SplayForest<T>, index: usize) -> SplayResult<&'f mut T> {
        let node = self.node_at(forest, index)?;
        splay(&mut forest.nodes, node);
        Ok(forest.value_mut(node))
    }

    /// Shared access to the element at `index`. Leaves the tree untouched.
    pub fn get<'f>(&self, forest: &'f SplayForest<T>, index: usize) -> SplayResult<&'f T> {
        let sentinel = forest.sentinel(self);
        let len = forest.len_of(sentinel);
        let out_of_range = SplayError::OutOfRange { index, len };
        let root = match forest.root(sentinel) {
            Some(root) if index < len => root,
            _ => return Err(out_of_range),
        };
        find_node_readonly(&forest.nodes, root, index)
            .map(|node| forest.value(node))
            .ok_or(out_of_range)
    }

    /// Splits off `[rank, len)` into a new tree; `[0, rank)` stays here.
    #[must_use = "the split-off tree owns its nodes; release or merge it"]
    pub fn split(&self, forest: &mut SplayForest<T>, rank: usize) -> SplayResult<RankSplayTree<T>> {
        let sentinel = forest.sentinel(self);
        let len = forest.len_of(sentinel);
        if rank > len {
            return Err(SplayError::OutOfRange { index: rank, len });
        }
        let moved = if rank == 0 {
            unlink(&mut forest.nodes, sentinel, false)
        } else {
            let node = self.node_at(forest, rank - 1)?;
            splay(&mut forest.nodes, node);
            let right = unlink(&mut forest.nodes, node, true);
            update(&mut forest.nodes, sentinel);
            right
        };
        let result = forest.tree();
        link(&mut forest.nodes, result.sentinel, moved, false);
        trace!(rank, len, "split tree");
        Ok(result)
    }

    /// Appends every element of `rhs` after the elements of `self`.
    ///
    /// `rhs` is consumed; its sentinel slot returns to the free list.
    pub fn merge(&self, forest: &mut SplayForest<T>, rhs: RankSplayTree<T>) {
        let sentinel = forest.sentinel(self);
        let rhs_sentinel = forest.sentinel(&rhs);
        let moved = unlink(&mut forest.nodes, rhs_sentinel, false);
        forest.free_slot(rhs_sentinel);
        let Some(moved) = moved else {
            return;
        };
        match forest.root(sentinel) {
            None => link(&mut forest.nodes, sentinel, Some(moved), false),
            Some(root) => {
                let len = forest.len_of(sentinel);
                let last = locate(&mut forest.nodes, root, len - 1);
                splay(&mut forest.nodes, last);
                link(&mut forest.nodes, last, Some(moved), true);
                update(&mut forest.nodes, sentinel);
            }
        }
        trace!(len = forest.len_of(sentinel), "merged tree");
    }

    /// Inserts every element of `other` so that its first element lands at
    /// `rank`.
    pub fn splice(
        &self,
        forest: &mut SplayForest<T>,
        rank: usize,
        other: RankSplayTree<T>,
    ) -> SplayResult<()> {
        let right = self.split(forest, rank)?;
        self.merge(forest, other);
        self.merge(forest, right);
        Ok(())
    }

    /// Reverses the elements in `[first, last)`.
    ///
    /// The work is deferred: only a tag is planted on one subtree root and
    /// resolved by later accesses.
    pub fn reverse(
        &self,
        forest: &mut SplayForest<T>,
        first: usize,
        last: usize,
    ) -> SplayResult<()> {
        let sentinel = forest.sentinel(self);
        let len = forest.len_of(sentinel);
        if first > last {
            return Err(SplayError::InvalidRange { first, last });
        }
        if last > len {
            return Err(SplayError::OutOfRange { index: last, len });
        }
        if last - first < 2 {
            return Ok(());
        }
        if first == 0 && last == len {
            if let Some(root) = forest.root(sentinel) {
                toggle(&mut forest.nodes, root);
            }
        } else {
            let right = self.split(forest, last)?;
            let center = self.split(forest, first)?;
            if let Some(root) = forest.root(center.sentinel) {
                toggle(&mut forest.nodes, root);
            }
            self.merge(forest, center);
            self.merge(forest, right);
        }
        forest.epoch += 1;
        trace!(first, last, len, "reversed range");
        Ok(())
    }

    // ── cursors ──────────────────────────────────────────────────────────

    pub fn begin(&self, forest: &mut SplayForest<T>) -> Cursor {
        let sentinel = forest.sentinel(self);
        match forest.root(sentinel) {
            Some(root) => {
                let first = leftmost(&mut forest.nodes, root);
                forest.cursor(first)
            }
            None => forest.cursor(sentinel),
        }
    }

    pub fn end(&self, forest: &SplayForest<T>) -> Cursor {
        forest.cursor(forest.sentinel(self))
    }

    /// Cursor at `rank`; `rank == len` yields `end`. Does not splay.
    pub fn cursor_at(&self, forest: &mut SplayForest<T>, rank: usize) -> SplayResult<Cursor> {
        if rank == self.len(forest) {
            return Ok(self.end(forest));
        }
        let node = self.node_at(forest, rank)?;
        Ok(forest.cursor(node))
    }

    /// Resolves the path above `pos` and checks that it ends at our sentinel.
    fn own(&self, forest: &mut SplayForest<T>, pos: Cursor) -> u32 {
        let sentinel = forest.sentinel(self);
        let node = forest.check_cursor(pos);
        let top = resolve_path(&mut forest.nodes, node);
        assert_eq!(top, sentinel, "cursor does not point into this tree");
        node
    }

    /// Current rank of the element at `pos`; `end` reports `len`.
    pub fn rank_of(&self, forest: &mut SplayForest<T>, pos: Cursor) -> usize {
        let node = self.own(forest, pos);
        rank_of(&forest.nodes, node)
    }

    /// Inserts `value` immediately before `pos` and returns its cursor.
    ///
    /// The new node is hung at the in-order slot right before `pos` (its
    /// left child, or the rightmost node of that left child's subtree), then
    /// splayed to the root.
    ///
    /// # Panics
    ///
    /// If `pos` does not point into this tree.
    pub fn insert(&self, forest: &mut SplayForest<T>, pos: Cursor, value: T) -> Cursor {
        let host = self.own(forest, pos);
        let node = forest.alloc(ForestNode::new(value));
        match get_l(&forest.nodes, host) {
            None => link(&mut forest.nodes, host, Some(node), false),
            Some(l) => {
                let parent = rightmost(&mut forest.nodes, l);
                link(&mut forest.nodes, parent, Some(node), true);
            }
        }
        update_path(&mut forest.nodes, node);
        splay(&mut forest.nodes, node);
        forest.cursor(node)
    }

    /// Inserts `value` so that it ends up at `rank`.
    pub fn insert_at(
        &self,
        forest: &mut SplayForest<T>,
        rank: usize,
        value: T,
    ) -> SplayResult<Cursor> {
        let pos = self.cursor_at(forest, rank)?;
        Ok(self.insert(forest, pos, value))
    }

    pub fn push_back(&self, forest: &mut SplayForest<T>, value: T) -> Cursor {
        let end = self.end(forest);
        self.insert(forest, end, value)
    }

    pub fn push_front(&self, forest: &mut SplayForest<T>, value: T) -> Cursor {
        let begin = self.begin(forest);
        self.insert(forest, begin, value)
    }

    /// Detaches `[first, last)` into a tree of its own, closing the gap.
    #[must_use = "the detached tree owns its nodes; release or merge it"]
    pub fn take_range(
        &self,
        forest: &mut SplayForest<T>,
        first: usize,
        last: usize,
    ) -> SplayResult<RankSplayTree<T>> {
        let len = self.len(forest);
        if first > last {
            return Err(SplayError::InvalidRange { first, last });
        }
        if last > len {
            return Err(SplayError::OutOfRange { index: last, len });
        }
        let right = self.split(forest, last)?;
        let middle = self.split(forest, first)?;
        self.merge(forest, right);
        Ok(middle)
    }

    /// Removes `[first, last)` and returns a cursor to the element that
    /// followed the range (or `end`).
    pub fn erase_range(
        &self,
        forest: &mut SplayForest<T>,
        first: usize,
        last: usize,
    ) -> SplayResult<Cursor> {
        let removed = self.take_range(forest, first, last)?;
        let count = forest.release(removed).len();
        trace!(first, last, count, "erased range");
        self.cursor_at(forest, first)
    }

    /// Removes the element at `pos`.
    pub fn erase(&self, forest: &mut SplayForest<T>, pos: Cursor) -> SplayResult<Cursor> {
        let rank = self.rank_of(forest, pos);
        let len = self.len(forest);
        if rank == len {
            return Err(SplayError::OutOfRange { index: rank, len });
        }
        self.erase_range(forest, rank, rank + 1)
    }

    /// Removes every element from `first` up to (not including) `last`.
    pub fn erase_between(
        &self,
        forest: &mut SplayForest<T>,
        first: Cursor,
        last: Cursor,
    ) -> SplayResult<Cursor> {
        let first = self.rank_of(forest, first);
        let last = self.rank_of(forest, last);
        self.erase_range(forest, first, last)
    }

    /// Read-only iterator in rank order.
    pub fn iter<'f>(&self, forest: &'f SplayForest<T>) -> Iter<'f, T> {
        let sentinel = forest.sentinel(self);
        Iter::new(&forest.nodes, forest.root(sentinel), forest.len_of(sentinel))
    }
}
