use std::fmt;
use std::ops::{Bound, Index, RangeBounds};

use crate::error::{SplayError, SplayResult};
use crate::forest::SplayForest;
use crate::iter::Iter;
use crate::tree::RankSplayTree;

/// A single rank-keyed sequence that owns its own forest.
///
/// Convenience wrapper for callers that never need to split a sequence into
/// independently owned trees. All operations keep the amortized
/// `O(log n)` bounds of [`RankSplayTree`].
pub struct SplaySequence<T> {
    forest: SplayForest<T>,
    tree: RankSplayTree<T>,
}

impl<T> Default for SplaySequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_bounds<R: RangeBounds<usize>>(range: R, len: usize) -> (usize, usize) {
    let first = match range.start_bound() {
        Bound::Included(&i) => i,
        Bound::Excluded(&i) => i.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let last = match range.end_bound() {
        Bound::Included(&i) => i.saturating_add(1),
        Bound::Excluded(&i) => i,
        Bound::Unbounded => len,
    };
    (first, last)
}

impl<T> SplaySequence<T> {
    pub fn new() -> Self {
        let mut forest = SplayForest::new();
        let tree = forest.tree();
        Self { forest, tree }
    }

    pub fn len(&self) -> usize {
        self.tree.len(&self.forest)
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty(&self.forest)
    }

    /// Mutable access; splays the accessed element to the root.
    pub fn at(&mut self, index: usize) -> SplayResult<&mut T> {
        self.tree.at(&mut self.forest, index)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.tree.get(&self.forest, index).ok()
    }

    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn last(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    pub fn push_back(&mut self, value: T) {
        self.tree.push_back(&mut self.forest, value);
    }

    pub fn push_front(&mut self, value: T) {
        self.tree.push_front(&mut self.forest, value);
    }

    /// Inserts `value` at `index`, shifting later elements right.
    pub fn insert(&mut self, index: usize, value: T) -> SplayResult<()> {
        self.tree.insert_at(&mut self.forest, index, value)?;
        Ok(())
    }

    /// Removes and returns the element at `index`.
    pub fn remove(&mut self, index: usize) -> SplayResult<T> {
        let len = self.len();
        if index >= len {
            return Err(SplayError::OutOfRange { index, len });
        }
        let removed = self.tree.take_range(&mut self.forest, index, index + 1)?;
        let mut values = self.forest.release(removed);
        values.pop().ok_or(SplayError::OutOfRange { index, len })
    }

    /// Removes `range`, returning the removed elements in order.
    pub fn drain<R: RangeBounds<usize>>(&mut self, range: R) -> SplayResult<Vec<T>> {
        let (first, last) = resolve_bounds(range, self.len());
        let removed = self.tree.take_range(&mut self.forest, first, last)?;
        Ok(self.forest.release(removed))
    }

    /// Reverses the elements in `range`.
    pub fn reverse<R: RangeBounds<usize>>(&mut self, range: R) -> SplayResult<()> {
        let (first, last) = resolve_bounds(range, self.len());
        self.tree.reverse(&mut self.forest, first, last)
    }

    /// Moves every element of `other` to the end of `self`.
    pub fn append(&mut self, other: impl IntoIterator<Item = T>) {
        let tail = self.forest.build(other);
        self.tree.merge(&mut self.forest, tail);
    }

    pub fn clear(&mut self) {
        let old = std::mem::replace(&mut self.tree, self.forest.tree());
        self.forest.release(old);
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter(&self.forest)
    }

    pub fn into_vec(mut self) -> Vec<T> {
        self.forest.release(self.tree)
    }

    /// Full structural check; see [`SplayForest::verify`].
    pub fn verify(&self) -> SplayResult<()> {
        self.forest.verify(&self.tree)
    }
}

impl<T> Index<usize> for SplaySequence<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.tree.get(&self.forest, index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> FromIterator<T> for SplaySequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut forest = SplayForest::new();
        let tree = forest.build(iter);
        Self { forest, tree }
    }
}

impl<T> Extend<T> for SplaySequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.append(iter);
    }
}

impl<'a, T> IntoIterator for &'a SplaySequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone> Clone for SplaySequence<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for SplaySequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SplaySequence<T> {}

impl<T: fmt::Debug> fmt::Debug for SplaySequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
