use std::iter::FusedIterator;

use crate::node::ForestNode;

/// Read-only, double-ended iterator over a tree in rank order.
///
/// Pending reverse tags are not resolved (the forest is only borrowed
/// shared); each stack entry carries the accumulated tag parity of its node,
/// which decides which child is logically left.
pub struct Iter<'a, T> {
    nodes: &'a [ForestNode<T>],
    front: Vec<(u32, bool)>,
    back: Vec<(u32, bool)>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(nodes: &'a [ForestNode<T>], root: Option<u32>, len: usize) -> Self {
        let mut iter = Self {
            nodes,
            front: Vec::new(),
            back: Vec::new(),
            remaining: len,
        };
        iter.descend(root, false, false);
        iter.descend(root, false, true);
        iter
    }

    /// Pushes the logical left spine (or right spine when `back`) of `curr`.
    fn descend(&mut self, mut curr: Option<u32>, mut parity: bool, back: bool) {
        let nodes = self.nodes;
        while let Some(idx) = curr {
            let node = &nodes[idx as usize];
            parity ^= node.rev;
            if back {
                self.back.push((idx, parity));
            } else {
                self.front.push((idx, parity));
            }
            // Logical left is the stored right when the parity is odd.
            curr = if parity == back { node.l } else { node.r };
        }
    }

    fn next_id(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        let (idx, parity) = self.front.pop()?;
        let node = &self.nodes[idx as usize];
        let right = if parity { node.l } else { node.r };
        self.descend(right, parity, false);
        self.remaining -= 1;
        Some(idx)
    }

    fn next_back_id(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        let (idx, parity) = self.back.pop()?;
        let node = &self.nodes[idx as usize];
        let left = if parity { node.r } else { node.l };
        self.descend(left, parity, true);
        self.remaining -= 1;
        Some(idx)
    }

    /// Slot indices in rank order instead of values.
    pub(crate) fn node_ids(mut self) -> impl Iterator<Item = u32> + 'a {
        std::iter::from_fn(move || self.next_id())
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next_id()?;
        let nodes = self.nodes;
        nodes[idx as usize].value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let idx = self.next_back_id()?;
        let nodes = self.nodes;
        nodes[idx as usize].value.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}
