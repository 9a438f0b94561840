use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use crate::error::{SplayError, SplayResult};
use crate::iter::Iter;
use crate::node::ForestNode;
use crate::tree::RankSplayTree;
use crate::util::{get_l, link, size};

static NEXT_FOREST_ID: AtomicU64 = AtomicU64::new(1);

/// Arena owning the nodes of every [`RankSplayTree`] built from it.
///
/// Trees are handles into the forest. Splitting and merging move child
/// edges between trees of the same forest, so no node is ever copied.
///
/// A tree handle that is dropped without [`release`](Self::release) or a
/// [`merge`](RankSplayTree::merge) leaves its nodes allocated until the
/// forest itself is dropped; handles are `#[must_use]` for that reason.
pub struct SplayForest<T> {
    id: u64,
    pub(crate) nodes: Vec<ForestNode<T>>,
    /// Bumped every time a slot is freed; cursors carry the value they saw.
    pub(crate) generations: Vec<u32>,
    free: Vec<u32>,
    /// Bumped by every operation that plants reverse tags; see [`crate::Cursor`].
    pub(crate) epoch: u64,
}

impl<T> Default for SplayForest<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SplayForest<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Forest with room for `capacity` slots (elements plus one sentinel per
    /// tree) before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: NEXT_FOREST_ID.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::with_capacity(capacity),
            generations: Vec::with_capacity(capacity),
            free: Vec::new(),
            epoch: 0,
        }
    }

    /// Number of occupied slots (elements and sentinels).
    pub fn slot_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// New empty tree.
    #[must_use = "dropping a tree handle leaks its sentinel slot"]
    pub fn tree(&mut self) -> RankSplayTree<T> {
        let sentinel = self.alloc(ForestNode::sentinel());
        RankSplayTree::from_sentinel(self.id, sentinel)
    }

    /// Tree holding `values` in iteration order, built perfectly balanced.
    #[must_use = "dropping a tree handle leaks its nodes; pass it to SplayForest::release or merge it"]
    pub fn build<I>(&mut self, values: I) -> RankSplayTree<T>
    where
        I: IntoIterator<Item = T>,
    {
        let tree = self.tree();
        let ids: Vec<u32> = values
            .into_iter()
            .map(|value| self.alloc(ForestNode::new(value)))
            .collect();
        let root = self.build_balanced(&ids);
        link(&mut self.nodes, tree.sentinel, root, false);
        trace!(forest = self.id, len = ids.len(), "built tree");
        tree
    }

    fn build_balanced(&mut self, ids: &[u32]) -> Option<u32> {
        if ids.is_empty() {
            return None;
        }
        let mid = ids.len() / 2;
        let root = ids[mid];
        let l = self.build_balanced(&ids[..mid]);
        let r = self.build_balanced(&ids[mid + 1..]);
        link(&mut self.nodes, root, l, false);
        link(&mut self.nodes, root, r, true);
        Some(root)
    }

    /// Destroys `tree`, returning its values in sequence order.
    ///
    /// Every slot of the tree, sentinel included, goes back to the free list.
    pub fn release(&mut self, tree: RankSplayTree<T>) -> Vec<T> {
        let sentinel = self.sentinel(&tree);
        let ids: Vec<u32> = Iter::new(&self.nodes, self.root(sentinel), self.len_of(sentinel))
            .node_ids()
            .collect();
        let mut values = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(value) = self.free_slot(id) {
                values.push(value);
            }
        }
        self.free_slot(sentinel);
        trace!(forest = self.id, len = values.len(), "released tree");
        values
    }

    /// Checks every structural invariant of `tree`.
    ///
    /// Walks the whole tree iteratively and reports the first violation found:
    /// a parent link that disagrees with its owner, a stale `size`, a missing
    /// payload, a vacant slot still linked in, or a tagged/right-linked
    /// sentinel.
    pub fn verify(&self, tree: &RankSplayTree<T>) -> SplayResult<()> {
        let sentinel = self.sentinel(tree);
        let corrupted = |node: u32, reason: &'static str| SplayError::Corrupted { node, reason };

        let head = &self.nodes[sentinel as usize];
        if head.p.is_some() {
            return Err(corrupted(sentinel, "sentinel has a parent"));
        }
        if head.r.is_some() {
            return Err(corrupted(sentinel, "sentinel has a right child"));
        }
        if head.rev {
            return Err(corrupted(sentinel, "sentinel carries a reverse tag"));
        }
        if head.value.is_some() {
            return Err(corrupted(sentinel, "sentinel holds a value"));
        }

        // Pre-order collection, then sizes bottom-up in reverse order.
        let mut order = Vec::new();
        let mut stack: Vec<u32> = head.l.into_iter().collect();
        if let Some(root) = head.l {
            if self.nodes[root as usize].p != Some(sentinel) {
                return Err(corrupted(root, "root is not linked to its sentinel"));
            }
        }
        while let Some(idx) = stack.pop() {
            if order.len() >= self.nodes.len() {
                return Err(corrupted(idx, "cycle in child links"));
            }
            let node = &self.nodes[idx as usize];
            if node.is_vacant() {
                return Err(corrupted(idx, "vacant slot linked into a tree"));
            }
            if node.value.is_none() {
                return Err(corrupted(idx, "element node without a value"));
            }
            for son in [node.l, node.r].into_iter().flatten() {
                if self.nodes[son as usize].p != Some(idx) {
                    return Err(corrupted(son, "parent link disagrees with owner"));
                }
                stack.push(son);
            }
            order.push(idx);
        }

        let mut counted = vec![0usize; self.nodes.len()];
        for &idx in order.iter().rev() {
            let node = &self.nodes[idx as usize];
            let count = 1
                + node.l.map_or(0, |l| counted[l as usize])
                + node.r.map_or(0, |r| counted[r as usize]);
            if node.size != count {
                return Err(corrupted(idx, "stale subtree size"));
            }
            counted[idx as usize] = count;
        }
        if head.size != order.len() + 1 {
            return Err(corrupted(sentinel, "stale sentinel size"));
        }
        Ok(())
    }

    // ── crate-internal plumbing ──────────────────────────────────────────

    /// Sentinel slot of `tree`.
    ///
    /// # Panics
    ///
    /// If `tree` was created by another forest.
    pub(crate) fn sentinel(&self, tree: &RankSplayTree<T>) -> u32 {
        assert_eq!(
            tree.forest, self.id,
            "tree handle belongs to forest {} but was used with forest {}",
            tree.forest, self.id
        );
        tree.sentinel
    }

    #[inline]
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub(crate) fn root(&self, sentinel: u32) -> Option<u32> {
        get_l(&self.nodes, sentinel)
    }

    #[inline]
    pub(crate) fn len_of(&self, sentinel: u32) -> usize {
        size(&self.nodes, self.root(sentinel))
    }

    pub(crate) fn alloc(&mut self, node: ForestNode<T>) -> u32 {
        if let Some(idx) = self.free.pop() {
            self.nodes[idx as usize] = node;
            return idx;
        }
        let idx = u32::try_from(self.nodes.len())
            .unwrap_or_else(|_| panic!("forest exceeded {} slots", u32::MAX));
        self.nodes.push(node);
        self.generations.push(0);
        idx
    }

    /// Returns `idx` to the free list, yielding its value if it held one.
    pub(crate) fn free_slot(&mut self, idx: u32) -> Option<T> {
        let node = std::mem::replace(&mut self.nodes[idx as usize], ForestNode::vacant());
        let generation = &mut self.generations[idx as usize];
        *generation = generation.wrapping_add(1);
        self.free.push(idx);
        node.value
    }

    pub(crate) fn value(&self, idx: u32) -> &T {
        match &self.nodes[idx as usize].value {
            Some(value) => value,
            None => unreachable!("slot {idx} holds no value"),
        }
    }

    pub(crate) fn value_mut(&mut self, idx: u32) -> &mut T {
        match &mut self.nodes[idx as usize].value {
            Some(value) => value,
            None => unreachable!("slot {idx} holds no value"),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SplayForest<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplayForest")
            .field("id", &self.id)
            .field("slots", &self.slot_count())
            .field("free", &self.free.len())
            .field("epoch", &self.epoch)
            .finish()
    }
}
