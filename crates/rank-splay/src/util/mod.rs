//! Link helpers and rank-aware traversal over an arena of [`RankNode`]s.
//!
//! Conventions shared by every function here:
//! - a node without a parent is a **sentinel**; the left child of a sentinel
//!   is the real root of its tree and the sentinel itself is the `end`
//!   position of that tree;
//! - any function that reads a node's children resolves the node's
//!   pending-reverse tag first (see [`crate::splay::push`]), unless it is
//!   explicitly a read-only walk that tracks tag parity instead.

#[cfg(test)]
pub(crate) mod fixture;

use std::cmp::Ordering;

use crate::splay::push;
use crate::types::RankNode;

#[inline]
pub(crate) fn get_p<N: RankNode>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: RankNode>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: RankNode>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: RankNode>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: RankNode>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: RankNode>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Child on side `right`.
#[inline]
pub(crate) fn child<N: RankNode>(arena: &[N], idx: u32, right: bool) -> Option<u32> {
    if right {
        get_r(arena, idx)
    } else {
        get_l(arena, idx)
    }
}

#[inline]
pub(crate) fn set_child<N: RankNode>(arena: &mut [N], idx: u32, right: bool, v: Option<u32>) {
    if right {
        set_r(arena, idx, v);
    } else {
        set_l(arena, idx, v);
    }
}

/// Size of an optional subtree.
#[inline]
pub fn size<N: RankNode>(arena: &[N], node: Option<u32>) -> usize {
    node.map_or(0, |i| arena[i as usize].size())
}

/// Recomputes `size` of `idx` from its children.
#[inline]
pub fn update<N: RankNode>(arena: &mut [N], idx: u32) {
    let s = 1 + size(arena, get_l(arena, idx)) + size(arena, get_r(arena, idx));
    arena[idx as usize].set_size(s);
}

/// Recomputes sizes from `idx` up to (and including) its sentinel.
pub fn update_path<N: RankNode>(arena: &mut [N], idx: u32) {
    let mut curr = Some(idx);
    while let Some(i) = curr {
        update(arena, i);
        curr = get_p(arena, i);
    }
}

/// Attaches `son` on side `right` of `parent` and refreshes `parent`'s size.
pub fn link<N: RankNode>(arena: &mut [N], parent: u32, son: Option<u32>, right: bool) {
    set_child(arena, parent, right, son);
    if let Some(son) = son {
        set_p(arena, son, Some(parent));
    }
    update(arena, parent);
}

/// Detaches and returns the child on side `right` of `parent`.
///
/// The detached node keeps a dangling `None` parent until it is linked
/// somewhere else.
pub fn unlink<N: RankNode>(arena: &mut [N], parent: u32, right: bool) -> Option<u32> {
    let son = child(arena, parent, right);
    set_child(arena, parent, right, None);
    if let Some(son) = son {
        set_p(arena, son, None);
    }
    update(arena, parent);
    son
}

#[inline]
pub fn is_sentinel<N: RankNode>(arena: &[N], idx: u32) -> bool {
    get_p(arena, idx).is_none()
}

/// `true` when `idx` hangs directly below a sentinel.
#[inline]
pub fn is_root<N: RankNode>(arena: &[N], idx: u32) -> bool {
    match get_p(arena, idx) {
        Some(p) => is_sentinel(arena, p),
        None => false,
    }
}

/// `true` when `idx` is the right child of its parent.
#[inline]
pub fn is_right_child<N: RankNode>(arena: &[N], idx: u32) -> bool {
    match get_p(arena, idx) {
        Some(p) => get_r(arena, p) == Some(idx),
        None => false,
    }
}

/// Leftmost node of the subtree at `idx`, resolving tags on the way down.
pub fn leftmost<N: RankNode>(arena: &mut [N], mut idx: u32) -> u32 {
    push(arena, idx);
    while let Some(l) = get_l(arena, idx) {
        idx = l;
        push(arena, idx);
    }
    idx
}

/// Rightmost node of the subtree at `idx`, resolving tags on the way down.
pub fn rightmost<N: RankNode>(arena: &mut [N], mut idx: u32) -> u32 {
    push(arena, idx);
    while let Some(r) = get_r(arena, idx) {
        idx = r;
        push(arena, idx);
    }
    idx
}

/// In-order successor.
///
/// Successor of the last element is its sentinel. Returns `None` when `curr`
/// is itself a sentinel. Requires the ancestors of `curr` to carry no
/// pending tags (see [`resolve_path`]).
pub fn next<N: RankNode>(arena: &mut [N], mut curr: u32) -> Option<u32> {
    push(arena, curr);
    if let Some(r) = get_r(arena, curr) {
        return Some(leftmost(arena, r));
    }
    loop {
        let p = get_p(arena, curr)?;
        if get_r(arena, p) == Some(curr) {
            curr = p;
        } else {
            return Some(p);
        }
    }
}

/// In-order predecessor.
///
/// Predecessor of a sentinel is the last element of its tree. Returns `None`
/// for the first element, and for the sentinel of an empty tree.
pub fn prev<N: RankNode>(arena: &mut [N], mut curr: u32) -> Option<u32> {
    push(arena, curr);
    if let Some(l) = get_l(arena, curr) {
        return Some(rightmost(arena, l));
    }
    loop {
        let p = get_p(arena, curr)?;
        if get_l(arena, p) == Some(curr) {
            if is_sentinel(arena, p) {
                return None;
            }
            curr = p;
        } else {
            return Some(p);
        }
    }
}

/// Node at rank `index` inside the subtree at `root`.
///
/// Resolves the tag of every node it passes. Never restructures. Returns
/// `None` only if `index >= size(root)`.
pub fn find_node<N: RankNode>(arena: &mut [N], root: u32, index: usize) -> Option<u32> {
    let mut offset = 0;
    let mut curr = root;
    loop {
        push(arena, curr);
        let at = offset + size(arena, get_l(arena, curr));
        curr = match index.cmp(&at) {
            Ordering::Equal => return Some(curr),
            Ordering::Less => get_l(arena, curr)?,
            Ordering::Greater => {
                offset = at + 1;
                get_r(arena, curr)?
            }
        };
    }
}

/// Read-only variant of [`find_node`].
///
/// Pending tags are left in place; the walk tracks the accumulated tag
/// parity and reads children in logical order instead.
pub fn find_node_readonly<N: RankNode>(arena: &[N], root: u32, index: usize) -> Option<u32> {
    let mut offset = 0;
    let mut curr = root;
    let mut flipped = false;
    loop {
        flipped ^= arena[curr as usize].rev();
        let (l, r) = if flipped {
            (get_r(arena, curr), get_l(arena, curr))
        } else {
            (get_l(arena, curr), get_r(arena, curr))
        };
        let at = offset + size(arena, l);
        curr = match index.cmp(&at) {
            Ordering::Equal => return Some(curr),
            Ordering::Less => l?,
            Ordering::Greater => {
                offset = at + 1;
                r?
            }
        };
    }
}

/// Resolves every pending tag on the path from the sentinel down to `idx`
/// (top-down) and returns that sentinel.
pub fn resolve_path<N: RankNode>(arena: &mut [N], idx: u32) -> u32 {
    let mut path = vec![idx];
    let mut curr = idx;
    while let Some(p) = get_p(arena, curr) {
        path.push(p);
        curr = p;
    }
    for &node in path.iter().rev() {
        push(arena, node);
    }
    curr
}

/// Rank of `idx` within its tree. A sentinel reports the tree length.
///
/// Requires a tag-free path (see [`resolve_path`]).
pub fn rank_of<N: RankNode>(arena: &[N], idx: u32) -> usize {
    let mut rank = size(arena, get_l(arena, idx));
    let mut curr = idx;
    while let Some(p) = get_p(arena, curr) {
        if is_sentinel(arena, p) {
            break;
        }
        if get_r(arena, p) == Some(curr) {
            rank += size(arena, get_l(arena, p)) + 1;
        }
        curr = p;
    }
    rank
}
