//! Lazy-tag resolution, rotation and splaying over a rank-augmented arena.
//!
//! All functions take the arena slice and node indices (`u32`). Sides are
//! encoded as `bool` (`false` = left, `true` = right) so the zig / zig-zig /
//! zig-zag cases collapse into a single [`rotate`].

use crate::types::RankNode;
use crate::util::{child, get_p, is_right_child, is_root, set_child, set_p, update};

// ── lazy reverse tag ──────────────────────────────────────────────────────

/// Flips the pending-reverse tag of `idx`.
#[inline]
pub fn toggle<N: RankNode>(arena: &mut [N], idx: u32) {
    let node = &mut arena[idx as usize];
    let rev = node.rev();
    node.set_rev(!rev);
}

/// Resolves the pending-reverse tag of `idx`.
///
/// Swaps the two child edges and hands the tag down to both children. The
/// children themselves are only marked, not resolved.
pub fn push<N: RankNode>(arena: &mut [N], idx: u32) {
    if !arena[idx as usize].rev() {
        return;
    }
    let l = child(arena, idx, false);
    let r = child(arena, idx, true);
    set_child(arena, idx, false, r);
    set_child(arena, idx, true, l);
    if let Some(l) = l {
        toggle(arena, l);
    }
    if let Some(r) = r {
        toggle(arena, r);
    }
    arena[idx as usize].set_rev(false);
}

// ── rotation ──────────────────────────────────────────────────────────────

fn parent_of<N: RankNode>(arena: &[N], idx: u32) -> u32 {
    match get_p(arena, idx) {
        Some(p) => p,
        None => panic!("node {idx} is a sentinel and has no parent"),
    }
}

/// Rotates `u` above its parent `v`.
///
/// ```text
///       w            w
///       |            |
///       v            u
///      / \    →     / \
///     u   c        a   v
///    / \              / \
///   a   b            b   c
/// ```
///
/// `u` takes `v`'s slot under the grandparent `w`; `u`'s inner subtree `b`
/// moves over to `v`. Sizes of `v`, `u` and `w` are recomputed. Both `u` and
/// `v` must already have their tags resolved.
///
/// # Panics
///
/// If `u` is a sentinel or a root; either means the caller broke a tree
/// invariant.
pub fn rotate<N: RankNode>(arena: &mut [N], u: u32) {
    let v = parent_of(arena, u);
    assert!(!is_root(arena, u), "cannot rotate root node {u}");
    let w = parent_of(arena, v);

    let dir = is_right_child(arena, u);
    let dad_dir = is_right_child(arena, v);

    let b = child(arena, u, !dir);
    set_child(arena, v, dir, b);
    if let Some(b) = b {
        set_p(arena, b, Some(v));
    }

    set_child(arena, u, !dir, Some(v));
    set_p(arena, v, Some(u));

    set_child(arena, w, dad_dir, Some(u));
    set_p(arena, u, Some(w));

    update(arena, v);
    update(arena, u);
    update(arena, w);
}

// ── top-level splay ───────────────────────────────────────────────────────

/// Splays `u` to the root of its tree.
///
/// Tags are resolved top-down (grandparent, parent, node) before each step,
/// and sides are read only after that, since resolving a tag swaps sides.
/// On return `u` is the root and carries no pending tag.
///
/// # Panics
///
/// If `u` is a sentinel.
pub fn splay<N: RankNode>(arena: &mut [N], u: u32) {
    assert!(get_p(arena, u).is_some(), "cannot splay sentinel node {u}");
    while !is_root(arena, u) {
        let v = parent_of(arena, u);
        if is_root(arena, v) {
            // zig
            push(arena, v);
            push(arena, u);
            rotate(arena, u);
            continue;
        }
        let w = parent_of(arena, v);
        push(arena, w);
        push(arena, v);
        push(arena, u);
        if is_right_child(arena, u) == is_right_child(arena, v) {
            // zig-zig
            rotate(arena, v);
            rotate(arena, u);
        } else {
            // zig-zag
            rotate(arena, u);
            rotate(arena, u);
        }
    }
    push(arena, u);
}
