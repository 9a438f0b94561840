//! Node trait definitions.
//!
//! Nodes never hold references to each other. Each "pointer" is an
//! `Option<u32>` index into a [`Vec`]-backed arena, and every tree function
//! takes the arena as `&mut [N]` / `&[N]` and works with indices.

/// Structural links (`p`, `l`, `r`).
///
/// `l`/`r` are ownership edges. `p` is a back-link used for upward
/// navigation only and must always agree with the owning `l`/`r` edge.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Rank augmentation on top of [`Node`].
///
/// `size` counts the nodes of the subtree rooted here (itself included).
/// `rev` is the pending-reverse tag: the children of this subtree still have
/// to be swapped, recursively, before the subtree shape can be trusted.
pub trait RankNode: Node {
    fn size(&self) -> usize;
    fn set_size(&mut self, size: usize);
    fn rev(&self) -> bool;
    fn set_rev(&mut self, rev: bool);
}
