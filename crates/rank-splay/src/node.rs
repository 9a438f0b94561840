use crate::types::{Node, RankNode};

/// Arena slot used by [`SplayForest`](crate::SplayForest).
///
/// A slot is in one of three states:
/// - element node: `value` is `Some`, `size >= 1`;
/// - sentinel: `value` is `None`, `p` is `None`, `size >= 1`;
/// - vacant (on the free list): `value` is `None`, `size == 0`.
#[derive(Clone, Debug)]
pub(crate) struct ForestNode<T> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub size: usize,
    pub rev: bool,
    pub value: Option<T>,
}

impl<T> ForestNode<T> {
    pub fn new(value: T) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            size: 1,
            rev: false,
            value: Some(value),
        }
    }

    pub fn sentinel() -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            size: 1,
            rev: false,
            value: None,
        }
    }

    pub fn vacant() -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            size: 0,
            rev: false,
            value: None,
        }
    }

    #[inline]
    pub fn is_vacant(&self) -> bool {
        self.size == 0
    }
}

impl<T> Node for ForestNode<T> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

impl<T> RankNode for ForestNode<T> {
    fn size(&self) -> usize {
        self.size
    }

    fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    fn rev(&self) -> bool {
        self.rev
    }

    fn set_rev(&mut self, rev: bool) {
        self.rev = rev;
    }
}
