//! Hand-built arenas for unit tests: slot 0 is the sentinel, elements follow.

use std::collections::HashSet;

use super::{find_node, get_l, link, next, size, update};
use crate::node::ForestNode;

pub(crate) const SENTINEL: u32 = 0;

pub(crate) fn empty_arena() -> Vec<ForestNode<i32>> {
    vec![ForestNode::sentinel()]
}

/// Perfectly balanced tree over `values`; returns the arena and the root.
pub(crate) fn arena_from(values: &[i32]) -> (Vec<ForestNode<i32>>, u32) {
    assert!(!values.is_empty(), "use empty_arena() for an empty tree");
    let mut arena = empty_arena();
    arena.extend(values.iter().map(|v| ForestNode::new(*v)));
    let ids: Vec<u32> = (1..=values.len() as u32).collect();
    let root = build(&mut arena, &ids);
    link(&mut arena, SENTINEL, root, false);
    (arena, root.unwrap())
}

fn build(arena: &mut [ForestNode<i32>], ids: &[u32]) -> Option<u32> {
    if ids.is_empty() {
        return None;
    }
    let mid = ids.len() / 2;
    let root = ids[mid];
    let l = build(arena, &ids[..mid]);
    let r = build(arena, &ids[mid + 1..]);
    link(arena, root, l, false);
    link(arena, root, r, true);
    update(arena, root);
    Some(root)
}

/// Element values in rank order, walked with `next` from the sentinel side.
pub(crate) fn inorder(arena: &mut [ForestNode<i32>]) -> Vec<i32> {
    let mut out = Vec::new();
    let Some(root) = get_l(arena, SENTINEL) else {
        return out;
    };
    let mut curr = find_node(arena, root, 0);
    while let Some(i) = curr {
        if i == SENTINEL {
            break;
        }
        out.push(arena[i as usize].value.unwrap());
        curr = next(arena, i);
    }
    out
}

/// Parent links agree with child links and every size is exact.
pub(crate) fn assert_links(arena: &[ForestNode<i32>]) {
    fn walk(
        arena: &[ForestNode<i32>],
        idx: u32,
        expected_parent: Option<u32>,
        visited: &mut HashSet<u32>,
    ) -> usize {
        assert!(visited.insert(idx), "cycle detected at node {idx}");
        let node = &arena[idx as usize];
        assert_eq!(node.p, expected_parent, "bad parent link at node {idx}");
        let mut count = 1;
        if let Some(l) = node.l {
            count += walk(arena, l, Some(idx), visited);
        }
        if let Some(r) = node.r {
            count += walk(arena, r, Some(idx), visited);
        }
        assert_eq!(node.size, count, "stale size at node {idx}");
        count
    }

    let mut visited = HashSet::<u32>::new();
    walk(arena, SENTINEL, None, &mut visited);
    assert_eq!(
        size(arena, get_l(arena, SENTINEL)) + 1,
        arena[SENTINEL as usize].size
    );
}
