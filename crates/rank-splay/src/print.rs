//! Debug rendering of a tree's physical shape.

use std::fmt::Debug;

use crate::forest::SplayForest;
use crate::tree::RankSplayTree;

impl<T: Debug> RankSplayTree<T> {
    /// Renders the stored shape of the tree, one node per line.
    ///
    /// Children are printed as stored, pending tags unresolved; a tagged node
    /// is marked with `↺`. Each node shows its value and subtree size.
    pub fn print_tree(&self, forest: &SplayForest<T>, tab: &str) -> String {
        let sentinel = forest.sentinel(self);
        match forest.root(sentinel) {
            Some(root) => format!("RankSplayTree{}", print_node(forest, root, tab, "└─")),
            None => "RankSplayTree ∅".to_string(),
        }
    }
}

/// Pre-order rendering with an explicit stack; a splay tree can be as deep
/// as it is long.
fn print_node<T: Debug>(forest: &SplayForest<T>, root: u32, tab: &str, side: &str) -> String {
    let mut out = String::new();
    let mut stack: Vec<(u32, String, &str)> = vec![(root, tab.to_string(), side)];
    while let Some((node, tab, side)) = stack.pop() {
        let n = &forest.nodes[node as usize];
        let mark = if n.rev { " ↺" } else { "" };
        out.push_str(&format!("\n{tab}{side} {:?} [{}]{mark}", forest.value(node), n.size));
        let child_tab = format!("{tab}  ");
        if let Some(r) = n.r {
            stack.push((r, child_tab.clone(), "→"));
        }
        if let Some(l) = n.l {
            stack.push((l, child_tab, "←"));
        }
    }
    out
}
