//! Rank-keyed splay trees: random-access sequences with amortized
//! `O(log n)` indexing, insertion, deletion, split, merge and range reversal.
//!
//! Elements are ordered by position (rank), never by value. Every node keeps
//! the size of its subtree, which turns a descent into an order-statistics
//! lookup, and a lazy reverse tag, which lets a whole range be reversed by
//! tagging one subtree root.
//!
//! Nodes never point at each other. All "pointers" are `Option<u32>`
//! indices into a [`SplayForest`] arena, and every tree is a handle
//! ([`RankSplayTree`]) owning one sentinel slot of that arena. Because all
//! trees of a forest share the arena, [`split`](RankSplayTree::split) and
//! [`merge`](RankSplayTree::merge) only move child edges.
//!
//! ```
//! use rank_splay::SplayForest;
//!
//! let mut forest = SplayForest::new();
//! let tree = forest.build([1, 2, 3, 4, 5]);
//! tree.reverse(&mut forest, 1, 4).unwrap();
//! assert_eq!(tree.iter(&forest).copied().collect::<Vec<_>>(), vec![1, 4, 3, 2, 5]);
//! assert_eq!(*tree.at(&mut forest, 1).unwrap(), 4);
//!
//! let right = tree.split(&mut forest, 2).unwrap();
//! assert_eq!(tree.len(&forest), 2);
//! assert_eq!(right.len(&forest), 3);
//! tree.merge(&mut forest, right);
//! assert_eq!(tree.len(&forest), 5);
//! ```
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`Node`] and [`RankNode`] link traits |
//! | [`splay`] | tag push-down, rotation, splay |
//! | [`util`] | link helpers, rank lookup, in-order navigation |
//! | `forest` | [`SplayForest`] arena, bulk build, release, `verify` |
//! | `tree` | [`RankSplayTree`] split / merge / reverse / insert / erase |
//! | `cursor` | [`Cursor`] bidirectional positions |
//! | `iter` | [`Iter`] read-only double-ended iteration |
//! | `sequence` | [`SplaySequence`] single-tree `Vec`-like wrapper |
//! | `print` | `print_tree` debug rendering |

mod cursor;
mod error;
mod forest;
mod iter;
mod node;
mod print;
mod sequence;
pub mod splay;
mod tree;
pub mod types;
pub mod util;

pub use cursor::Cursor;
pub use error::{SplayError, SplayResult};
pub use forest::SplayForest;
pub use iter::Iter;
pub use sequence::SplaySequence;
pub use tree::RankSplayTree;
pub use types::{Node, RankNode};
