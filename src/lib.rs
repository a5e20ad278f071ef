//! Order-statistic AVL tree for Rust.
//!
//! This crate provides [`OSAvlTree`], an ordered multiset with O(log n)
//! order-statistic operations on top of the usual insert/remove/contains:
//!
//! - [`get_by_rank`](OSAvlTree::get_by_rank) - Get the element at a given sorted position
//! - [`rank_of`](OSAvlTree::rank_of) - Get the sorted position of an element
//! - Indexing by [`Rank`] - e.g., `tree[Rank(0)]` for the smallest element
//!
//! # Example
//!
//! ```
//! use avos_tree::{OSAvlTree, Rank};
//!
//! let mut scores = OSAvlTree::new();
//! scores.insert(100);
//! scores.insert(85);
//! scores.insert(92);
//!
//! // Multiset semantics: duplicates are kept.
//! scores.insert(92);
//! assert_eq!(scores.len(), 4);
//!
//! // Order-statistic operations (O(log n))
//! assert_eq!(scores.get_by_rank(0), Some(&85));
//! assert_eq!(scores[Rank(3)], 100);
//!
//! // Find the rank of an element
//! assert_eq!(scores.rank_of(&100), Some(3));
//!
//! scores.remove(&92);
//! assert_eq!(scores.len(), 3);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Multiset semantics** - Insert always succeeds; equal values are kept and
//!   ordered arbitrarily among themselves
//! - **O(log n) rank operations** - Efficient order-statistic queries via subtree
//!   size augmentation
//! - **Strict height balance** - AVL rotations keep the height within
//!   1.44 log2(n + 2) even under adversarial (sorted) insertion order
//!
//! # Implementation
//!
//! The tree is a classic AVL tree where every node additionally tracks the size
//! of its own subtree. Structural changes rebalance bottom-up on the unwind path,
//! so each insert or remove performs at most one rotation decision per level.
//! Nodes live in a slot arena and reference each other through compact handles.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod order_statistic;
mod raw;

pub mod osavl_tree;

pub use order_statistic::Rank;
pub use osavl_tree::OSAvlTree;
