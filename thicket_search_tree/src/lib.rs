// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Search Tree: a box-partitioning search tree in any dimension.
//!
//! Thicket Search Tree is a reusable building block for broad-phase
//! proximity queries over axis-aligned integer boxes.
//!
//! - Fixed-shape binary partitioning: the domain is recursively halved along
//!   its longest axis down to a chosen depth, once, at construction.
//! - Insert, relocate, and remove entries with stable generational keys.
//! - Walk everything with [`SearchTree::iter`], or only the neighborhood of
//!   a box with [`SearchTree::near`], which prunes provably-irrelevant
//!   subtrees.
//!
//! Entries are stored at the smallest node whose domain contains the entry's
//! box grown by one unit per axis. The growth means two boxes that merely
//! touch — share a boundary with zero-measure contact — are always reachable
//! from each other's [`SearchTree::near`] walk, which is what a collision
//! broad phase needs to catch resting contact as well as overlap.
//!
//! It is generic over the axis count `D` and the payload type, and does not
//! depend on any geometry crate. Higher layers decide what the axes mean; a
//! simulation can, for example, spend one axis on a time interval so that
//! swept volumes become ordinary query boxes.
//!
//! # Example
//!
//! ```rust
//! use thicket_search_tree::{IntBox, SearchTree};
//!
//! // A 2D tree over a 100×100 domain, split four levels deep.
//! let mut tree: SearchTree<2, u32> = SearchTree::new(IntBox::new([0, 0], [100, 100]), 4);
//! let a = tree.insert(IntBox::new([10, 10], [5, 5]), 1);
//! let _b = tree.insert(IntBox::new([80, 80], [5, 5]), 2);
//!
//! // Proximity query around the first box: the far entry is pruned away.
//! let near: Vec<u32> = tree.near(IntBox::new([8, 8], [10, 10])).map(|(_, v)| *v).collect();
//! assert_eq!(near, [1]);
//!
//! // Keys stay valid until their own entry moves or dies.
//! let a = tree.relocate(a, IntBox::new([60, 60], [5, 5])).unwrap();
//! assert_eq!(tree.remove(a), Some(1));
//! assert_eq!(tree.len(), 1);
//! ```
//!
//! ## Depth zero
//!
//! A tree built with depth `0` is a single node: every operation degrades to
//! a linear scan but answers identically. This is a valid configuration for
//! tiny workloads, and a useful baseline when benchmarking.

#![no_std]

extern crate alloc;

pub mod tree;
pub mod types;

pub use tree::{Entries, SearchTree};
pub use types::{EntryKey, IntBox, NodeId};
