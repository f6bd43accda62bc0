// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: construction, entry management, traversal.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::types::{EntryKey, IntBox, NodeId};

struct Entry<const D: usize, T> {
    bounds: IntBox<D>,
    value: T,
}

struct Node<const D: usize, T> {
    domain: IntBox<D>,
    children: Option<[u32; 2]>,
    slots: Vec<Option<Entry<D, T>>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<u32>,
}

impl<const D: usize, T> Node<D, T> {
    fn new(domain: IntBox<D>) -> Self {
        Self {
            domain,
            children: None,
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }
}

/// Fixed-shape binary partitioning tree over axis-aligned boxes.
///
/// The tree is built once, to a fixed split depth, by recursively halving its
/// domain along the currently-longest axis (floor division for the first
/// child, remainder for the second). Entries are stored at the smallest node
/// whose domain contains their box grown by one unit of extent per axis, so
/// boxes that merely touch a partition boundary still share a node with
/// their neighbors across it.
///
/// A tree of depth `0` is a single unsplit node; every operation still works
/// and degrades to a linear scan of the root's entries.
pub struct SearchTree<const D: usize, T> {
    nodes: Vec<Node<D, T>>, // root at index 0, children allocated depth-first
    len: usize,
}

impl<const D: usize, T> core::fmt::Debug for SearchTree<D, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SearchTree")
            .field("nodes", &self.nodes.len())
            .field("entries", &self.len)
            .field("domain", &self.nodes[0].domain)
            .finish_non_exhaustive()
    }
}

impl<const D: usize, T> SearchTree<D, T> {
    /// Create a tree spanning `domain` with `depth` levels of splits.
    pub fn new(domain: IntBox<D>, depth: usize) -> Self {
        let mut nodes = Vec::new();
        build(&mut nodes, domain, depth);
        Self { nodes, len: 0 }
    }

    /// The box the whole tree spans.
    pub fn domain(&self) -> IntBox<D> {
        self.nodes[0].domain
    }

    /// The box a given node spans.
    pub fn node_domain(&self, node: NodeId) -> IntBox<D> {
        self.nodes[node.idx()].domain
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every entry, keeping the node structure. Keys issued before the
    /// clear must not be reused afterwards.
    pub fn clear(&mut self) {
        for node in &mut self.nodes {
            node.slots.clear();
            node.generations.clear();
            node.free_list.clear();
        }
        self.len = 0;
    }

    /// Find the smallest node whose domain contains `bounds` grown by one
    /// unit of extent per axis, probing the first child before the second.
    ///
    /// Boxes too large for any node (including ones exceeding the domain
    /// itself) fall back to the root.
    pub fn find(&self, bounds: IntBox<D>) -> NodeId {
        let target = bounds.grown(1);
        NodeId(self.locate(0, &target).unwrap_or(0))
    }

    fn locate(&self, node: u32, target: &IntBox<D>) -> Option<u32> {
        let n = &self.nodes[node as usize];
        if !n.domain.contains(target) {
            return None;
        }
        if let Some([a, b]) = n.children {
            if let Some(hit) = self.locate(a, target) {
                return Some(hit);
            }
            if let Some(hit) = self.locate(b, target) {
                return Some(hit);
            }
        }
        Some(node)
    }

    /// Insert a value keyed by `bounds`. Returns a stable [`EntryKey`].
    ///
    /// Inserting the same value twice stores two independent entries.
    pub fn insert(&mut self, bounds: IntBox<D>, value: T) -> EntryKey {
        let node = self.find(bounds);
        self.insert_in(node, bounds, value)
    }

    /// Insert directly into `node`, skipping the descent. Callers normally
    /// obtain `node` from [`SearchTree::find`]; inserting elsewhere weakens
    /// proximity queries for this entry but is otherwise harmless.
    pub fn insert_in(&mut self, node: NodeId, bounds: IntBox<D>, value: T) -> EntryKey {
        let n = &mut self.nodes[node.idx()];
        let entry = Entry { bounds, value };
        let (slot, generation) = if let Some(slot) = n.free_list.pop() {
            let generation = n.generations[slot as usize].saturating_add(1);
            n.generations[slot as usize] = generation;
            n.slots[slot as usize] = Some(entry);
            (slot, generation)
        } else {
            let generation = 1_u32;
            n.slots.push(Some(entry));
            n.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Slot indices are intentionally 32-bit."
            )]
            let slot = (n.slots.len() - 1) as u32;
            (slot, generation)
        };
        self.len += 1;
        EntryKey {
            node: node.0,
            slot,
            generation,
        }
    }

    /// Same as [`SearchTree::insert`], but first intersects `bounds` with the
    /// tree domain so out-of-range boxes are clipped instead of falling back
    /// to the root.
    pub fn insert_clipped(&mut self, bounds: IntBox<D>, value: T) -> EntryKey {
        let clipped = bounds.clipped(&self.nodes[0].domain);
        self.insert(clipped, value)
    }

    /// Remove the entry behind `key` and return its value. Returns `None` if
    /// the key is stale.
    pub fn remove(&mut self, key: EntryKey) -> Option<T> {
        let n = self.nodes.get_mut(key.node as usize)?;
        if n.generations.get(key.slot as usize) != Some(&key.generation) {
            return None;
        }
        let entry = n.slots[key.slot as usize].take()?;
        n.free_list.push(key.slot);
        self.len -= 1;
        Some(entry.value)
    }

    /// Move an entry to new bounds in one operation, re-finding its node.
    ///
    /// The old key is invalidated; the returned key replaces it. Returns
    /// `None` (and changes nothing) if `key` is stale.
    pub fn relocate(&mut self, key: EntryKey, bounds: IntBox<D>) -> Option<EntryKey> {
        let value = self.remove(key)?;
        Some(self.insert(bounds, value))
    }

    /// Borrow the value behind `key`, if it is still live.
    pub fn get(&self, key: EntryKey) -> Option<&T> {
        self.entry(key).map(|e| &e.value)
    }

    /// The bounds the entry behind `key` was last stored with.
    pub fn bounds(&self, key: EntryKey) -> Option<IntBox<D>> {
        self.entry(key).map(|e| e.bounds)
    }

    /// Whether `key` still refers to a live entry.
    pub fn contains_key(&self, key: EntryKey) -> bool {
        self.entry(key).is_some()
    }

    fn entry(&self, key: EntryKey) -> Option<&Entry<D, T>> {
        let n = self.nodes.get(key.node as usize)?;
        if n.generations.get(key.slot as usize) != Some(&key.generation) {
            return None;
        }
        n.slots[key.slot as usize].as_ref()
    }

    /// Visit every entry, breadth-first from the root. Each node's entries
    /// are yielded in slot order before its children are descended into.
    pub fn iter(&self) -> Entries<'_, D, T> {
        Entries::new(self, None)
    }

    /// Visit entries near `bounds`: the same walk as [`SearchTree::iter`],
    /// but subtrees whose domain neither overlaps nor touches `bounds` are
    /// skipped entirely.
    ///
    /// Every stored box that overlaps or touches `bounds` is guaranteed to
    /// be visited; boxes that don't may be visited anyway (the filter prunes
    /// by node domain, not per entry). In the best case this walks one node
    /// per tree level; when many entries crowd the query's neighborhood it
    /// degrades toward a full scan — an accepted characteristic, not a bug.
    pub fn near(&self, bounds: IntBox<D>) -> Entries<'_, D, T> {
        Entries::new(self, Some(bounds))
    }
}

fn build<const D: usize, T>(nodes: &mut Vec<Node<D, T>>, domain: IntBox<D>, depth: usize) -> u32 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Node indices are intentionally 32-bit."
    )]
    let idx = nodes.len() as u32;
    nodes.push(Node::new(domain));
    if depth > 0 {
        let (first, second) = split_longest(&domain);
        let a = build(nodes, first, depth - 1);
        let b = build(nodes, second, depth - 1);
        nodes[idx as usize].children = Some([a, b]);
    }
    idx
}

/// Halve `domain` across its longest axis: floor half first, remainder second.
fn split_longest<const D: usize>(domain: &IntBox<D>) -> (IntBox<D>, IntBox<D>) {
    let mut axis = 0;
    let mut longest = 0;
    for i in 0..D {
        if domain.size[i] > longest {
            axis = i;
            longest = domain.size[i];
        }
    }
    let half = longest / 2;
    let mut first = *domain;
    first.size[axis] = half;
    let mut second = *domain;
    second.pos[axis] += half;
    second.size[axis] = longest - half;
    (first, second)
}

/// Iterator over a tree's entries, optionally pruned to a query box.
///
/// Returned by [`SearchTree::iter`] and [`SearchTree::near`]. Holds a queue
/// of pending nodes plus a cursor into the current node's slots; exhausting
/// a node enqueues its admitted children and moves on, skipping empty nodes.
pub struct Entries<'a, const D: usize, T> {
    tree: &'a SearchTree<D, T>,
    queue: VecDeque<u32>,
    cursor: usize,
    prune: Option<IntBox<D>>,
}

impl<'a, const D: usize, T> Entries<'a, D, T> {
    fn new(tree: &'a SearchTree<D, T>, prune: Option<IntBox<D>>) -> Self {
        let mut queue = VecDeque::new();
        let admit_root = match &prune {
            Some(bounds) => bounds.meets(&tree.nodes[0].domain),
            None => true,
        };
        if admit_root {
            queue.push_back(0);
        }
        Self {
            tree,
            queue,
            cursor: 0,
            prune,
        }
    }

    fn admits(&self, node: u32) -> bool {
        match &self.prune {
            Some(bounds) => bounds.meets(&self.tree.nodes[node as usize].domain),
            None => true,
        }
    }
}

impl<const D: usize, T> core::fmt::Debug for Entries<'_, D, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Entries")
            .field("pending_nodes", &self.queue.len())
            .field("pruned", &self.prune.is_some())
            .finish_non_exhaustive()
    }
}

impl<'a, const D: usize, T> Iterator for Entries<'a, D, T> {
    type Item = (EntryKey, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = *self.queue.front()?;
            let n = &self.tree.nodes[node as usize];
            while self.cursor < n.slots.len() {
                let slot = self.cursor;
                self.cursor += 1;
                if let Some(entry) = n.slots[slot].as_ref() {
                    #[allow(
                        clippy::cast_possible_truncation,
                        reason = "Slot indices are intentionally 32-bit."
                    )]
                    let key = EntryKey {
                        node,
                        slot: slot as u32,
                        generation: n.generations[slot],
                    };
                    return Some((key, &entry.value));
                }
            }
            self.queue.pop_front();
            self.cursor = 0;
            if let Some([a, b]) = n.children {
                if self.admits(a) {
                    self.queue.push_back(a);
                }
                if self.admits(b) {
                    self.queue.push_back(b);
                }
            }
        }
    }
}
