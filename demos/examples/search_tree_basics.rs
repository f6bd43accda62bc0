// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Search tree basics.
//!
//! Build a tree, insert a few boxes, run proximity queries, relocate an
//! entry, and watch which queries still see it.
//!
//! Run:
//! - `cargo run -p thicket_demos --example search_tree_basics`

use thicket_search_tree::{IntBox, SearchTree};

fn main() {
    // A 2D tree over a 400×400 domain, four split levels deep.
    let mut tree: SearchTree<2, &str> = SearchTree::new(IntBox::new([0, 0], [400, 400]), 4);

    let crate_box = tree.insert(IntBox::new([20, 20], [40, 40]), "crate");
    let _barrel = tree.insert(IntBox::new([70, 20], [30, 30]), "barrel");
    let _far_rock = tree.insert(IntBox::new([350, 350], [20, 20]), "rock");

    println!("tree: {:?}", tree);

    // Everything within (or touching) a probe window near the crate.
    let probe = IntBox::new([55, 25], [20, 20]);
    let nearby: Vec<&str> = tree.near(probe).map(|(_, v)| *v).collect();
    println!("near {:?}: {:?}", probe, nearby);

    // The rock sits in a far subtree; the walk never descends there.
    assert!(!nearby.contains(&"rock"));

    // Relocate the crate across the domain; its key changes, the others
    // stay untouched.
    let crate_box = tree
        .relocate(crate_box, IntBox::new([300, 300], [40, 40]))
        .expect("key is live");
    let nearby: Vec<&str> = tree
        .near(IntBox::new([320, 320], [40, 40]))
        .map(|(_, v)| *v)
        .collect();
    println!("near the far corner after relocating: {:?}", nearby);
    assert!(nearby.contains(&"crate") && nearby.contains(&"rock"));

    tree.remove(crate_box);
    println!("entries left: {}", tree.len());
}
