// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use thicket_search_tree::{EntryKey, IntBox, SearchTree};

fn gen_grid_boxes(n: usize, cell: i64) -> Vec<IntBox<2>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(IntBox::new([x as i64 * cell, y as i64 * cell], [cell, cell]));
        }
    }
    out
}

fn build_tree(depth: usize, extent: i64, boxes: &[IntBox<2>]) -> SearchTree<2, u32> {
    let mut tree: SearchTree<2, u32> = SearchTree::new(IntBox::new([0, 0], [extent, extent]), depth);
    for (i, r) in boxes.iter().copied().enumerate() {
        tree.insert(r, i as u32);
    }
    tree
}

/// Depth 0 is the linear-scan baseline; deeper trees should prune.
fn bench_near_by_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("near_by_depth");
    let boxes = gen_grid_boxes(64, 10);
    for &depth in &[0usize, 4, 8, 12] {
        group.throughput(Throughput::Elements((64 * 64) as u64));
        group.bench_function(format!("build_then_near_depth{}", depth), |b| {
            b.iter_batched(
                || build_tree(depth, 640, &boxes),
                |tree| {
                    let mut total = 0usize;
                    for q in 0..64_i64 {
                        let x = (q % 8) * 80;
                        let y = (q / 8) * 80;
                        total += tree.near(IntBox::new([x, y], [60, 60])).count();
                    }
                    black_box(total);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_full_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_traversal");
    let boxes = gen_grid_boxes(64, 10);
    for &depth in &[0usize, 8] {
        group.bench_function(format!("iter_all_depth{}", depth), |b| {
            b.iter_batched(
                || build_tree(depth, 640, &boxes),
                |tree| {
                    black_box(tree.iter().count());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

/// The driver relocates every entry once per step; model that churn.
fn bench_relocate_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("relocate_heavy");
    let boxes = gen_grid_boxes(64, 10);
    group.bench_function("drift_all_entries", |b| {
        b.iter_batched(
            || {
                let mut tree: SearchTree<2, u32> =
                    SearchTree::new(IntBox::new([0, 0], [640, 640]), 8);
                let keys: Vec<EntryKey> = boxes
                    .iter()
                    .copied()
                    .enumerate()
                    .map(|(i, r)| tree.insert(r, i as u32))
                    .collect();
                (tree, keys)
            },
            |(mut tree, keys)| {
                for (j, key) in keys.into_iter().enumerate() {
                    let dx = (j as i64 % 5) - 2;
                    let dy = ((j * 7) as i64 % 5) - 2;
                    let b = tree.bounds(key).unwrap();
                    let moved = IntBox::new([b.pos[0] + dx, b.pos[1] + dy], b.size);
                    let _ = tree.relocate(key, moved);
                }
                black_box(tree.len());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_near_by_depth,
    bench_full_traversal,
    bench_relocate_heavy,
);
criterion_main!(benches);
