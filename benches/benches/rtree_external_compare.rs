// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use thicket_search_tree::{IntBox, SearchTree};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

fn gen_grid_boxes(n: usize, cell: i64) -> Vec<IntBox<2>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(IntBox::new([x as i64 * cell, y as i64 * cell], [cell, cell]));
        }
    }
    out
}

fn to_rstar_rects(v: &[IntBox<2>]) -> Vec<Rectangle<[i64; 2]>> {
    v.iter()
        .map(|r| Rectangle::from_corners([r.pos[0], r.pos[1]], [r.end(0), r.end(1)]))
        .collect()
}

fn bench_external_compare_i64(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare_i64");
    for &n in &[64usize, 128] {
        let boxes = gen_grid_boxes(n, 10);
        let extent = n as i64 * 10;
        let query = IntBox::new([100, 100], [400, 400]);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("thicket_build_query_n{}", n), |b| {
            b.iter_batched(
                || boxes.clone(),
                |boxes| {
                    let mut tree: SearchTree<2, u32> =
                        SearchTree::new(IntBox::new([0, 0], [extent, extent]), 10);
                    for (i, r) in boxes.into_iter().enumerate() {
                        let _ = tree.insert(r, i as u32);
                    }
                    let hits: usize = tree.near(query).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&boxes),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    let aabb = AABB::from_corners(
                        [query.pos[0], query.pos[1]],
                        [query.end(0), query.end(1)],
                    );
                    let hits: usize = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_external_compare_i64);
criterion_main!(benches);
