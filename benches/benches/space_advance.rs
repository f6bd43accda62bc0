// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use thicket_space::{Collider, IntBox, LinearBody, Reactions, Space2};

struct Ball {
    body: LinearBody<2>,
    hits: u32,
}

impl Collider<2> for Ball {
    type Dynamics = LinearBody<2>;

    fn dynamics(&self) -> &LinearBody<2> {
        &self.body
    }

    fn dynamics_mut(&mut self) -> &mut LinearBody<2> {
        &mut self.body
    }

    fn on_contact(&mut self, _other: &mut Self, _time: f64, _reactions: &mut Reactions<'_>) {
        self.hits += 1;
    }
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn populate(count: usize) -> Space2<Ball> {
    let mut space: Space2<Ball> = Space2::new(IntBox::new([0, 0], [2000, 2000]));
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x = (rng.next_f64() * 1960.0) as i64;
        let y = (rng.next_f64() * 1960.0) as i64;
        let vx = (rng.next_f64() - 0.5) * 40.0;
        let vy = (rng.next_f64() - 0.5) * 40.0;
        space.add(Ball {
            body: LinearBody::new([x, y], [12, 12], [vx, vy]),
            hits: 0,
        });
    }
    space
}

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("space_advance");
    for &n in &[32usize, 128, 512] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("step_{}_bodies", n), |b| {
            b.iter_batched(
                || populate(n),
                |mut space| {
                    for step in 1..=8 {
                        space.advance_to(f64::from(step) * 0.25);
                    }
                    let hits: u32 = space.iter().map(|(_, ball)| ball.hits).sum();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_add_remove_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("space_churn");
    group.bench_function("add_step_remove_half", |b| {
        b.iter_batched(
            || populate(128),
            |mut space| {
                space.advance_to(0.5);
                let ids: Vec<_> = space.iter().map(|(id, _)| id).collect();
                for id in ids.iter().step_by(2) {
                    space.remove(*id);
                }
                space.advance_to(1.0);
                black_box(space.len());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_advance, bench_add_remove_churn);
criterion_main!(benches);
