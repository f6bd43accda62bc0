// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Newton's cradle, the discrete-event way.
//!
//! A striker flies into a row of touching, resting balls. Resolving the
//! first contact gives the next ball its velocity, which makes the next
//! contact valid, and so on — the whole cascade resolves inside a single
//! `advance_to` call, strictly in time order.
//!
//! Run:
//! - `cargo run -p thicket_demos --example chain_reaction`

use thicket_space::{Collider, IntBox, LinearBody, Reactions, Space2};

struct Ball {
    name: &'static str,
    body: LinearBody<2>,
}

impl Collider<2> for Ball {
    type Dynamics = LinearBody<2>;

    fn dynamics(&self) -> &LinearBody<2> {
        &self.body
    }

    fn dynamics_mut(&mut self) -> &mut LinearBody<2> {
        &mut self.body
    }

    fn on_contact(&mut self, other: &mut Self, time: f64, _reactions: &mut Reactions<'_>) {
        // Symmetric notification: report each pair once.
        if self.name < other.name {
            println!("[{time:5.2}s] {} and {} collide", self.name, other.name);
        }
    }
}

fn main() {
    let mut space: Space2<Ball> = Space2::new(IntBox::new([0, 0], [1000, 100]));

    let striker = Ball {
        name: "striker",
        body: LinearBody::new([0, 40], [16, 16], [25.0, 0.0]),
    };
    space.add(striker);

    // Four resting balls, touching each other.
    for (i, name) in ["a", "b", "c", "d"].into_iter().enumerate() {
        space.add(Ball {
            name,
            body: LinearBody::new([100 + 16 * i as i64, 40], [16, 16], [0.0, 0.0]),
        });
    }

    // One call; the whole cascade happens at t = 3.36.
    space.advance_to(10.0);

    println!("\nafter {:.1}s:", space.time());
    for (_, ball) in space.iter() {
        let [x, _] = ball.body.position();
        let [vx, _] = ball.body.velocities();
        println!("  {:>7}: x = {x:6.1}  vx = {vx:5.1}", ball.name);
    }
}
