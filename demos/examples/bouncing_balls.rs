// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Balls in a box.
//!
//! A walled arena with a few bouncing balls, driven step by step. Shows the
//! closed-variant-set pattern: one enum over the object kinds, with double
//! dispatch as a `match` on both tags inside the collision callback. Walls
//! are just very heavy bodies, so the standard elastic exchange reflects
//! whatever hits them.
//!
//! Run:
//! - `cargo run -p thicket_demos --example bouncing_balls`

use thicket_space::{Collider, IntBox, LinearBody, Reactions, Space2};

const WALL_MASS: f64 = 1.0e9;

enum Entity {
    Ball { name: &'static str, body: LinearBody<2> },
    Wall { body: LinearBody<2> },
}

impl Entity {
    fn ball(name: &'static str, pos: [i64; 2], vel: [f64; 2]) -> Self {
        Self::Ball {
            name,
            body: LinearBody::new(pos, [16, 16], vel),
        }
    }

    fn wall(pos: [i64; 2], size: [i64; 2]) -> Self {
        Self::Wall {
            body: LinearBody::new(pos, size, [0.0, 0.0]).with_mass(WALL_MASS),
        }
    }
}

impl Collider<2> for Entity {
    type Dynamics = LinearBody<2>;

    fn dynamics(&self) -> &LinearBody<2> {
        match self {
            Self::Ball { body, .. } | Self::Wall { body } => body,
        }
    }

    fn dynamics_mut(&mut self) -> &mut LinearBody<2> {
        match self {
            Self::Ball { body, .. } | Self::Wall { body } => body,
        }
    }

    fn on_contact(&mut self, other: &mut Self, time: f64, _reactions: &mut Reactions<'_>) {
        match (self, other) {
            (Self::Ball { name, .. }, Self::Ball { name: other_name, .. }) => {
                // Symmetric notification: report each pair once.
                if *name < *other_name {
                    println!("[{time:6.2}s] ball {name} hits ball {other_name}");
                }
            }
            (Self::Ball { name, .. }, Self::Wall { .. }) => {
                println!("[{time:6.2}s] ball {name} hits a wall");
            }
            (Self::Wall { .. }, _) => {}
        }
    }
}

fn main() {
    // Arena interior 400×300, fenced by 10-unit walls.
    let mut space: Space2<Entity> = Space2::new(IntBox::new([0, 0], [420, 320]));
    space.add(Entity::wall([0, 0], [10, 320]));
    space.add(Entity::wall([410, 0], [10, 320]));
    space.add(Entity::wall([10, 0], [400, 10]));
    space.add(Entity::wall([10, 310], [400, 10]));

    space.add(Entity::ball("A", [60, 60], [30.0, 18.0]));
    space.add(Entity::ball("B", [200, 150], [-24.0, 12.0]));
    space.add(Entity::ball("C", [320, 80], [-12.0, -20.0]));

    for step in 1..=60 {
        space.advance_to(f64::from(step) * 0.25);
    }

    println!("\nafter {:.1}s:", space.time());
    for (_, entity) in space.iter() {
        if let Entity::Ball { name, body } = entity {
            let [x, y] = body.position();
            let [vx, vy] = body.velocities();
            println!("  ball {name}: pos ({x:6.1}, {y:6.1})  vel ({vx:6.1}, {vy:6.1})");
        }
    }
}
