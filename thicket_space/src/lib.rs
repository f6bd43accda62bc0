// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Space: a continuous-collision simulation driver.
//!
//! ## Overview
//!
//! This crate advances a whole scene of axis-aligned bodies from one time to
//! another, resolving every pairwise contact strictly in chronological order
//! — including chains of collisions that earlier collisions cause within the
//! same step. It does not integrate physics itself: position, velocity, and
//! the pairwise collision math live behind the [`Dynamics`] trait, and user
//! objects behind [`Collider`]; the driver supplies the ordering, the broad
//! phase, and the bookkeeping.
//!
//! The broad phase rides on [`thicket_search_tree`] with one extra synthetic
//! axis holding each body's prediction interval. A moving body's swept
//! volume becomes an ordinary box in that index, so "who could I hit during
//! this step" is a plain proximity query.
//!
//! ## A step in four phases
//!
//! [`Space::advance_to`] runs predict → seed → resolve → commit:
//!
//! 1. Every body's swept box is recomputed over `[now, target]` and
//!    re-homed in the index.
//! 2. Candidate pairs from the index are handed to
//!    [`Dynamics::first_contact`]; hits land in a min-heap keyed by time.
//! 3. Events pop in time order. Each is re-validated first — an earlier
//!    resolution may have made it stale — then both bodies advance to the
//!    contact time, both [`Collider::on_contact`] callbacks run, the elastic
//!    exchange applies, and the pair is re-swept and re-seeded for the rest
//!    of the step.
//! 4. Deferred removals flush and every survivor advances to `target`.
//!
//! ## Removal is reentrancy-safe
//!
//! A collision callback may decide a body should die — including the body
//! whose callback is running. Calling back into the space is impossible
//! while the resolution pass borrows it, and that is the point: removal
//! wishes go through [`Reactions`] instead, and the space applies them at
//! the end of the pass, so queued events and records stay coherent.
//!
//! ## Several kinds of object
//!
//! The driver is generic over one object type. Scenes with a closed set of
//! variants wrap them in an enum and dispatch inside
//! [`Collider::on_contact`] by matching both sides — double dispatch is two
//! `match`es, not a trait-object hierarchy. See `demos/bouncing_balls.rs`
//! for a worked example with balls and walls.
//!
//! # Example
//!
//! ```rust
//! use thicket_space::{Collider, IntBox, LinearBody, Reactions, Space2};
//!
//! struct Ball(LinearBody<2>);
//!
//! impl Collider<2> for Ball {
//!     type Dynamics = LinearBody<2>;
//!     fn dynamics(&self) -> &LinearBody<2> {
//!         &self.0
//!     }
//!     fn dynamics_mut(&mut self) -> &mut LinearBody<2> {
//!         &mut self.0
//!     }
//!     fn on_contact(&mut self, _other: &mut Self, _time: f64, _reactions: &mut Reactions<'_>) {}
//! }
//!
//! let mut space: Space2<Ball> = Space2::new(IntBox::new([0, 0], [640, 480]));
//! let a = space.add(Ball(LinearBody::new([0, 100], [16, 16], [4.0, 0.0])));
//! let b = space.add(Ball(LinearBody::new([200, 100], [16, 16], [-4.0, 0.0])));
//!
//! // The head-on pair meets at t = 23 and swaps velocities.
//! space.advance_to(30.0);
//! assert_eq!(space.get(a).unwrap().0.velocities(), [-4.0, 0.0]);
//! assert_eq!(space.get(b).unwrap().0.velocities(), [4.0, 0.0]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod kinematics;
pub mod space;
pub mod types;

pub use kinematics::LinearBody;
pub use space::{Space, Space1, Space2, Space3};
pub use types::{BodyId, Collider, Contact, Dynamics, Reactions};

/// Re-export of the box type used throughout the API.
pub use thicket_search_tree::IntBox;
