// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The simulation driver: motion records, the collision event queue, and the
//! time-advance loop.

use alloc::collections::BinaryHeap;
use alloc::vec::Vec;

use thicket_search_tree::{EntryKey, IntBox, SearchTree};

use crate::types::{BodyId, Collider, Dynamics, Reactions};

/// Units per second on the synthetic time axis.
const TIME_SCALE: f64 = 1000.0;
/// Extent of the time axis in the index domain (1000 seconds of simulation).
const TIME_DOMAIN: i64 = 1_000_000;

/// Per-body record owned by the driver.
///
/// The swept box covers the body's footprint over its current prediction
/// interval, with the interval itself on the last axis; the box's time-axis
/// origin doubles as the record's own time origin.
struct Motion<const D: usize, O> {
    object: O,
    swept: IntBox<D>,
    key: EntryKey,
    doomed: bool,
}

impl<const D: usize, O> Motion<D, O> {
    /// Absolute time the body's physical state currently refers to.
    fn origin(&self) -> f64 {
        self.swept.pos[D - 1] as f64 / TIME_SCALE
    }
}

/// A queued candidate collision. Ordered by ascending time (ties arbitrary);
/// consumers re-validate, since an earlier event may have superseded it.
struct Event {
    a: BodyId,
    b: BodyId,
    time: f64,
    axis: usize,
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time
    }
}

impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        // `BinaryHeap` is a max-heap; reverse so the earliest time pops first.
        other.time.total_cmp(&self.time)
    }
}

/// A continuously simulated scene of axis-aligned bodies.
///
/// `N` is the number of space axes; `D` must be `N + 1` (checked at compile
/// time) — the extra axis holds each body's prediction interval, so swept
/// volumes become ordinary query boxes for the underlying
/// [`SearchTree`]. The [`Space1`]/[`Space2`]/[`Space3`] aliases pin the
/// common instantiations.
///
/// Bodies are added by value and addressed through stable [`BodyId`]
/// handles. [`Space::advance_to`] moves the whole scene to an absolute
/// target time, resolving every pairwise collision on the way in
/// chronological order — including chains of collisions caused by earlier
/// ones within the same call.
pub struct Space<const N: usize, const D: usize, O: Collider<N>> {
    bodies: Vec<Option<Motion<D, O>>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    tree: SearchTree<D, BodyId>,
    now: f64,
}

/// One space axis plus time.
pub type Space1<O> = Space<1, 2, O>;
/// Two space axes plus time.
pub type Space2<O> = Space<2, 3, O>;
/// Three space axes plus time.
pub type Space3<O> = Space<3, 4, O>;

impl<const N: usize, const D: usize, O: Collider<N>> core::fmt::Debug for Space<N, D, O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Space")
            .field("bodies", &self.len())
            .field("time", &self.now)
            .field("tree", &self.tree)
            .finish_non_exhaustive()
    }
}

impl<const N: usize, const D: usize, O: Collider<N>> Space<N, D, O> {
    /// Index of the synthetic time axis. Referencing this also enforces the
    /// `D == N + 1` shape at compile time.
    const TIME_AXIS: usize = {
        assert!(D == N + 1, "`Space` requires `D == N + 1` (space axes plus one time axis)");
        N
    };

    /// Create a space over `bounds` with the default index depth of `2 * N`
    /// split levels.
    pub fn new(bounds: IntBox<N>) -> Self {
        Self::with_depth(bounds, 2 * N)
    }

    /// Create a space with an explicit index depth. Depth `0` is valid and
    /// degrades every broad-phase query to a linear scan.
    pub fn with_depth(bounds: IntBox<N>, depth: usize) -> Self {
        let mut pos = [0_i64; D];
        let mut size = [0_i64; D];
        for i in 0..N {
            pos[i] = bounds.pos[i];
            size[i] = bounds.size[i];
        }
        pos[Self::TIME_AXIS] = 0;
        size[Self::TIME_AXIS] = TIME_DOMAIN;
        Self {
            bodies: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            tree: SearchTree::new(IntBox::new(pos, size), depth),
            now: 0.0,
        }
    }

    /// The current simulation time, in seconds.
    pub fn time(&self) -> f64 {
        self.now
    }

    /// Number of live bodies.
    pub fn len(&self) -> usize {
        self.bodies.iter().flatten().count()
    }

    /// Whether the space holds no bodies.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add a body. Returns a handle that stays valid until the body is
    /// removed.
    pub fn add(&mut self, object: O) -> BodyId {
        let foot = object.dynamics().footprint();
        let swept = Self::swept_box(foot, foot, self.now, self.now);
        let (slot, generation) = if let Some(slot) = self.free_list.pop() {
            let generation = self.generations[slot].saturating_add(1);
            self.generations[slot] = generation;
            (slot, generation)
        } else {
            self.bodies.push(None);
            self.generations.push(1);
            (self.bodies.len() - 1, 1)
        };
        let id = BodyId::new(slot, generation);
        let key = self.tree.insert(swept, id);
        self.bodies[slot] = Some(Motion {
            object,
            swept,
            key,
            doomed: false,
        });
        id
    }

    /// Remove a body immediately. No-op on a stale handle.
    ///
    /// From inside a collision callback, use
    /// [`Reactions`](crate::Reactions) instead; removal is then deferred to
    /// the end of the resolution pass.
    pub fn remove(&mut self, id: BodyId) {
        if self.motion(id).is_some() {
            self.reap(id.idx());
        }
    }

    /// Whether `id` still refers to a live body.
    pub fn contains(&self, id: BodyId) -> bool {
        self.motion(id).is_some()
    }

    /// Borrow a body.
    pub fn get(&self, id: BodyId) -> Option<&O> {
        self.motion(id).map(|m| &m.object)
    }

    /// Borrow a body mutably.
    ///
    /// Mutating a body's state between steps is fine; the next
    /// [`Space::advance_to`] re-derives its swept volume from scratch.
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut O> {
        self.motion_mut(id).map(|m| &mut m.object)
    }

    /// Iterate over every live body and its handle.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &O)> + '_ {
        self.bodies.iter().enumerate().filter_map(|(slot, m)| {
            m.as_ref()
                .map(|m| (BodyId::new(slot, self.generations[slot]), &m.object))
        })
    }

    /// Advance the whole scene to the absolute time `target`, resolving
    /// every pairwise collision on the way in chronological order.
    ///
    /// Collision callbacks run while the pass is in flight; removals they
    /// request through [`Reactions`](crate::Reactions) are applied at the
    /// end of the pass. A `target` at (or before) the current time is not an
    /// error: predictions degenerate and no body moves.
    pub fn advance_to(&mut self, target: f64) {
        // Predict: flush pending removals, then cover each body's course
        // over [now, target] with a fresh swept box and re-home its entry.
        for slot in 0..self.bodies.len() {
            let Some(m) = self.bodies[slot].as_ref() else {
                continue;
            };
            if m.doomed {
                self.reap(slot);
                continue;
            }
            let d = m.object.dynamics();
            let swept =
                Self::swept_box(d.footprint(), d.footprint_after(target - self.now), self.now, target);
            let key = m.key;
            let new_key = self
                .tree
                .relocate(key, swept)
                .expect("live motion holds a live tree key");
            let m = self.bodies[slot].as_mut().expect("slot checked above");
            m.swept = swept;
            m.key = new_key;
        }

        // Seed: enqueue every predicted contact, keyed by ascending time.
        let mut queue = BinaryHeap::new();
        for slot in 0..self.bodies.len() {
            if self.bodies[slot].is_some() {
                self.seed_contacts(&mut queue, BodyId::new(slot, self.generations[slot]), target);
            }
        }

        // Resolve: strictly chronological. Stale events — superseded by an
        // earlier resolution — fail re-validation and are dropped silently.
        while let Some(event) = queue.pop() {
            if !self.event_valid(&event) {
                continue;
            }
            let (ia, ib) = (event.a.idx(), event.b.idx());
            // Lift both records out so the symmetric callbacks can borrow
            // both objects mutably at once.
            let mut ma = self.bodies[ia].take().expect("validated event body");
            let mut mb = self.bodies[ib].take().expect("validated event body");

            let ma_dt = event.time - ma.origin();
            let mb_dt = event.time - mb.origin();
            ma.object.dynamics_mut().advance(ma_dt);
            mb.object.dynamics_mut().advance(mb_dt);

            let mut removals: Vec<BodyId> = Vec::new();
            let mut rx = Reactions::new(event.a, event.b, &mut removals);
            ma.object.on_contact(&mut mb.object, event.time, &mut rx);
            let mut rx = Reactions::new(event.b, event.a, &mut removals);
            mb.object.on_contact(&mut ma.object, event.time, &mut rx);

            O::Dynamics::elastic_exchange(
                ma.object.dynamics_mut(),
                mb.object.dynamics_mut(),
                event.axis,
            );

            // Re-cover the remainder of the step and re-home both entries.
            for m in [&mut ma, &mut mb] {
                let d = m.object.dynamics();
                let swept = Self::swept_box(
                    d.footprint(),
                    d.footprint_after(target - event.time),
                    event.time,
                    target,
                );
                m.swept = swept;
                m.key = self
                    .tree
                    .relocate(m.key, swept)
                    .expect("live motion holds a live tree key");
            }
            self.bodies[ia] = Some(ma);
            self.bodies[ib] = Some(mb);

            for id in removals {
                if let Some(m) = self.motion_mut(id) {
                    m.doomed = true;
                }
            }

            // The velocity change may create new contacts for exactly these
            // two bodies; everything else is untouched.
            self.seed_contacts(&mut queue, event.a, target);
            self.seed_contacts(&mut queue, event.b, target);
        }

        // Commit: apply removals deferred by callbacks, then bring every
        // survivor to the target time from its own origin.
        for slot in 0..self.bodies.len() {
            if self.bodies[slot].as_ref().is_some_and(|m| m.doomed) {
                self.reap(slot);
            }
        }
        for m in self.bodies.iter_mut().flatten() {
            let dt = target - m.origin();
            m.object.dynamics_mut().advance(dt);
        }
        self.now = target;
    }

    /// Query the index around `a`'s swept box and enqueue a contact for
    /// every other candidate whose course meets it within this step.
    ///
    /// Contacts past `target` belong to a later step; the next predict pass
    /// will rediscover them from fresher state.
    fn seed_contacts(&self, queue: &mut BinaryHeap<Event>, a: BodyId, target: f64) {
        let Some(ma) = self.motion(a) else {
            return;
        };
        let a_origin = ma.origin();
        let a_dyn = ma.object.dynamics();
        for (_, &b) in self.tree.near(ma.swept) {
            if b == a {
                continue;
            }
            let Some(mb) = self.motion(b) else {
                continue;
            };
            let contact =
                O::Dynamics::first_contact(a_dyn, a_origin, mb.object.dynamics(), mb.origin());
            if let Some(c) = contact {
                if c.time >= 0.0 && c.time <= target {
                    queue.push(Event {
                        a,
                        b,
                        time: c.time,
                        axis: c.axis,
                    });
                }
            }
        }
    }

    /// Re-check a queued event against current reality: both bodies alive,
    /// still touching or overlapping at the event time, and actually closing
    /// along the recorded axis (the trailing body faster than the leader).
    fn event_valid(&self, event: &Event) -> bool {
        let Some(ma) = self.motion(event.a) else {
            return false;
        };
        let Some(mb) = self.motion(event.b) else {
            return false;
        };
        let a_dyn = ma.object.dynamics();
        let b_dyn = mb.object.dynamics();
        let a_rect = a_dyn.footprint_after(event.time - ma.origin());
        let b_rect = b_dyn.footprint_after(event.time - mb.origin());
        if !a_rect.meets(&b_rect) {
            return false;
        }
        let axis = event.axis;
        if a_dyn.footprint().pos[axis] < b_dyn.footprint().pos[axis] {
            a_dyn.velocity(axis) > b_dyn.velocity(axis)
        } else {
            b_dyn.velocity(axis) > a_dyn.velocity(axis)
        }
    }

    /// Swept box covering both footprints, with `[from, to]` on the time
    /// axis.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Times land well within the i64 time-axis domain; the cast is the ms quantization."
    )]
    fn swept_box(start: IntBox<N>, finish: IntBox<N>, from: f64, to: f64) -> IntBox<D> {
        let cover = start.union_with(&finish);
        let mut pos = [0_i64; D];
        let mut size = [0_i64; D];
        for i in 0..N {
            pos[i] = cover.pos[i];
            size[i] = cover.size[i];
        }
        pos[Self::TIME_AXIS] = (from * TIME_SCALE) as i64;
        size[Self::TIME_AXIS] = ((to - from) * TIME_SCALE) as i64;
        IntBox::new(pos, size)
    }

    fn motion(&self, id: BodyId) -> Option<&Motion<D, O>> {
        if self.generations.get(id.idx()) != Some(&id.generation()) {
            return None;
        }
        self.bodies.get(id.idx())?.as_ref()
    }

    fn motion_mut(&mut self, id: BodyId) -> Option<&mut Motion<D, O>> {
        if self.generations.get(id.idx()) != Some(&id.generation()) {
            return None;
        }
        self.bodies.get_mut(id.idx())?.as_mut()
    }

    /// Destroy the record in `slot`: the tree entry goes first, then the
    /// motion — the index must never hold a handle to a dead body.
    fn reap(&mut self, slot: usize) {
        if let Some(m) = self.bodies[slot].take() {
            self.tree.remove(m.key);
            self.free_list.push(slot);
        }
    }
}
