//! The scene: body storage, force creator registry and the tick protocol.
//!
//! Bodies live in a generational arena (`slotmap`) so that force creators can
//! hold `BodyId`s instead of references. A separate dense `Vec<BodyId>` keeps
//! insertion order for index-based access; removal shifts later entries down.
//!
//! One call to [`Scene::tick`] runs four phases in a fixed order:
//! 1. pre-tick force creators, in registration order
//! 2. reaping of every force creator that depends on a tombstoned body
//! 3. body integration, freeing tombstoned bodies along the way
//! 4. post-tick force creators
//!
//! Creators are reaped in phase 2 before any body is freed in phase 3, so no
//! creator ever runs against a body that has been dropped. A body tombstoned
//! by a post-tick creator is still seen by the next tick's pre-tick creators
//! before it is reaped.

use std::ops::{Index, IndexMut};

use log::{debug, trace};
use slotmap::{new_key_type, SlotMap};

use crate::simulation::body::Body;
use crate::simulation::collision::find_collision;
use crate::simulation::forces::ForceCreator;
use crate::simulation::polygon::Polygon;

/// Width of the probe rectangle used for line-of-sight queries
pub const LINE_OF_SIGHT_PROBE_WIDTH: f64 = 0.01;

new_key_type! {
    /// Generation-checked handle to a body owned by a scene
    pub struct BodyId;
}

/// When a force creator runs relative to body integration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickPhase {
    /// Before integration; sees last frame's positions
    PreTick,
    /// After integration; sees positions from this frame
    PostTick,
}

/// Ordered body storage handed to force creators
#[derive(Default)]
pub struct Bodies {
    slots: SlotMap<BodyId, Body>,
    order: Vec<BodyId>, // dense, insertion-ordered
}

impl Bodies {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Handle of the body at dense position `index`. Panics if out of bounds.
    pub fn id(&self, index: usize) -> BodyId {
        assert!(index < self.order.len(), "body index {index} out of bounds (len {})", self.order.len());
        self.order[index]
    }

    pub fn ids(&self) -> &[BodyId] {
        &self.order
    }

    pub fn by_index(&self, index: usize) -> &Body {
        let id = self.id(index);
        &self.slots[id]
    }

    pub fn by_index_mut(&mut self, index: usize) -> &mut Body {
        let id = self.id(index);
        &mut self.slots[id]
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.slots.get(id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.slots.get_mut(id)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.slots.contains_key(id)
    }

    /// Mutable access to two distinct bodies at once. `None` if either is
    /// gone or both handles are the same.
    pub fn pair_mut(&mut self, a: BodyId, b: BodyId) -> Option<(&mut Body, &mut Body)> {
        let [first, second] = self.slots.get_disjoint_mut([a, b])?;
        Some((first, second))
    }

    /// True if the body is tombstoned or already freed
    pub fn is_removed(&self, id: BodyId) -> bool {
        self.slots.get(id).map_or(true, Body::is_removed)
    }

    /// Tombstone a body; no-op for handles that are already gone
    pub fn remove(&mut self, id: BodyId) {
        if let Some(body) = self.slots.get_mut(id) {
            body.remove();
        }
    }

    /// Bodies in dense order
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> + '_ {
        self.order.iter().map(move |&id| (id, &self.slots[id]))
    }

    fn insert(&mut self, body: Body) -> BodyId {
        let id = self.slots.insert(body);
        self.order.push(id);
        id
    }

    /// Free tombstoned bodies (keeping the order of survivors) and tick the rest.
    /// Returns the number of bodies freed.
    fn integrate(&mut self, dt: f64) -> usize {
        let slots = &mut self.slots;
        let before = self.order.len();
        self.order.retain(|&id| {
            if slots[id].is_removed() {
                slots.remove(id);
                false
            } else {
                slots[id].tick(dt);
                true
            }
        });
        before - self.order.len()
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
    }
}

impl Index<BodyId> for Bodies {
    type Output = Body;

    fn index(&self, id: BodyId) -> &Body {
        self.slots.get(id).expect("stale body handle")
    }
}

impl IndexMut<BodyId> for Bodies {
    fn index_mut(&mut self, id: BodyId) -> &mut Body {
        self.slots.get_mut(id).expect("stale body handle")
    }
}

/// A registered force creator with its dependencies and phase
struct ForceEntry {
    creator: Box<dyn ForceCreator>,
    bodies: Vec<BodyId>, // non-owning; any tombstone here reaps the entry
    phase: TickPhase,
}

#[derive(Default)]
pub struct Scene {
    bodies: Bodies,
    forces: Vec<ForceEntry>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Body at dense position `index`. Panics if out of bounds.
    pub fn body(&self, index: usize) -> &Body {
        self.bodies.by_index(index)
    }

    pub fn body_mut(&mut self, index: usize) -> &mut Body {
        self.bodies.by_index_mut(index)
    }

    pub fn body_id(&self, index: usize) -> BodyId {
        self.bodies.id(index)
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.bodies.contains(id)
    }

    pub fn bodies(&self) -> &Bodies {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut Bodies {
        &mut self.bodies
    }

    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = self.bodies.insert(body);
        debug!("added body {:?} ({} in scene)", id, self.bodies.len());
        id
    }

    /// Tombstone the body at dense position `index`; it is freed on the next tick
    pub fn remove_body(&mut self, index: usize) {
        self.bodies.by_index_mut(index).remove();
    }

    /// Drop every body and force creator immediately
    pub fn clear(&mut self) {
        self.forces.clear();
        self.bodies.clear();
    }

    pub fn force_creator_count(&self) -> usize {
        self.forces.len()
    }

    /// Register a pre-tick creator that depends on no particular body
    pub fn add_force_creator(&mut self, creator: impl ForceCreator + 'static) {
        self.add_generic_force_creator(creator, TickPhase::PreTick, Vec::new());
    }

    /// Register a pre-tick creator that is reaped once any of `bodies` is removed
    pub fn add_bodies_force_creator(&mut self, creator: impl ForceCreator + 'static, bodies: Vec<BodyId>) {
        self.add_generic_force_creator(creator, TickPhase::PreTick, bodies);
    }

    /// Register `creator` for `phase`, reaped once any of `bodies` is removed.
    /// Panics if one of `bodies` has already been freed.
    pub fn add_generic_force_creator(
        &mut self,
        creator: impl ForceCreator + 'static,
        phase: TickPhase,
        bodies: Vec<BodyId>,
    ) {
        for &id in &bodies {
            assert!(self.bodies.contains(id), "force creator depends on freed body {id:?}");
        }
        self.forces.push(ForceEntry {
            creator: Box::new(creator),
            bodies,
            phase,
        });
    }

    /// True if nothing opaque lies on the segment between the centroids of
    /// `viewer` and `target`. With no predicate every other body is opaque.
    pub fn detect_line_of_sight(
        &self,
        viewer: BodyId,
        target: BodyId,
        opaque: Option<&dyn Fn(&Body) -> bool>,
    ) -> bool {
        let probe = Polygon::rectangle_rotated(
            self.bodies[viewer].centroid(),
            self.bodies[target].centroid(),
            LINE_OF_SIGHT_PROBE_WIDTH,
        );
        !self.bodies.iter().any(|(id, body)| {
            id != viewer
                && id != target
                && !body.is_removed()
                && opaque.map_or(true, |is_opaque| is_opaque(body))
                && find_collision(probe.vertices(), body.shape().vertices()).collided()
        })
    }

    fn run_phase(&mut self, phase: TickPhase) {
        for entry in self.forces.iter_mut().filter(|e| e.phase == phase) {
            entry.creator.apply(&mut self.bodies);
        }
    }

    /// Advance the scene by `dt` seconds
    pub fn tick(&mut self, dt: f64) {
        trace!("tick dt={dt} bodies={} forces={}", self.bodies.len(), self.forces.len());

        self.run_phase(TickPhase::PreTick);

        // reap creators before any body they reference can be freed
        let bodies = &self.bodies;
        let before = self.forces.len();
        self.forces
            .retain(|entry| !entry.bodies.iter().any(|&id| bodies.is_removed(id)));
        let reaped = before - self.forces.len();
        if reaped > 0 {
            debug!("reaped {reaped} force creators");
        }

        let freed = self.bodies.integrate(dt);
        if freed > 0 {
            debug!("freed {freed} bodies ({} remain)", self.bodies.len());
        }

        self.run_phase(TickPhase::PostTick);
    }
}
