//! Force creators for the polygon engine
//!
//! A force creator is anything implementing [`ForceCreator`]: it is called
//! once per tick (pre- or post-integration) with mutable access to the
//! scene's bodies. Plain closures work; the structs here cover the standard
//! effects (gravity, springs, drag, rigid constraints) and the collision
//! dispatch used by gameplay interactions.
//!
//! Whatever a creator owns is its auxiliary data; dropping the creator when
//! the scene reaps it is the auxiliary destructor.
//!
//! The `create_*` functions register a creator together with the bodies it
//! depends on, so the scene can reap it as soon as one of them is removed.

use log::warn;

use crate::simulation::body::Body;
use crate::simulation::collision::CollisionStatus;
use crate::simulation::scene::{Bodies, BodyId, Scene, TickPhase};
use crate::simulation::vector::{NVec2, VecExt, VEC_ZERO};

use std::f64::consts::FRAC_PI_2;

/// Below this centroid distance pairwise gravity is switched off
pub const NEWTONIAN_GRAVITY_MIN_DISTANCE: f64 = 5.0;

/// Added to the overlap in instant collision resolution. Negative, so the
/// bodies stay very slightly overlapped instead of landing exactly on the
/// boundary.
pub const INSTANT_COLLISION_RESOLUTION_EPSILON: f64 = -0.01;

/// A physical effect applied once per tick
pub trait ForceCreator {
    fn apply(&mut self, bodies: &mut Bodies);
}

impl<F> ForceCreator for F
where
    F: FnMut(&mut Bodies),
{
    fn apply(&mut self, bodies: &mut Bodies) {
        self(bodies)
    }
}

/// Called by [`Collision`] when its two bodies collide.
/// `axis` is a unit vector pointing from `body1` toward `body2`.
pub trait CollisionHandler {
    fn on_collision(&mut self, bodies: &mut Bodies, body1: BodyId, body2: BodyId, axis: NVec2);
}

impl<F> CollisionHandler for F
where
    F: FnMut(&mut Bodies, BodyId, BodyId, NVec2),
{
    fn on_collision(&mut self, bodies: &mut Bodies, body1: BodyId, body2: BodyId, axis: NVec2) {
        self(bodies, body1, body2, axis)
    }
}

/// Called by [`SpecialInteraction`] every tick, regardless of overlap
pub trait InteractionHandler {
    fn interact(&mut self, bodies: &mut Bodies, body1: BodyId, body2: BodyId);
}

impl<F> InteractionHandler for F
where
    F: FnMut(&mut Bodies, BodyId, BodyId),
{
    fn interact(&mut self, bodies: &mut Bodies, body1: BodyId, body2: BodyId) {
        self(bodies, body1, body2)
    }
}

/// Mass as seen by two-body formulas: zero mass counts as infinitely heavy
fn effective_mass(body: &Body) -> f64 {
    if body.mass() == 0.0 {
        f64::INFINITY
    } else {
        body.mass()
    }
}

/// Reduced mass of a pair; `None` when both are infinitely heavy
pub fn reduced_mass(m1: f64, m2: f64) -> Option<f64> {
    match (m1.is_infinite(), m2.is_infinite()) {
        (true, true) => None,
        (true, false) => Some(m2),
        (false, true) => Some(m1),
        (false, false) => Some(m1 * m2 / (m1 + m2)),
    }
}

/// Impulse that `body1` receives in a collision along `axis`; `body2`
/// receives the negation. `elasticity` 0 is perfectly inelastic, 1 perfectly
/// elastic.
pub fn collision_impulse(body1: &Body, body2: &Body, axis: NVec2, elasticity: f64) -> NVec2 {
    let Some(mu) = reduced_mass(effective_mass(body1), effective_mass(body2)) else {
        return VEC_ZERO;
    };
    let u1 = body1.velocity().dot(&axis);
    let u2 = body2.velocity().dot(&axis);
    axis * (mu * (1.0 + elasticity) * (u2 - u1))
}

// =========================================================================================
// Field forces
// =========================================================================================

/// Inverse-square attraction between two bodies
pub struct NewtonianGravity {
    pub g: f64,
    pub min_distance: f64,
    pub body1: BodyId,
    pub body2: BodyId,
}

impl ForceCreator for NewtonianGravity {
    fn apply(&mut self, bodies: &mut Bodies) {
        let Some((b1, b2)) = bodies.pair_mut(self.body1, self.body2) else {
            return;
        };
        let r = b2.centroid() - b1.centroid(); // from body1 to body2
        let dist = r.norm();
        if dist < self.min_distance {
            return;
        }
        // |F| = G m1 m2 / |r|^2, pulling body1 towards body2
        let magnitude = self.g * b1.mass() * b2.mass() / (dist * dist);
        let force = r.direction() * magnitude;
        // Newton's third law: equal and opposite on body2
        b1.add_force(force);
        b2.add_force(-force);
    }
}

/// Uniform downward gravity `(0, -m g)` on one body
pub struct GlobalGravity {
    pub g: f64,
    pub body: BodyId,
}

impl ForceCreator for GlobalGravity {
    fn apply(&mut self, bodies: &mut Bodies) {
        if let Some(body) = bodies.get_mut(self.body) {
            let force = NVec2::new(0.0, -body.mass() * self.g);
            body.add_force(force);
        }
    }
}

/// Zero-rest-length spring between two centroids
pub struct Spring {
    pub k: f64,
    pub body1: BodyId,
    pub body2: BodyId,
}

impl ForceCreator for Spring {
    fn apply(&mut self, bodies: &mut Bodies) {
        let Some((b1, b2)) = bodies.pair_mut(self.body1, self.body2) else {
            return;
        };
        let force = (b2.centroid() - b1.centroid()) * self.k;
        b1.add_force(force);
        b2.add_force(-force);
    }
}

/// Linear drag `-gamma v`
pub struct Drag {
    pub gamma: f64,
    pub body: BodyId,
}

impl ForceCreator for Drag {
    fn apply(&mut self, bodies: &mut Bodies) {
        if let Some(body) = bodies.get_mut(self.body) {
            let force = -body.velocity() * self.gamma;
            body.add_force(force);
        }
    }
}

/// Holds two bodies at a fixed relative displacement by moving them directly,
/// each in proportion to the reduced mass over its own mass. Velocities are
/// left alone.
pub struct RigidConstraint {
    pub displacement: NVec2, // centroid1 - centroid2 at registration
    pub body1: BodyId,
    pub body2: BodyId,
}

impl ForceCreator for RigidConstraint {
    fn apply(&mut self, bodies: &mut Bodies) {
        let Some((b1, b2)) = bodies.pair_mut(self.body1, self.body2) else {
            return;
        };
        let (m1, m2) = (effective_mass(b1), effective_mass(b2));
        let Some(mu) = reduced_mass(m1, m2) else {
            return;
        };
        // drift of the current displacement from the registered one
        let error = self.displacement - (b1.centroid() - b2.centroid());
        // mu/m1 + mu/m2 = 1, so the split closes the error exactly and the
        // heavier body moves less
        b1.translate(error * (mu / m1));
        b2.translate(-error * (mu / m2));
    }
}

// =========================================================================================
// Collision dispatch
// =========================================================================================

/// Which collisions fire the handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionMode {
    pub contact: bool, // fire every frame while touching, not just on entry
    pub full_only: bool, // only count full (containment) collisions
}

impl CollisionMode {
    /// Fire once on entering any overlap
    pub const EDGE: Self = Self { contact: false, full_only: false };
    /// Fire every frame while overlapping
    pub const CONTACT: Self = Self { contact: true, full_only: false };
    /// Fire once on reaching full containment
    pub const EDGE_FULL: Self = Self { contact: false, full_only: true };
    /// Fire every frame while fully contained
    pub const CONTACT_FULL: Self = Self { contact: true, full_only: true };
}

/// Runs a [`CollisionHandler`] according to a [`CollisionMode`], remembering
/// whether the pair was already colliding last frame
pub struct Collision<H> {
    pub body1: BodyId,
    pub body2: BodyId,
    pub handler: H,
    pub mode: CollisionMode,
    collided_in_last_frame: bool,
}

impl<H: CollisionHandler> Collision<H> {
    pub fn new(body1: BodyId, body2: BodyId, handler: H, mode: CollisionMode) -> Self {
        Self {
            body1,
            body2,
            handler,
            mode,
            collided_in_last_frame: false,
        }
    }

    pub fn collided_in_last_frame(&self) -> bool {
        self.collided_in_last_frame
    }
}

impl<H: CollisionHandler> ForceCreator for Collision<H> {
    fn apply(&mut self, bodies: &mut Bodies) {
        let info = match (bodies.get(self.body1), bodies.get(self.body2)) {
            (Some(b1), Some(b2)) => b1.detect_collision(b2),
            _ => return,
        };
        if !info.collided() {
            self.collided_in_last_frame = false;
            return;
        }
        let counts = !self.mode.full_only || info.status == CollisionStatus::Full;
        if (!self.collided_in_last_frame || self.mode.contact) && counts {
            self.handler.on_collision(bodies, self.body1, self.body2, info.axis);
        }
        if counts {
            self.collided_in_last_frame = true;
        }
    }
}

/// Tombstones both bodies
pub struct DestructiveHandler;

impl CollisionHandler for DestructiveHandler {
    fn on_collision(&mut self, bodies: &mut Bodies, body1: BodyId, body2: BodyId, _axis: NVec2) {
        bodies.remove(body1);
        bodies.remove(body2);
    }
}

/// Tombstones only the first body
pub struct OneBodyDestructiveHandler;

impl CollisionHandler for OneBodyDestructiveHandler {
    fn on_collision(&mut self, bodies: &mut Bodies, body1: BodyId, _body2: BodyId, _axis: NVec2) {
        bodies.remove(body1);
    }
}

/// Exchanges an impulse along the collision axis
pub struct PhysicsHandler {
    pub elasticity: f64,
}

impl CollisionHandler for PhysicsHandler {
    fn on_collision(&mut self, bodies: &mut Bodies, body1: BodyId, body2: BodyId, axis: NVec2) {
        if let Some((b1, b2)) = bodies.pair_mut(body1, body2) {
            let impulse = collision_impulse(b1, b2, axis, self.elasticity);
            b1.add_impulse(impulse);
            b2.add_impulse(-impulse);
        }
    }
}

/// Kinetic friction of constant magnitude `mu`, opposing the relative
/// velocity along the contact tangent
pub struct FrictionHandler {
    pub mu: f64,
}

impl CollisionHandler for FrictionHandler {
    fn on_collision(&mut self, bodies: &mut Bodies, body1: BodyId, body2: BodyId, axis: NVec2) {
        if let Some((b1, b2)) = bodies.pair_mut(body1, body2) {
            let tangent = axis.rotated(FRAC_PI_2);
            let relative = b1.velocity() - b2.velocity();
            let sliding = tangent * tangent.dot(&relative);
            let force = sliding.direction() * -self.mu;
            b1.add_force(force);
            b2.add_force(-force);
        }
    }
}

/// Pushes the bodies apart along the axis and applies a perfectly inelastic
/// impulse straight to their velocities
pub struct InstantResolutionHandler;

impl CollisionHandler for InstantResolutionHandler {
    fn on_collision(&mut self, bodies: &mut Bodies, body1: BodyId, body2: BodyId, axis: NVec2) {
        let Some((b1, b2)) = bodies.pair_mut(body1, body2) else {
            return;
        };
        let info = b1.detect_collision(b2);
        // containment cannot be resolved by translation alone
        if info.status == CollisionStatus::Full {
            return;
        }
        let (m1, m2) = (effective_mass(b1), effective_mass(b2));
        let Some(mu) = reduced_mass(m1, m2) else {
            return;
        };
        // axis points from body1 towards body2: push body1 back along -axis.
        // The epsilon leaves the pair just apart so the next frame sees no overlap.
        let depth = info.overlap + INSTANT_COLLISION_RESOLUTION_EPSILON;
        b1.translate(axis * (-mu / m1 * depth));
        b2.translate(axis * (mu / m2 * depth));

        // e = 0: the relative velocity along the axis vanishes, v += J / m
        let impulse = collision_impulse(b1, b2, axis, 0.0);
        b1.set_velocity(b1.velocity() + impulse / m1);
        b2.set_velocity(b2.velocity() - impulse / m2);
    }
}

// =========================================================================================
// Special interactions
// =========================================================================================

/// Calls its handler every tick with both bodies, overlap or not
pub struct SpecialInteraction<H> {
    pub body1: BodyId,
    pub body2: BodyId,
    pub handler: H,
}

impl<H: InteractionHandler> ForceCreator for SpecialInteraction<H> {
    fn apply(&mut self, bodies: &mut Bodies) {
        self.handler.interact(bodies, self.body1, self.body2);
    }
}

// =========================================================================================
// Registration
// =========================================================================================

pub fn create_newtonian_gravity(scene: &mut Scene, g: f64, body1: BodyId, body2: BodyId) {
    scene.add_bodies_force_creator(
        NewtonianGravity {
            g,
            min_distance: NEWTONIAN_GRAVITY_MIN_DISTANCE,
            body1,
            body2,
        },
        vec![body1, body2],
    );
}

pub fn create_global_gravity(scene: &mut Scene, g: f64, body: BodyId) {
    scene.add_bodies_force_creator(GlobalGravity { g, body }, vec![body]);
}

pub fn create_spring(scene: &mut Scene, k: f64, body1: BodyId, body2: BodyId) {
    scene.add_bodies_force_creator(Spring { k, body1, body2 }, vec![body1, body2]);
}

pub fn create_drag(scene: &mut Scene, gamma: f64, body: BodyId) {
    scene.add_bodies_force_creator(Drag { gamma, body }, vec![body]);
}

pub fn create_friction(scene: &mut Scene, mu: f64, body1: BodyId, body2: BodyId) {
    create_contact_collision(scene, body1, body2, FrictionHandler { mu });
}

/// Lock the current displacement between two bodies. Runs post-tick.
pub fn create_physical_rigid_constraint(scene: &mut Scene, body1: BodyId, body2: BodyId) {
    let displacement = scene.bodies()[body1].centroid() - scene.bodies()[body2].centroid();
    scene.add_generic_force_creator(
        RigidConstraint {
            displacement,
            body1,
            body2,
        },
        TickPhase::PostTick,
        vec![body1, body2],
    );
}

pub fn create_generic_collision<H>(
    scene: &mut Scene,
    body1: BodyId,
    body2: BodyId,
    handler: H,
    phase: TickPhase,
    mode: CollisionMode,
) where
    H: CollisionHandler + 'static,
{
    scene.add_generic_force_creator(Collision::new(body1, body2, handler, mode), phase, vec![body1, body2]);
}

/// Pre-tick collision that fires once each time the bodies start touching
pub fn create_collision<H>(scene: &mut Scene, body1: BodyId, body2: BodyId, handler: H)
where
    H: CollisionHandler + 'static,
{
    create_generic_collision(scene, body1, body2, handler, TickPhase::PreTick, CollisionMode::EDGE);
}

/// Pre-tick collision that fires on every frame of contact
pub fn create_contact_collision<H>(scene: &mut Scene, body1: BodyId, body2: BodyId, handler: H)
where
    H: CollisionHandler + 'static,
{
    create_generic_collision(scene, body1, body2, handler, TickPhase::PreTick, CollisionMode::CONTACT);
}

pub fn create_destructive_collision(scene: &mut Scene, body1: BodyId, body2: BodyId) {
    create_collision(scene, body1, body2, DestructiveHandler);
}

/// Remove `doomed` once it is fully overlapped with `other`
pub fn create_one_body_full_destructive_collision(scene: &mut Scene, doomed: BodyId, other: BodyId) {
    create_generic_collision(
        scene,
        doomed,
        other,
        OneBodyDestructiveHandler,
        TickPhase::PreTick,
        CollisionMode::CONTACT_FULL,
    );
}

pub fn create_physics_collision(scene: &mut Scene, elasticity: f64, body1: BodyId, body2: BodyId) {
    create_collision(scene, body1, body2, PhysicsHandler { elasticity });
}

pub fn create_physics_contact_collision(scene: &mut Scene, elasticity: f64, body1: BodyId, body2: BodyId) {
    create_contact_collision(scene, body1, body2, PhysicsHandler { elasticity });
}

/// Post-tick positional correction plus inelastic response. Skipped when both
/// bodies are infinitely heavy, since nothing could move.
pub fn create_instant_resolution_collision(scene: &mut Scene, body1: BodyId, body2: BodyId) {
    let both_immovable = {
        let bodies = scene.bodies();
        reduced_mass(effective_mass(&bodies[body1]), effective_mass(&bodies[body2])).is_none()
    };
    if both_immovable {
        warn!("instant resolution between two immovable bodies {:?} and {:?} skipped", body1, body2);
        return;
    }
    create_generic_collision(
        scene,
        body1,
        body2,
        InstantResolutionHandler,
        TickPhase::PostTick,
        CollisionMode::CONTACT,
    );
}

pub fn create_special_interaction<H>(scene: &mut Scene, body1: BodyId, body2: BodyId, handler: H, phase: TickPhase)
where
    H: InteractionHandler + 'static,
{
    scene.add_generic_force_creator(
        SpecialInteraction {
            body1,
            body2,
            handler,
        },
        phase,
        vec![body1, body2],
    );
}
