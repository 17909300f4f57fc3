//! Rigid polygon bodies.
//!
//! A `Body` owns its world-space polygon and all kinematic state. The polygon
//! is moved in place; the centroid is cached and shifted along with every
//! translation instead of being recomputed from the vertices.
//!
//! Mass follows three regimes:
//! - positive finite: a normally simulated body,
//! - `0.0`: never moved by force or impulse (decorative/static geometry),
//! - `f64::INFINITY`: never moved by force or impulse, and infinitely heavy
//!   in two-body collision math.
//!
//! Bodies are not freed by whoever created them. `remove` only sets a
//! tombstone; the scene drops tombstoned bodies on its next tick.

use std::any::Any;
use std::fmt;

use crate::simulation::bounding_box::BoundingBox;
use crate::simulation::collision::{find_collision, CollisionInfo};
use crate::simulation::color::Rgba;
use crate::simulation::integrator::{integrate_rotation, integrate_translation};
use crate::simulation::polygon::Polygon;
use crate::simulation::vector::{NVec2, VEC_ZERO};

pub struct Body {
    pub(crate) shape: Polygon, // world-space vertices
    pub(crate) mass: f64,
    pub(crate) color: Rgba,
    pub(crate) velocity: NVec2,
    pub(crate) acceleration: NVec2, // estimate from the last tick, never read back
    pub(crate) orientation: f64, // absolute, radians
    pub(crate) centroid: NVec2,
    pub(crate) angular_velocity: f64,
    pub(crate) net_force: NVec2,
    pub(crate) net_impulse: NVec2,
    pub(crate) removed: bool,
    info: Option<Box<dyn Any>>, // game-layer payload, dropped with the body
}

fn assert_valid_mass(mass: f64) {
    assert!(
        mass == 0.0 || mass > 0.0,
        "body mass must be positive, zero or infinite, got {mass}"
    );
}

impl Body {
    pub fn new(shape: Polygon, mass: f64, color: Rgba) -> Self {
        assert_valid_mass(mass);
        let centroid = shape.centroid();
        Self {
            shape,
            mass,
            color,
            velocity: VEC_ZERO,
            acceleration: VEC_ZERO,
            orientation: 0.0,
            centroid,
            angular_velocity: 0.0,
            net_force: VEC_ZERO,
            net_impulse: VEC_ZERO,
            removed: false,
            info: None,
        }
    }

    /// Build a body that owns an arbitrary payload. The payload is dropped
    /// when the scene frees the body.
    pub fn with_info<T: Any>(shape: Polygon, mass: f64, color: Rgba, info: T) -> Self {
        let mut body = Self::new(shape, mass, color);
        body.info = Some(Box::new(info));
        body
    }

    pub fn shape(&self) -> &Polygon {
        &self.shape
    }

    /// Owned copy of the current polygon
    pub fn shape_snapshot(&self) -> Polygon {
        self.shape.clone()
    }

    pub fn centroid(&self) -> NVec2 {
        self.centroid
    }

    pub fn velocity(&self) -> NVec2 {
        self.velocity
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.shape.bounding_box()
    }

    pub fn acceleration(&self) -> NVec2 {
        self.acceleration
    }

    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    pub fn net_force(&self) -> NVec2 {
        self.net_force
    }

    pub fn net_impulse(&self) -> NVec2 {
        self.net_impulse
    }

    /// Payload downcast to `T`; `None` if absent or of another type
    pub fn info<T: Any>(&self) -> Option<&T> {
        self.info.as_ref()?.downcast_ref()
    }

    pub fn info_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.info.as_mut()?.downcast_mut()
    }

    pub fn has_info(&self) -> bool {
        self.info.is_some()
    }

    pub fn translate(&mut self, translation: NVec2) {
        self.shape.translate(translation);
        self.centroid += translation;
    }

    /// Rotate by `angle` radians about the centroid, relative to the current orientation
    pub fn rotate(&mut self, angle: f64) {
        self.shape.rotate(angle, self.centroid);
        self.orientation += angle;
    }

    /// Set the absolute orientation
    pub fn set_rotation(&mut self, angle: f64) {
        self.rotate(angle - self.orientation);
    }

    pub fn set_centroid(&mut self, centroid: NVec2) {
        self.translate(centroid - self.centroid);
    }

    pub fn set_velocity(&mut self, velocity: NVec2) {
        self.velocity = velocity;
    }

    pub fn set_mass(&mut self, mass: f64) {
        assert_valid_mass(mass);
        self.mass = mass;
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f64) {
        self.angular_velocity = angular_velocity;
    }

    pub fn add_force(&mut self, force: NVec2) {
        self.net_force += force;
    }

    pub fn add_impulse(&mut self, impulse: NVec2) {
        self.net_impulse += impulse;
    }

    /// Advance the body by `dt` seconds: velocity from accumulated
    /// force/impulse, trapezoidal translation, then rotation
    pub fn tick(&mut self, dt: f64) {
        let v_old = self.velocity;
        integrate_translation(self, dt);
        integrate_rotation(self, dt);
        if dt != 0.0 {
            self.acceleration = (self.velocity - v_old) / dt;
        }
    }

    /// Deep copy of shape and kinematic state. The payload is not copied.
    pub fn copy(&self) -> Self {
        Self {
            shape: self.shape.clone(),
            mass: self.mass,
            color: self.color,
            velocity: self.velocity,
            acceleration: self.acceleration,
            orientation: self.orientation,
            centroid: self.centroid,
            angular_velocity: self.angular_velocity,
            net_force: self.net_force,
            net_impulse: self.net_impulse,
            removed: self.removed,
            info: None,
        }
    }

    /// Shape the body would have after `dt` if only the selected integration
    /// steps ran. The live body is untouched.
    pub fn future_shape(&self, dt: f64, translate: bool, rotate: bool) -> Polygon {
        let mut future = self.copy();
        if translate {
            integrate_translation(&mut future, dt);
        }
        if rotate {
            integrate_rotation(&mut future, dt);
        }
        future.shape
    }

    pub fn future_shape_trans_rot(&self, dt: f64) -> Polygon {
        self.future_shape(dt, true, true)
    }

    pub fn future_shape_translational(&self, dt: f64) -> Polygon {
        self.future_shape(dt, true, false)
    }

    pub fn future_shape_rotational(&self, dt: f64) -> Polygon {
        self.future_shape(dt, false, true)
    }

    pub fn detect_collision(&self, other: &Body) -> CollisionInfo {
        find_collision(self.shape.vertices(), other.shape.vertices())
    }

    /// Mark for removal. Idempotent; the scene frees the body on its next tick.
    pub fn remove(&mut self) {
        self.removed = true;
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("centroid", &self.centroid)
            .field("velocity", &self.velocity)
            .field("mass", &self.mass)
            .field("orientation", &self.orientation)
            .field("angular_velocity", &self.angular_velocity)
            .field("vertices", &self.shape.len())
            .field("removed", &self.removed)
            .field("has_info", &self.info.is_some())
            .finish()
    }
}
