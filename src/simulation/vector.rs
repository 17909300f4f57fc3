//! 2D vector type for the polygon engine.
//!
//! Positions, velocities, forces and impulses are all `NVec2`
//! (nalgebra `Vector2<f64>`). nalgebra already covers add/sub/neg/scale,
//! `dot`, `norm` and `metric_distance`; `VecExt` fills in the rest.

use nalgebra::Vector2;

pub type NVec2 = Vector2<f64>;

/// The zero vector
pub const VEC_ZERO: NVec2 = NVec2::new(0.0, 0.0);

/// Operations the engine needs that nalgebra does not name the same way
pub trait VecExt {
    /// Scalar (z component) cross product `self.x * other.y - self.y * other.x`.
    /// Named apart from nalgebra's inherent 3D `cross`, which would shadow it.
    fn cross_2d(&self, other: &NVec2) -> f64;

    /// Rotate counter-clockwise by `angle` radians about the origin
    fn rotated(&self, angle: f64) -> NVec2;

    /// Unit vector in the same direction; the zero vector maps to itself
    fn direction(&self) -> NVec2;
}

impl VecExt for NVec2 {
    fn cross_2d(&self, other: &NVec2) -> f64 {
        self.perp(other)
    }

    fn rotated(&self, angle: f64) -> NVec2 {
        let (sin, cos) = angle.sin_cos();
        NVec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    fn direction(&self) -> NVec2 {
        let mag = self.norm();
        if mag == 0.0 {
            return VEC_ZERO;
        }
        self / mag
    }
}
