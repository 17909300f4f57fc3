//! Axis-aligned bounding boxes.

use crate::simulation::vector::NVec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Unbounded region, used for space that is not constrained at all
    pub const INFINITE: Self = Self {
        min_x: f64::NEG_INFINITY,
        min_y: f64::NEG_INFINITY,
        max_x: f64::INFINITY,
        max_y: f64::INFINITY,
    };

    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn translate(&self, translation: NVec2) -> Self {
        Self {
            min_x: self.min_x + translation.x,
            min_y: self.min_y + translation.y,
            max_x: self.max_x + translation.x,
            max_y: self.max_y + translation.y,
        }
    }

    pub fn center(&self) -> NVec2 {
        NVec2::new((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    /// Strict interior test; points on the border are outside
    pub fn contains_point(&self, point: NVec2) -> bool {
        point.x > self.min_x && point.x < self.max_x && point.y > self.min_y && point.y < self.max_y
    }
}
