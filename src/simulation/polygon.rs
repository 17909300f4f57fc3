//! Convex polygon geometry.
//!
//! A `Polygon` is an ordered list of world-space vertices with an implicit
//! closing edge from the last vertex back to the first. Callers build shapes
//! counter-clockwise. Bodies mutate their polygon in place every tick, so
//! `translate` and `rotate` work on `&mut self` instead of returning copies.
//!
//! The constructors below cover the shapes the game layer builds:
//! rectangles (axis-aligned, centered, anchored, and rotated between two
//! points), stars, regular polygons, ellipses and a "pacman" wedge.

use std::f64::consts::PI;

use crate::simulation::bounding_box::BoundingBox;
use crate::simulation::vector::{NVec2, VecExt, VEC_ZERO};

/// Where a shape's reference point sits along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Min,
    Center,
    Max,
}

/// Anchor along both axes. `Min`/`Min` puts the bottom-left corner of the
/// bounding box at the requested position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorOption {
    pub x: Anchor,
    pub y: Anchor,
}

impl AnchorOption {
    pub const CENTER: Self = Self { x: Anchor::Center, y: Anchor::Center };

    pub const fn new(x: Anchor, y: Anchor) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<NVec2>,
}

impl Polygon {
    pub fn new(vertices: Vec<NVec2>) -> Self {
        assert!(vertices.len() >= 3, "polygon needs at least 3 vertices, got {}", vertices.len());
        Self { vertices }
    }

    pub fn vertices(&self) -> &[NVec2] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn into_vertices(self) -> Vec<NVec2> {
        self.vertices
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::new(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for v in &self.vertices {
            bbox.min_x = bbox.min_x.min(v.x);
            bbox.min_y = bbox.min_y.min(v.y);
            bbox.max_x = bbox.max_x.max(v.x);
            bbox.max_y = bbox.max_y.max(v.y);
        }
        bbox
    }

    /// Consecutive vertex pairs, including the closing edge
    fn edges(&self) -> impl Iterator<Item = (NVec2, NVec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Signed area by the shoelace formula; positive for counter-clockwise winding
    pub fn area(&self) -> f64 {
        self.edges().map(|(a, b)| a.cross_2d(&b)).sum::<f64>() / 2.0
    }

    pub fn centroid(&self) -> NVec2 {
        let area = self.area();
        let sum = self
            .edges()
            .fold(VEC_ZERO, |acc, (a, b)| acc + (a + b) * a.cross_2d(&b));
        sum / (6.0 * area)
    }

    pub fn translate(&mut self, translation: NVec2) {
        for v in self.vertices.iter_mut() {
            *v += translation;
        }
    }

    /// Rotate every vertex by `angle` radians about `point`
    pub fn rotate(&mut self, angle: f64, point: NVec2) {
        for v in self.vertices.iter_mut() {
            *v = (*v - point).rotated(angle) + point;
        }
    }

    /// Shift the shape so that the point it was built around ends up at the
    /// requested anchor of its bounding box
    fn move_anchor_to_current_center(&mut self, anchor: AnchorOption) {
        let bbox = self.bounding_box();
        let centroid = self.centroid();
        let dx = match anchor.x {
            Anchor::Min => centroid.x - bbox.min_x,
            Anchor::Center => 0.0,
            Anchor::Max => centroid.x - bbox.max_x,
        };
        let dy = match anchor.y {
            Anchor::Min => centroid.y - bbox.min_y,
            Anchor::Center => 0.0,
            Anchor::Max => centroid.y - bbox.max_y,
        };
        self.translate(NVec2::new(dx, dy));
    }

    /// Vertices evenly spaced in angle, radius picked per vertex
    fn radial(center: NVec2, num_verts: usize, radius: impl Fn(usize, f64) -> NVec2) -> Self {
        let mut shape = Self::new(
            (0..num_verts)
                .map(|i| radius(i, 2.0 * PI / num_verts as f64 * i as f64))
                .collect(),
        );
        shape.translate(center);
        shape
    }

    pub fn rectangle(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        assert!(min_x <= max_x && min_y <= max_y, "inverted rectangle bounds");
        Self::new(vec![
            NVec2::new(min_x, min_y),
            NVec2::new(max_x, min_y),
            NVec2::new(max_x, max_y),
            NVec2::new(min_x, max_y),
        ])
    }

    pub fn rectangle_centered(center: NVec2, width: f64, height: f64) -> Self {
        assert!(width >= 0.0 && height >= 0.0, "negative rectangle size");
        Self::rectangle(
            center.x - width / 2.0,
            center.y - height / 2.0,
            center.x + width / 2.0,
            center.y + height / 2.0,
        )
    }

    pub fn rectangle_anchored(anchor: AnchorOption, pos: NVec2, width: f64, height: f64) -> Self {
        let mut shape = Self::rectangle_centered(pos, width, height);
        shape.move_anchor_to_current_center(anchor);
        shape
    }

    /// Rectangle of the given width whose center line runs from `pos1` to `pos2`
    pub fn rectangle_rotated(pos1: NVec2, pos2: NVec2, width: f64) -> Self {
        let span = pos2 - pos1;
        let mut shape = Self::rectangle(0.0, -width / 2.0, span.norm(), width / 2.0);
        shape.rotate(span.y.atan2(span.x), VEC_ZERO);
        shape.translate(pos1);
        shape
    }

    /// Star with `num_arms` points alternating between the two radii
    pub fn star(center: NVec2, num_arms: usize, circumradius: f64, inradius: f64) -> Self {
        assert!(circumradius >= inradius, "star inradius exceeds circumradius");
        Self::radial(center, num_arms * 2, |i, theta| {
            let r = if i % 2 == 0 { circumradius } else { inradius };
            NVec2::new(r * theta.cos(), r * theta.sin())
        })
    }

    pub fn star_anchored(
        anchor: AnchorOption,
        pos: NVec2,
        num_arms: usize,
        circumradius: f64,
        inradius: f64,
    ) -> Self {
        let mut shape = Self::star(pos, num_arms, circumradius, inradius);
        shape.move_anchor_to_current_center(anchor);
        shape
    }

    pub fn regular_polygon(center: NVec2, circumradius: f64, num_verts: usize) -> Self {
        assert!(circumradius > 0.0, "regular polygon radius must be positive");
        Self::radial(center, num_verts, |_, theta| {
            NVec2::new(circumradius * theta.cos(), circumradius * theta.sin())
        })
    }

    pub fn regular_polygon_anchored(
        anchor: AnchorOption,
        pos: NVec2,
        circumradius: f64,
        num_verts: usize,
    ) -> Self {
        let mut shape = Self::regular_polygon(pos, circumradius, num_verts);
        shape.move_anchor_to_current_center(anchor);
        shape
    }

    pub fn ellipse(center: NVec2, width: f64, height: f64, num_verts: usize) -> Self {
        assert!(width > 0.0 && height > 0.0, "ellipse size must be positive");
        Self::radial(center, num_verts, |_, theta| {
            NVec2::new(width / 2.0 * theta.cos(), height / 2.0 * theta.sin())
        })
    }

    pub fn ellipse_anchored(
        anchor: AnchorOption,
        pos: NVec2,
        width: f64,
        height: f64,
        num_verts: usize,
    ) -> Self {
        let mut shape = Self::ellipse(pos, width, height, num_verts);
        shape.move_anchor_to_current_center(anchor);
        shape
    }

    /// Circle with a wedge cut out facing +x. The centroid of the resulting
    /// shape, not the circle's center, is placed at `center`.
    pub fn pacman(center: NVec2, mouth_angle: f64, face_radius: f64, back_segments: usize) -> Self {
        assert!(face_radius > 0.0, "pacman radius must be positive");
        let start = mouth_angle / 2.0;
        let step = (2.0 * PI - mouth_angle) / back_segments as f64;
        let mut vertices = Vec::with_capacity(back_segments + 2);
        vertices.push(VEC_ZERO);
        for i in 0..=back_segments {
            let theta = start + step * i as f64;
            vertices.push(NVec2::new(face_radius * theta.cos(), face_radius * theta.sin()));
        }
        let mut shape = Self::new(vertices);
        let centroid = shape.centroid();
        shape.translate(center - centroid);
        shape
    }
}

impl From<Vec<NVec2>> for Polygon {
    fn from(vertices: Vec<NVec2>) -> Self {
        Self::new(vertices)
    }
}
