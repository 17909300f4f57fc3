//! Separating-axis collision detection between convex polygons.
//!
//! Every edge normal of both shapes is a candidate axis. Rather than stopping
//! at the first separating axis, the scan keeps the axis of minimum overlap,
//! so a colliding result carries a usable push-out direction and depth
//! (the minimum translation vector).

use crate::simulation::vector::{NVec2, VecExt};

use std::f64::consts::FRAC_PI_2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionStatus {
    None,
    /// Projections overlap without either containing the other
    Partial,
    /// On the minimum-overlap axis one projection contains the other
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    pub status: CollisionStatus,
    pub axis: NVec2, // unit axis pointing from shape1 toward shape2
    pub overlap: f64, // penetration depth along `axis`
}

impl CollisionInfo {
    pub fn collided(&self) -> bool {
        self.status != CollisionStatus::None
    }
}

/// Length of the overlap between the 1D segments `[min1, max1]` and `[min2, max2]`,
/// 0 when they are disjoint
pub fn segment_overlap(min1: f64, max1: f64, min2: f64, max2: f64) -> f64 {
    (max1.min(max2) - min1.max(min2)).max(0.0)
}

/// Outward unit normals of every non-degenerate edge
fn perpendicular_axes(shape: &[NVec2]) -> impl Iterator<Item = NVec2> + '_ {
    let n = shape.len();
    (0..n).filter_map(move |i| {
        let edge = shape[(i + 1) % n] - shape[i];
        let axis = edge.rotated(FRAC_PI_2).direction();
        (axis != NVec2::zeros()).then_some(axis)
    })
}

/// (min, max) of the dot products of `shape`'s vertices with `axis`
fn projection(shape: &[NVec2], axis: &NVec2) -> (f64, f64) {
    shape.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        let p = v.dot(axis);
        (lo.min(p), hi.max(p))
    })
}

/// Detect a collision between two convex polygons given by their vertices.
///
/// The returned axis always points from `shape1` toward `shape2`; for a
/// `None` result it is the separating axis that was found.
pub fn find_collision(shape1: &[NVec2], shape2: &[NVec2]) -> CollisionInfo {
    let mut best = CollisionInfo {
        status: CollisionStatus::None,
        axis: NVec2::zeros(),
        overlap: f64::INFINITY,
    };

    for mut axis in perpendicular_axes(shape1).chain(perpendicular_axes(shape2)) {
        let (min1, max1) = projection(shape1, &axis);
        let (min2, max2) = projection(shape2, &axis);
        let overlap = segment_overlap(min1, max1, min2, max2);
        if overlap >= best.overlap {
            continue;
        }

        // orient from shape1 to shape2 by comparing interval midpoints
        if min2 + max2 < min1 + max1 {
            axis = -axis;
        }
        best.axis = axis;
        best.overlap = overlap;

        if overlap == 0.0 {
            best.status = CollisionStatus::None;
            break;
        }
        let contained = (min1 <= min2 && max1 >= max2) || (min2 <= min1 && max2 >= max1);
        best.status = if contained { CollisionStatus::Full } else { CollisionStatus::Partial };
    }

    // no usable axis at all (fully degenerate input)
    if best.overlap.is_infinite() {
        best.overlap = 0.0;
    }
    best
}
