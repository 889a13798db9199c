//! 2D geometry utilities for sketch metrics.
//!
//! Pure functions over sketch-plane coordinates, shared by sample
//! extraction and the pairwise metric computations.

use super::{Point2, EPSILON};

/// Compute squared distance between two 2D points.
#[inline]
pub fn distance_squared(p1: &Point2, p2: &Point2) -> f64 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    dx * dx + dy * dy
}

/// Compute distance between two 2D points.
#[inline]
pub fn distance(p1: &Point2, p2: &Point2) -> f64 {
    distance_squared(p1, p2).sqrt()
}

/// Midpoint between two 2D points.
#[inline]
pub fn midpoint(p1: &Point2, p2: &Point2) -> Point2 {
    Point2::new((p1.x + p2.x) * 0.5, (p1.y + p2.y) * 0.5)
}

/// Length of the segment from `start` to `end`.
#[inline]
pub fn line_length(start: &Point2, end: &Point2) -> f64 {
    distance(start, end)
}

/// Normalize an angle in degrees into [0, 180).
///
/// A line has no inherent direction, so an angle and its reverse
/// (angle + 180) name the same direction.
pub fn normalize_direction_deg(deg: f64) -> f64 {
    let mut d = deg % 180.0;
    if d < 0.0 {
        d += 180.0;
    }
    // a tiny negative remainder can round back up to exactly 180.0
    if d >= 180.0 {
        d -= 180.0;
    }
    d
}

/// Direction angle of the undirected segment from `start` to `end`,
/// in degrees normalized into [0, 180). Degenerate segments report 0.
pub fn direction_angle_deg(start: &Point2, end: &Point2) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    if dx * dx + dy * dy < EPSILON * EPSILON {
        return 0.0;
    }
    normalize_direction_deg(dy.atan2(dx).to_degrees())
}

/// Difference between two undirected direction angles, in degrees.
///
/// Directions wrap at 180, so 179 and 1 differ by 2, not 178.
pub fn direction_delta_deg(a: f64, b: f64) -> f64 {
    let d = (normalize_direction_deg(a) - normalize_direction_deg(b)).abs();
    d.min(180.0 - d)
}
