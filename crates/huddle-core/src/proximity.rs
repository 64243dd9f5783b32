//! Square-neighborhood proximity predicate.
//!
//! Two positions are nearby when they differ by strictly less than the
//! threshold on both axes. Exactly `threshold` apart on either axis is not
//! nearby.

use crate::Position;

/// Check whether two positions are within `threshold` of each other on both axes.
pub fn is_nearby(a: Position, b: Position, threshold: f64) -> bool {
    (a.x - b.x).abs() < threshold && (a.y - b.y).abs() < threshold
}
