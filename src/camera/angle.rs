//! Angle arithmetic on the circle.
//!
//! Longitudes are compared and interpolated in the canonical range `(-π, π]`.
//! Raw longitudes are not continuous across the `±π` seam, so every
//! interpolation goes through [`shortest_delta`] instead of a naive lerp.

use std::f32::consts::PI;
use std::f32::consts::TAU;

/// Canonicalizes any finite angle into `(-π, π]`.
pub fn normalize(angle: f32) -> f32 {
    // rem_euclid lands in [0, TAU], the upper bound only through rounding
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

/// Signed delta in `(-π, π]` such that `start + delta` is congruent to `end`.
///
/// Always takes the shorter arc. An exactly antipodal pair resolves to `+π`,
/// so animations toward the far side of the globe always travel eastward.
pub fn shortest_delta(start: f32, end: f32) -> f32 { normalize(end - start) }
