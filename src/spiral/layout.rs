use std::f64::consts::PI;

use crate::foundation::core::Point;
use crate::spiral::tier::Tier;

/// Side length of the logical design canvas. Display scaling is applied at render time.
pub const LOGICAL_EXTENT: f64 = 400.0;

/// π(3 − √5), the angle between successive dots.
pub const GOLDEN_ANGLE: f64 = PI * (3.0 - 2.236_067_977_499_789_7);

/// One placed dot of the spiral, in logical units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    /// Position in emission order, `0..n`.
    pub index: u32,
    /// `(index + 0.5) / n`, strictly inside `(0, 1)`.
    pub fraction: f64,
    /// Distance from the canvas centre.
    pub radial_distance: f64,
    /// Polar angle in radians (not reduced modulo 2π).
    pub angle: f64,
    /// Seconds into the period at which this dot's cycle starts.
    pub phase_offset: f64,
    /// Cartesian centre.
    pub center: Point,
}

/// Radius of the circle on which the outermost dot centre may sit.
pub fn max_radius(tier: &Tier) -> f64 {
    LOGICAL_EXTENT / 2.0 - tier.margin - tier.dot_radius
}

/// Place `tier.n` dots on the golden-angle spiral.
///
/// Square-root radial spacing keeps areal density uniform; the half-index offset keeps dots off
/// the exact centre and the boundary.
pub fn layout_dots(tier: &Tier, duration: f64) -> Vec<Dot> {
    let center = LOGICAL_EXTENT / 2.0;
    let max_r = max_radius(tier);
    let n = f64::from(tier.n);

    (0..tier.n)
        .map(|i| {
            let idx = f64::from(i) + 0.5;
            let fraction = idx / n;
            let radial_distance = fraction.sqrt() * max_r;
            let angle = idx * GOLDEN_ANGLE;
            Dot {
                index: i,
                fraction,
                radial_distance,
                angle,
                phase_offset: fraction * duration,
                center: Point::new(
                    center + radial_distance * angle.cos(),
                    center + radial_distance * angle.sin(),
                ),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/spiral/layout.rs"]
mod tests;
