//! Closed-form pulse: the single source of truth for how a dot looks at any instant.

use std::f64::consts::TAU;

/// Lower bound of the radius oscillation, as a multiple of the tier's dot radius.
pub const RADIUS_MIN_FACTOR: f64 = 0.5;
/// Upper bound of the radius oscillation, as a multiple of the tier's dot radius.
pub const RADIUS_MAX_FACTOR: f64 = 1.5;
/// Opacity at the bottom of a pulse.
pub const OPACITY_MIN: f64 = 0.3;
/// Opacity at the top of a pulse.
pub const OPACITY_MAX: f64 = 1.0;

/// Position of a dot within its own cycle, in `[0, duration)`.
///
/// `t` is reduced modulo `duration` first, so `t` and `t + duration` resolve to the same
/// local time bit for bit whenever both are exactly representable.
pub fn local_time(t: f64, phase_offset: f64, duration: f64) -> f64 {
    let t = t.rem_euclid(duration);
    (t - phase_offset).rem_euclid(duration)
}

/// Pulse in `[0, 1]` for a dot with `phase_offset` at absolute time `t`.
pub fn pulse_at(t: f64, phase_offset: f64, duration: f64) -> f64 {
    let local = local_time(t, phase_offset, duration);
    0.5 + 0.5 * (TAU * local / duration).sin()
}

/// Radius and opacity of one dot at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotSample {
    /// Radius in the same units as the tier's dot radius.
    pub radius: f64,
    /// Opacity in `[0.3, 1.0]`.
    pub opacity: f64,
}

impl DotSample {
    /// Map a pulse value to the dot's radius and opacity.
    pub fn from_pulse(pulse: f64, dot_radius: f64) -> Self {
        Self {
            radius: dot_radius * (RADIUS_MIN_FACTOR + pulse),
            opacity: OPACITY_MIN + (OPACITY_MAX - OPACITY_MIN) * pulse,
        }
    }

    /// Sample a dot directly from time.
    pub fn at(t: f64, phase_offset: f64, duration: f64, dot_radius: f64) -> Self {
        Self::from_pulse(pulse_at(t, phase_offset, duration), dot_radius)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/pulse.rs"]
mod tests;
