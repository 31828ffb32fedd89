use crate::animation::ease::CubicBezierEase;
use crate::animation::pulse::{OPACITY_MAX, OPACITY_MIN, RADIUS_MAX_FACTOR, RADIUS_MIN_FACTOR};
use crate::spiral::layout::Dot;

/// Fraction of a period the oscillators are started ahead of a dot's phase offset.
///
/// The `lo → hi → lo` keyframes peak half-way through their cycle while the closed-form pulse
/// peaks a quarter period after the offset; a further full period keeps every `begin` negative
/// so all oscillators are already running at `t = 0`.
pub const OSCILLATOR_LEAD_PERIODS: f64 = 1.25;

/// Attribute driven by an [`Oscillator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimatedAttr {
    /// Circle radius.
    Radius,
    /// Element opacity.
    Opacity,
}

impl AnimatedAttr {
    /// SVG attribute name.
    pub fn svg_name(self) -> &'static str {
        match self {
            Self::Radius => "r",
            Self::Opacity => "opacity",
        }
    }
}

/// A self-driving `lo → hi → lo` animation that repeats indefinitely.
///
/// Mirrors an SVG `<animate calcMode="spline">` with three evenly spaced keyframes and the same
/// ease on both halves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillator {
    /// Driven attribute.
    pub attr: AnimatedAttr,
    /// Keyframe values at progress 0, 0.5 and 1.
    pub values: [f64; 3],
    /// Period in seconds.
    pub dur: f64,
    /// Start time in seconds; may be negative (already running at `t = 0`).
    pub begin: f64,
    /// Timing curve for each half.
    pub ease: CubicBezierEase,
}

impl Oscillator {
    /// Value at absolute time `t`, or `None` before the oscillator has begun.
    pub fn value_at(&self, t: f64) -> Option<f64> {
        if t < self.begin {
            return None;
        }
        let progress = (t - self.begin).rem_euclid(self.dur) / self.dur;
        let (from, to, seg) = if progress < 0.5 {
            (self.values[0], self.values[1], progress * 2.0)
        } else {
            (self.values[1], self.values[2], (progress - 0.5) * 2.0)
        };
        Some(from + (to - from) * self.ease.apply(seg))
    }

    /// Keyframe values formatted as an SVG `values` list.
    pub fn values_attr(&self) -> String {
        self.values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(";")
    }

    /// `keySplines` attribute: one spline per segment.
    pub fn key_splines_attr(&self) -> String {
        let one = self.ease.key_spline();
        format!("{one};{one}")
    }
}

/// Start time shared by both oscillators of a dot.
pub fn oscillator_begin(dot: &Dot, duration: f64) -> f64 {
    dot.phase_offset - OSCILLATOR_LEAD_PERIODS * duration
}

/// The radius and opacity oscillators attached to one dot.
pub fn dot_oscillators(dot: &Dot, dot_radius: f64, duration: f64) -> [Oscillator; 2] {
    let begin = oscillator_begin(dot, duration);
    let lo_r = dot_radius * RADIUS_MIN_FACTOR;
    let hi_r = dot_radius * RADIUS_MAX_FACTOR;
    [
        Oscillator {
            attr: AnimatedAttr::Radius,
            values: [lo_r, hi_r, lo_r],
            dur: duration,
            begin,
            ease: CubicBezierEase::LOADER,
        },
        Oscillator {
            attr: AnimatedAttr::Opacity,
            values: [OPACITY_MIN, OPACITY_MAX, OPACITY_MIN],
            dur: duration,
            begin,
            ease: CubicBezierEase::LOADER,
        },
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/animation/oscillator.rs"]
mod tests;
