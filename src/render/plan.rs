use crate::animation::pulse::DotSample;
use crate::foundation::color::Color;
use crate::foundation::core::Point;
use crate::foundation::math::opacity_to_alpha;
use crate::spiral::layout::{LOGICAL_EXTENT, layout_dots};
use crate::spiral::options::SpiralOptions;
use crate::spiral::tier::Tier;

/// What to paint behind the dots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Background {
    /// The real background colour, baked into the frame.
    Solid(Color),
    /// A reserved sentinel colour the encoder later turns transparent.
    ColorKey(Color),
}

impl Background {
    /// Colour actually written to the surface.
    pub fn paint_color(self) -> Color {
        match self {
            Self::Solid(c) | Self::ColorKey(c) => c,
        }
    }
}

/// One dot resolved into pixel space at a sample time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaintedDot {
    /// Centre in pixels.
    pub center: Point,
    /// Radius in pixels.
    pub radius: f64,
    /// Opacity in `[0.3, 1.0]`.
    pub opacity: f64,
}

/// A single paint operation, executed in order.
#[derive(Clone, Debug, PartialEq)]
pub enum PaintOp {
    /// Fill the whole surface.
    FillBackground(Color),
    /// Fill a circle; the colour's alpha already includes the dot opacity.
    FillCircle {
        /// Centre in pixels.
        center: Point,
        /// Radius in pixels.
        radius: f64,
        /// Straight-alpha paint.
        color: Color,
    },
}

/// Backend-agnostic description of one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    /// Square pixel extent.
    pub extent: u32,
    /// Paint operations; the background always comes first.
    pub ops: Vec<PaintOp>,
}

/// Resolve every dot at time `t` into pixel space for a square surface of `pixel_extent`.
///
/// All linear measurements are scaled by `pixel_extent / 400`.
pub fn sample_dots(t: f64, pixel_extent: u32, options: &SpiralOptions) -> Vec<PaintedDot> {
    let tier = Tier::for_extent(pixel_extent);
    let scale = f64::from(pixel_extent) / LOGICAL_EXTENT;

    layout_dots(&tier, options.duration)
        .iter()
        .map(|dot| {
            let s = DotSample::at(t, dot.phase_offset, options.duration, tier.dot_radius);
            PaintedDot {
                center: Point::new(dot.center.x * scale, dot.center.y * scale),
                radius: s.radius * scale,
                opacity: s.opacity,
            }
        })
        .collect()
}

/// Compile the frame at time `t` into paint operations.
pub fn plan_frame(
    t: f64,
    pixel_extent: u32,
    options: &SpiralOptions,
    background: Background,
) -> FramePlan {
    let dots = sample_dots(t, pixel_extent, options);
    let base_alpha = f64::from(options.dot_color.a) / 255.0;

    let mut ops = Vec::with_capacity(dots.len() + 1);
    ops.push(PaintOp::FillBackground(background.paint_color()));
    ops.extend(dots.into_iter().map(|d| PaintOp::FillCircle {
        center: d.center,
        radius: d.radius,
        color: options
            .dot_color
            .with_alpha(opacity_to_alpha(base_alpha * d.opacity)),
    }));

    FramePlan {
        extent: pixel_extent,
        ops,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
