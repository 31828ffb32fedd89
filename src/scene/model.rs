use crate::animation::oscillator::{AnimatedAttr, Oscillator, dot_oscillators};
use crate::foundation::color::Color;
use crate::foundation::error::LoaderResult;
use crate::spiral::layout::{LOGICAL_EXTENT, layout_dots};
use crate::spiral::options::SpiralOptions;
use crate::spiral::tier::{Tier, clamp_display_extent};

/// One filled circle of the live scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneCircle {
    /// Centre x in view-box units.
    pub cx: f64,
    /// Centre y in view-box units.
    pub cy: f64,
    /// Static radius, shown where no radius oscillator applies.
    pub r: f64,
    /// Fill colour.
    pub fill: Color,
    /// Static opacity; `None` renders fully opaque.
    pub opacity: Option<f64>,
    /// Attached self-driving animations.
    pub animations: Vec<Oscillator>,
}

impl SceneCircle {
    /// Effective radius at time `t`, taking running oscillators into account.
    pub fn radius_at(&self, t: f64) -> f64 {
        self.animated(AnimatedAttr::Radius, t).unwrap_or(self.r)
    }

    /// Effective opacity at time `t`, taking running oscillators into account.
    pub fn opacity_at(&self, t: f64) -> f64 {
        self.animated(AnimatedAttr::Opacity, t)
            .or(self.opacity)
            .unwrap_or(1.0)
    }

    fn animated(&self, attr: AnimatedAttr, t: f64) -> Option<f64> {
        self.animations
            .iter()
            .find(|a| a.attr == attr)
            .and_then(|a| a.value_at(t))
    }
}

/// A complete live-preview scene in the fixed 400-unit view box.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgScene {
    /// Display extent in pixels the scene was built for (selects the tier).
    pub display_extent: u32,
    /// Tier the scene was laid out with.
    pub tier: Tier,
    /// View-box side length.
    pub view_box: f64,
    /// Circles in dot index order.
    pub circles: Vec<SceneCircle>,
}

impl SvgScene {
    /// Static copy of the scene as it looks at time `t`: every oscillator is evaluated into the
    /// circle's static radius and opacity and then dropped.
    pub fn freeze_at(&self, t: f64) -> SvgScene {
        let circles = self
            .circles
            .iter()
            .map(|c| SceneCircle {
                r: c.radius_at(t),
                opacity: Some(c.opacity_at(t)),
                animations: Vec::new(),
                ..c.clone()
            })
            .collect();
        SvgScene {
            circles,
            ..self.clone()
        }
    }
}

/// Build the animated scene for a display extent.
///
/// Pure: the same inputs always produce the same scene, and nothing is retained between calls.
#[tracing::instrument(skip(options))]
pub fn build_scene(display_extent: u32, options: &SpiralOptions) -> LoaderResult<SvgScene> {
    options.validate()?;
    let display_extent = clamp_display_extent(display_extent);
    let tier = Tier::for_extent(display_extent);

    let circles = layout_dots(&tier, options.duration)
        .iter()
        .map(|dot| SceneCircle {
            cx: dot.center.x,
            cy: dot.center.y,
            r: tier.dot_radius,
            fill: options.dot_color,
            opacity: None,
            animations: dot_oscillators(dot, tier.dot_radius, options.duration).to_vec(),
        })
        .collect::<Vec<_>>();

    tracing::debug!(dots = circles.len(), "built live scene");
    Ok(SvgScene {
        display_extent,
        tier,
        view_box: LOGICAL_EXTENT,
        circles,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
