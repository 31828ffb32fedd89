use serde::Serialize;

/// Smallest display extent the loader renders at, in pixels.
pub const MIN_DISPLAY_EXTENT: u32 = 32;
/// Largest display extent the loader renders at, in pixels.
pub const MAX_DISPLAY_EXTENT: u32 = 400;

/// Clamp a requested display extent into `[MIN_DISPLAY_EXTENT, MAX_DISPLAY_EXTENT]`.
pub fn clamp_display_extent(px: u32) -> u32 {
    px.clamp(MIN_DISPLAY_EXTENT, MAX_DISPLAY_EXTENT)
}

/// Discrete layout parameters selected by display size.
///
/// Small extents get fewer, larger dots so the spiral stays legible at icon scale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Tier {
    /// Number of dots.
    pub n: u32,
    /// Resting dot radius in logical units.
    pub dot_radius: f64,
    /// Gap kept between the outermost dot edge and the canvas edge, in logical units.
    pub margin: f64,
}

impl Tier {
    /// Icon-scale tier (extent ≤ 32).
    pub const SPARSE: Self = Self {
        n: 45,
        dot_radius: 4.0,
        margin: 2.0,
    };
    /// Extent ≤ 64.
    pub const SMALL: Self = Self {
        n: 80,
        dot_radius: 3.0,
        margin: 2.0,
    };
    /// Extent ≤ 120.
    pub const MEDIUM: Self = Self {
        n: 150,
        dot_radius: 2.5,
        margin: 2.0,
    };
    /// Canonical 400-unit design grid.
    pub const DENSE: Self = Self {
        n: 600,
        dot_radius: 2.0,
        margin: 2.0,
    };

    /// All tiers paired with their inclusive upper threshold (`None` = unbounded), ascending.
    pub const TABLE: [(Option<u32>, Tier); 4] = [
        (Some(32), Self::SPARSE),
        (Some(64), Self::SMALL),
        (Some(120), Self::MEDIUM),
        (None, Self::DENSE),
    ];

    /// Resolve the tier for a display extent. First matching threshold wins.
    pub fn for_extent(extent_px: u32) -> Self {
        Self::TABLE
            .iter()
            .find(|(limit, _)| limit.is_none_or(|l| extent_px <= l))
            .map(|(_, tier)| *tier)
            .unwrap_or(Self::DENSE)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/spiral/tier.rs"]
mod tests;
