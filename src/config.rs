use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::error::{LoaderError, LoaderResult};
use crate::spiral::options::SpiralOptions;
use crate::spiral::tier::clamp_display_extent;

/// Size presets offered by the loader's size picker.
pub const PRESET_SIZES: [u32; 8] = [32, 48, 64, 96, 120, 200, 256, 400];

/// Named background presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundMode {
    /// Near-black night background.
    #[default]
    Dark,
    /// Off-white paper background.
    Light,
}

impl BackgroundMode {
    /// Background colour of the preset.
    pub fn color(self) -> Color {
        match self {
            Self::Dark => Color::NIGHT,
            Self::Light => Color::PAPER,
        }
    }
}

/// Inbound user configuration, as read from JSON and overridden by CLI flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Base size in pixels.
    pub size: u32,
    /// Multiplier applied to `size`.
    pub scale: f64,
    /// Dot colour.
    pub dot_color: Color,
    /// Background colour.
    pub bg_color: Color,
    /// Playback speed; the effective period is `duration / playback_speed`.
    pub playback_speed: f64,
    /// Base period in seconds.
    pub duration: f64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            size: 400,
            scale: 1.0,
            dot_color: Color::BRAND_VIOLET,
            bg_color: Color::NIGHT,
            playback_speed: 1.0,
            duration: 3.0,
        }
    }
}

/// A validated configuration, ready for the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedConfig {
    /// Clamped display extent in pixels.
    pub display_extent: u32,
    /// Options with the speed already folded into the duration.
    pub options: SpiralOptions,
}

impl LoaderConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> LoaderResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read and parse a JSON file.
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Reject values the engine cannot use.
    pub fn validate(&self) -> LoaderResult<()> {
        if self.size == 0 {
            return Err(LoaderError::validation("size must be > 0"));
        }
        positive("scale", self.scale)?;
        positive("playback_speed", self.playback_speed)?;
        positive("duration", self.duration)?;
        Ok(())
    }

    /// `round(size * scale)`, clamped to the supported range.
    pub fn display_extent(&self) -> u32 {
        let raw = (f64::from(self.size) * self.scale).round();
        clamp_display_extent(raw.clamp(0.0, f64::from(u32::MAX)) as u32)
    }

    /// Option snapshot with the effective period.
    pub fn options(&self) -> SpiralOptions {
        SpiralOptions {
            dot_color: self.dot_color,
            bg_color: self.bg_color,
            duration: self.duration / self.playback_speed,
        }
    }

    /// Validate and derive what the engine consumes.
    pub fn resolve(&self) -> LoaderResult<ResolvedConfig> {
        self.validate()?;
        let options = self.options();
        options.validate()?;
        Ok(ResolvedConfig {
            display_extent: self.display_extent(),
            options,
        })
    }
}

fn positive(name: &str, v: f64) -> LoaderResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(LoaderError::validation(format!(
            "{name} must be a finite number > 0 (got {v})"
        )));
    }
    Ok(())
}
