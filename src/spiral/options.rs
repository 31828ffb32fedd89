use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::error::{LoaderError, LoaderResult};

/// Visual options shared by every backend and exporter.
///
/// An immutable snapshot: operations borrow it and never mutate or retain it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpiralOptions {
    /// Fill colour of every dot.
    pub dot_color: Color,
    /// Background colour painted behind the dots in raster output.
    pub bg_color: Color,
    /// Length of one pulse period in seconds.
    pub duration: f64,
}

impl Default for SpiralOptions {
    fn default() -> Self {
        Self {
            dot_color: Color::BRAND_VIOLET,
            bg_color: Color::NIGHT,
            duration: 3.0,
        }
    }
}

impl SpiralOptions {
    /// Reject durations that would break the timing math.
    pub fn validate(&self) -> LoaderResult<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(LoaderError::validation(format!(
                "duration must be a finite number of seconds > 0 (got {})",
                self.duration
            )));
        }
        Ok(())
    }
}
