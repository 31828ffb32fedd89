use crate::foundation::error::{LoaderError, LoaderResult};

pub use kurbo::{Point, Vec2};

/// Absolute 0-based frame index within one exported loop.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u32);

/// Rational frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be > 0.
    pub den: u32,
}

impl Fps {
    /// Create a validated frame rate.
    pub fn new(num: u32, den: u32) -> LoaderResult<Self> {
        if den == 0 {
            return Err(LoaderError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(LoaderError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of a single frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Per-frame delay in whole milliseconds (GIF delays are integral).
    pub fn frame_delay_ms(self) -> u32 {
        (self.frame_duration_secs() * 1000.0).round() as u32
    }

    /// Number of frames needed to cover `secs`, rounded up.
    pub fn frames_to_cover(self, secs: f64) -> u32 {
        // Products like 3.0 * 15.0 are exact; ceil must not bump them to 46.
        let raw = secs * self.as_f64();
        let nearest = raw.round();
        if (raw - nearest).abs() < 1e-9 {
            nearest.max(0.0) as u32
        } else {
            raw.ceil().max(0.0) as u32
        }
    }
}
