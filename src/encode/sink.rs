use crate::foundation::color::Color;
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{LoaderError, LoaderResult};
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame of a loop.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frame rate.
    pub fps: Fps,
    /// Per-frame delay in whole milliseconds.
    pub delay_ms: u32,
    /// Pixels exactly equal to this colour become fully transparent.
    pub transparent_key: Option<Color>,
}

impl SinkConfig {
    /// Opaque config whose delay is derived from `fps`.
    pub fn new(width: u32, height: u32, fps: Fps) -> Self {
        Self {
            width,
            height,
            fps,
            delay_ms: fps.frame_delay_ms(),
            transparent_key: None,
        }
    }

    /// Same config with a transparency key colour.
    pub fn with_transparent_key(mut self, key: Option<Color>) -> Self {
        self.transparent_key = key;
        self
    }

    pub(crate) fn validate(&self) -> LoaderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LoaderError::validation(format!(
                "sink size must be non-zero (got {}x{})",
                self.width, self.height
            )));
        }
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(LoaderError::validation("fps must be non-zero"));
        }
        Ok(())
    }

    pub(crate) fn frame_len(&self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }

    /// Check a frame against the configured size.
    pub(crate) fn check_frame(&self, frame: &FrameRGBA) -> LoaderResult<()> {
        if frame.width != self.width || frame.height != self.height {
            return Err(LoaderError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.width, self.height
            )));
        }
        if frame.data.len() != self.frame_len() {
            return Err(LoaderError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }
        Ok(())
    }
}

/// Sink contract for consuming rendered frames of one loop.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order, and the
/// encoded output preserves that order.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> LoaderResult<()>;
    /// Push one frame in strictly increasing order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> LoaderResult<()>;
    /// Called once after the last frame; returns the encoded bytes.
    fn finish(&mut self) -> LoaderResult<Vec<u8>>;
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn begin(&mut self, cfg: SinkConfig) -> LoaderResult<()> {
        (**self).begin(cfg)
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> LoaderResult<()> {
        (**self).push_frame(idx, frame)
    }

    fn finish(&mut self) -> LoaderResult<Vec<u8>> {
        (**self).finish()
    }
}

/// Tracks the last accepted index and rejects anything that does not move forward.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct OrderGuard {
    last: Option<FrameIndex>,
}

impl OrderGuard {
    pub(crate) fn accept(&mut self, idx: FrameIndex) -> LoaderResult<()> {
        if let Some(last) = self.last
            && idx <= last
        {
            return Err(LoaderError::encoding(format!(
                "out-of-order frame index {} after {}",
                idx.0, last.0
            )));
        }
        self.last = Some(idx);
        Ok(())
    }
}

/// In-memory sink for tests and debugging.
///
/// Its "encoded" output is the raw straight-alpha RGBA of every frame, concatenated in order.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    order: OrderGuard,
    frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> LoaderResult<()> {
        cfg.validate()?;
        self.cfg = Some(cfg);
        self.order = OrderGuard::default();
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> LoaderResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| LoaderError::encoding("in-memory sink not started"))?;
        cfg.check_frame(frame)?;
        self.order.accept(idx)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn finish(&mut self) -> LoaderResult<Vec<u8>> {
        if self.cfg.is_none() {
            return Err(LoaderError::encoding("in-memory sink not started"));
        }
        Ok(self
            .frames
            .iter()
            .flat_map(|(_, f)| f.to_straight_rgba())
            .collect())
    }
}

/// Straight-alpha copy of `frame` with every pixel equal to `key` made fully transparent.
///
/// Comparison happens on the straight RGB of opaque pixels only, so antialiased edges that merely
/// blend toward the key stay visible.
pub(crate) fn keyed_straight_rgba(frame: &FrameRGBA, key: Option<Color>) -> Vec<u8> {
    let mut out = frame.to_straight_rgba();
    if let Some(key) = key {
        for px in out.chunks_exact_mut(4) {
            if px[3] == 255 && px[0] == key.r && px[1] == key.g && px[2] == key.b {
                px.copy_from_slice(&[0, 0, 0, 0]);
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
