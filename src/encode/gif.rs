use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::encode::sink::{FrameSink, OrderGuard, SinkConfig, keyed_straight_rgba};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{LoaderError, LoaderResult};
use crate::render::backend::FrameRGBA;

/// Quantizer speed passed to the `image` GIF encoder (1 = best, 30 = fastest).
pub const GIF_QUANTIZER_SPEED: i32 = 10;

/// In-process animated GIF encoder built on `image::codecs::gif`.
///
/// Frames are converted to straight RGBA as they arrive and quantized when the loop is finished.
/// Output repeats forever.
#[derive(Default)]
pub struct GifSink {
    cfg: Option<SinkConfig>,
    order: OrderGuard,
    frames: Vec<Frame>,
}

impl std::fmt::Debug for GifSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GifSink")
            .field("cfg", &self.cfg)
            .field("order", &self.order)
            .field("frames", &self.frames.len())
            .finish()
    }
}

impl GifSink {
    /// Create an idle GIF sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> LoaderResult<()> {
        cfg.validate()?;
        self.frames.clear();
        self.order = OrderGuard::default();
        self.cfg = Some(cfg);
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> LoaderResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| LoaderError::encoding("gif sink not started"))?;
        cfg.check_frame(frame)?;
        self.order.accept(idx)?;

        let rgba = keyed_straight_rgba(frame, cfg.transparent_key);
        let buffer = RgbaImage::from_raw(cfg.width, cfg.height, rgba)
            .ok_or_else(|| LoaderError::encoding("frame buffer does not match gif size"))?;
        let delay = Delay::from_numer_denom_ms(cfg.delay_ms, 1);
        self.frames.push(Frame::from_parts(buffer, 0, 0, delay));
        Ok(())
    }

    fn finish(&mut self) -> LoaderResult<Vec<u8>> {
        if self.cfg.take().is_none() {
            return Err(LoaderError::encoding("gif sink not started"));
        }
        let frames = std::mem::take(&mut self.frames);
        let count = frames.len();

        let mut out = Vec::new();
        {
            let mut encoder = GifEncoder::new_with_speed(&mut out, GIF_QUANTIZER_SPEED);
            encoder
                .set_repeat(Repeat::Infinite)
                .map_err(|e| LoaderError::encoding(format!("gif repeat: {e}")))?;
            encoder
                .encode_frames(frames)
                .map_err(|e| LoaderError::encoding(format!("gif encode: {e}")))?;
        }
        tracing::debug!(frames = count, bytes = out.len(), "gif encoded");
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
