use crate::foundation::math::unpremultiply_rgba8_in_place;

/// A rendered frame as RGBA8 pixels.
///
/// Frames produced by the CPU backend are **premultiplied alpha**; the `premultiplied` flag keeps
/// this explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA8 of the pixel at `(x, y)`, as stored.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Copy of the pixel data converted to straight alpha.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }

    /// Mean absolute per-channel difference against a frame of the same size.
    ///
    /// Returns `None` when the sizes differ.
    pub fn mean_abs_diff(&self, other: &FrameRGBA) -> Option<f64> {
        if self.width != other.width || self.height != other.height {
            return None;
        }
        let a = self.to_straight_rgba();
        let b = other.to_straight_rgba();
        let total: u64 = a
            .iter()
            .zip(&b)
            .map(|(x, y)| u64::from(x.abs_diff(*y)))
            .sum();
        Some(total as f64 / a.len().max(1) as f64)
    }
}
