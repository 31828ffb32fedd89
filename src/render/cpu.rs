use vello_cpu::kurbo::Shape as _;

use crate::foundation::color::Color;
use crate::foundation::core::Point;
use crate::foundation::error::{LoaderError, LoaderResult};
use crate::render::backend::FrameRGBA;
use crate::render::plan::{Background, FramePlan, PaintOp, plan_frame};
use crate::spiral::options::SpiralOptions;

const CIRCLE_TOLERANCE: f64 = 0.05;

/// Reusable square pixel surface backed by a `vello_cpu` pixmap.
///
/// Every frame fully overwrites the previous contents.
pub struct Surface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Allocate a surface of `width × height` pixels.
    pub fn acquire(width: u32, height: u32) -> LoaderResult<Self> {
        if width == 0 || height == 0 {
            return Err(LoaderError::surface(format!(
                "surface size must be non-zero (got {width}x{height})"
            )));
        }
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| LoaderError::surface("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| LoaderError::surface("surface height exceeds u16"))?;

        Ok(Self {
            width: width_u16,
            height: height_u16,
            pixmap: vello_cpu::Pixmap::new(width_u16, height_u16),
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Premultiplied RGBA8 contents.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Execute a frame plan, replacing whatever the surface held before.
    pub fn execute(&mut self, plan: &FramePlan) -> LoaderResult<()> {
        if plan.extent != self.width() || plan.extent != self.height() {
            return Err(LoaderError::validation(format!(
                "frame plan extent {} does not match surface {}x{}",
                plan.extent, self.width, self.height
            )));
        }

        clear_pixmap(&mut self.pixmap);
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        for op in &plan.ops {
            match op {
                PaintOp::FillBackground(color) => {
                    ctx.set_paint(to_cpu_color(*color));
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                        0.0,
                        0.0,
                        f64::from(self.width),
                        f64::from(self.height),
                    ));
                }
                PaintOp::FillCircle {
                    center,
                    radius,
                    color,
                } => {
                    ctx.set_paint(to_cpu_color(*color));
                    let circle = vello_cpu::kurbo::Circle::new(point_to_cpu(*center), *radius);
                    ctx.fill_path(&circle.to_path(CIRCLE_TOLERANCE));
                }
            }
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
        // The u8 pipeline can round coverage over an opaque fill down to 254.
        if matches!(plan.ops.first(), Some(PaintOp::FillBackground(c)) if c.a == u8::MAX) {
            seal_alpha(&mut self.pixmap);
        }
        Ok(())
    }

    /// Copy the current contents out as a frame.
    pub fn snapshot(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.width(),
            height: self.height(),
            data: self.data().to_vec(),
            premultiplied: true,
        }
    }
}

/// Paint the frame at absolute time `t` onto `surface`.
///
/// The surface width is the pixel extent; the result depends only on `t`, the options and the
/// background, never on what the surface held before.
pub fn render_frame(
    surface: &mut Surface,
    t: f64,
    options: &SpiralOptions,
    background: Background,
) -> LoaderResult<()> {
    let plan = plan_frame(t, surface.width(), options, background);
    surface.execute(&plan)
}

/// Convenience: render one frame into a fresh surface and return it.
pub fn render_frame_rgba(
    extent: u32,
    t: f64,
    options: &SpiralOptions,
    background: Background,
) -> LoaderResult<FrameRGBA> {
    let mut surface = Surface::acquire(extent, extent)?;
    render_frame(&mut surface, t, options, background)?;
    Ok(surface.snapshot())
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn seal_alpha(pixmap: &mut vello_cpu::Pixmap) {
    for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
        px[3] = u8::MAX;
    }
}

fn to_cpu_color(c: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
