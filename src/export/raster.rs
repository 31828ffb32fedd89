use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use crate::encode::resource::{EncoderKind, EncoderResource};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::encode::worker::{DEFAULT_QUEUE_CAPACITY, Encoded, EncoderWorker};
use crate::export::artifact::ExportArtifact;
use crate::export::save::{SaveCapability, SaveOutcome, persist};
use crate::foundation::color::Color;
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{LoaderError, LoaderResult};
use crate::render::cpu::{Surface, render_frame};
use crate::render::plan::Background;
use crate::spiral::options::SpiralOptions;
use crate::spiral::tier::clamp_display_extent;

/// Frame rate of exported raster loops.
pub const EXPORT_FPS: u32 = 15;

/// [`EXPORT_FPS`] as a rational rate.
pub const fn export_fps() -> Fps {
    Fps {
        num: EXPORT_FPS,
        den: 1,
    }
}

/// Frames needed to cover one period of `duration` seconds at `fps` (at least one).
pub fn frame_count(duration: f64, fps: Fps) -> u32 {
    fps.frames_to_cover(duration).max(1)
}

/// How the background reaches the exported loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transparency {
    /// Background colour baked into every frame.
    #[default]
    Opaque,
    /// Background painted in [`Color::MAGENTA_KEY`] and turned transparent by the encoder.
    ColorKey,
}

impl Transparency {
    /// Background to paint for `options`.
    pub fn background(self, options: &SpiralOptions) -> Background {
        match self {
            Self::Opaque => Background::Solid(options.bg_color),
            Self::ColorKey => Background::ColorKey(Color::MAGENTA_KEY),
        }
    }

    /// Colour the encoder must make transparent, if any.
    pub fn key(self) -> Option<Color> {
        match self {
            Self::Opaque => None,
            Self::ColorKey => Some(Color::MAGENTA_KEY),
        }
    }
}

/// Parameters of one raster export.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterExportOpts {
    /// Requested display extent; clamped to `[32, 400]`.
    pub display_extent: u32,
    /// Visual options snapshot.
    pub options: SpiralOptions,
    /// Background handling.
    pub transparency: Transparency,
    /// Which GIF encoder to use.
    pub encoder: EncoderKind,
    /// Sampling and playback rate.
    pub fps: Fps,
    /// Frames buffered between the renderer and the encoder thread.
    pub queue_capacity: usize,
}

impl RasterExportOpts {
    /// Opaque builtin-encoder export at [`EXPORT_FPS`].
    pub fn new(display_extent: u32, options: SpiralOptions) -> Self {
        Self {
            display_extent,
            options,
            transparency: Transparency::Opaque,
            encoder: EncoderKind::Builtin,
            fps: export_fps(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }

    /// Square pixel size of the exported frames.
    pub fn pixel_extent(&self) -> u32 {
        clamp_display_extent(self.display_extent)
    }

    /// Number of frames in the loop.
    pub fn frame_count(&self) -> u32 {
        frame_count(self.options.duration, self.fps)
    }

    /// Sample time of frame `i`.
    pub fn sample_time(&self, i: u32) -> f64 {
        f64::from(i) / f64::from(self.frame_count()) * self.options.duration
    }
}

/// Details of a saved export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportReport {
    /// Where the artifact was written.
    pub path: PathBuf,
    /// Frames in the loop.
    pub frames: u32,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Encoded size in bytes.
    pub bytes: usize,
}

/// How an export settled. Cancellation is a normal outcome, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The artifact was persisted.
    Saved(ExportReport),
    /// The task or the save dialog was cancelled.
    Cancelled,
}

/// Shared cancellation flag, checked between frames.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Fresh, not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Render the whole loop through `sink` on an encoder worker.
///
/// Returns `Ok(None)` when `cancel` fired; the worker is stopped and its partial output dropped.
/// The surface is acquired before the worker starts.
pub fn encode_loop(
    opts: &RasterExportOpts,
    sink: Box<dyn FrameSink>,
    cancel: &CancelToken,
) -> LoaderResult<Option<Encoded>> {
    opts.options.validate()?;
    let extent = opts.pixel_extent();
    let mut surface = Surface::acquire(extent, extent)?;
    sample_into(&mut surface, opts, sink, cancel)
}

#[tracing::instrument(skip_all, fields(extent = surface.width()))]
fn sample_into(
    surface: &mut Surface,
    opts: &RasterExportOpts,
    sink: Box<dyn FrameSink>,
    cancel: &CancelToken,
) -> LoaderResult<Option<Encoded>> {
    let cfg = SinkConfig::new(surface.width(), surface.height(), opts.fps)
        .with_transparent_key(opts.transparency.key());
    let mut worker = EncoderWorker::spawn(sink, cfg, opts.queue_capacity)?;

    let background = opts.transparency.background(&opts.options);
    let frames = opts.frame_count();
    tracing::debug!(frames, "sampling loop");
    for i in 0..frames {
        if cancel.is_cancelled() {
            worker.cancel();
            tracing::info!(frame = i, "export cancelled");
            return Ok(None);
        }
        render_frame(surface, opts.sample_time(i), &opts.options, background)?;
        worker.submit(FrameIndex(i), &surface.snapshot())?;
    }
    let encoded = worker.finish()?;
    tracing::debug!(bytes = encoded.bytes.len(), "loop encoded");
    Ok(Some(encoded))
}

/// Full raster export: sample, encode, then persist.
///
/// Fails with `SurfaceUnavailable`, then `WorkerResourceUnavailable`, before any frame is
/// rendered.
pub fn export_gif(
    opts: &RasterExportOpts,
    picker: Option<&mut dyn SaveCapability>,
    fallback: &mut dyn SaveCapability,
    cancel: &CancelToken,
) -> LoaderResult<ExportOutcome> {
    opts.options.validate()?;
    let extent = opts.pixel_extent();
    let mut surface = Surface::acquire(extent, extent)?;
    let resource = EncoderResource::resolve(opts.encoder)?;
    tracing::info!(
        extent,
        frames = opts.frame_count(),
        encoder = ?resource.kind(),
        transparency = ?opts.transparency,
        "exporting gif"
    );

    let Some(encoded) = sample_into(&mut surface, opts, resource.sink(), cancel)? else {
        return Ok(ExportOutcome::Cancelled);
    };
    if cancel.is_cancelled() {
        return Ok(ExportOutcome::Cancelled);
    }

    let artifact = ExportArtifact::gif(encoded.bytes);
    match persist(&artifact, picker, fallback)? {
        SaveOutcome::Saved(path) => Ok(ExportOutcome::Saved(ExportReport {
            path,
            frames: encoded.frames,
            width: extent,
            height: extent,
            bytes: artifact.len(),
        })),
        SaveOutcome::Cancelled => Ok(ExportOutcome::Cancelled),
    }
}

/// Save capability that can move into an export thread.
pub type BoxedSave = Box<dyn SaveCapability + Send>;

/// Resets the exporter's in-flight flag when the task settles.
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A raster export running on a background thread.
#[derive(Debug)]
pub struct ExportTask {
    cancel: CancelToken,
    handle: Option<JoinHandle<LoaderResult<ExportOutcome>>>,
}

impl ExportTask {
    /// Run [`export_gif`] on a new thread.
    pub fn spawn(
        opts: RasterExportOpts,
        picker: Option<BoxedSave>,
        fallback: BoxedSave,
    ) -> LoaderResult<Self> {
        Self::spawn_guarded(opts, picker, fallback, None)
    }

    fn spawn_guarded(
        opts: RasterExportOpts,
        mut picker: Option<BoxedSave>,
        mut fallback: BoxedSave,
        guard: Option<InFlightGuard>,
    ) -> LoaderResult<Self> {
        let cancel = CancelToken::new();
        let token = cancel.clone();
        let handle = std::thread::Builder::new()
            .name("spiral-export".to_owned())
            .spawn(move || {
                let _guard = guard;
                let picker = picker
                    .as_mut()
                    .map(|p| p.as_mut() as &mut dyn SaveCapability);
                export_gif(&opts, picker, fallback.as_mut(), &token)
            })
            .map_err(|e| LoaderError::worker(format!("failed to spawn export thread: {e}")))?;
        Ok(Self {
            cancel,
            handle: Some(handle),
        })
    }

    /// Ask the task to stop at the next frame boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether the task has settled.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the task to settle.
    pub fn join(mut self) -> LoaderResult<ExportOutcome> {
        let handle = self
            .handle
            .take()
            .ok_or_else(|| LoaderError::encoding("export task already joined"))?;
        handle
            .join()
            .map_err(|_| LoaderError::encoding("export thread panicked"))?
    }
}

impl Drop for ExportTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.cancel.cancel();
            let _ = handle.join();
        }
    }
}

/// Owner of one export surface: at most one task in flight at a time.
#[derive(Debug, Default)]
pub struct Exporter {
    in_flight: Arc<AtomicBool>,
}

impl Exporter {
    /// Idle exporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a task is still running.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Start an export, or fail with [`LoaderError::Busy`] while another is in flight.
    pub fn start(
        &self,
        opts: RasterExportOpts,
        picker: Option<BoxedSave>,
        fallback: BoxedSave,
    ) -> LoaderResult<ExportTask> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(LoaderError::Busy);
        }
        let guard = InFlightGuard(self.in_flight.clone());
        ExportTask::spawn_guarded(opts, picker, fallback, Some(guard))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/raster.rs"]
mod tests;
