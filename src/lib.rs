//! `spiral-loader` renders a pulsing golden-angle (phyllotaxis) dot spiral used as a loading
//! animation.
//!
//! The same layout and timing model drive two backends:
//!
//! - a live-preview [`SvgScene`] whose circles animate themselves through declarative
//!   oscillators, mounted into a [`PreviewHost`]
//! - an offline sampler that paints fully determined frames onto a reusable [`Surface`]
//!
//! On top of these sit the exporters: a looping GIF produced by an [`EncoderWorker`]
//! ([`export_gif`], [`ExportTask`], [`Exporter`]), a static SVG snapshot ([`svg_snapshot`]) and a
//! Lottie animation document ([`animation_document`]). Artifacts are persisted through a
//! [`SaveCapability`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
/// Inbound configuration.
pub mod config;
pub(crate) mod encode;
pub(crate) mod export;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod spiral;

pub use crate::foundation::color::Color;
pub use crate::foundation::core::{Fps, FrameIndex, Point, Vec2};
pub use crate::foundation::error::{LoaderError, LoaderResult};
pub use crate::foundation::fs::ensure_parent_dir;

pub use crate::spiral::layout::{Dot, GOLDEN_ANGLE, LOGICAL_EXTENT, layout_dots, max_radius};
pub use crate::spiral::options::SpiralOptions;
pub use crate::spiral::tier::{MAX_DISPLAY_EXTENT, MIN_DISPLAY_EXTENT, Tier, clamp_display_extent};

pub use crate::animation::ease::CubicBezierEase;
pub use crate::animation::oscillator::{
    AnimatedAttr, OSCILLATOR_LEAD_PERIODS, Oscillator, dot_oscillators, oscillator_begin,
};
pub use crate::animation::pulse::{
    DotSample, OPACITY_MAX, OPACITY_MIN, RADIUS_MAX_FACTOR, RADIUS_MIN_FACTOR, local_time,
    pulse_at,
};

pub use crate::scene::host::{PreviewHost, SceneKey};
pub use crate::scene::markup::{MarkupOpts, SVG_NS, XML_DECLARATION, insert_after_root_open};
pub use crate::scene::model::{SceneCircle, SvgScene, build_scene};

pub use crate::render::backend::FrameRGBA;
pub use crate::render::cpu::{Surface, render_frame, render_frame_rgba};
pub use crate::render::plan::{Background, FramePlan, PaintOp, PaintedDot, plan_frame, sample_dots};
pub use crate::render::svg_raster::rasterize_svg;

pub use crate::encode::ffmpeg::{FfmpegGifSink, is_ffmpeg_runnable};
pub use crate::encode::gif::{GIF_QUANTIZER_SPEED, GifSink};
pub use crate::encode::resource::{EncoderKind, EncoderResource, FFMPEG_ENV};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::encode::worker::{DEFAULT_QUEUE_CAPACITY, Encoded, EncoderWorker};

pub use crate::export::artifact::{
    ARTIFACT_STEM, ExportArtifact, GIF_FILE_NAME, LOTTIE_FILE_NAME, SVG_FILE_NAME,
};
pub use crate::export::lottie::{
    Keyframe, Layer, LayerTransform, LOTTIE_FRAME_RATE, LOTTIE_VERSION, LottieDocument, Property,
    PropertyValue, ShapeItem, Tangent, animation_document, export_animation_document,
    oscillator_keyframes,
};
pub use crate::export::raster::{
    BoxedSave, CancelToken, EXPORT_FPS, ExportOutcome, ExportReport, ExportTask, Exporter,
    RasterExportOpts, Transparency, encode_loop, export_fps, export_gif, frame_count,
};
pub use crate::export::save::{DownloadSave, PickerSave, SaveCapability, SaveOutcome, persist};
pub use crate::export::vector::{SNAPSHOT_OPACITY, snapshot_style, svg_snapshot};

pub use crate::config::{BackgroundMode, LoaderConfig, PRESET_SIZES, ResolvedConfig};
