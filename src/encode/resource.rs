use std::ffi::OsStr;
use std::path::PathBuf;

use crate::encode::ffmpeg::{FfmpegGifSink, is_ffmpeg_runnable};
use crate::encode::gif::GifSink;
use crate::encode::sink::FrameSink;
use crate::foundation::error::{LoaderError, LoaderResult};

/// Environment variable naming an explicit `ffmpeg` binary.
pub const FFMPEG_ENV: &str = "SPIRAL_LOADER_FFMPEG";

/// Which GIF encoder an export uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncoderKind {
    /// In-process encoder from the `image` crate.
    #[default]
    Builtin,
    /// The system `ffmpeg` binary.
    Ffmpeg,
}

/// A located encoder dependency, ready to produce a sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncoderResource {
    /// Needs nothing beyond the worker thread.
    Builtin,
    /// A runnable `ffmpeg` binary.
    Ffmpeg {
        /// Program path or bare name resolved through `PATH`.
        program: PathBuf,
    },
}

impl EncoderResource {
    /// Locate the resource for `kind` at call time.
    ///
    /// For [`EncoderKind::Ffmpeg`] the binary named by `SPIRAL_LOADER_FFMPEG` wins over `ffmpeg`
    /// on `PATH`.
    pub fn resolve(kind: EncoderKind) -> LoaderResult<Self> {
        let env = std::env::var_os(FFMPEG_ENV);
        Self::resolve_with(kind, env.as_deref())
    }

    /// Like [`EncoderResource::resolve`] with an explicit override instead of the environment.
    pub fn resolve_with(kind: EncoderKind, ffmpeg_override: Option<&OsStr>) -> LoaderResult<Self> {
        match kind {
            EncoderKind::Builtin => Ok(Self::Builtin),
            EncoderKind::Ffmpeg => {
                let program = match ffmpeg_override.filter(|p| !p.is_empty()) {
                    Some(p) => PathBuf::from(p),
                    None => PathBuf::from("ffmpeg"),
                };
                if !is_ffmpeg_runnable(&program) {
                    return Err(LoaderError::worker(format!(
                        "ffmpeg is required for --encoder ffmpeg, but '{}' could not be run \
                         (set {FFMPEG_ENV} or install it on PATH)",
                        program.display()
                    )));
                }
                tracing::debug!(program = %program.display(), "resolved ffmpeg");
                Ok(Self::Ffmpeg { program })
            }
        }
    }

    /// Kind this resource was resolved for.
    pub fn kind(&self) -> EncoderKind {
        match self {
            Self::Builtin => EncoderKind::Builtin,
            Self::Ffmpeg { .. } => EncoderKind::Ffmpeg,
        }
    }

    /// Fresh sink backed by this resource.
    pub fn sink(&self) -> Box<dyn FrameSink> {
        match self {
            Self::Builtin => Box::new(GifSink::new()),
            Self::Ffmpeg { program } => Box::new(FfmpegGifSink::new(program.clone())),
        }
    }
}
