use std::io::{Read, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::encode::sink::{FrameSink, OrderGuard, SinkConfig, keyed_straight_rgba};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{LoaderError, LoaderResult};
use crate::foundation::fs::TempFileGuard;
use crate::render::backend::FrameRGBA;

/// Animated GIF sink that streams raw RGBA frames into the system `ffmpeg`.
///
/// `ffmpeg` writes to a temporary file which is read back by [`FrameSink::finish`] and removed on
/// every exit path.
pub struct FfmpegGifSink {
    program: PathBuf,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,
    output: TempFileGuard,

    cfg: Option<SinkConfig>,
    order: OrderGuard,
}

impl std::fmt::Debug for FfmpegGifSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FfmpegGifSink")
            .field("program", &self.program)
            .field("running", &self.child.is_some())
            .finish_non_exhaustive()
    }
}

impl FfmpegGifSink {
    /// Create a sink that will invoke `program` (usually `ffmpeg`).
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            child: None,
            stdin: None,
            stderr_drain: None,
            output: TempFileGuard(None),
            cfg: None,
            order: OrderGuard::default(),
        }
    }
}

impl FrameSink for FfmpegGifSink {
    fn begin(&mut self, cfg: SinkConfig) -> LoaderResult<()> {
        cfg.validate()?;

        let out_path = temp_output_path();
        let mut cmd = Command::new(&self.program);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.args([
            "-y",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
        ]);
        push_input_fps(&mut cmd, cfg.fps);
        cmd.args(["-i", "pipe:0", "-filter_complex", palette_filter(&cfg)]);
        cmd.args(["-loop", "0", "-f", "gif"]);
        cmd.arg(&out_path);

        let mut child = cmd.spawn().map_err(|e| {
            LoaderError::worker(format!(
                "failed to spawn '{}': {e}",
                self.program.display()
            ))
        })?;
        self.output = TempFileGuard(Some(out_path));

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| LoaderError::encoding("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| LoaderError::encoding("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.order = OrderGuard::default();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> LoaderResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| LoaderError::encoding("ffmpeg sink not started"))?;
        cfg.check_frame(frame)?;
        self.order.accept(idx)?;

        let rgba = keyed_straight_rgba(frame, cfg.transparent_key);
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(LoaderError::encoding("ffmpeg sink is already finalized"));
        };
        stdin.write_all(&rgba).map_err(|e| {
            LoaderError::encoding(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn finish(&mut self) -> LoaderResult<Vec<u8>> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| LoaderError::encoding("ffmpeg sink not started"))?;
        self.cfg = None;

        let status = child.wait().map_err(|e| {
            LoaderError::encoding(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| LoaderError::encoding("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| LoaderError::encoding(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };
        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(LoaderError::encoding(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        let output = std::mem::replace(&mut self.output, TempFileGuard(None));
        let path = output
            .path()
            .ok_or_else(|| LoaderError::encoding("ffmpeg output path missing"))?;
        std::fs::read(path).map_err(|e| {
            LoaderError::encoding(format!(
                "failed to read ffmpeg output '{}': {e}",
                path.display()
            ))
        })
    }
}

impl Drop for FfmpegGifSink {
    fn drop(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        if let Some(handle) = self.stderr_drain.take() {
            let _ = handle.join();
        }
    }
}

fn push_input_fps(cmd: &mut Command, fps: Fps) {
    // rawvideo input takes its rate from `-r` before `-i`.
    cmd.args(["-r", &format!("{}/{}", fps.num, fps.den)]);
}

fn palette_filter(cfg: &SinkConfig) -> &'static str {
    if cfg.transparent_key.is_some() {
        "split[a][b];[a]palettegen=reserve_transparent=1[p];[b][p]paletteuse=alpha_threshold=128"
    } else {
        "split[a][b];[a]palettegen=reserve_transparent=0[p];[b][p]paletteuse"
    }
}

fn temp_output_path() -> PathBuf {
    static NEXT: AtomicU64 = AtomicU64::new(0);
    let n = NEXT.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "spiral-loader-{}-{n}.gif",
        std::process::id()
    ))
}

/// Return `true` when `program -version` runs successfully.
pub fn is_ffmpeg_runnable(program: &Path) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
