use std::sync::mpsc;
use std::thread::JoinHandle;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{LoaderError, LoaderResult};
use crate::render::backend::FrameRGBA;

/// Default number of frames buffered between the producer and the encoder thread.
pub const DEFAULT_QUEUE_CAPACITY: usize = 4;

enum WorkerMsg {
    Frame(FrameIndex, FrameRGBA),
    Finish,
}

enum WorkerExit {
    Finished(Encoded),
    Cancelled,
}

/// Output of a completed encoder worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encoded {
    /// Encoded file bytes.
    pub bytes: Vec<u8>,
    /// Number of frames the sink accepted.
    pub frames: u32,
}

/// A sink running on its own named thread, fed over a bounded channel.
///
/// Frames must be submitted with consecutive indices starting at 0. Dropping a worker that was
/// neither finished nor cancelled cancels it and joins the thread.
pub struct EncoderWorker {
    tx: Option<mpsc::SyncSender<WorkerMsg>>,
    handle: Option<JoinHandle<LoaderResult<WorkerExit>>>,
    submitted: u32,
}

impl std::fmt::Debug for EncoderWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncoderWorker")
            .field("submitted", &self.submitted)
            .field("running", &self.handle.is_some())
            .finish()
    }
}

impl EncoderWorker {
    /// Start `sink` on a background thread; `begin(cfg)` runs there before the first frame.
    pub fn spawn(
        mut sink: Box<dyn FrameSink>,
        cfg: SinkConfig,
        capacity: usize,
    ) -> LoaderResult<Self> {
        let (tx, rx) = mpsc::sync_channel::<WorkerMsg>(capacity.max(1));
        let handle = std::thread::Builder::new()
            .name("spiral-encoder".to_owned())
            .spawn(move || -> LoaderResult<WorkerExit> {
                sink.begin(cfg)?;
                let mut next = 0u32;
                loop {
                    match rx.recv() {
                        Ok(WorkerMsg::Frame(idx, frame)) => {
                            if idx.0 != next {
                                return Err(LoaderError::encoding(format!(
                                    "encoder expected frame {next}, got {}",
                                    idx.0
                                )));
                            }
                            sink.push_frame(idx, &frame)?;
                            next += 1;
                        }
                        Ok(WorkerMsg::Finish) => {
                            let bytes = sink.finish()?;
                            return Ok(WorkerExit::Finished(Encoded {
                                bytes,
                                frames: next,
                            }));
                        }
                        // Sender dropped without `Finish`: cancelled, discard partial output.
                        Err(_) => return Ok(WorkerExit::Cancelled),
                    }
                }
            })
            .map_err(|e| LoaderError::worker(format!("failed to spawn encoder thread: {e}")))?;

        Ok(Self {
            tx: Some(tx),
            handle: Some(handle),
            submitted: 0,
        })
    }

    /// Number of frames submitted so far.
    pub fn submitted(&self) -> u32 {
        self.submitted
    }

    /// Send a copy of `frame` to the encoder thread.
    ///
    /// Blocks while the queue is full. If the encoder already failed, its error is returned.
    pub fn submit(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> LoaderResult<()> {
        let Some(tx) = self.tx.as_ref() else {
            return Err(LoaderError::encoding("encoder worker is already closed"));
        };
        if tx.send(WorkerMsg::Frame(idx, frame.clone())).is_err() {
            self.tx = None;
            self.join()?;
            return Err(LoaderError::encoding(
                "encoder thread is not accepting frames",
            ));
        }
        self.submitted += 1;
        Ok(())
    }

    /// Signal the end of the loop and wait for the encoded bytes.
    pub fn finish(mut self) -> LoaderResult<Encoded> {
        if let Some(tx) = self.tx.take() {
            // A send failure means the thread already exited; `join` reports why.
            let _ = tx.send(WorkerMsg::Finish);
        }
        match self.join()? {
            WorkerExit::Finished(encoded) => Ok(encoded),
            WorkerExit::Cancelled => Err(LoaderError::encoding(
                "encoder stopped before the loop was finished",
            )),
        }
    }

    /// Stop the encoder and discard whatever it produced.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn join(&mut self) -> LoaderResult<WorkerExit> {
        let handle = self
            .handle
            .take()
            .ok_or_else(|| LoaderError::encoding("encoder worker already joined"))?;
        match handle.join() {
            Ok(Ok(exit)) => Ok(exit),
            Ok(Err(
                e @ (LoaderError::EncodingFailed(_) | LoaderError::WorkerResourceUnavailable(_)),
            )) => Err(e),
            Ok(Err(e)) => Err(LoaderError::encoding(e.to_string())),
            Err(_) => Err(LoaderError::encoding("encoder thread panicked")),
        }
    }

    fn shutdown(&mut self) {
        drop(self.tx.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for EncoderWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/worker.rs"]
mod tests;
