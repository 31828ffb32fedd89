/// Convenience result type used across the loader engine.
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Top-level error taxonomy used by engine APIs.
///
/// A cancelled save dialog is deliberately absent: it is reported as
/// [`crate::SaveOutcome::Cancelled`], never as an error.
#[derive(thiserror::Error, Debug)]
pub enum LoaderError {
    /// Invalid caller-provided values (colours, durations, missing preview scene).
    #[error("validation error: {0}")]
    Validation(String),

    /// The pixel surface for offline rendering could not be acquired.
    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// The encoder worker resource could not be located or started.
    #[error("encoder worker unavailable: {0}")]
    WorkerResourceUnavailable(String),

    /// The encoder reported an internal error; partial output was discarded.
    #[error("encoding failed: {0}")]
    EncodingFailed(String),

    /// Persisting an export artifact failed for a reason other than cancellation.
    #[error("save failed: {0}")]
    SaveFailed(String),

    /// Another export is still in flight on the same surface.
    #[error("an export is already in progress")]
    Busy,

    /// Errors when serializing or deserializing configuration or documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LoaderError {
    /// Build a [`LoaderError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LoaderError::SurfaceUnavailable`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::SurfaceUnavailable(msg.into())
    }

    /// Build a [`LoaderError::WorkerResourceUnavailable`] value.
    pub fn worker(msg: impl Into<String>) -> Self {
        Self::WorkerResourceUnavailable(msg.into())
    }

    /// Build a [`LoaderError::EncodingFailed`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::EncodingFailed(msg.into())
    }

    /// Build a [`LoaderError::SaveFailed`] value.
    pub fn save(msg: impl Into<String>) -> Self {
        Self::SaveFailed(msg.into())
    }

    /// Build a [`LoaderError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for LoaderError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
