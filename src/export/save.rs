use std::ffi::OsString;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::export::artifact::ExportArtifact;
use crate::foundation::error::{LoaderError, LoaderResult};
use crate::foundation::fs::{TempFileGuard, ensure_parent_dir};

/// Result of asking a save capability to persist an artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The artifact was written to this path.
    Saved(PathBuf),
    /// The user dismissed the destination prompt. Not an error.
    Cancelled,
}

/// Somewhere an exported artifact can be persisted.
pub trait SaveCapability {
    /// Persist `artifact`, or report that the user cancelled.
    fn save(&mut self, artifact: &ExportArtifact) -> LoaderResult<SaveOutcome>;
}

/// Interactive destination picker.
///
/// The closure receives the suggested file name and returns the chosen path, or `None` when the
/// user cancelled.
pub struct PickerSave<F> {
    pick: F,
}

impl<F> PickerSave<F>
where
    F: FnMut(&str) -> LoaderResult<Option<PathBuf>>,
{
    /// Wrap a picker closure.
    pub fn new(pick: F) -> Self {
        Self { pick }
    }
}

impl<F> std::fmt::Debug for PickerSave<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickerSave").finish_non_exhaustive()
    }
}

impl<F> SaveCapability for PickerSave<F>
where
    F: FnMut(&str) -> LoaderResult<Option<PathBuf>>,
{
    fn save(&mut self, artifact: &ExportArtifact) -> LoaderResult<SaveOutcome> {
        match (self.pick)(&artifact.file_name)? {
            Some(path) => {
                write_staged(&path, &artifact.bytes)?;
                Ok(SaveOutcome::Saved(path))
            }
            None => {
                tracing::info!(file = %artifact.file_name, "save cancelled by user");
                Ok(SaveOutcome::Cancelled)
            }
        }
    }
}

/// Non-interactive fallback: writes `<dir>/<suggested file name>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadSave {
    /// Target directory, created if missing.
    pub dir: PathBuf,
}

impl DownloadSave {
    /// Save into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SaveCapability for DownloadSave {
    fn save(&mut self, artifact: &ExportArtifact) -> LoaderResult<SaveOutcome> {
        let path = self.dir.join(&artifact.file_name);
        write_staged(&path, &artifact.bytes)?;
        Ok(SaveOutcome::Saved(path))
    }
}

/// Persist through `picker` when one is available, otherwise through `fallback`.
pub fn persist(
    artifact: &ExportArtifact,
    picker: Option<&mut dyn SaveCapability>,
    fallback: &mut dyn SaveCapability,
) -> LoaderResult<SaveOutcome> {
    let outcome = match picker {
        Some(p) => p.save(artifact)?,
        None => fallback.save(artifact)?,
    };
    if let SaveOutcome::Saved(path) = &outcome {
        tracing::info!(path = %path.display(), bytes = artifact.len(), "artifact saved");
    }
    Ok(outcome)
}

/// Write `bytes` to `<path>.partial`, then rename it over `path`.
///
/// The staged file never outlives a failed write.
pub(crate) fn write_staged(path: &Path, bytes: &[u8]) -> LoaderResult<()> {
    if path.file_name().is_none() {
        return Err(LoaderError::save(format!(
            "'{}' is not a file path",
            path.display()
        )));
    }
    ensure_parent_dir(path).map_err(|e| LoaderError::save(e.to_string()))?;

    let staged = staged_path(path);
    let mut guard = TempFileGuard(Some(staged.clone()));
    {
        let mut file =
            std::fs::File::create(&staged).map_err(|e| save_err("failed to create", &staged, e))?;
        file.write_all(bytes)
            .map_err(|e| save_err("failed to write", &staged, e))?;
        file.sync_all()
            .map_err(|e| save_err("failed to flush", &staged, e))?;
    }
    std::fs::rename(&staged, path).map_err(|e| save_err("failed to move into", path, e))?;
    guard.disarm();
    Ok(())
}

fn save_err(what: &str, path: &Path, e: std::io::Error) -> LoaderError {
    LoaderError::save(format!("{what} '{}': {e}", path.display()))
}

fn staged_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

#[cfg(test)]
#[path = "../../tests/unit/export/save.rs"]
mod tests;
