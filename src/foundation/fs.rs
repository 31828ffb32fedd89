use std::path::{Path, PathBuf};

use crate::foundation::error::LoaderResult;

/// Removes the wrapped file when dropped, unless disarmed first.
#[derive(Debug)]
pub(crate) struct TempFileGuard(pub(crate) Option<PathBuf>);

impl TempFileGuard {
    pub(crate) fn path(&self) -> Option<&Path> {
        self.0.as_deref()
    }

    /// Stop tracking the file without deleting it.
    pub(crate) fn disarm(&mut self) -> Option<PathBuf> {
        self.0.take()
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> LoaderResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}
