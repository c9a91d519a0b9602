use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Intermediate build output that is removed when the guard goes out of scope.
///
/// Removal is best-effort: a failure is logged and otherwise ignored.
#[derive(Debug)]
pub struct Artifact {
    path: PathBuf,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Artifact {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(artifact = %self.path.display(), "removed build artifact"),
            Err(e) => warn!(
                artifact = %self.path.display(),
                error = %e,
                "failed to remove build artifact"
            ),
        }
    }
}
