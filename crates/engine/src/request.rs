use std::path::{Path, PathBuf};

/// Parameters for a single synchronization run.
///
/// # Examples
///
/// ```
/// use engine::SyncRequest;
/// use std::path::Path;
///
/// let request = SyncRequest::new("photos", "/mnt/backup/photos").delete_missing(true);
/// assert_eq!(request.source(), Path::new("photos"));
/// assert!(request.deletes_missing());
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyncRequest {
    source: PathBuf,
    target: PathBuf,
    delete_missing: bool,
}

impl SyncRequest {
    /// Creates a request that mirrors `source` into `target` without deleting.
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            delete_missing: false,
        }
    }

    /// Enables or disables removal of target files that are absent from source.
    #[must_use]
    pub const fn delete_missing(mut self, enabled: bool) -> Self {
        self.delete_missing = enabled;
        self
    }

    /// Root of the authoritative tree.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Root of the tree being reconciled.
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Whether the delete pass runs after the forward pass.
    #[must_use]
    pub const fn deletes_missing(&self) -> bool {
        self.delete_missing
    }
}
