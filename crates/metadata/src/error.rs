use std::io;
use std::path::{Path, PathBuf};

/// Error raised when applying metadata to a destination fails.
#[derive(Debug, thiserror::Error)]
#[error("failed to {action} '{}': {source}", .path.display())]
pub struct MetadataError {
    action: &'static str,
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl MetadataError {
    /// Creates an error describing `action` on `path`.
    pub fn new(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            action,
            path: path.into(),
            source,
        }
    }

    /// Operation that failed, such as `"set modification time"`.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        self.action
    }

    /// Path the operation targeted.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consumes the error and returns the underlying I/O error.
    #[must_use]
    pub fn into_io_error(self) -> io::Error {
        self.source
    }
}
