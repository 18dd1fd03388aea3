use metadata::MetadataError;
use std::io;
use std::path::{Path, PathBuf};
use walk::{WalkError, WalkErrorKind};

/// Non-fatal failure recorded during a synchronization run.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// A directory or one of its entries could not be read.
    #[error("failed to traverse '{}': {source}", .path.display())]
    Traversal {
        /// Directory being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// File metadata could not be read.
    #[error("failed to inspect '{}': {source}", .path.display())]
    Metadata {
        /// Path whose metadata was requested.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// A step of the atomic copy failed.
    #[error("failed to {action} '{}': {source}", .path.display())]
    Write {
        /// Step that failed, such as `"rename"`.
        action: &'static str,
        /// Path the step operated on.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// An obsolete target file could not be removed.
    #[error("failed to delete '{}': {source}", .path.display())]
    Delete {
        /// File that was to be removed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// A source directory could not be mirrored into the target.
    #[error("failed to create directory '{}': {source}", .path.display())]
    CreateDirectory {
        /// Directory that was to be created.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

/// Category of a [`SyncError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SyncErrorKind {
    /// See [`SyncError::Traversal`].
    Traversal,
    /// See [`SyncError::Metadata`].
    Metadata,
    /// See [`SyncError::Write`].
    Write,
    /// See [`SyncError::Delete`].
    Delete,
    /// See [`SyncError::CreateDirectory`].
    CreateDirectory,
}

impl SyncError {
    /// Constructs a [`SyncError::Metadata`].
    pub fn metadata(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Metadata {
            path: path.into(),
            source,
        }
    }

    /// Constructs a [`SyncError::Write`].
    pub fn write(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            action,
            path: path.into(),
            source,
        }
    }

    /// Constructs a [`SyncError::Delete`].
    pub fn delete(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Delete {
            path: path.into(),
            source,
        }
    }

    /// Constructs a [`SyncError::CreateDirectory`].
    pub fn create_directory(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::CreateDirectory {
            path: path.into(),
            source,
        }
    }

    /// Returns the category of the failure.
    #[must_use]
    pub const fn kind(&self) -> SyncErrorKind {
        match self {
            Self::Traversal { .. } => SyncErrorKind::Traversal,
            Self::Metadata { .. } => SyncErrorKind::Metadata,
            Self::Write { .. } => SyncErrorKind::Write,
            Self::Delete { .. } => SyncErrorKind::Delete,
            Self::CreateDirectory { .. } => SyncErrorKind::CreateDirectory,
        }
    }

    /// Returns the path involved in the failure.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Traversal { path, .. }
            | Self::Metadata { path, .. }
            | Self::Write { path, .. }
            | Self::Delete { path, .. }
            | Self::CreateDirectory { path, .. } => path,
        }
    }

    /// Returns the underlying I/O error.
    #[must_use]
    pub fn io_error(&self) -> &io::Error {
        match self {
            Self::Traversal { source, .. }
            | Self::Metadata { source, .. }
            | Self::Write { source, .. }
            | Self::Delete { source, .. }
            | Self::CreateDirectory { source, .. } => source,
        }
    }
}

impl From<WalkError> for SyncError {
    fn from(error: WalkError) -> Self {
        match error.into_kind() {
            WalkErrorKind::Metadata { path, source } => Self::Metadata { path, source },
            kind => {
                let (path, source) = kind.into_parts();
                Self::Traversal { path, source }
            }
        }
    }
}

impl From<MetadataError> for SyncError {
    fn from(error: MetadataError) -> Self {
        let action = error.action();
        let path = error.path().to_path_buf();
        Self::Write {
            action,
            path,
            source: error.into_io_error(),
        }
    }
}
