use std::fs;
use std::path::{Path, PathBuf};

/// A node found below the traversal root.
#[derive(Debug)]
pub struct WalkEntry {
    pub(crate) full_path: PathBuf,
    pub(crate) relative_path: PathBuf,
    pub(crate) metadata: fs::Metadata,
}

impl WalkEntry {
    /// Root joined with [`relative_path`](Self::relative_path).
    #[must_use]
    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    /// Path below the root, never empty and never containing `..`.
    #[must_use]
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// `lstat` metadata: a symbolic link describes the link, not its target.
    #[must_use]
    pub fn metadata(&self) -> &fs::Metadata {
        &self.metadata
    }

    /// Whether the node is a real directory (symlinks to directories are not).
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.metadata.file_type().is_dir()
    }
}
