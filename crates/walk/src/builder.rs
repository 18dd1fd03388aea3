use crate::error::WalkError;
use crate::walker::Walker;
use std::path::PathBuf;

/// Configures a traversal of everything below a root directory.
#[derive(Clone, Debug)]
pub struct WalkBuilder {
    root: PathBuf,
}

impl WalkBuilder {
    /// Creates a builder for the tree under `root`.
    ///
    /// The root itself is never yielded. A root that is a symbolic link is
    /// resolved; links below it are not.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Builds a [`Walker`].
    ///
    /// Fails only when the root itself cannot be inspected.
    pub fn build(self) -> Result<Walker, WalkError> {
        Walker::new(self.root)
    }
}
