//! Shared helpers for treesync tests.
//!
//! The helpers panic on I/O failure because they only ever run inside tests,
//! where a broken fixture should abort the test immediately.

#![allow(clippy::missing_panics_doc)]

use filetime::FileTime;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Writes `contents` to `path`, creating parents, and sets its modification time.
pub fn write_with_mtime(path: &Path, contents: &[u8], mtime: FileTime) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directories");
    }
    fs::write(path, contents).expect("write fixture file");
    filetime::set_file_mtime(path, mtime).expect("set fixture mtime");
}

/// Returns the modification time recorded for `path`.
#[must_use]
pub fn mtime_of(path: &Path) -> FileTime {
    let metadata = fs::metadata(path).expect("stat fixture file");
    FileTime::from_last_modification_time(&metadata)
}

/// A fixed timestamp in the past, offset by `seconds`.
///
/// Fixtures use fixed times so that change detection never depends on the
/// wall clock.
#[must_use]
pub fn fixed_time(seconds: i64) -> FileTime {
    FileTime::from_unix_time(1_700_000_000 + seconds, 0)
}

/// Scratch directory with `src/` and `dst/` subdirectories.
pub struct TestDir {
    temp: TempDir,
}

impl TestDir {
    /// Creates a fresh scratch directory containing empty `src` and `dst` trees.
    pub fn new() -> io::Result<Self> {
        let temp = tempfile::tempdir()?;
        fs::create_dir(temp.path().join("src"))?;
        fs::create_dir(temp.path().join("dst"))?;
        Ok(Self { temp })
    }

    /// Root of the scratch directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Source tree root.
    #[must_use]
    pub fn source(&self) -> PathBuf {
        self.temp.path().join("src")
    }

    /// Target tree root.
    #[must_use]
    pub fn target(&self) -> PathBuf {
        self.temp.path().join("dst")
    }

    /// Writes a source file at `relative` with a fixed modification time.
    pub fn source_file(&self, relative: &str, contents: &[u8], mtime: FileTime) -> PathBuf {
        let path = self.source().join(relative);
        write_with_mtime(&path, contents, mtime);
        path
    }

    /// Writes a target file at `relative` with a fixed modification time.
    pub fn target_file(&self, relative: &str, contents: &[u8], mtime: FileTime) -> PathBuf {
        let path = self.target().join(relative);
        write_with_mtime(&path, contents, mtime);
        path
    }

    /// Reads a target file into memory.
    #[must_use]
    pub fn read_target(&self, relative: &str) -> Vec<u8> {
        fs::read(self.target().join(relative)).expect("read target file")
    }

    /// Lists every non-directory path under the target, relative and sorted.
    #[must_use]
    pub fn target_files(&self) -> Vec<PathBuf> {
        let root = self.target();
        let mut files = Vec::new();
        collect_files(&root, &root, &mut files);
        files.sort();
        files
    }
}

fn collect_files(root: &Path, dir: &Path, files: &mut Vec<PathBuf>) {
    for entry in fs::read_dir(dir).expect("read fixture directory") {
        let path = entry.expect("fixture entry").path();
        if path.is_dir() {
            collect_files(root, &path, files);
        } else {
            let relative = path.strip_prefix(root).expect("relative path");
            files.push(relative.to_path_buf());
        }
    }
}
