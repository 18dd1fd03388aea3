use filetime::FileTime;
use std::fs;
use std::io;
use std::path::Path;

/// Snapshot of the metadata used for change detection and replication.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FileMetadata {
    len: u64,
    modified: FileTime,
    is_regular_file: bool,
    mode: u32,
}

impl FileMetadata {
    /// Creates a snapshot from explicit values.
    #[must_use]
    pub const fn new(len: u64, modified: FileTime, is_regular_file: bool, mode: u32) -> Self {
        Self {
            len,
            modified,
            is_regular_file,
            mode,
        }
    }

    /// Captures a snapshot from [`fs::Metadata`].
    #[must_use]
    pub fn from_fs(metadata: &fs::Metadata) -> Self {
        Self {
            len: metadata.len(),
            modified: FileTime::from_last_modification_time(metadata),
            is_regular_file: metadata.file_type().is_file(),
            mode: permission_bits(metadata),
        }
    }

    /// Reads a snapshot for `path`, following symbolic links.
    pub fn read(path: &Path) -> io::Result<Self> {
        fs::metadata(path).map(|metadata| Self::from_fs(&metadata))
    }

    /// Size in bytes.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.len
    }

    /// Returns `true` when the file holds no data.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Modification time with the resolution reported by the filesystem.
    #[must_use]
    pub const fn modified(&self) -> FileTime {
        self.modified
    }

    /// Whether the node is a plain data file.
    #[must_use]
    pub const fn is_regular_file(&self) -> bool {
        self.is_regular_file
    }

    /// Owner, group, and other permission bits (`0o777` mask on Unix).
    ///
    /// Setuid, setgid, and sticky bits are dropped.
    #[must_use]
    pub const fn mode(&self) -> u32 {
        self.mode
    }
}

#[cfg(unix)]
fn permission_bits(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;

    metadata.permissions().mode() & 0o777
}

#[cfg(not(unix))]
fn permission_bits(metadata: &fs::Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fs_captures_size_and_kind() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("file.txt");
        fs::write(&path, b"hello").expect("write");

        let snapshot = FileMetadata::read(&path).expect("read");
        assert_eq!(snapshot.len(), 5);
        assert!(!snapshot.is_empty());
        assert!(snapshot.is_regular_file());
    }

    #[test]
    fn directories_are_not_regular_files() {
        let temp = tempfile::tempdir().expect("tempdir");
        let snapshot = FileMetadata::read(temp.path()).expect("read");
        assert!(!snapshot.is_regular_file());
    }

    #[test]
    fn read_missing_path_reports_not_found() {
        let temp = tempfile::tempdir().expect("tempdir");
        let error = FileMetadata::read(&temp.path().join("absent")).expect_err("missing");
        assert_eq!(error.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn modified_matches_timestamp_set_on_disk() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("dated.txt");
        fs::write(&path, b"x").expect("write");
        let mtime = FileTime::from_unix_time(1_600_000_000, 250);
        filetime::set_file_mtime(&path, mtime).expect("set mtime");

        let snapshot = FileMetadata::read(&path).expect("read");
        assert_eq!(snapshot.modified().unix_seconds(), 1_600_000_000);
    }

    #[cfg(unix)]
    #[test]
    fn mode_reports_permission_bits() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("script.sh");
        fs::write(&path, b"#!/bin/sh").expect("write");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o750)).expect("chmod");

        let snapshot = FileMetadata::read(&path).expect("read");
        assert_eq!(snapshot.mode(), 0o750);
    }

    #[cfg(unix)]
    #[test]
    fn mode_drops_setuid_bit() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("tool");
        fs::write(&path, b"#!/bin/sh").expect("write");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o4755)).expect("chmod");

        let snapshot = FileMetadata::read(&path).expect("read");
        assert_eq!(snapshot.mode(), 0o755);
    }
}
