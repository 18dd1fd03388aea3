//! Crash-safe file replacement.
//!
//! Content is streamed into a uniquely named sibling of the destination and
//! renamed into place only after it has been flushed, stamped with the source
//! modification time, and closed. Readers of the destination therefore see
//! either the previous file or the complete new one.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicUsize, Ordering};

use metadata::{FileMetadata, apply_modification_time, apply_permissions};
use tracing::trace;

use crate::COPY_BUFFER_SIZE;
use crate::error::SyncError;

/// Marker embedded in every temporary file name.
pub const TEMP_FILE_MARKER: &str = ".treesync-tmp-";

static NEXT_TEMP_FILE_ID: AtomicUsize = AtomicUsize::new(0);

/// Builds the temporary sibling path used while writing `destination`.
///
/// The name is hidden, carries the process id, and ends in a per-process
/// counter so concurrent writers never pick the same path.
pub(crate) fn temporary_destination_path(destination: &Path, unique: usize) -> PathBuf {
    let mut name = OsString::from(".");
    match destination.file_name() {
        Some(file_name) => name.push(file_name),
        None => name.push("file"),
    }
    name.push(format!("{TEMP_FILE_MARKER}{}-{unique}", process::id()));

    match destination.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

/// Owns a temporary file until it is renamed over its destination.
///
/// Dropping an uncommitted guard removes the temporary file.
#[derive(Debug)]
pub struct TempFileGuard {
    path: PathBuf,
    committed: bool,
}

impl TempFileGuard {
    /// Creates a fresh temporary file next to `destination`.
    ///
    /// Existing files are never reused; a name collision moves on to the
    /// next counter value.
    pub fn create(destination: &Path) -> Result<(Self, File), SyncError> {
        loop {
            let unique = NEXT_TEMP_FILE_ID.fetch_add(1, Ordering::Relaxed);
            let path = temporary_destination_path(destination, unique);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    trace!(target: "treesync::copy", temp = %path.display(), "created temporary file");
                    return Ok((
                        Self {
                            path,
                            committed: false,
                        },
                        file,
                    ));
                }
                Err(error) if error.kind() == io::ErrorKind::AlreadyExists => {}
                Err(error) => {
                    return Err(SyncError::write("create temporary file", path, error));
                }
            }
        }
    }

    /// Path of the temporary file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Renames the temporary file over `destination`.
    ///
    /// On failure the guard is dropped and the temporary file removed.
    pub fn commit(mut self, destination: &Path) -> io::Result<()> {
        fs::rename(&self.path, destination)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// Atomically replaces `destination` with the contents of `source`.
///
/// Missing parent directories are created. The destination receives the
/// source's permission bits and modification time. Returns the number of
/// bytes copied. On any failure the destination is left exactly as it was.
pub fn copy_atomic(
    source: &Path,
    destination: &Path,
    source_metadata: &FileMetadata,
) -> Result<u64, SyncError> {
    if let Some(parent) = destination.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .map_err(|error| SyncError::write("create parent directory", parent, error))?;
    }

    let mut reader =
        File::open(source).map_err(|error| SyncError::write("open source", source, error))?;
    let (guard, mut file) = TempFileGuard::create(destination)?;

    apply_permissions(&file, guard.path(), source_metadata)?;
    let copied = copy_stream(&mut reader, &mut file)
        .map_err(|error| SyncError::write("copy", guard.path(), error))?;

    file.flush()
        .and_then(|()| file.sync_all())
        .map_err(|error| SyncError::write("close temporary file", guard.path(), error))?;
    drop(file);

    apply_modification_time(guard.path(), source_metadata)?;

    guard
        .commit(destination)
        .map_err(|error| SyncError::write("rename", destination, error))?;
    trace!(target: "treesync::copy", destination = %destination.display(), bytes = copied, "committed");
    Ok(copied)
}

fn copy_stream<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> io::Result<u64> {
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let mut total = 0u64;
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => return Ok(total),
            Ok(read) => read,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        };
        writer.write_all(&buffer[..read])?;
        total += read as u64;
    }
}
