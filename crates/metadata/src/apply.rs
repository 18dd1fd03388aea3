use crate::error::MetadataError;
use crate::snapshot::FileMetadata;
use filetime::{FileTime, set_file_times};
use std::fs;
use std::path::Path;

/// Sets the modification time of `destination` to the source's timestamp.
///
/// The access time is set to the current time. Preserving the modification
/// time keeps the destination comparable on the next run.
pub fn apply_modification_time(
    destination: &Path,
    source: &FileMetadata,
) -> Result<(), MetadataError> {
    set_file_times(destination, FileTime::now(), source.modified())
        .map_err(|error| MetadataError::new("set modification time", destination, error))
}

/// Applies the source's permission bits to an open destination file.
///
/// Operating on the handle bypasses the process umask that would otherwise
/// mask bits requested at creation time.
pub fn apply_permissions(
    file: &fs::File,
    destination: &Path,
    source: &FileMetadata,
) -> Result<(), MetadataError> {
    let permissions = permissions_for(file, destination, source)?;
    file.set_permissions(permissions)
        .map_err(|error| MetadataError::new("apply permissions", destination, error))
}

#[cfg(unix)]
fn permissions_for(
    _file: &fs::File,
    _destination: &Path,
    source: &FileMetadata,
) -> Result<fs::Permissions, MetadataError> {
    use std::os::unix::fs::PermissionsExt;

    Ok(fs::Permissions::from_mode(source.mode()))
}

#[cfg(not(unix))]
fn permissions_for(
    file: &fs::File,
    destination: &Path,
    source: &FileMetadata,
) -> Result<fs::Permissions, MetadataError> {
    let mut permissions = file
        .metadata()
        .map_err(|error| MetadataError::new("inspect permissions", destination, error))?
        .permissions();
    permissions.set_readonly(source.mode() & 0o222 == 0);
    Ok(permissions)
}
