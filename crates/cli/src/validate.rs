use std::fs;
use std::path::Path;

use crate::error::CliError;

/// Confirms that `path` exists and is a directory.
///
/// Symbolic links to directories are accepted.
pub fn validate_directory(path: &Path) -> Result<(), CliError> {
    let metadata = fs::metadata(path).map_err(|source| CliError::Inaccessible {
        path: path.to_path_buf(),
        source,
    })?;

    if metadata.is_dir() {
        Ok(())
    } else {
        Err(CliError::NotADirectory(path.to_path_buf()))
    }
}
