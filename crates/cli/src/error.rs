use std::io;
use std::path::PathBuf;

/// Exit status for a run that completed with recorded errors or bad roots.
pub const EXIT_FAILURE: i32 = 1;

/// Exit status for invalid command-line usage.
pub const EXIT_USAGE: i32 = 2;

/// Failures detected before the engine runs.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The arguments could not be parsed.
    #[error(transparent)]
    Usage(#[from] clap::Error),
    /// A required option was not supplied.
    #[error("missing required option {0}")]
    MissingOption(&'static str),
    /// The path could not be inspected.
    #[error("cannot access {}: {source}", .path.display())]
    Inaccessible {
        /// Path that was inspected.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The path exists but is not a directory.
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

impl CliError {
    /// Process exit status associated with the failure.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) | Self::MissingOption(_) => EXIT_USAGE,
            Self::Inaccessible { .. } | Self::NotADirectory(_) => EXIT_FAILURE,
        }
    }
}
