#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `engine` reconciles a target directory tree with a source tree in a single
//! one-way pass. Source entries are authoritative: missing target files are
//! created, changed ones are replaced, and with
//! [`SyncRequest::delete_missing`] enabled, target files that no longer exist
//! in the source are removed.
//!
//! # Design
//!
//! - Change detection compares sizes, then modification times truncated to
//!   whole seconds. Content is never hashed.
//! - Every write goes through [`copy_atomic`], which streams into a hidden
//!   sibling file and renames it over the destination.
//! - Progress lines go to a caller-supplied [`LogSink`]; diagnostics go to
//!   `tracing`.
//!
//! # Invariants
//!
//! - A destination path is either untouched or fully replaced.
//! - Directories are created but never deleted.
//! - Symbolic links and other non-regular source entries are skipped.
//! - Failures never abort a run. They are logged and collected in the
//!   returned [`SyncReport`].
//!
//! # Examples
//!
//! ```
//! use engine::{SyncRequest, synchronize};
//! use logging::MemorySink;
//!
//! # fn main() -> std::io::Result<()> {
//! let temp = tempfile::tempdir()?;
//! let source = temp.path().join("src");
//! let target = temp.path().join("dst");
//! std::fs::create_dir_all(&source)?;
//! std::fs::create_dir_all(&target)?;
//! std::fs::write(source.join("hello.txt"), b"hi")?;
//!
//! let mut sink = MemorySink::new();
//! let report = synchronize(&SyncRequest::new(&source, &target), &mut sink);
//!
//! assert_eq!(report.copied(), 1);
//! assert!(!report.has_errors());
//! assert_eq!(std::fs::read(target.join("hello.txt"))?, b"hi");
//! # Ok(())
//! # }
//! ```

mod error;
mod reconcile;
mod report;
mod request;
mod writer;

pub use error::{SyncError, SyncErrorKind};
pub use logging::LogSink;
pub use reconcile::Synchronizer;
pub use report::SyncReport;
pub use request::SyncRequest;
pub use writer::{TEMP_FILE_MARKER, TempFileGuard, copy_atomic};

/// Size of the buffer used to stream file contents.
pub const COPY_BUFFER_SIZE: usize = 128 * 1024;

/// Runs one synchronization of `request`, reporting progress to `sink`.
///
/// Always returns a report, even when the source root cannot be read.
pub fn synchronize(request: &SyncRequest, sink: &mut dyn LogSink) -> SyncReport {
    Synchronizer::new(request, sink).run()
}
