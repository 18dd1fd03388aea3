#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `metadata` captures the subset of filesystem metadata that treesync relies
//! on and decides whether a destination file must be rewritten.
//!
//! # Design
//!
//! - [`FileMetadata`] is a read-only snapshot taken at traversal time: size,
//!   modification time, whether the node is a regular file, and the
//!   permission bits.
//! - [`compare`] and [`differs`] implement change detection. Sizes are
//!   compared first. Equal sizes fall back to modification times truncated to
//!   whole seconds, so a destination on a filesystem that only stores
//!   second-resolution timestamps is not rewritten on every run.
//! - [`apply_modification_time`] and [`apply_permissions`] transfer the
//!   source's timestamp and mode bits onto a freshly written file.
//!
//! # Invariants
//!
//! - File contents are never read. Two files with equal size and equal
//!   truncated modification time are treated as identical.
//!
//! # Examples
//!
//! ```
//! use filetime::FileTime;
//! use metadata::{Comparison, FileMetadata, compare};
//!
//! let source = FileMetadata::new(4, FileTime::from_unix_time(1_700_000_000, 900), true, 0o644);
//! let destination = FileMetadata::new(4, FileTime::from_unix_time(1_700_000_000, 0), true, 0o644);
//! assert_eq!(compare(&source, &destination), Comparison::Identical);
//! ```

mod apply;
mod comparison;
mod error;
mod snapshot;

pub use apply::{apply_modification_time, apply_permissions};
pub use comparison::{Comparison, compare, differs, truncate_to_seconds};
pub use error::MetadataError;
pub use snapshot::FileMetadata;
