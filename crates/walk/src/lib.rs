#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` provides the depth-first directory traversal used by the treesync
//! engine for both the forward (copy) pass and the delete pass. The walker
//! enumerates directories, regular files, and every other node type while
//! keeping relative paths anchored at the configured root. Directory entries
//! are sorted by file name before they are yielded so that two walks over the
//! same static tree always produce the same sequence.
//!
//! # Design
//!
//! - [`WalkBuilder`] names the root to traverse. The root itself is never
//!   yielded, only the nodes below it.
//! - [`Walker`] implements [`Iterator`] and yields
//!   `Result<WalkEntry, WalkError>` values in depth-first order. A directory is
//!   yielded before its contents.
//! - [`WalkError`] describes I/O failures encountered while reading directories
//!   or querying metadata.
//!
//! # Invariants
//!
//! - Returned [`WalkEntry`] values always reference paths that reside within
//!   the configured root. Relative paths never contain `..` segments.
//! - A root given as a symbolic link to a directory is resolved. Symbolic
//!   links below the root are reported as-is and never followed.
//! - Failures on individual nodes do not end the traversal. The walker yields
//!   the error and carries on with the next entry, so one unreadable directory
//!   never hides the rest of the tree.
//!
//! # Errors
//!
//! [`WalkBuilder::build`] fails only when the root itself cannot be inspected.
//! Every later failure is yielded inline by the iterator. Callers can downcast
//! to [`std::io::Error`] through [`std::error::Error::source`].
//!
//! # Examples
//!
//! ```
//! use walk::WalkBuilder;
//! use std::collections::BTreeSet;
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path().join("src");
//! let nested = root.join("nested");
//! fs::create_dir_all(&nested)?;
//! fs::write(root.join("file.txt"), b"data")?;
//! fs::write(nested.join("more.txt"), b"data")?;
//!
//! let walker = WalkBuilder::new(&root).build()?;
//! let mut seen = BTreeSet::new();
//! for entry in walker {
//!     seen.insert(entry?.relative_path().to_path_buf());
//! }
//!
//! assert!(seen.contains(std::path::Path::new("file.txt")));
//! assert!(seen.contains(std::path::Path::new("nested")));
//! assert!(seen.contains(std::path::Path::new("nested/more.txt")));
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod builder;
mod entry;
mod error;
mod walker;

pub use builder::WalkBuilder;
pub use entry::WalkEntry;
pub use error::{WalkError, WalkErrorKind};
pub use walker::Walker;
