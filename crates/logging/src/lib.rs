#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` carries the two output channels used by treesync:
//!
//! - Progress lines (`COPY`, `OVERWRITE`, `SKIP`, `DELETE`, `ERR`) that the
//!   engine hands to a caller-supplied [`LogSink`]. The sink is an explicit
//!   collaborator so the engine never reaches for a process-wide logger.
//! - Structured diagnostics emitted through [`tracing`], configured once by the
//!   binary via [`init_tracing`].
//!
//! # Design
//!
//! [`LogLine`] pairs a [`LineKind`] with a preformatted message. Sinks decide
//! where lines go: [`MessageSink`] renders them into any [`std::io::Write`]
//! implementor, [`TracingSink`] turns them into tracing events,
//! [`MemorySink`] keeps them for inspection, and [`NullSink`] drops them.
//!
//! # Examples
//!
//! ```
//! use logging::{LineKind, LogLine, LogSink, MessageSink};
//!
//! let mut sink = MessageSink::new(Vec::new());
//! sink.log(&LogLine::new(LineKind::Copy, "a.txt -> b/a.txt"));
//! sink.log(&LogLine::new(LineKind::Error, "stat b/c.txt: denied"));
//!
//! let output = String::from_utf8(sink.into_inner()).unwrap();
//! assert_eq!(output, "COPY: a.txt -> b/a.txt\nERR: stat b/c.txt: denied\n");
//! ```

mod config;
mod line;
mod sink;
mod tracing_setup;

pub use config::VerbosityConfig;
pub use line::{LineKind, LogLevel, LogLine};
pub use sink::{LogSink, MemorySink, MessageSink, NullSink, TracingSink};
pub use tracing_setup::init_tracing;
