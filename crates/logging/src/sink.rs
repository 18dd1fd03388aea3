use std::io::{self, Write};

use crate::line::{LineKind, LogLine};

/// Destination for progress lines produced during a synchronization run.
///
/// Sinks are infallible from the engine's point of view: a sink that cannot
/// emit a line drops it rather than interrupting the run.
pub trait LogSink {
    /// Records a single line.
    fn log(&mut self, line: &LogLine);
}

impl<S: LogSink + ?Sized> LogSink for &mut S {
    fn log(&mut self, line: &LogLine) {
        (**self).log(line);
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn log(&mut self, line: &LogLine) {
        (**self).log(line);
    }
}

/// Streaming sink that renders one [`LogLine`] per line into an [`io::Write`] target.
///
/// # Examples
///
/// ```
/// use logging::{LineKind, LogLine, MessageSink};
///
/// let mut sink = MessageSink::new(Vec::new());
/// sink.write(&LogLine::new(LineKind::Skip, "notes.txt (identical)"))?;
/// assert_eq!(sink.into_inner(), b"SKIP: notes.txt (identical)\n".to_vec());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct MessageSink<W> {
    writer: W,
}

impl<W> MessageSink<W> {
    /// Creates a sink that writes to `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MessageSink<W> {
    /// Renders `line` into the writer, surfacing I/O failures.
    pub fn write(&mut self, line: &LogLine) -> io::Result<()> {
        writeln!(self.writer, "{line}")
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W: Write> LogSink for MessageSink<W> {
    fn log(&mut self, line: &LogLine) {
        if let Err(error) = self.write(line) {
            tracing::warn!(%error, "failed to write progress line");
        }
    }
}

/// Sink that forwards lines to [`tracing`] events.
///
/// Copies and overwrites use the `treesync::copy` target, deletions
/// `treesync::delete`, skips `treesync::skip`, and failures
/// `treesync::error` at error level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&mut self, line: &LogLine) {
        let message = line.message();
        match line.kind() {
            LineKind::Copy | LineKind::Overwrite => {
                tracing::info!(target: "treesync::copy", tag = line.kind().tag(), "{message}");
            }
            LineKind::Delete => {
                tracing::info!(target: "treesync::delete", "{message}");
            }
            LineKind::Skip => {
                tracing::debug!(target: "treesync::skip", "{message}");
            }
            LineKind::Error => {
                tracing::error!(target: "treesync::error", "{message}");
            }
        }
    }
}

/// Sink that keeps every line in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    lines: Vec<LogLine>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines recorded so far, in order.
    #[must_use]
    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    /// Lines of a given kind, rendered with their tag.
    #[must_use]
    pub fn rendered(&self, kind: LineKind) -> Vec<String> {
        self.lines
            .iter()
            .filter(|line| line.kind() == kind)
            .map(ToString::to_string)
            .collect()
    }

    /// Consumes the sink and returns the recorded lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<LogLine> {
        self.lines
    }
}

impl LogSink for MemorySink {
    fn log(&mut self, line: &LogLine) {
        self.lines.push(line.clone());
    }
}

/// Sink that discards every line.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn log(&mut self, _line: &LogLine) {}
}
