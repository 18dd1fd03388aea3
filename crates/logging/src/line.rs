use std::fmt;

/// Severity of a progress line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogLevel {
    /// Routine progress.
    Info,
    /// A non-fatal failure that will also appear in the final report.
    Error,
}

/// Outcome a progress line describes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LineKind {
    /// A file was created in the target.
    Copy,
    /// An existing target file was replaced.
    Overwrite,
    /// A file was left untouched.
    Skip,
    /// A target file without a source counterpart was removed.
    Delete,
    /// An operation failed.
    Error,
}

impl LineKind {
    /// Tag printed in front of the message.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Copy => "COPY",
            Self::Overwrite => "OVERWRITE",
            Self::Skip => "SKIP",
            Self::Delete => "DELETE",
            Self::Error => "ERR",
        }
    }

    /// Severity associated with the kind.
    #[must_use]
    pub const fn level(self) -> LogLevel {
        match self {
            Self::Error => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

/// Single line-formatted progress message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogLine {
    kind: LineKind,
    message: String,
}

impl LogLine {
    /// Creates a line of the given kind.
    pub fn new(kind: LineKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Kind of outcome.
    #[must_use]
    pub const fn kind(&self) -> LineKind {
        self.kind
    }

    /// Severity derived from the kind.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.kind.level()
    }

    /// Message text without the tag.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.tag(), self.message)
    }
}
