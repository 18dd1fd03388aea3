use crate::error::SyncError;

/// Outcome counters and non-fatal errors collected during one run.
///
/// Counters only grow and errors keep their insertion order. The report is
/// owned by a single run and is not shared between threads.
#[derive(Debug, Default)]
pub struct SyncReport {
    copied: u64,
    overwritten: u64,
    deleted: u64,
    skipped: u64,
    errors: Vec<SyncError>,
}

impl SyncReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a file created in the target.
    pub fn record_copied(&mut self) {
        self.copied += 1;
    }

    /// Counts a target file replaced with new content.
    pub fn record_overwritten(&mut self) {
        self.overwritten += 1;
    }

    /// Counts a target file removed because it has no source counterpart.
    pub fn record_deleted(&mut self) {
        self.deleted += 1;
    }

    /// Counts a file left untouched.
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Appends an error; `None` is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use engine::{SyncError, SyncReport};
    /// use std::io;
    ///
    /// let mut report = SyncReport::new();
    /// report.record_error(None);
    /// report.record_error(SyncError::delete("stale.txt", io::Error::other("busy")));
    /// assert_eq!(report.errors().len(), 1);
    /// ```
    pub fn record_error(&mut self, error: impl Into<Option<SyncError>>) {
        if let Some(error) = error.into() {
            self.errors.push(error);
        }
    }

    /// Files created in the target.
    #[must_use]
    pub const fn copied(&self) -> u64 {
        self.copied
    }

    /// Target files replaced with new content.
    #[must_use]
    pub const fn overwritten(&self) -> u64 {
        self.overwritten
    }

    /// Target files removed by the delete pass.
    #[must_use]
    pub const fn deleted(&self) -> u64 {
        self.deleted
    }

    /// Files left untouched, including non-regular source files.
    #[must_use]
    pub const fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Errors in the order they were recorded.
    #[must_use]
    pub fn errors(&self) -> &[SyncError] {
        &self.errors
    }

    /// Returns `true` when at least one error was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Consumes the report and returns the recorded errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<SyncError> {
        self.errors
    }

    /// One-line summary of every counter.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "copied={} overwritten={} deleted={} skipped={} errors={}",
            self.copied,
            self.overwritten,
            self.deleted,
            self.skipped,
            self.errors.len()
        )
    }
}
