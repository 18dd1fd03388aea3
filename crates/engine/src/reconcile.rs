use std::fs;
use std::io;
use std::path::Path;

use logging::{LineKind, LogLine, LogSink};
use metadata::{FileMetadata, differs};
use tracing::{debug, info, trace};
use walk::{WalkBuilder, WalkEntry};

use crate::error::SyncError;
use crate::report::SyncReport;
use crate::request::SyncRequest;
use crate::writer::copy_atomic;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum CopyKind {
    New,
    Overwrite,
}

/// Drives a single synchronization run.
///
/// The forward pass mirrors every source entry into the target. When the
/// request enables it, a delete pass then removes target files whose source
/// counterpart no longer exists. Every failure is logged, recorded, and
/// skipped over; the run always produces a report.
pub struct Synchronizer<'a> {
    request: &'a SyncRequest,
    sink: &'a mut dyn LogSink,
    report: SyncReport,
}

impl<'a> Synchronizer<'a> {
    /// Prepares a run of `request` that reports progress to `sink`.
    pub fn new(request: &'a SyncRequest, sink: &'a mut dyn LogSink) -> Self {
        Self {
            request,
            sink,
            report: SyncReport::new(),
        }
    }

    /// Executes both passes and returns the accumulated report.
    #[must_use]
    pub fn run(mut self) -> SyncReport {
        info!(
            target: "treesync::flist",
            source = %self.request.source().display(),
            target_root = %self.request.target().display(),
            delete_missing = self.request.deletes_missing(),
            "starting synchronization"
        );

        self.forward_pass();
        if self.request.deletes_missing() {
            self.delete_pass();
        }

        info!(target: "treesync::flist", summary = %self.report.summary_line(), "synchronization finished");
        self.report
    }

    fn forward_pass(&mut self) {
        let walker = match WalkBuilder::new(self.request.source()).build() {
            Ok(walker) => walker,
            Err(error) => {
                self.fail(SyncError::from(error));
                return;
            }
        };

        for entry in walker {
            match entry {
                Ok(entry) => self.visit_source(&entry),
                Err(error) => self.fail(SyncError::from(error)),
            }
        }
    }

    fn visit_source(&mut self, entry: &WalkEntry) {
        let destination = self.request.target().join(entry.relative_path());

        if entry.is_dir() {
            match fs::create_dir_all(&destination) {
                Ok(()) => {
                    trace!(target: "treesync::flist", directory = %destination.display(), "directory ready");
                }
                Err(error) => self.fail(SyncError::create_directory(destination, error)),
            }
            return;
        }

        let source = FileMetadata::from_fs(entry.metadata());
        if !source.is_regular_file() {
            debug!(target: "treesync::skip", path = %entry.full_path().display(), "not a regular file");
            self.report.record_skipped();
            self.emit(
                LineKind::Skip,
                format!("not regular file {}", entry.full_path().display()),
            );
            return;
        }

        match FileMetadata::read(&destination) {
            Ok(existing) if differs(&source, &existing) => {
                self.copy(entry.full_path(), &destination, &source, CopyKind::Overwrite);
            }
            Ok(_) => {
                trace!(target: "treesync::skip", path = %entry.relative_path().display(), "identical");
                self.report.record_skipped();
                self.emit(
                    LineKind::Skip,
                    format!("{} (identical)", entry.relative_path().display()),
                );
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                self.copy(entry.full_path(), &destination, &source, CopyKind::New);
            }
            Err(error) => self.fail(SyncError::metadata(destination, error)),
        }
    }

    fn copy(&mut self, source: &Path, destination: &Path, metadata: &FileMetadata, kind: CopyKind) {
        match copy_atomic(source, destination, metadata) {
            Ok(bytes) => {
                debug!(
                    target: "treesync::copy",
                    source = %source.display(),
                    destination = %destination.display(),
                    bytes,
                    overwrite = kind == CopyKind::Overwrite,
                    "copied file"
                );
                let line_kind = match kind {
                    CopyKind::New => {
                        self.report.record_copied();
                        LineKind::Copy
                    }
                    CopyKind::Overwrite => {
                        self.report.record_overwritten();
                        LineKind::Overwrite
                    }
                };
                self.emit(
                    line_kind,
                    format!("{} -> {}", source.display(), destination.display()),
                );
            }
            Err(error) => self.fail(error),
        }
    }

    fn delete_pass(&mut self) {
        let walker = match WalkBuilder::new(self.request.target()).build() {
            Ok(walker) => walker,
            Err(error) => {
                self.fail(SyncError::from(error));
                return;
            }
        };

        for entry in walker {
            match entry {
                Ok(entry) if entry.is_dir() => {}
                Ok(entry) => self.visit_target(&entry),
                Err(error) => self.fail(SyncError::from(error)),
            }
        }
    }

    fn visit_target(&mut self, entry: &WalkEntry) {
        let counterpart = self.request.source().join(entry.relative_path());
        match fs::symlink_metadata(&counterpart) {
            Ok(_) => {}
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                let path = entry.full_path();
                match fs::remove_file(path) {
                    Ok(()) => {
                        debug!(target: "treesync::delete", path = %path.display(), "deleted");
                        self.report.record_deleted();
                        self.emit(
                            LineKind::Delete,
                            format!("{} (missing in source)", path.display()),
                        );
                    }
                    Err(error) => self.fail(SyncError::delete(path, error)),
                }
            }
            Err(error) => self.fail(SyncError::metadata(counterpart, error)),
        }
    }

    fn emit(&mut self, kind: LineKind, message: String) {
        self.sink.log(&LogLine::new(kind, message));
    }

    fn fail(&mut self, error: SyncError) {
        debug!(target: "treesync::error", kind = ?error.kind(), path = %error.path().display(), "{error}");
        self.emit(LineKind::Error, error.to_string());
        self.report.record_error(error);
    }
}
