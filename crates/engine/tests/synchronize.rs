use std::fs;
use std::path::{Path, PathBuf};

use engine::{SyncErrorKind, SyncReport, SyncRequest, TEMP_FILE_MARKER, synchronize};
use logging::{LineKind, MemorySink};
use test_support::{TestDir, fixed_time, mtime_of};

fn run(dir: &TestDir, delete_missing: bool) -> (SyncReport, MemorySink) {
    let request = SyncRequest::new(dir.source(), dir.target()).delete_missing(delete_missing);
    let mut sink = MemorySink::new();
    let report = synchronize(&request, &mut sink);
    (report, sink)
}

fn counts(report: &SyncReport) -> (u64, u64, u64, u64, usize) {
    (
        report.copied(),
        report.overwritten(),
        report.deleted(),
        report.skipped(),
        report.errors().len(),
    )
}

#[test]
fn concrete_scenario_copies_then_deletes() {
    let dir = TestDir::new().expect("test dir");
    dir.source_file("hello.txt", b"hello", fixed_time(1));
    dir.source_file("data.csv", b"a,b\n1,2\n", fixed_time(2));
    dir.target_file("old.txt", b"stale", fixed_time(3));

    let (first, _) = run(&dir, false);
    assert_eq!(counts(&first), (2, 0, 0, 0, 0));
    assert_eq!(
        dir.target_files(),
        vec![
            PathBuf::from("data.csv"),
            PathBuf::from("hello.txt"),
            PathBuf::from("old.txt")
        ]
    );

    let (second, sink) = run(&dir, true);
    assert_eq!(counts(&second), (0, 0, 1, 2, 0));
    assert_eq!(
        dir.target_files(),
        vec![PathBuf::from("data.csv"), PathBuf::from("hello.txt")]
    );

    let deleted = sink.rendered(LineKind::Delete);
    assert_eq!(deleted.len(), 1);
    assert!(deleted[0].starts_with("DELETE: "));
    assert!(deleted[0].ends_with("old.txt (missing in source)"));
}

#[test]
fn copies_missing_files_with_content_and_mtime() {
    let dir = TestDir::new().expect("test dir");
    let source = dir.source_file("nested/deep/report.txt", b"quarterly", fixed_time(100));

    let (report, sink) = run(&dir, false);

    assert_eq!(counts(&report), (1, 0, 0, 0, 0));
    assert_eq!(dir.read_target("nested/deep/report.txt"), b"quarterly");
    assert_eq!(
        mtime_of(&dir.target().join("nested/deep/report.txt")),
        mtime_of(&source)
    );
    assert_eq!(
        sink.rendered(LineKind::Copy),
        vec![format!(
            "COPY: {} -> {}",
            source.display(),
            dir.target().join("nested/deep/report.txt").display()
        )]
    );
}

#[test]
fn skips_files_with_same_size_and_mtime() {
    let dir = TestDir::new().expect("test dir");
    dir.source_file("notes.txt", b"same", fixed_time(7));
    dir.target_file("notes.txt", b"same", fixed_time(7));

    let (report, sink) = run(&dir, false);

    assert_eq!(counts(&report), (0, 0, 0, 1, 0));
    assert_eq!(
        sink.rendered(LineKind::Skip),
        vec!["SKIP: notes.txt (identical)".to_owned()]
    );
}

#[test]
fn identical_size_and_second_treats_different_content_as_identical() {
    let dir = TestDir::new().expect("test dir");
    dir.source_file("a.txt", b"AAAA", fixed_time(9));
    dir.target_file("a.txt", b"BBBB", fixed_time(9));

    let (report, _) = run(&dir, false);

    assert_eq!(report.skipped(), 1);
    assert_eq!(dir.read_target("a.txt"), b"BBBB");
}

#[test]
fn subsecond_mtime_difference_is_ignored() {
    let dir = TestDir::new().expect("test dir");
    let source = dir.source_file("a.bin", b"1234", fixed_time(0));
    let target = dir.target_file("a.bin", b"1234", fixed_time(0));
    filetime::set_file_mtime(
        &source,
        filetime::FileTime::from_unix_time(fixed_time(0).unix_seconds(), 700_000_000),
    )
    .expect("set mtime");
    filetime::set_file_mtime(
        &target,
        filetime::FileTime::from_unix_time(fixed_time(0).unix_seconds(), 100),
    )
    .expect("set mtime");

    let (report, _) = run(&dir, false);

    assert_eq!(counts(&report), (0, 0, 0, 1, 0));
}

#[test]
fn overwrites_when_size_differs() {
    let dir = TestDir::new().expect("test dir");
    dir.source_file("config.toml", b"version = 2\n", fixed_time(5));
    dir.target_file("config.toml", b"v1\n", fixed_time(5));

    let (report, sink) = run(&dir, false);

    assert_eq!(counts(&report), (0, 1, 0, 0, 0));
    assert_eq!(dir.read_target("config.toml"), b"version = 2\n");
    assert_eq!(sink.rendered(LineKind::Overwrite).len(), 1);
}

#[test]
fn overwrites_when_mtime_differs_and_adopts_source_mtime() {
    let dir = TestDir::new().expect("test dir");
    dir.source_file("a.txt", b"newer", fixed_time(50));
    dir.target_file("a.txt", b"older", fixed_time(10));

    let (report, _) = run(&dir, false);

    assert_eq!(report.overwritten(), 1);
    assert_eq!(dir.read_target("a.txt"), b"newer");
    assert_eq!(mtime_of(&dir.target().join("a.txt")), fixed_time(50));
}

#[test]
fn leaves_extra_files_without_delete_missing() {
    let dir = TestDir::new().expect("test dir");
    dir.source_file("keep.txt", b"k", fixed_time(1));
    dir.target_file("extra.txt", b"e", fixed_time(1));
    dir.target_file("sub/extra2.txt", b"e", fixed_time(1));

    let (report, sink) = run(&dir, false);

    assert_eq!(report.deleted(), 0);
    assert!(sink.rendered(LineKind::Delete).is_empty());
    assert_eq!(dir.target_files().len(), 3);
}

#[test]
fn delete_missing_preserves_shared_subdirectory_files() {
    let dir = TestDir::new().expect("test dir");
    dir.source_file("shared/kept.txt", b"k", fixed_time(1));
    dir.target_file("shared/kept.txt", b"k", fixed_time(1));
    dir.target_file("shared/gone.txt", b"g", fixed_time(1));
    dir.target_file("orphan/alone.txt", b"a", fixed_time(1));

    let (report, _) = run(&dir, true);

    assert_eq!(counts(&report), (0, 0, 2, 1, 0));
    assert_eq!(dir.target_files(), vec![PathBuf::from("shared/kept.txt")]);
    assert!(dir.target().join("orphan").is_dir());
}

#[test]
fn empty_directories_are_mirrored() {
    let dir = TestDir::new().expect("test dir");
    fs::create_dir_all(dir.source().join("a/b/c")).expect("mkdir");

    let (report, _) = run(&dir, false);

    assert_eq!(counts(&report), (0, 0, 0, 0, 0));
    assert!(dir.target().join("a/b/c").is_dir());
}

#[test]
fn second_run_is_idempotent() {
    let dir = TestDir::new().expect("test dir");
    dir.source_file("one.txt", b"1", fixed_time(1));
    dir.source_file("dir/two.txt", b"22", fixed_time(2));
    dir.source_file("dir/sub/three.txt", b"333", fixed_time(3));
    dir.target_file("stale.txt", b"x", fixed_time(4));

    let (first, _) = run(&dir, true);
    assert_eq!(counts(&first), (3, 0, 1, 0, 0));

    let (second, sink) = run(&dir, true);
    assert_eq!(counts(&second), (0, 0, 0, 3, 0));
    assert!(sink.rendered(LineKind::Copy).is_empty());
    assert!(sink.rendered(LineKind::Overwrite).is_empty());
    assert!(sink.rendered(LineKind::Delete).is_empty());
}

#[test]
fn leftover_temporary_file_is_removed_by_delete_pass_only() {
    let dir = TestDir::new().expect("test dir");
    dir.source_file("doc.txt", b"complete", fixed_time(1));
    dir.target_file("doc.txt", b"complete", fixed_time(1));
    let leftover = format!(".doc.txt{TEMP_FILE_MARKER}1-0");
    dir.target_file(&leftover, b"comp", fixed_time(2));

    let (report, _) = run(&dir, false);
    assert_eq!(report.skipped(), 1);
    assert_eq!(dir.read_target("doc.txt"), b"complete");

    let (report, _) = run(&dir, true);
    assert_eq!(report.deleted(), 1);
    assert_eq!(dir.target_files(), vec![PathBuf::from("doc.txt")]);
}

#[test]
fn log_lines_follow_traversal_order() {
    let dir = TestDir::new().expect("test dir");
    dir.source_file("b.txt", b"b", fixed_time(1));
    dir.source_file("a/z.txt", b"z", fixed_time(1));
    dir.source_file("c.txt", b"c", fixed_time(1));

    let (_, sink) = run(&dir, false);

    let destinations: Vec<String> = sink
        .lines()
        .iter()
        .map(|line| {
            let message = line.message();
            let (_, destination) = message.split_once(" -> ").expect("copy line");
            Path::new(destination)
                .strip_prefix(dir.target())
                .expect("under target")
                .display()
                .to_string()
        })
        .collect();
    assert_eq!(destinations, vec!["a/z.txt", "b.txt", "c.txt"]);
}

#[test]
fn missing_source_root_is_reported_not_fatal() {
    let dir = TestDir::new().expect("test dir");
    let request = SyncRequest::new(dir.path().join("absent"), dir.target());
    let mut sink = MemorySink::new();

    let report = synchronize(&request, &mut sink);

    assert_eq!(report.errors().len(), 1);
    assert_eq!(report.errors()[0].kind(), SyncErrorKind::Traversal);
    assert_eq!(sink.rendered(LineKind::Error).len(), 1);
    assert!(sink.rendered(LineKind::Error)[0].starts_with("ERR: "));
}

#[test]
fn directory_blocked_by_target_file_is_recorded_and_run_continues() {
    let dir = TestDir::new().expect("test dir");
    dir.source_file("blocked/inner.txt", b"i", fixed_time(1));
    dir.source_file("free.txt", b"f", fixed_time(1));
    dir.target_file("blocked", b"a file where a directory should be", fixed_time(1));

    let (report, _) = run(&dir, false);

    assert!(report.has_errors());
    assert_eq!(report.errors()[0].kind(), SyncErrorKind::CreateDirectory);
    assert_eq!(report.copied(), 1);
    assert_eq!(dir.read_target("free.txt"), b"f");
}

#[cfg(unix)]
#[test]
fn symlinks_in_source_are_skipped() {
    let dir = TestDir::new().expect("test dir");
    let real = dir.source_file("real.txt", b"r", fixed_time(1));
    std::os::unix::fs::symlink(&real, dir.source().join("link.txt")).expect("symlink");

    let (report, sink) = run(&dir, false);

    assert_eq!(counts(&report), (1, 0, 0, 1, 0));
    assert!(!dir.target().join("link.txt").exists());
    assert_eq!(
        sink.rendered(LineKind::Skip),
        vec![format!(
            "SKIP: not regular file {}",
            dir.source().join("link.txt").display()
        )]
    );
}

#[cfg(unix)]
#[test]
fn unreadable_source_directory_is_recorded_and_siblings_sync() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TestDir::new().expect("test dir");
    dir.source_file("locked/secret.txt", b"s", fixed_time(1));
    dir.source_file("open/visible.txt", b"v", fixed_time(1));
    let locked = dir.source().join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod");

    if fs::read_dir(&locked).is_ok() {
        // Running with privileges that bypass permission checks.
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("restore");
        return;
    }

    let (report, _) = run(&dir, false);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("restore");

    assert_eq!(report.errors().len(), 1);
    assert_eq!(report.errors()[0].kind(), SyncErrorKind::Traversal);
    assert_eq!(report.copied(), 1);
    assert_eq!(dir.read_target("open/visible.txt"), b"v");
    assert!(dir.target().join("locked").is_dir());
}

#[cfg(unix)]
#[test]
fn symlinked_source_root_is_descended() {
    let dir = TestDir::new().expect("test dir");
    dir.source_file("docs/guide.md", b"guide", fixed_time(7));
    dir.source_file("top.txt", b"top", fixed_time(8));
    let link = dir.path().join("src-link");
    std::os::unix::fs::symlink(dir.source(), &link).expect("symlink");

    let request = SyncRequest::new(&link, dir.target());
    let mut sink = MemorySink::new();
    let report = synchronize(&request, &mut sink);

    assert_eq!(counts(&report), (2, 0, 0, 0, 0));
    assert_eq!(dir.read_target("docs/guide.md"), b"guide");
    assert_eq!(mtime_of(&dir.target().join("top.txt")), fixed_time(8));
}

#[cfg(unix)]
#[test]
fn symlinked_target_root_is_pruned_by_delete_pass() {
    let dir = TestDir::new().expect("test dir");
    dir.source_file("keep.txt", b"k", fixed_time(1));
    dir.target_file("gone.txt", b"g", fixed_time(1));
    let link = dir.path().join("dst-link");
    std::os::unix::fs::symlink(dir.target(), &link).expect("symlink");

    let request = SyncRequest::new(dir.source(), &link).delete_missing(true);
    let mut sink = MemorySink::new();
    let report = synchronize(&request, &mut sink);

    assert_eq!(counts(&report), (1, 0, 1, 0, 0));
    assert_eq!(dir.target_files(), vec![PathBuf::from("keep.txt")]);
}

#[cfg(unix)]
#[test]
fn special_permission_bits_are_not_copied() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TestDir::new().expect("test dir");
    let source = dir.source_file("tool", b"#!/bin/sh\n", fixed_time(1));
    fs::set_permissions(&source, fs::Permissions::from_mode(0o4755)).expect("chmod");
    let mode = fs::metadata(&source).expect("stat").permissions().mode();
    if mode & 0o4000 == 0 {
        // The filesystem refused the setuid bit.
        return;
    }

    let (report, _) = run(&dir, false);

    assert_eq!(counts(&report), (1, 0, 0, 0, 0));
    let copied = fs::metadata(dir.target().join("tool")).expect("stat copy");
    assert_eq!(copied.permissions().mode() & 0o7777, 0o755);
}

#[cfg(unix)]
#[test]
fn unreadable_target_directory_is_recorded_without_writing() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TestDir::new().expect("test dir");
    dir.source_file("sealed/file.txt", b"new", fixed_time(1));
    let sealed = dir.target().join("sealed");
    fs::create_dir(&sealed).expect("create sealed");
    fs::set_permissions(&sealed, fs::Permissions::from_mode(0o000)).expect("chmod");

    if fs::read_dir(&sealed).is_ok() {
        // Running with privileges that bypass permission checks.
        fs::set_permissions(&sealed, fs::Permissions::from_mode(0o755)).expect("restore");
        return;
    }

    let (report, _) = run(&dir, false);
    fs::set_permissions(&sealed, fs::Permissions::from_mode(0o755)).expect("restore");

    assert_eq!(counts(&report), (0, 0, 0, 0, 1));
    assert_eq!(report.errors()[0].kind(), SyncErrorKind::Metadata);
    assert_eq!(report.errors()[0].path(), sealed.join("file.txt"));
    assert!(fs::read_dir(&sealed).expect("read sealed").next().is_none());
}

#[cfg(unix)]
#[test]
fn undeletable_target_file_is_recorded_and_kept() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TestDir::new().expect("test dir");
    let stale = dir.target_file("frozen/stale.txt", b"old", fixed_time(1));
    let frozen = dir.target().join("frozen");
    fs::set_permissions(&frozen, fs::Permissions::from_mode(0o555)).expect("chmod");

    let canary = frozen.join("canary");
    if fs::write(&canary, b"").is_ok() {
        // Running with privileges that bypass permission checks.
        fs::remove_file(&canary).expect("remove canary");
        fs::set_permissions(&frozen, fs::Permissions::from_mode(0o755)).expect("restore");
        return;
    }

    let (report, sink) = run(&dir, true);
    fs::set_permissions(&frozen, fs::Permissions::from_mode(0o755)).expect("restore");

    assert_eq!(counts(&report), (0, 0, 0, 0, 1));
    assert_eq!(report.errors()[0].kind(), SyncErrorKind::Delete);
    assert_eq!(report.errors()[0].path(), stale);
    assert!(sink.rendered(LineKind::Delete).is_empty());
    assert_eq!(fs::read(&stale).expect("stale kept"), b"old");
}
