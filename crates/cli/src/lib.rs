#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` is the command-line front-end for `treesync`. It parses
//! `--source`, `--target`, `--delete-missing`, `--verbose`, and `--quiet`,
//! validates both roots, and hands the run to [`engine::synchronize`].
//!
//! # Design
//!
//! [`run`] takes an argument iterator together with handles for standard
//! output and error so that tests can drive it without spawning a process.
//! Per-file progress lines and the final `DONE:` summary go to stdout;
//! usage problems, root validation failures, and the error listing go to
//! stderr.
//!
//! # Exit codes
//!
//! - `0`: the run finished without recorded errors, or help/version was shown.
//! - `1`: a root failed validation or the run recorded errors.
//! - `2`: the command line was invalid.
//!
//! # Examples
//!
//! ```
//! use cli::run;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = run(["treesync", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(String::from_utf8_lossy(&stdout).starts_with("treesync "));
//! ```

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use engine::{SyncRequest, synchronize};
use logging::{MessageSink, NullSink, VerbosityConfig, init_tracing};
use tracing::debug;

mod arguments;
mod error;
mod validate;

pub use error::{CliError, EXIT_FAILURE, EXIT_USAGE};
pub use validate::validate_directory;

use arguments::{ParsedArgs, USAGE, parse_args, render_help, render_version};


/// Largest status [`exit_code_from`] passes through unchanged.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Runs the CLI using the provided argument iterator and output handles.
///
/// Returns the process exit code the caller should use.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => execute(parsed, stdout, stderr),
        Err(error) => {
            let _ = write!(stderr, "{error}");
            error.exit_code()
        }
    }
}

fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    let ParsedArgs {
        show_help,
        show_version,
        source,
        target,
        delete_missing,
        verbose,
        quiet,
    } = parsed;

    if show_help {
        let _ = stdout.write_all(render_help().as_bytes());
        return 0;
    }

    if show_version {
        let _ = stdout.write_all(render_version().as_bytes());
        return 0;
    }

    let (source, target) = match required_roots(source, target) {
        Ok(roots) => roots,
        Err(error) => {
            let _ = writeln!(stderr, "{error}");
            let _ = writeln!(stderr, "{USAGE}");
            return error.exit_code();
        }
    };

    for (role, path) in [("source", &source), ("target", &target)] {
        if let Err(error) = validate_directory(path) {
            let _ = writeln!(stderr, "{role} error: {error}");
            return error.exit_code();
        }
    }

    init_tracing(VerbosityConfig::from_verbose_level(verbose));
    debug!(
        target: "treesync::flist",
        source = %source.display(),
        target_root = %target.display(),
        delete_missing,
        "arguments validated"
    );

    let request = SyncRequest::new(source, target).delete_missing(delete_missing);
    let report = if quiet {
        synchronize(&request, &mut NullSink)
    } else {
        let mut sink = MessageSink::new(&mut *stdout);
        let report = synchronize(&request, &mut sink);
        let _ = sink.flush();
        report
    };

    let _ = writeln!(stdout, "DONE: {}", report.summary_line());
    let _ = stdout.flush();

    if report.has_errors() {
        let _ = writeln!(stderr, "Encountered errors:");
        for error in report.errors() {
            let _ = writeln!(stderr, "  - {error}");
        }
        return EXIT_FAILURE;
    }

    0
}

fn required_roots(
    source: Option<PathBuf>,
    target: Option<PathBuf>,
) -> Result<(PathBuf, PathBuf), CliError> {
    let source = source
        .filter(|path| !is_blank(path))
        .ok_or(CliError::MissingOption("--source"))?;
    let target = target
        .filter(|path| !is_blank(path))
        .ok_or(CliError::MissingOption("--target"))?;
    Ok((source, target))
}

fn is_blank(path: &Path) -> bool {
    path.as_os_str().is_empty()
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}
