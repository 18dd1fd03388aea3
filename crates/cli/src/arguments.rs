use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, builder::PathBufValueParser};

use crate::error::CliError;

pub(crate) const PROGRAM_NAME: &str = "treesync";

pub(crate) const USAGE: &str = "Usage: treesync --source <DIR> --target <DIR> [--delete-missing]";

/// Options recognised on the command line.
#[derive(Debug, Default, Eq, PartialEq)]
pub(crate) struct ParsedArgs {
    pub(crate) show_help: bool,
    pub(crate) show_version: bool,
    pub(crate) source: Option<PathBuf>,
    pub(crate) target: Option<PathBuf>,
    pub(crate) delete_missing: bool,
    pub(crate) verbose: u8,
    pub(crate) quiet: bool,
}

pub(crate) fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .about("One-way synchronization of a target directory with a source directory.")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("source")
                .long("source")
                .value_name("DIR")
                .help("Directory whose contents are authoritative.")
                .value_parser(PathBufValueParser::new())
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("target")
                .long("target")
                .value_name("DIR")
                .help("Directory brought in line with the source.")
                .value_parser(PathBufValueParser::new())
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("delete-missing")
                .long("delete-missing")
                .help("Remove target files that are absent from the source.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase diagnostic output on stderr; repeat for more detail.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Suppress per-file progress lines.")
                .action(ArgAction::SetTrue),
        )
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
pub(crate) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        source: matches.remove_one::<PathBuf>("source"),
        target: matches.remove_one::<PathBuf>("target"),
        delete_missing: matches.get_flag("delete-missing"),
        verbose: matches.get_count("verbose"),
        quiet: matches.get_flag("quiet"),
    })
}

/// Renders the help text describing the supported options.
pub(crate) fn render_help() -> String {
    clap_command().render_help().to_string()
}

pub(crate) fn render_version() -> String {
    format!("{PROGRAM_NAME} {}\n", env!("CARGO_PKG_VERSION"))
}
