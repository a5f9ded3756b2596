//! log command - Print a styled status line
//!
//! Exposes each console style so shell-based plugins can produce the same
//! output as the library.

use clap::{Args, ValueEnum};
use dokku_log_core::Logger;

use crate::exit_code::ExitCode;

/// Console style to print with
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleArg {
    /// Unprefixed text on stdout
    Plain,
    /// "-----> " header on stdout
    Info1,
    /// "=====> " sub-header on stdout
    Info2,
    /// Indented text on stdout
    Verbose,
    /// " !     " text on stderr
    VerboseStderr,
    /// " !     " warning on stderr
    Warn,
    /// " !     " text on stdout
    Exclaim,
    /// Unprefixed text on stderr
    Stderr,
    /// " ?     " trace line on stderr, shown only with tracing enabled
    Debug,
}

/// Print a styled status line
#[derive(Args, Debug)]
pub struct LogArgs {
    /// Line style
    #[arg(value_enum)]
    pub style: StyleArg,

    /// Text to print, joined with spaces
    #[arg(required = true)]
    pub text: Vec<String>,

    /// Print nothing in quiet mode (plain, info and verbose styles)
    #[arg(long, default_value = "false")]
    pub honor_quiet: bool,
}

/// Execute the log command
pub fn execute(args: LogArgs, logger: &Logger) -> ExitCode {
    let text = args.text.join(" ");

    match (args.style, args.honor_quiet) {
        (StyleArg::Plain, false) => logger.log(&text),
        (StyleArg::Plain, true) => logger.log_quiet(&text),
        (StyleArg::Info1, false) => logger.info1(&text),
        (StyleArg::Info1, true) => logger.info1_quiet(&text),
        (StyleArg::Info2, false) => logger.info2(&text),
        (StyleArg::Info2, true) => logger.info2_quiet(&text),
        (StyleArg::Verbose, false) => logger.verbose(&text),
        (StyleArg::Verbose, true) => logger.verbose_quiet(&text),
        (StyleArg::VerboseStderr, false) => logger.verbose_stderr(&text),
        (StyleArg::VerboseStderr, true) => logger.verbose_stderr_quiet(&text),
        (StyleArg::Warn, _) => logger.warn(&text),
        (StyleArg::Exclaim, _) => logger.exclaim(&text),
        (StyleArg::Stderr, _) => logger.stderr(&text),
        (StyleArg::Debug, _) => logger.debug(&text),
    }

    ExitCode::Success
}
