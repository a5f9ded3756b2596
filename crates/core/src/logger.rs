//! Console logger
//!
//! [`Logger`] applies a [`Style`] to each message and routes it to the
//! configured [`Console`]. Methods with a `_quiet` suffix print nothing when
//! quiet mode is on. The `fail*` family terminates the process.

use std::fmt;
use std::sync::Arc;

use crate::config::LogConfig;
use crate::console::{Console, Terminal};
use crate::error::{DEFAULT_EXIT_CODE, Error};
use crate::style::Style;

/// Formats and emits console lines
#[derive(Clone)]
pub struct Logger {
    config: LogConfig,
    console: Arc<dyn Console>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogConfig::default())
    }
}

impl Logger {
    /// Create a logger writing to the terminal
    pub fn new(config: LogConfig) -> Self {
        Self::with_console(config, Arc::new(Terminal))
    }

    /// Create a logger writing to a custom console
    pub fn with_console(config: LogConfig, console: Arc<dyn Console>) -> Self {
        Self { config, console }
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.config.quiet
    }

    /// Check if trace mode is enabled
    pub fn is_trace(&self) -> bool {
        self.config.trace
    }

    /// Emit `text` in the given style
    pub fn emit(&self, style: Style, text: &str) {
        let stream = style.stream();
        if let Err(e) = self.console.write_line(stream, &style.format(text)) {
            tracing::debug!(%stream, error = %e, "console write failed");
        }
    }

    fn emit_unless_quiet(&self, style: Style, text: &str) {
        if !self.config.quiet {
            self.emit(style, text);
        }
    }

    /// Plain line on stdout
    pub fn log(&self, text: &str) {
        self.emit(Style::Plain, text);
    }

    pub fn log_quiet(&self, text: &str) {
        self.emit_unless_quiet(Style::Plain, text);
    }

    /// Header line (`-----> `)
    pub fn info1(&self, text: &str) {
        self.emit(Style::Info1, text);
    }

    pub fn info1_quiet(&self, text: &str) {
        self.emit_unless_quiet(Style::Info1, text);
    }

    /// Sub-header line (`=====> `)
    pub fn info2(&self, text: &str) {
        self.emit(Style::Info2, text);
    }

    pub fn info2_quiet(&self, text: &str) {
        self.emit_unless_quiet(Style::Info2, text);
    }

    /// Indented line on stdout
    pub fn verbose(&self, text: &str) {
        self.emit(Style::Verbose, text);
    }

    pub fn verbose_quiet(&self, text: &str) {
        self.emit_unless_quiet(Style::Verbose, text);
    }

    /// Alert-prefixed line on stderr
    pub fn verbose_stderr(&self, text: &str) {
        self.emit(Style::VerboseStderr, text);
    }

    pub fn verbose_stderr_quiet(&self, text: &str) {
        self.emit_unless_quiet(Style::VerboseStderr, text);
    }

    /// Warning on stderr
    pub fn warn(&self, text: &str) {
        self.emit(Style::Warn, text);
    }

    /// Alert-prefixed line on stdout
    pub fn exclaim(&self, text: &str) {
        self.emit(Style::Exclaim, text);
    }

    /// Plain line on stderr
    pub fn stderr(&self, text: &str) {
        self.emit(Style::Stderr, text);
    }

    /// Trace line on stderr, only when trace mode is on
    pub fn debug(&self, text: &str) {
        if self.config.trace {
            self.emit(Style::Debug, text);
        }
    }

    /// Print every failure carried by `err` and return the exit code to use
    ///
    /// Each constituent of a composite error gets its own line.
    pub fn report_failure(&self, err: &Error) -> i32 {
        for message in err.messages() {
            self.emit(Style::Fail, &message);
        }
        err.exit_status()
    }

    /// Like [`report_failure`](Self::report_failure), silent in quiet mode
    ///
    /// The returned exit code is the same either way.
    pub fn report_failure_quiet(&self, err: &Error) -> i32 {
        if self.config.quiet {
            return err.exit_status();
        }
        self.report_failure(err)
    }

    /// Print a failure and exit with status 1
    pub fn fail(&self, text: &str) -> ! {
        self.emit(Style::Fail, text);
        std::process::exit(DEFAULT_EXIT_CODE)
    }

    /// Print a failure unless quiet, then exit with status 1
    pub fn fail_quiet(&self, text: &str) -> ! {
        self.emit_unless_quiet(Style::Fail, text);
        std::process::exit(DEFAULT_EXIT_CODE)
    }

    /// Print `err` and exit with its exit code (default 1)
    pub fn fail_with_error(&self, err: &Error) -> ! {
        let code = self.report_failure(err);
        std::process::exit(code)
    }

    /// Print `err` unless quiet, then exit with its exit code (default 1)
    pub fn fail_with_error_quiet(&self, err: &Error) -> ! {
        let code = self.report_failure_quiet(err);
        std::process::exit(code)
    }
}
