//! Line styles and output streams
//!
//! Every console line carries a fixed, seven-column prefix that tells the
//! reader what kind of message it is.

use std::fmt;

/// Header prefix
pub const INFO1_PREFIX: &str = "-----> ";

/// Sub-header prefix
pub const INFO2_PREFIX: &str = "=====> ";

/// Indentation for verbose lines
pub const VERBOSE_PREFIX: &str = "       ";

/// Prefix for warnings, failures and stderr-sourced verbose lines
pub const ALERT_PREFIX: &str = " !     ";

/// Prefix for debug trace lines
pub const DEBUG_PREFIX: &str = " ?     ";

/// Destination byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Stdout => f.write_str("stdout"),
            Stream::Stderr => f.write_str("stderr"),
        }
    }
}

/// Semantic category of a console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Unprefixed text on stdout
    Plain,
    /// Header on stdout
    Info1,
    /// Sub-header on stdout
    Info2,
    /// Indented text on stdout
    Verbose,
    /// Alert-prefixed text on stderr
    VerboseStderr,
    /// Warning on stderr
    Warn,
    /// Alert-prefixed text on stdout
    Exclaim,
    /// Unprefixed text on stderr
    Stderr,
    /// Trace line on stderr
    Debug,
    /// Failure on stderr
    Fail,
}

impl Style {
    /// The fixed prefix for this style
    pub const fn prefix(self) -> &'static str {
        match self {
            Style::Plain | Style::Stderr => "",
            Style::Info1 => INFO1_PREFIX,
            Style::Info2 => INFO2_PREFIX,
            Style::Verbose => VERBOSE_PREFIX,
            Style::VerboseStderr | Style::Warn | Style::Exclaim | Style::Fail => ALERT_PREFIX,
            Style::Debug => DEBUG_PREFIX,
        }
    }

    /// The stream this style is written to
    pub const fn stream(self) -> Stream {
        match self {
            Style::Plain | Style::Info1 | Style::Info2 | Style::Verbose | Style::Exclaim => {
                Stream::Stdout
            }
            Style::VerboseStderr | Style::Warn | Style::Stderr | Style::Debug | Style::Fail => {
                Stream::Stderr
            }
        }
    }

    /// Render `text` with this style's prefix
    ///
    /// Debug lines never carry a doubled prefix: a single leading debug
    /// prefix already present in `text` is dropped first.
    pub fn format(self, text: &str) -> String {
        let text = match self {
            Style::Debug => text.strip_prefix(DEBUG_PREFIX).unwrap_or(text),
            _ => text,
        };
        format!("{}{text}", self.prefix())
    }
}
