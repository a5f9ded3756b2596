//! Console sinks
//!
//! A [`Console`] receives fully formatted lines. The logger never talks to
//! stdout or stderr directly, which lets tests and embedders capture output.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use crate::style::Stream;

/// Destination for formatted console lines
pub trait Console: Send + Sync {
    /// Write one line (without trailing newline) to `stream`
    fn write_line(&self, stream: Stream, line: &str) -> io::Result<()>;
}

/// The process's real stdout and stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct Terminal;

impl Console for Terminal {
    fn write_line(&self, stream: Stream, line: &str) -> io::Result<()> {
        match stream {
            Stream::Stdout => {
                let mut handle = io::stdout().lock();
                writeln!(handle, "{line}")?;
                handle.flush()
            }
            Stream::Stderr => {
                let mut handle = io::stderr().lock();
                writeln!(handle, "{line}")
            }
        }
    }
}

/// In-memory console that records every line
#[derive(Debug, Default)]
pub struct MemoryConsole {
    lines: Mutex<Vec<(Stream, String)>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded lines in write order
    pub fn lines(&self) -> Vec<(Stream, String)> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recorded lines for one stream
    pub fn stream_lines(&self, stream: Stream) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(s, _)| *s == stream)
            .map(|(_, line)| line)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl Console for MemoryConsole {
    fn write_line(&self, stream: Stream, line: &str) -> io::Result<()> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((stream, line.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_console_records_in_order() {
        let console = MemoryConsole::new();
        assert!(console.is_empty());

        console.write_line(Stream::Stdout, "one").unwrap();
        console.write_line(Stream::Stderr, "two").unwrap();
        console.write_line(Stream::Stdout, "three").unwrap();

        assert_eq!(
            console.lines(),
            vec![
                (Stream::Stdout, "one".to_string()),
                (Stream::Stderr, "two".to_string()),
                (Stream::Stdout, "three".to_string()),
            ]
        );
        assert_eq!(console.stream_lines(Stream::Stdout), vec!["one", "three"]);
        assert_eq!(console.stream_lines(Stream::Stderr), vec!["two"]);
    }
}
