//! Error types for dokku-log-core
//!
//! Provides a unified error type that carries an optional process exit code.

use thiserror::Error;

/// Result type alias for dokku-log-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Exit status used when an error does not carry one
pub const DEFAULT_EXIT_CODE: i32 = 1;

/// Exit status used when a command could not be started
pub const SPAWN_EXIT_CODE: i32 = 127;

/// Error types for dokku-log-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Writing to a downstream sink failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The command could not be started
    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Error with an explicit process exit code
    #[error("{message}")]
    Exit { message: String, code: i32 },

    /// Several independent failures
    #[error("{} errors occurred", .0.len())]
    Multiple(Vec<Error>),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create an error that exits the process with `code`
    pub fn with_exit_code(message: impl Into<String>, code: i32) -> Self {
        Error::Exit {
            message: message.into(),
            code,
        }
    }

    /// Explicit exit code carried by this error, if any
    ///
    /// Composite errors never carry one, even when a constituent does.
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Error::Exit { code, .. } => Some(*code),
            Error::Spawn { .. } => Some(SPAWN_EXIT_CODE),
            _ => None,
        }
    }

    /// Exit code to terminate the process with
    pub const fn exit_status(&self) -> i32 {
        match self.exit_code() {
            Some(code) => code,
            None => DEFAULT_EXIT_CODE,
        }
    }

    /// One message per underlying failure
    ///
    /// A composite error yields the messages of its constituents, flattened.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Error::Multiple(errors) => errors.iter().flat_map(Error::messages).collect(),
            other => vec![other.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(Error::with_exit_code("boom", 7).exit_code(), Some(7));
        assert_eq!(Error::General("boom".into()).exit_code(), None);
        assert_eq!(Error::Io(std::io::Error::other("pipe")).exit_code(), None);
        let spawn = Error::Spawn {
            command: "docker".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(spawn.exit_code(), Some(127));
    }

    #[test]
    fn test_error_exit_status_defaults_to_one() {
        assert_eq!(Error::General("boom".into()).exit_status(), 1);
        assert_eq!(Error::with_exit_code("boom", 7).exit_status(), 7);
        assert_eq!(
            Error::Multiple(vec![Error::with_exit_code("a", 9)]).exit_status(),
            1
        );
    }

    #[test]
    fn test_error_messages_flatten_composites() {
        let err = Error::Multiple(vec![
            Error::General("first".into()),
            Error::Multiple(vec![
                Error::General("second".into()),
                Error::with_exit_code("third", 3),
            ]),
        ]);
        assert_eq!(err.messages(), vec!["first", "second", "third"]);
        assert_eq!(err.to_string(), "2 errors occurred");
    }

    #[test]
    fn test_error_display() {
        let err = Error::General("app not found".into());
        assert_eq!(err.to_string(), "app not found");
        assert_eq!(err.messages(), vec!["app not found"]);
    }
}
