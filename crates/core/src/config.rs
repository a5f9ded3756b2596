//! Logging configuration
//!
//! The configuration is read from the environment once at process start and
//! then handed to every [`Logger`](crate::Logger) explicitly, so quiet and
//! trace behavior never depend on environment reads at log time.

/// Any non-empty value suppresses informational and verbose output
pub const QUIET_ENV: &str = "DOKKU_QUIET_OUTPUT";

/// The value `"1"` enables debug trace lines
pub const TRACE_ENV: &str = "DOKKU_TRACE";

/// Path or name of the docker binary
pub const DOCKER_BIN_ENV: &str = "DOCKER_BIN";

/// Default docker binary
const DEFAULT_DOCKER_BIN: &str = "docker";

/// Console logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Suppress informational and verbose output
    pub quiet: bool,

    /// Emit debug trace lines
    pub trace: bool,

    /// Docker binary used to fetch container logs
    pub docker_bin: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            trace: false,
            docker_bin: DEFAULT_DOCKER_BIN.to_string(),
        }
    }
}

impl LogConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let quiet = lookup(QUIET_ENV).is_some_and(|value| !value.is_empty());
        let trace = lookup(TRACE_ENV).is_some_and(|value| value == "1");
        let docker_bin = lookup(DOCKER_BIN_ENV)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_DOCKER_BIN.to_string());

        Self {
            quiet,
            trace,
            docker_bin,
        }
    }

    /// Return a copy with quiet mode set
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Return a copy with trace mode set
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}
