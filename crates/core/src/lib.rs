//! dokku-log-core: console output for dokku plugin commands
//!
//! This crate provides:
//! - Styled console lines with fixed prefixes and a quiet mode
//! - Failure helpers that exit with an error-derived status
//! - Line-splitting writers that log a subprocess's stdout and stderr
//!   without interleaving lines
//! - A prefixing writer that emits prefix and payload in one write
//! - Minimal command execution and container log streaming built on them

pub mod config;
pub mod console;
pub mod container;
pub mod error;
pub mod exec;
pub mod logger;
pub mod style;
pub mod writer;

pub use config::LogConfig;
pub use console::{Console, MemoryConsole, Terminal};
pub use container::{ContainerLogsOptions, ContainerRef, log_container_logs, stream_prefixed_logs};
pub use error::{Error, Result};
pub use exec::{ExecCommandInput, ExecResult, Framing, run_external, run_logged};
pub use logger::Logger;
pub use style::{Stream, Style};
pub use writer::{LineWriter, OutputLock, PrefixingWriter, SharedWriter};
