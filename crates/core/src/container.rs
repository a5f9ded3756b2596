//! Container log streaming
//!
//! Fetches `docker container logs` output either through the console logger
//! or, for several containers at once, into a shared sink with a per-container
//! prefix on every line.

use std::io::Write;

use tokio::task::JoinSet;

use crate::error::{Error, Result};
use crate::exec::{ExecCommandInput, ExecResult, run_external};
use crate::logger::Logger;
use crate::writer::{OutputLock, PrefixingWriter, SharedWriter};

/// How much of a container's log to fetch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainerLogsOptions {
    /// Only the last `lines` lines; 0 means all
    pub lines: usize,

    /// Keep streaming new output
    pub follow: bool,
}

/// A container and the label used to prefix its output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRef {
    pub id: String,
    pub label: String,
}

impl ContainerRef {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Prefix written before each line of this container's output
    pub fn prefix(&self) -> String {
        format!("{}: ", self.label)
    }
}

/// Arguments for `docker container logs`
pub fn container_logs_args(container_id: &str, options: ContainerLogsOptions) -> Vec<String> {
    let mut args = vec![
        "container".to_string(),
        "logs".to_string(),
        container_id.to_string(),
    ];
    if options.lines > 0 {
        args.push("--tail".to_string());
        args.push(options.lines.to_string());
    }
    if options.follow {
        args.push("--follow".to_string());
    }
    args
}

/// Log a container's output through `logger`
///
/// Stdout lines are logged as verbose lines and stderr lines as alerts, both
/// quiet-aware. A failure to fetch the logs is reported, not returned.
pub async fn log_container_logs(
    logger: &Logger,
    container_id: &str,
    options: ContainerLogsOptions,
) {
    let (stdout, stderr) = OutputLock::new().writers(logger);
    let input = ExecCommandInput::new(
        logger.config().docker_bin.clone(),
        container_logs_args(container_id, options),
        stdout,
        stderr,
    );

    let failed = match run_external(input).await {
        Ok(result) => !options.follow && !result.success(),
        Err(e) => {
            tracing::debug!(container_id, error = %e, "fetching container logs failed");
            true
        }
    };

    if failed {
        logger.exclaim(&format!("Failed to fetch container logs: {container_id}"));
    }
}

/// Stream several containers' logs into one sink concurrently
///
/// Every line reaching `sink` carries the container's prefix and arrives in a
/// single write. Results are returned in the order of `containers`. On the
/// first error the remaining streams are aborted and their children killed.
pub async fn stream_prefixed_logs<W>(
    docker_bin: &str,
    containers: &[ContainerRef],
    options: ContainerLogsOptions,
    sink: SharedWriter<W>,
) -> Result<Vec<ExecResult>>
where
    W: Write + Send + 'static,
{
    let mut tasks = JoinSet::new();
    for (index, container) in containers.iter().enumerate() {
        let prefix = container.prefix();
        let input = ExecCommandInput::new(
            docker_bin,
            container_logs_args(&container.id, options),
            PrefixingWriter::new(prefix.clone(), sink.clone()),
            PrefixingWriter::new(prefix, sink.clone()),
        )
        .line_framed();
        tasks.spawn(async move { (index, run_external(input).await) });
    }

    // Dropping `tasks` on an early return aborts whatever is still running.
    let mut results = vec![None; containers.len()];
    while let Some(joined) = tasks.join_next().await {
        let (index, result) =
            joined.map_err(|e| Error::General(format!("log task failed: {e}")))?;
        results[index] = Some(result?);
    }
    Ok(results.into_iter().flatten().collect())
}
