//! container-logs command - Show the logs of one or more containers
//!
//! A single unlabeled container is logged through the console styles. Several
//! containers, or any labeled one, are streamed raw with a `label: ` prefix.

use std::io;

use clap::Args;
use dokku_log_core::{
    ContainerLogsOptions, ContainerRef, Logger, SharedWriter, log_container_logs,
    stream_prefixed_logs,
};

use crate::exit_code::ExitCode;

/// Length of the id used as a label when none is given
const SHORT_ID_LEN: usize = 12;

/// Show the logs of one or more containers
#[derive(Args, Debug)]
pub struct ContainerLogsArgs {
    /// Containers as ID or LABEL=ID
    #[arg(required = true)]
    pub containers: Vec<String>,

    /// Number of lines to show from the end of the logs (0 for all)
    #[arg(short = 'n', long = "tail", default_value = "0")]
    pub lines: usize,

    /// Follow log output
    #[arg(short, long, default_value = "false")]
    pub follow: bool,
}

/// Execute the container-logs command
pub async fn execute(args: ContainerLogsArgs, logger: &Logger) -> ExitCode {
    let options = ContainerLogsOptions {
        lines: args.lines,
        follow: args.follow,
    };

    if let [single] = args.containers.as_slice()
        && !single.contains('=')
    {
        return tokio::select! {
            () = log_container_logs(logger, single, options) => ExitCode::Success,
            _ = tokio::signal::ctrl_c() => ExitCode::Interrupted,
        };
    }

    let containers = match parse_containers(&args.containers) {
        Ok(containers) => containers,
        Err(e) => {
            logger.warn(&e);
            return ExitCode::UsageError;
        }
    };

    let sink = SharedWriter::new(io::stdout());
    let docker_bin = logger.config().docker_bin.clone();
    let streamed = tokio::select! {
        results = stream_prefixed_logs(&docker_bin, &containers, options, sink) => results,
        _ = tokio::signal::ctrl_c() => return ExitCode::Interrupted,
    };

    match streamed {
        Ok(results) => {
            for (container, result) in containers.iter().zip(results) {
                if !options.follow && !result.success() {
                    logger.exclaim(&format!("Failed to fetch container logs: {}", container.id));
                }
            }
            ExitCode::Success
        }
        Err(e) => {
            logger.report_failure(&e);
            ExitCode::GeneralError
        }
    }
}

/// Parse `ID` or `LABEL=ID` container references
fn parse_containers(specs: &[String]) -> Result<Vec<ContainerRef>, String> {
    specs.iter().map(|spec| parse_container(spec)).collect()
}

fn parse_container(spec: &str) -> Result<ContainerRef, String> {
    match spec.split_once('=') {
        Some((label, id)) => {
            if label.is_empty() {
                return Err(format!("Invalid container '{spec}': label cannot be empty"));
            }
            if id.is_empty() {
                return Err(format!("Invalid container '{spec}': id cannot be empty"));
            }
            Ok(ContainerRef::new(id, label))
        }
        None if spec.is_empty() => Err("Container id cannot be empty".to_string()),
        None => {
            let label: String = spec.chars().take(SHORT_ID_LEN).collect();
            Ok(ContainerRef::new(spec, label))
        }
    }
}
