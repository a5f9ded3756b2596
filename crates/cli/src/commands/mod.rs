//! CLI command definitions and execution
//!
//! Every command builds its [`Logger`] from the same [`LogConfig`], which is
//! read from the environment once and then adjusted by the global flags.

use clap::{Parser, Subcommand};
use dokku_log_core::{LogConfig, Logger};

mod completions;
mod container_logs;
mod exec;
mod fail;
mod log;

/// dokku-log - console output helpers for dokku plugins
///
/// Prints styled status lines, fails with error-derived exit codes and
/// relays subprocess or container output through the same formatting.
#[derive(Parser, Debug)]
#[command(name = "dokku-log")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress informational and verbose output (same as DOKKU_QUIET_OUTPUT)
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Print debug trace lines (same as DOKKU_TRACE=1)
    #[arg(long, global = true, default_value = "false")]
    pub trace: bool,

    /// Docker binary used to fetch container logs
    #[arg(long, global = true, env = "DOCKER_BIN")]
    pub docker_bin: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a styled status line
    Log(log::LogArgs),

    /// Print failures and exit with their exit code
    Fail(fail::FailArgs),

    /// Run a command and relay its output as log lines
    Exec(exec::ExecArgs),

    /// Show the logs of one or more containers
    ContainerLogs(container_logs::ContainerLogsArgs),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

impl Cli {
    /// Logging configuration: environment first, flags on top
    pub fn log_config(&self, env: LogConfig) -> LogConfig {
        let mut config = env;
        if self.quiet {
            config.quiet = true;
        }
        if self.trace {
            config.trace = true;
        }
        if let Some(docker_bin) = self.docker_bin.as_ref().filter(|bin| !bin.is_empty()) {
            config.docker_bin = docker_bin.clone();
        }
        config
    }
}

/// Execute the CLI command and return the process exit status
pub async fn execute(cli: Cli) -> i32 {
    let logger = Logger::new(cli.log_config(LogConfig::from_env()));
    tracing::debug!(command = ?cli.command, "dispatching");

    match cli.command {
        Commands::Log(args) => log::execute(args, &logger).into(),
        Commands::Fail(args) => fail::execute(args, &logger),
        Commands::Exec(args) => exec::execute(args, &logger).await,
        Commands::ContainerLogs(args) => container_logs::execute(args, &logger).await.into(),
        Commands::Completions(args) => completions::execute(args).into(),
    }
}
