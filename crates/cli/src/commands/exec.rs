//! exec command - Run a command and relay its output
//!
//! Without `--prefix`, stdout lines become verbose lines and stderr lines
//! become alerts. With `--prefix`, raw output is passed through with the
//! prefix in front of every line.

use std::io;

use clap::Args;
use dokku_log_core::{
    Error, ExecCommandInput, ExecResult, Logger, PrefixingWriter, Result, SharedWriter, run_external,
    run_logged,
};

use crate::exit_code::ExitCode;

/// Run a command and relay its output as log lines
#[derive(Args, Debug)]
pub struct ExecArgs {
    /// Prefix written before each raw output line instead of formatting it
    #[arg(long)]
    pub prefix: Option<String>,

    /// Command to run
    pub command: String,

    /// Arguments for the command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Execute the exec command
///
/// Returns the child's exit code.
pub async fn execute(args: ExecArgs, logger: &Logger) -> i32 {
    let run = run(&args, logger);

    let outcome = tokio::select! {
        outcome = run => outcome,
        _ = tokio::signal::ctrl_c() => {
            logger.debug(&format!("interrupted while running {}", args.command));
            return ExitCode::Interrupted.into();
        }
    };

    match outcome {
        Ok(result) => {
            logger.debug(&format!("{} exited with {}", args.command, result.exit_code));
            result.exit_code
        }
        Err(e @ Error::Spawn { .. }) => {
            logger.report_failure(&e);
            ExitCode::CommandNotFound.into()
        }
        Err(e) => logger.report_failure(&e),
    }
}

async fn run(args: &ExecArgs, logger: &Logger) -> Result<ExecResult> {
    match &args.prefix {
        None => run_logged(logger, &args.command, args.args.clone()).await,
        Some(prefix) => {
            let input = ExecCommandInput::new(
                args.command.clone(),
                args.args.clone(),
                PrefixingWriter::new(prefix.clone(), SharedWriter::new(io::stdout())),
                PrefixingWriter::new(prefix.clone(), SharedWriter::new(io::stderr())),
            )
            .line_framed();
            run_external(input).await
        }
    }
}
