//! fail command - Print failures and exit
//!
//! A single message without an exit code fails with status 1. Several
//! messages are reported as one composite error, one line each.

use clap::Args;
use dokku_log_core::{Error, Logger};

/// Print failures and exit with their exit code
#[derive(Args, Debug)]
pub struct FailArgs {
    /// Failure messages, one line each
    #[arg(required = true)]
    pub messages: Vec<String>,

    /// Exit code for a single message (several messages always exit 1)
    #[arg(long)]
    pub exit_code: Option<i32>,

    /// Print nothing in quiet mode; the exit code is unchanged
    #[arg(long, default_value = "false")]
    pub honor_quiet: bool,
}

impl FailArgs {
    /// The error described by these arguments
    pub fn to_error(&self) -> Error {
        let single = |message: &str| match self.exit_code {
            Some(code) => Error::with_exit_code(message, code),
            None => Error::General(message.to_string()),
        };

        match self.messages.as_slice() {
            [message] => single(message),
            messages => Error::Multiple(messages.iter().map(|m| single(m)).collect()),
        }
    }
}

/// Execute the fail command
pub fn execute(args: FailArgs, logger: &Logger) -> ! {
    if let ([message], None) = (args.messages.as_slice(), args.exit_code) {
        if args.honor_quiet {
            logger.fail_quiet(message)
        } else {
            logger.fail(message)
        }
    }

    let err = args.to_error();
    if args.honor_quiet {
        logger.fail_with_error_quiet(&err)
    } else {
        logger.fail_with_error(&err)
    }
}
