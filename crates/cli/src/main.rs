//! dokku-log - console output helpers for dokku plugins
//!
//! Prints styled status lines and relays subprocess output through the
//! same formatting so shell plugins and Rust plugins look alike.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod exit_code;

use commands::Cli;

#[tokio::main]
async fn main() {
    // Diagnostics go to stderr; stdout carries command output only
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code);
}
