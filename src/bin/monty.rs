//! Command-line program that proves the Monty Hall problem by simulation, uses the [montyrs::cli] module.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use montyrs::cli;

/// Entrypoint for the Monty Hall CLI program, which sets up logging on stderr, then parses and runs the CLI from the provided arguments.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    cli::Args::parse().run()
}
