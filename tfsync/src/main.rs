mod commands;
mod ops;
mod reports;

use clap::Parser;
use eyre::{Result, WrapErr};

use crate::commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.log_level())?;
    cli.run()
}

/// Log to stderr so rendered output on stdout stays clean. `RUST_LOG` wins
/// over `--log-level`.
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .wrap_err("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    Ok(())
}
