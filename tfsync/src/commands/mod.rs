mod check;
mod completions;
mod driver;
mod fmt;
mod render;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use driver::DriverCommand;
use eyre::Result;
use fmt::FmtCommand;
use render::RenderCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for tfsync_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "tfsync")]
#[command(version)]
#[command(about = "Compile task configuration into Terraform root modules")]
pub(crate) struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Render(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Fmt(cmd) => cmd.run(),
            Commands::Driver(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write the Terraform root module for a task
    Render(RenderCommand),

    /// Validate task configuration without writing anything
    Check(CheckCommand),

    /// Format Terraform files canonically
    Fmt(FmtCommand),

    /// Inspect or prepare the Terraform toolchain
    Driver(DriverCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
