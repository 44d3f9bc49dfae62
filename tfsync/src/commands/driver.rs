use std::path::PathBuf;

use clap::{Args, Subcommand};
use eyre::{Result, WrapErr};
use tfsync_core::{Driver, Terraform, TerraformConfig};
use tfsync_manifest::{DEFAULT_FILENAME, Manifest};
use tracing::debug;

use super::UnwrapOrExit;
use crate::reports::{DriverReport, Report, TerminalOutput};

#[derive(Args)]
pub struct DriverCommand {
    /// Task configuration holding the [terraform] table (defaults apply when missing)
    #[arg(short, long, default_value = DEFAULT_FILENAME, global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    command: DriverAction,
}

#[derive(Subcommand)]
enum DriverAction {
    /// Make sure the Terraform executable is in place
    Init,
    /// Show the Terraform version the root modules target
    Version,
}

impl DriverCommand {
    pub fn run(&self) -> Result<()> {
        let terraform = Terraform::new(self.terraform_config());

        if let DriverAction::Init = self.command {
            terraform
                .init()
                .wrap_err("Failed to initialize the Terraform driver")?;
        }

        DriverReport {
            version: terraform.version().to_string(),
            prerelease: terraform.version().is_prerelease(),
            binary: terraform.binary_path(),
            working_dir: terraform.working_dir().to_path_buf(),
            backend: terraform.backend_type().map(str::to_string),
            skip_verify: terraform.skip_verify(),
            env: terraform.env(),
        }
        .render(&mut TerminalOutput::new());

        Ok(())
    }

    fn terraform_config(&self) -> TerraformConfig {
        if !self.config.exists() {
            debug!(config = %self.config.display(), "no task configuration, using driver defaults");
            return TerraformConfig::default();
        }
        Manifest::from_file(&self.config).unwrap_or_exit().terraform
    }
}
