use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use tfsync_manifest::{DEFAULT_FILENAME, Manifest};

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the task configuration
    #[arg(short, long, default_value = DEFAULT_FILENAME)]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.config).unwrap_or_exit();
        let report = ops::check(&manifest, &self.config);
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
