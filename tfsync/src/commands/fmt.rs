use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct FmtCommand {
    /// Files or directories to format (directories are not searched recursively)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Check if files are formatted without making changes (exit 1 if not)
    #[arg(long)]
    pub check: bool,
}

impl FmtCommand {
    pub fn run(&self) -> Result<()> {
        let report = ops::fmt(&self.paths, self.check)?;
        report.render(&mut TerminalOutput::new());

        if self.check && !report.is_formatted() {
            eprintln!("Run `tfsync fmt` to fix.");
            std::process::exit(1);
        }
        Ok(())
    }
}
