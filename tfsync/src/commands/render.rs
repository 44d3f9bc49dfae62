use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use tfsync_manifest::{DEFAULT_FILENAME, Manifest};

use super::UnwrapOrExit;
use crate::{
    ops::{self, RenderOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct RenderCommand {
    /// Path to the task configuration
    #[arg(short, long, default_value = DEFAULT_FILENAME)]
    pub config: PathBuf,

    /// Root module directory (defaults to <working_dir>/<task name>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep files that already exist in the root module
    #[arg(long)]
    pub skip_existing: bool,

    /// Permissions of written files, in octal
    #[arg(long, value_parser = parse_perms)]
    pub perms: Option<u32>,

    /// Print the root module instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl RenderCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.config).unwrap_or_exit();

        let report = ops::render(
            manifest,
            RenderOptions {
                output_dir: self.output.as_deref(),
                skip_existing: self.skip_existing,
                file_perms: self.perms,
                dry_run: self.dry_run,
            },
        )?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}

fn parse_perms(s: &str) -> std::result::Result<u32, String> {
    let s = s.trim_start_matches("0o");
    let mode = u32::from_str_radix(s, 8).map_err(|e| format!("invalid octal mode: {}", e))?;
    if mode > 0o777 {
        return Err(format!("mode {:o} is out of range", mode));
    }
    Ok(mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_perms() {
        assert_eq!(parse_perms("644"), Ok(0o644));
        assert_eq!(parse_perms("0o750"), Ok(0o750));
        assert_eq!(parse_perms("0600"), Ok(0o600));
        assert!(parse_perms("8").is_err());
        assert!(parse_perms("1777").is_err());
    }
}
