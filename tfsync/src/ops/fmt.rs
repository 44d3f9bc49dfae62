//! Fmt operation - canonical formatting of Terraform files.

use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::{Result, WrapErr};
use tracing::debug;

use crate::reports::FmtReport;

/// Format every `.tf` file in `paths`.
///
/// Directories contribute the `.tf` files directly inside them. With
/// `check` set nothing is written.
pub fn fmt(paths: &[PathBuf], check: bool) -> Result<FmtReport> {
    let mut files = Vec::new();
    for path in paths {
        collect_tf_files(path, &mut files)?;
    }
    files.sort();

    let mut changed = Vec::new();
    let mut unchanged = 0;
    for file in files {
        let content = fs::read_to_string(&file)
            .wrap_err_with(|| format!("Failed to read {}", file.display()))?;
        let formatted = tfsync_hcl::format(&content);

        if formatted == content {
            unchanged += 1;
            continue;
        }
        if !check {
            fs::write(&file, &formatted)
                .wrap_err_with(|| format!("Failed to write {}", file.display()))?;
            debug!(file = %file.display(), "formatted");
        }
        changed.push(file);
    }

    Ok(FmtReport {
        check,
        changed,
        unchanged,
    })
}

fn collect_tf_files(path: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    if !path.is_dir() {
        files.push(path.to_path_buf());
        return Ok(());
    }

    let entries =
        fs::read_dir(path).wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    for entry in entries {
        let entry_path = entry?.path();
        if entry_path.is_file() && entry_path.extension().is_some_and(|ext| ext == "tf") {
            files.push(entry_path);
        }
    }
    Ok(())
}
