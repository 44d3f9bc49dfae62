//! Render operation - root module generation from a task configuration.

use std::path::Path;

use eyre::{Result, WrapErr};
use tfsync_core::Terraform;
use tfsync_manifest::Manifest;
use tfsync_tftmpl::{FileKind, init_root_module, preview};
use tracing::info;

use crate::reports::{FileStatus, RenderReport, RenderResult, RenderedFile};

/// Options for the render operation.
pub struct RenderOptions<'a> {
    /// Root module directory, overriding the driver working directory.
    pub output_dir: Option<&'a Path>,
    /// Keep files that already exist.
    pub skip_existing: bool,
    /// Permissions of written files.
    pub file_perms: Option<u32>,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the render operation.
pub fn render(manifest: Manifest, opts: RenderOptions) -> Result<RenderReport> {
    let output_dir = match opts.output_dir {
        Some(dir) => dir.to_path_buf(),
        None => Terraform::new(manifest.terraform.clone()).task_dir(&manifest.task.name),
    };
    let task = manifest.task.name.clone();

    let mut input = manifest
        .into_input(&output_dir)
        .with_skip_existing(opts.skip_existing);
    if let Some(perms) = opts.file_perms {
        input = input.with_file_perms(perms);
    }

    let result = if opts.dry_run {
        let files = preview(&mut input)
            .into_iter()
            .map(|file| RenderedFile {
                name: file.filename(),
                status: FileStatus::Preview(file.content),
            })
            .collect();
        RenderResult::Preview(files)
    } else {
        // Statuses are taken before writing since the writer replaces files in place
        let files = FileKind::ALL
            .into_iter()
            .filter(|kind| kind.is_required(&input))
            .map(|kind| {
                let exists = output_dir.join(kind.filename()).exists();
                let status = match (exists, opts.skip_existing) {
                    (false, _) => FileStatus::Created,
                    (true, false) => FileStatus::Overwritten,
                    (true, true) => FileStatus::Kept,
                };
                RenderedFile {
                    name: kind.filename(),
                    status,
                }
            })
            .collect();

        init_root_module(&mut input)
            .wrap_err_with(|| format!("Failed to write root module for task '{}'", task))?;
        info!(task = %task, dir = %output_dir.display(), "root module written");
        RenderResult::Written(files)
    };

    Ok(RenderReport {
        task,
        output_dir,
        result,
    })
}
