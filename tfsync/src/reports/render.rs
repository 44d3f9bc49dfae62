//! Render command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from root module generation.
#[derive(Debug)]
pub struct RenderReport {
    pub task: String,
    /// Root module directory.
    pub output_dir: PathBuf,
    pub result: RenderResult,
}

#[derive(Debug)]
pub enum RenderResult {
    /// Files were written to disk.
    Written(Vec<RenderedFile>),
    /// Dry-run preview.
    Preview(Vec<RenderedFile>),
}

#[derive(Debug)]
pub struct RenderedFile {
    pub name: &'static str,
    pub status: FileStatus,
}

#[derive(Debug, PartialEq, Eq)]
pub enum FileStatus {
    Created,
    Overwritten,
    /// Existed and was left untouched.
    Kept,
    /// Rendered content of a dry run.
    Preview(String),
}

impl Report for RenderReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            RenderResult::Written(files) => self.render_written(out, files),
            RenderResult::Preview(files) => self.render_preview(out, files),
        }
    }
}

impl RenderReport {
    fn render_written(&self, out: &mut dyn Output, files: &[RenderedFile]) {
        out.key_value("Task", &self.task);
        out.key_value("Root module", &self.output_dir.display().to_string());
        out.newline();

        out.section(&format!("Files ({})", files.len()));
        for file in files {
            match file.status {
                FileStatus::Created => out.added_item(file.name),
                FileStatus::Overwritten => out.changed_item(file.name),
                FileStatus::Kept => out.list_item(&format!("{} (kept)", file.name)),
                FileStatus::Preview(_) => out.list_item(file.name),
            }
        }
    }

    fn render_preview(&self, out: &mut dyn Output, files: &[RenderedFile]) {
        for file in files {
            out.divider(&self.output_dir.join(file.name).display().to_string());
            if let FileStatus::Preview(content) = &file.status {
                out.preformatted(content.trim_end());
            }
        }
    }
}
