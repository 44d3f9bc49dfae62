use std::path::PathBuf;

use super::output::{Output, Report};

#[derive(Debug)]
pub struct FmtReport {
    /// Whether files were only checked.
    pub check: bool,
    /// Files that were (or, when checking, would be) rewritten.
    pub changed: Vec<PathBuf>,
    pub unchanged: usize,
}

impl FmtReport {
    pub fn is_formatted(&self) -> bool {
        self.changed.is_empty()
    }
}

impl Report for FmtReport {
    fn render(&self, out: &mut dyn Output) {
        for file in &self.changed {
            if self.check {
                out.warning(&format!("{} is not formatted", file.display()));
            } else {
                out.changed_item(&file.display().to_string());
            }
        }

        let verb = if self.check { "need formatting" } else { "formatted" };
        out.preformatted(&format!(
            "{} file(s) {}, {} unchanged",
            self.changed.len(),
            verb,
            self.unchanged
        ));
    }
}
