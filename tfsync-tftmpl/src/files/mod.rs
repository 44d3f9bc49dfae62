//! The files making up a task's root module.

use std::io::{self, Write};

use tracing::warn;

use crate::{RootModuleInputData, Task};

mod main_tf;
mod module_variables_tf;
mod providers_tfvars;
mod tfvars_tmpl;
mod variables_tf;

pub const ROOT_FILENAME: &str = "main.tf";
pub const VARS_FILENAME: &str = "variables.tf";
pub const MODULE_VARS_FILENAME: &str = "variables.module.tf";
pub const TFVARS_TMPL_FILENAME: &str = "terraform.tfvars.tmpl";
pub const PROVIDERS_TFVARS_FILENAME: &str = "providers.tfvars";

/// Terraform versions the generated root module is written for.
pub const REQUIRED_VERSION: &str = ">= 0.13.0, < 0.15";

/// Header of every generated file.
pub const ROOT_PREAMBLE: &str = "# This file is generated by tfsync.
#
# The HCL blocks, arguments, variables, and values are derived from the
# operator configuration for tfsync. Any manual changes to this file
# may not be preserved and could be overwritten by a subsequent update.
#
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Main,
    Variables,
    ModuleVariables,
    TfVarsTemplate,
    ProvidersTfVars,
}

impl FileKind {
    /// Every file kind, in the order they are written.
    pub const ALL: [FileKind; 5] = [
        FileKind::Main,
        FileKind::Variables,
        FileKind::ModuleVariables,
        FileKind::TfVarsTemplate,
        FileKind::ProvidersTfVars,
    ];

    pub fn filename(self) -> &'static str {
        match self {
            FileKind::Main => ROOT_FILENAME,
            FileKind::Variables => VARS_FILENAME,
            FileKind::ModuleVariables => MODULE_VARS_FILENAME,
            FileKind::TfVarsTemplate => TFVARS_TMPL_FILENAME,
            FileKind::ProvidersTfVars => PROVIDERS_TFVARS_FILENAME,
        }
    }

    /// Whether the file belongs in the root module for this input.
    pub fn is_required(self, input: &RootModuleInputData) -> bool {
        match self {
            FileKind::ModuleVariables => !input.variables.is_empty(),
            _ => true,
        }
    }

    /// Write the file content for `input` into `w`.
    ///
    /// Only the body write can fail. A failed preamble is logged and the
    /// body still gets written.
    pub fn render(self, w: &mut dyn Write, input: &RootModuleInputData) -> io::Result<()> {
        let filename = self.filename();
        match self {
            FileKind::Main => main_tf::render(w, filename, input),
            FileKind::Variables => variables_tf::render(w, filename, input),
            FileKind::ModuleVariables => module_variables_tf::render(w, filename, input),
            FileKind::TfVarsTemplate => tfvars_tmpl::render(w, filename, input),
            FileKind::ProvidersTfVars => providers_tfvars::render(w, filename, input),
        }
    }
}

/// Write the generated-file header and the task header.
fn write_preamble(w: &mut dyn Write, task: &Task, filename: &str) {
    if let Err(err) = w.write_all(ROOT_PREAMBLE.as_bytes()) {
        warn!(task = %task.name, file = filename, error = %err, "unable to write preamble warning");
    }
    if let Err(err) = w.write_all(task_preamble(task).as_bytes()) {
        warn!(task = %task.name, file = filename, error = %err, "unable to write task preamble");
    }
}

fn task_preamble(task: &Task) -> String {
    let mut preamble = format!("# Task: {}\n", task.name);
    let mut lines = task.description.lines();
    preamble.push_str("# Description:");
    if let Some(first) = lines.next() {
        preamble.push(' ');
        preamble.push_str(first);
    }
    preamble.push('\n');
    for line in lines {
        preamble.push_str("# ");
        preamble.push_str(line);
        preamble.push('\n');
    }
    preamble
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_task_preamble() {
        let task = Task::new("web", "org/web/aws").with_description("web servers");
        assert_eq!(
            task_preamble(&task),
            "# Task: web\n# Description: web servers\n"
        );
    }

    #[test]
    fn test_task_preamble_multiline_description() {
        let task = Task::new("web", "org/web/aws").with_description("first\nsecond");
        assert_eq!(
            task_preamble(&task),
            "# Task: web\n# Description: first\n# second\n"
        );
    }

    #[test]
    fn test_task_preamble_empty_description() {
        let task = Task::new("web", "org/web/aws");
        assert_eq!(task_preamble(&task), "# Task: web\n# Description:\n");
    }

    #[test]
    fn test_preamble_failure_is_swallowed() {
        let task = Task::new("web", "org/web/aws");
        write_preamble(&mut FailingWriter, &task, ROOT_FILENAME);
    }

    /// Rejects the first write, accepts the rest.
    #[derive(Default)]
    struct FlakyWriter {
        failed: bool,
        written: Vec<u8>,
    }

    impl Write for FlakyWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if !self.failed {
                self.failed = true;
                return Err(io::Error::other("disk full"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_task_preamble_written_after_warning_fails() {
        let task = Task::new("web", "org/web/aws").with_description("web servers");
        let mut w = FlakyWriter::default();

        write_preamble(&mut w, &task, ROOT_FILENAME);

        assert_eq!(
            String::from_utf8(w.written).unwrap(),
            "# Task: web\n# Description: web servers\n"
        );
    }

    #[test]
    fn test_module_variables_only_when_set() {
        let mut input = RootModuleInputData::new(Task::new("web", "org/web/aws"), "out");
        assert!(!FileKind::ModuleVariables.is_required(&input));
        assert!(FileKind::Main.is_required(&input));

        input.variables.insert("region".into(), "us-east-1".into());
        assert!(FileKind::ModuleVariables.is_required(&input));
    }
}
