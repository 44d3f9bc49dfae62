//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Summary of a validated task configuration.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    pub task: String,
    pub source: String,
    pub version: Option<String>,
    /// Service queries, in configured order.
    pub services: Vec<String>,
    pub providers: Vec<String>,
    pub backend: Option<String>,
    pub variables: Vec<String>,
    pub condition: Option<String>,
    pub warnings: Vec<String>,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }
        if !self.warnings.is_empty() {
            out.newline();
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();

        out.key_value("Task", &self.task);
        match &self.version {
            Some(version) => out.key_value("Module", &format!("{} ({})", self.source, version)),
            None => out.key_value("Module", &self.source),
        }
        if let Some(backend) = &self.backend {
            out.key_value("Backend", backend);
        }
        if let Some(condition) = &self.condition {
            out.key_value("Condition", condition);
        }

        list_section(out, "Services", &self.services);
        list_section(out, "Providers", &self.providers);
        list_section(out, "Variables", &self.variables);
    }
}

fn list_section(out: &mut dyn Output, name: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.newline();
    out.section(&format!("{} ({})", name, items.len()));
    for item in items {
        out.list_item(item);
    }
}
