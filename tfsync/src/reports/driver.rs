use std::path::PathBuf;

use super::output::{Output, Report};

/// Terraform toolchain as the driver sees it.
#[derive(Debug)]
pub struct DriverReport {
    pub version: String,
    pub prerelease: bool,
    pub binary: PathBuf,
    pub working_dir: PathBuf,
    pub backend: Option<String>,
    pub skip_verify: bool,
    /// Variables Terraform runs with, e.g. `TF_LOG`.
    pub env: Vec<(&'static str, String)>,
}

impl Report for DriverReport {
    fn render(&self, out: &mut dyn Output) {
        if self.prerelease {
            out.key_value("Terraform", &format!("{} (pre-release)", self.version));
        } else {
            out.key_value("Terraform", &self.version);
        }
        out.key_value("Binary", &self.binary.display().to_string());
        out.key_value("Working directory", &self.working_dir.display().to_string());
        out.key_value("Backend", self.backend.as_deref().unwrap_or("none"));
        if self.skip_verify {
            out.warning("release checksum verification is disabled");
        }

        if !self.env.is_empty() {
            out.newline();
            out.section("Environment");
            for (key, value) in &self.env {
                out.list_item(&format!("{}={}", key, value));
            }
        }
    }
}
