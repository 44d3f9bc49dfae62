//! Boundary to the Terraform toolchain.
//!
//! The root module compiler never runs Terraform. The driver only answers
//! whether the executable is in place and which version the generated
//! configuration targets.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};

use crate::{Error, Result, Version};

/// Terraform release the driver targets.
pub const TERRAFORM_VERSION: &str = "0.13.0-beta2";

/// Where Terraform releases are published.
pub const RELEASES_URL: &str = "https://releases.hashicorp.com";

/// Toolchain driver consumed by the task runner.
pub trait Driver {
    /// Make sure the toolchain is ready. Calling it again once it succeeded is a no-op.
    fn init(&self) -> Result<()>;

    /// Version of the toolchain the driver manages.
    fn version(&self) -> &Version;
}

/// Configures the Terraform driver
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TerraformConfig {
    /// Terraform log level (`TF_LOG`), unset keeps Terraform quiet
    pub log_level: Option<String>,
    /// Directory holding the `terraform` executable
    pub path: PathBuf,
    /// Terraform data directory (`TF_DATA_DIR`)
    pub data_dir: Option<PathBuf>,
    /// Directory under which each task gets its root module directory
    pub working_dir: PathBuf,
    /// Skip checksum verification of downloaded releases
    pub skip_verify: bool,
    /// Default `backend.<type>` for task root modules
    pub backend: BTreeMap<String, Value>,
}

impl Default for TerraformConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            path: PathBuf::from("."),
            data_dir: None,
            working_dir: PathBuf::from("sync-tasks"),
            skip_verify: false,
            backend: BTreeMap::new(),
        }
    }
}

/// Driver that uses the Terraform CLI
#[derive(Debug, Clone)]
pub struct Terraform {
    log_level: Option<String>,
    path: PathBuf,
    data_dir: Option<PathBuf>,
    working_dir: PathBuf,
    skip_verify: bool,
    backend: BTreeMap<String, Value>,
    version: Version,
}

impl Terraform {
    pub fn new(config: TerraformConfig) -> Self {
        Self {
            log_level: config.log_level,
            path: config.path,
            data_dir: config.data_dir,
            working_dir: config.working_dir,
            skip_verify: config.skip_verify,
            backend: config.backend,
            version: TERRAFORM_VERSION
                .parse()
                .unwrap_or_else(|_| Version::new(0, 13, 0)),
        }
    }

    /// Full path of the `terraform` executable.
    pub fn binary_path(&self) -> PathBuf {
        self.path.join(binary_name())
    }

    /// Root module directory for a task.
    pub fn task_dir(&self, task_name: &str) -> PathBuf {
        self.working_dir.join(task_name)
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Type of the backend configured for the driver, if any.
    pub fn backend_type(&self) -> Option<&str> {
        self.backend.keys().next().map(String::as_str)
    }

    pub fn skip_verify(&self) -> bool {
        self.skip_verify
    }

    /// Environment Terraform runs with for this configuration.
    pub fn env(&self) -> Vec<(&'static str, String)> {
        let mut env = Vec::new();
        if let Some(level) = &self.log_level {
            env.push(("TF_LOG", level.to_uppercase()));
        }
        if let Some(dir) = &self.data_dir {
            env.push(("TF_DATA_DIR", dir.display().to_string()));
        }
        env
    }

    fn install(&self) -> Result<()> {
        error!(
            url = RELEASES_URL,
            version = %self.version,
            skip_verify = self.skip_verify,
            "automatic installation is not supported, install terraform manually"
        );
        Err(Error::NotInstalled {
            path: self.binary_path(),
            version: self.version.to_string(),
        })
    }
}

impl Driver for Terraform {
    fn init(&self) -> Result<()> {
        if !self.working_dir.exists() {
            fs::create_dir_all(&self.working_dir).map_err(|source| Error::Create {
                path: self.working_dir.clone(),
                source,
            })?;
        }

        let binary = self.binary_path();
        if binary.is_file() {
            info!(
                path = %binary.display(),
                "skipping install, terraform already exists"
            );
            return Ok(());
        }

        info!(version = %self.version, path = %self.path.display(), "installing terraform");
        self.install()
    }

    fn version(&self) -> &Version {
        &self.version
    }
}

fn binary_name() -> &'static str {
    if cfg!(windows) {
        "terraform.exe"
    } else {
        "terraform"
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn driver(temp: &TempDir) -> Terraform {
        Terraform::new(TerraformConfig {
            path: temp.path().join("bin"),
            working_dir: temp.path().join("sync-tasks"),
            ..TerraformConfig::default()
        })
    }

    #[test]
    fn test_version() {
        let temp = TempDir::new().unwrap();
        assert_eq!(driver(&temp).version().to_string(), TERRAFORM_VERSION);
    }

    #[test]
    fn test_task_dir() {
        let temp = TempDir::new().unwrap();
        let tf = driver(&temp);
        assert_eq!(tf.task_dir("web"), temp.path().join("sync-tasks").join("web"));
    }

    #[test]
    fn test_init_missing_binary() {
        let temp = TempDir::new().unwrap();
        let err = driver(&temp).init().unwrap_err();

        assert!(matches!(err, Error::NotInstalled { .. }));
        assert!(temp.path().join("sync-tasks").is_dir());
    }

    #[test]
    fn test_init_is_idempotent_when_installed() {
        let temp = TempDir::new().unwrap();
        let tf = driver(&temp);
        fs::create_dir_all(temp.path().join("bin")).unwrap();
        fs::write(tf.binary_path(), "").unwrap();

        tf.init().unwrap();
        tf.init().unwrap();
    }

    #[test]
    fn test_env() {
        let temp = TempDir::new().unwrap();
        assert!(driver(&temp).env().is_empty());

        let tf = Terraform::new(TerraformConfig {
            log_level: Some("debug".into()),
            data_dir: Some(temp.path().join("data")),
            ..TerraformConfig::default()
        });
        assert_eq!(
            tf.env(),
            [
                ("TF_LOG", "DEBUG".to_string()),
                ("TF_DATA_DIR", temp.path().join("data").display().to_string()),
            ]
        );
    }

    #[test]
    fn test_backend_type() {
        let mut backend = BTreeMap::new();
        backend.insert("consul".to_string(), serde_json::json!({"gzip": true}));
        let tf = Terraform::new(TerraformConfig {
            backend,
            ..TerraformConfig::default()
        });

        assert_eq!(tf.backend_type(), Some("consul"));
        assert_eq!(Terraform::new(TerraformConfig::default()).backend_type(), None);
    }
}
