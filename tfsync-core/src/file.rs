use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{Error, Result};

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Get the rules for writing this file
    fn rules(&self) -> FileRules;

    /// Stream the file content into the destination
    fn render(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Write the file to disk
    fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = self.path(base);
        let rules = self.rules();

        let existed = path.exists();
        if existed && rules.overwrite == Overwrite::IfMissing {
            return Ok(WriteResult::Skipped);
        }

        write_file(&path, rules.mode, |w| self.render(w))?;
        if existed {
            Ok(WriteResult::Overwritten)
        } else {
            Ok(WriteResult::Written)
        }
    }
}

/// Create (or truncate) `path`, apply `mode`, stream the content and sync it.
fn write_file<F>(path: &Path, mode: Option<u32>, render: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let create_err = |source| Error::Create {
        path: path.to_path_buf(),
        source,
    };
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(create_err)?;
        }
    }

    let file = fs::File::create(path).map_err(create_err)?;
    if let Some(mode) = mode {
        set_mode(&file, mode).map_err(|source| Error::Permissions {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let mut writer = BufWriter::new(file);
    render(&mut writer).map_err(write_err)?;
    let file = writer
        .into_inner()
        .map_err(|e| write_err(e.into_error()))?;
    file.sync_all().map_err(write_err)?;
    Ok(())
}

#[cfg(unix)]
fn set_mode(file: &fs::File, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(file: &fs::File, mode: u32) -> io::Result<()> {
    let mut permissions = file.metadata()?.permissions();
    permissions.set_readonly(mode & 0o222 == 0);
    file.set_permissions(permissions)
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File did not exist and was written
    Written,
    /// File existed and was replaced
    Overwritten,
    /// File was skipped (already exists)
    Skipped,
}

/// Rules that determine how a file should be written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileRules {
    pub overwrite: Overwrite,
    /// Permission bits applied after creation, `None` keeps the process default
    pub mode: Option<u32>,
}

impl FileRules {
    pub fn always_overwrite() -> Self {
        Self {
            overwrite: Overwrite::Always,
            mode: None,
        }
    }

    pub fn if_missing() -> Self {
        Self {
            overwrite: Overwrite::IfMissing,
            mode: None,
        }
    }

    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite (generated configuration)
    Always,
    /// Only create if file doesn't exist (fixtures)
    IfMissing,
}

impl Default for FileRules {
    fn default() -> Self {
        Self::always_overwrite()
    }
}
