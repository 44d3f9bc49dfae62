use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to create '{path}'")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to change permissions for '{path}'")]
    Permissions {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error writing content for '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("terraform {version} is not installed at '{path}'")]
    NotInstalled { path: PathBuf, version: String },
}

impl Error {
    /// Path of the file or directory the error is about.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Error::Create { path, .. }
            | Error::Permissions { path, .. }
            | Error::Write { path, .. }
            | Error::NotInstalled { path, .. } => path,
        }
    }
}
