//! Task configuration for tfsync.
//!
//! A `task.toml` describes one task: the module it runs, the services it
//! watches, provider and backend configuration and module variables.
//! [`Manifest::into_input`] turns it into the input of the root module
//! compiler.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;
mod validate;

pub use error::{Error, Result};
pub use manifest::{DEFAULT_FILENAME, Manifest};
pub use validate::ParseContext;
