//! Core utilities and types for the tfsync root module compiler.
//!
//! This crate provides the pieces shared by every other tfsync crate:
//! writing generated files to disk, version handling, and the boundary
//! to the Terraform toolchain.

mod driver;
mod error;
mod file;
mod version;

// Toolchain boundary
pub use driver::{Driver, RELEASES_URL, TERRAFORM_VERSION, Terraform, TerraformConfig};
pub use error::{Error, Result};
// File operations
pub use file::{FileRules, GeneratedFile, Overwrite, WriteResult};
pub use version::Version;
