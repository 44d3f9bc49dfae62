//! Terraform root module generation.
//!
//! Given a task, the services it watches, its providers and variables, this
//! crate writes the root module Terraform runs for the task:
//!
//! - `main.tf` - terraform settings, provider blocks and the module call
//! - `variables.tf` - the `services` variable and one variable per provider
//! - `variables.module.tf` - operator variables for the module (only when set)
//! - `terraform.tfvars.tmpl` - template rendered with live service instances
//! - `providers.tfvars` - provider configuration values
//!
//! Output only depends on the content of [`RootModuleInputData`], never on
//! the order services or providers were discovered in.

mod condition;
mod error;
pub mod files;
mod input;
mod named_block;
mod task;
mod writer;

pub use condition::{CatalogServicesCondition, Condition, TaskCondition};
pub use error::{Error, Result};
pub use files::FileKind;
pub use input::{DEFAULT_FILE_PERMS, RootModuleInputData, Variables};
pub use named_block::{NamedBlock, SUPPRESSED_ATTRIBUTES};
pub use task::{Service, Task};
pub use writer::{PreviewFile, init_root_module, preview};
