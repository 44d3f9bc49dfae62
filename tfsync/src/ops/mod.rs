//! Core operations.
//!
//! This module contains the business logic for tfsync commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod fmt;
pub mod render;

pub use check::check;
pub use fmt::fmt;
pub use render::{RenderOptions, render};
