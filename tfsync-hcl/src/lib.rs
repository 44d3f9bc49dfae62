//! HCL generation building blocks.
//!
//! This crate builds HCL documents as a tree and serializes them into
//! canonically formatted text:
//! - [`Document`] / [`Body`] - Append-only syntax tree (blocks, attributes, comments)
//! - [`Expression`] / [`Traversal`] - Attribute values and `var.x.y` references
//! - [`TypeExpr`] - Type constraints inferred from values
//! - [`format`] - Idempotent canonical formatting of HCL text
//! - [`CodeBuilder`] - Low level indented line writer used by the renderer

mod body;
mod code_builder;
mod document;
mod expr;
mod format;
mod indent;
mod renderable;
mod types;

pub use body::{Attribute, Block, Body, Structure};
pub use code_builder::CodeBuilder;
pub use document::Document;
pub use expr::{Expression, Traversal, Value, is_identifier, quote};
pub use format::format;
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};
pub use types::TypeExpr;
