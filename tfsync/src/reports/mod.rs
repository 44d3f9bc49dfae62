//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod check;
mod driver;
mod fmt;
mod output;
mod render;

pub use check::CheckReport;
pub use driver::DriverReport;
pub use fmt::FmtReport;
pub use output::{Report, TerminalOutput};
pub use render::{FileStatus, RenderReport, RenderResult, RenderedFile};
