pub mod analyzers;
pub mod error;
pub mod join;
pub mod loader;
pub mod model;
pub mod output;
pub mod report;

pub use error::{ReportError, Result};
pub use report::{Report, ReportConfig};
