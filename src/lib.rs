pub mod cli;
pub mod error;
pub mod git;
pub mod model;
pub mod pattern;
pub mod render;
pub mod report;

pub use error::{ReportError, Result};
pub use model::{CommitRecord, ReportFormat, RevisionRange};
pub use report::{ReportGenerator, ReportOptions};
