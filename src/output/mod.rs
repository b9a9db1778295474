//! Report rendering and export

pub mod csv_export;
pub mod formatter;
pub mod report;

pub use formatter::{OutputFormatter, ReportGenerator};
pub use report::{RankingSummary, ReportMetadata, ScoreReport};
