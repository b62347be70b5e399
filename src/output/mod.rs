//! Report writers.

mod csv;
mod json;
mod types;
mod writer;

pub use csv::CsvWriter;
pub use json::{JsonCandidate, JsonReportFile, JsonReportWriter, JsonSettings, JsonSummary};
pub use types::CallEvent;
pub use writer::OutputWriter;
