//! Kiwi call detection from per-segment labels.
//!
//! The run detector gives a quick whole-recording [`Verdict`]; the candidate
//! extractor produces time-bounded, density-scored [`Candidate`] bursts.

mod candidates;
mod finder;
mod merge;
mod runs;
mod types;

pub use candidates::{ExtractParams, SubWindowIndexing, contiguous_regions, find_candidates};
pub use finder::KiwiFinder;
pub use merge::merge_overlapping;
pub use runs::{BoundaryCheck, RunCounts, count_runs};
pub use types::{CallEvents, Candidate, Label, Region, Sex, TimeRange, Verdict, VerdictTally};
