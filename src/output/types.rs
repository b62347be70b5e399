//! Output type definitions.

use crate::detection::{CallEvents, Candidate, Sex};
use std::path::{Path, PathBuf};

/// A single reported call burst.
#[derive(Debug, Clone, PartialEq)]
pub struct CallEvent {
    /// Path to the source features file.
    pub file_path: PathBuf,
    /// Sex of the calling bird.
    pub sex: Sex,
    /// Burst start time in seconds.
    pub start_time: f64,
    /// Burst end time in seconds.
    pub end_time: f64,
    /// Calls per unit time over the burst.
    pub density: f64,
}

impl CallEvent {
    /// Build an event from a detected candidate.
    pub fn from_candidate(candidate: &Candidate, sex: Sex, file_path: PathBuf) -> Self {
        Self {
            file_path,
            sex,
            start_time: candidate.start,
            end_time: candidate.end,
            density: candidate.density,
        }
    }

    /// Flatten per-sex candidates into events, females first.
    pub fn from_events(events: &CallEvents, file_path: &Path) -> Vec<Self> {
        Sex::ALL
            .into_iter()
            .flat_map(|sex| {
                events
                    .for_sex(sex)
                    .iter()
                    .map(move |c| Self::from_candidate(c, sex, file_path.to_path_buf()))
            })
            .collect()
    }
}
