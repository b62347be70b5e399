//! Consecutive-call detection.
//!
//! Kiwi calls repeat in short bursts, so a recording whose label sequence
//! contains a run of identical call labels is very likely to contain that
//! call type. Runs touching either edge of the analyzed window are given a
//! shorter length requirement.

use super::{Label, Verdict};
use crate::constants::detection::BORDER_RUN_LENGTH;
use serde::{Deserialize, Serialize};

/// How the edge runs are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryCheck {
    /// Leading edge counted twice, trailing edge once.
    #[default]
    Reference,
    /// Each edge counted once.
    Single,
}

/// Number of qualifying runs found per label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounts {
    background: usize,
    female: usize,
    male: usize,
}

impl RunCounts {
    fn bump(&mut self, label: Label) {
        match label {
            Label::Background => self.background += 1,
            Label::Female => self.female += 1,
            Label::Male => self.male += 1,
        }
    }

    /// Runs counted for `label`.
    pub const fn get(&self, label: Label) -> usize {
        match label {
            Label::Background => self.background,
            Label::Female => self.female,
            Label::Male => self.male,
        }
    }

    /// Aggregate verdict from the female and male counters.
    pub const fn verdict(&self) -> Verdict {
        match (self.female > 0, self.male > 0) {
            (true, true) => Verdict::MaleAndFemale,
            (true, false) => Verdict::Female,
            (false, true) => Verdict::Male,
            (false, false) => Verdict::None,
        }
    }
}

/// Count runs of at least `min_run_length` identical labels.
///
/// Window starts cover `[0, len - min_run_length)`, so a window ending at the
/// last label is never tested; the edge checks make up for it. Sequences
/// shorter than the edge length produce no counts.
pub fn count_runs(labels: &[Label], min_run_length: usize, boundary: BoundaryCheck) -> RunCounts {
    let mut counts = RunCounts::default();

    if labels.len() < BORDER_RUN_LENGTH {
        return counts;
    }

    for i in 0..labels.len().saturating_sub(min_run_length) {
        let window = &labels[i..i + min_run_length];
        if window.iter().all(|&l| l == labels[i]) {
            counts.bump(labels[i]);
        }
    }

    let leading = &labels[..BORDER_RUN_LENGTH];
    let trailing = &labels[labels.len() - BORDER_RUN_LENGTH..];
    let leading_repeats = match boundary {
        BoundaryCheck::Reference => 2,
        BoundaryCheck::Single => 1,
    };

    if let Some(label) = uniform_label(leading) {
        for _ in 0..leading_repeats {
            counts.bump(label);
        }
    }
    if let Some(label) = uniform_label(trailing) {
        counts.bump(label);
    }

    counts
}

fn uniform_label(labels: &[Label]) -> Option<Label> {
    let first = *labels.first()?;
    labels.iter().all(|&l| l == first).then_some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::Label::{Background as B, Female as F, Male as M};

    #[test]
    fn test_uniform_female_sequence() {
        let labels = [F; 8];
        let counts = count_runs(&labels, 4, BoundaryCheck::Reference);
        // 4 windows + leading twice + trailing once
        assert_eq!(counts.get(F), 7);
        assert_eq!(counts.verdict(), Verdict::Female);
    }

    #[test]
    fn test_uniform_sequence_at_exact_run_length() {
        // No window fits, the edge checks still register the run
        let counts = count_runs(&[M; 4], 4, BoundaryCheck::Reference);
        assert_eq!(counts.get(M), 3);
        assert_eq!(counts.verdict(), Verdict::Male);
    }

    #[test]
    fn test_reference_counts_leading_edge_twice() {
        let labels = [F, F, F, B, B, B, B, M, M, M];
        let reference = count_runs(&labels, 4, BoundaryCheck::Reference);
        let single = count_runs(&labels, 4, BoundaryCheck::Single);

        assert_eq!(reference.get(F), 2);
        assert_eq!(single.get(F), 1);
        assert_eq!(reference.get(M), 1);
        assert_eq!(single.get(M), 1);
        assert_eq!(reference.verdict(), Verdict::MaleAndFemale);
        assert_eq!(single.verdict(), reference.verdict());
    }

    #[test]
    fn test_leading_edge_only_run() {
        let labels = [M, M, M, B, B, B, B, B, B];
        let counts = count_runs(&labels, 4, BoundaryCheck::Single);
        assert_eq!(counts.get(M), 1);
        assert_eq!(counts.verdict(), Verdict::Male);
    }

    #[test]
    fn test_alternating_labels() {
        let labels = [F, M, F, M, F, M, F, M];
        let counts = count_runs(&labels, 4, BoundaryCheck::Reference);
        assert_eq!(counts.verdict(), Verdict::None);
        assert_eq!(counts.get(F), 0);
        assert_eq!(counts.get(M), 0);
    }

    #[test]
    fn test_background_runs_do_not_affect_verdict() {
        let labels = [B; 10];
        let counts = count_runs(&labels, 4, BoundaryCheck::Reference);
        assert!(counts.get(B) > 0);
        assert_eq!(counts.verdict(), Verdict::None);
    }

    #[test]
    fn test_too_short_sequence() {
        assert_eq!(count_runs(&[], 4, BoundaryCheck::Reference), RunCounts::default());
        assert_eq!(
            count_runs(&[F, F], 1, BoundaryCheck::Reference).verdict(),
            Verdict::None
        );
    }

    #[test]
    fn test_last_window_is_not_tested() {
        // A run of four at the very end is only seen by the trailing check
        let labels = [B, B, B, B, F, B, F, F, F, F];
        let counts = count_runs(&labels, 4, BoundaryCheck::Reference);
        assert_eq!(counts.get(F), 1);
    }
}
