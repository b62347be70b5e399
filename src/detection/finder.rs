//! Kiwi call detection across a whole recording.

use super::candidates::{ExtractParams, find_candidates};
use super::merge::merge_overlapping;
use super::runs::count_runs;
use super::{CallEvents, Candidate, Label, Sex, TimeRange, Verdict, VerdictTally};
use crate::config::DetectionConfig;
use crate::error::{Error, Result};
use crate::model::{CallClassifier, FeatureMatrix};
use tracing::debug;

/// Labels segments and turns the labels into verdicts and call bursts.
///
/// Each finder keeps its own [`VerdictTally`]. Detection takes `&mut self`,
/// so a finder cannot be shared between threads without external locking;
/// give each worker its own instance instead.
pub struct KiwiFinder {
    classifier: CallClassifier,
    settings: DetectionConfig,
    tally: VerdictTally,
}

impl KiwiFinder {
    /// Create a finder around a loaded classifier.
    pub fn new(classifier: CallClassifier, settings: DetectionConfig) -> Self {
        Self {
            classifier,
            settings,
            tally: VerdictTally::default(),
        }
    }

    /// Detection settings in use.
    pub fn settings(&self) -> &DetectionConfig {
        &self.settings
    }

    /// Verdicts recorded so far.
    pub fn tally(&self) -> &VerdictTally {
        &self.tally
    }

    /// Label every segment of a raw feature matrix.
    pub fn find_individual_calls(&self, features: &FeatureMatrix) -> Result<Vec<Label>> {
        let scaled = self.classifier.scale(features)?;
        self.classifier.predict(&scaled)
    }

    /// Judge the labels with the given run length and record the verdict.
    pub fn look_for_consecutive_calls(
        &mut self,
        labels: &[Label],
        min_run_length: usize,
    ) -> Verdict {
        let counts = count_runs(labels, min_run_length, self.settings.boundary_check);
        let verdict = counts.verdict();
        debug!(
            "Run detection (min run {}): female={}, male={} -> {}",
            min_run_length,
            counts.get(Label::Female),
            counts.get(Label::Male),
            verdict
        );
        self.tally.record(verdict);
        verdict
    }

    /// Judge the labels, retrying with the relaxed run length if nothing is found.
    ///
    /// A retry records a second verdict in the tally.
    pub fn find_kiwi(&mut self, labels: &[Label]) -> Verdict {
        let verdict = self.look_for_consecutive_calls(labels, self.settings.min_run_length);
        if verdict != Verdict::None {
            return verdict;
        }
        self.look_for_consecutive_calls(labels, self.settings.relaxed_run_length)
    }

    /// Find female and male call bursts.
    ///
    /// Each sex is scanned over the full sequence and again over the leading
    /// and trailing edge segments with a shorter run requirement. Results are
    /// concatenated in that order and only merged when `merge_overlapping` is
    /// enabled.
    pub fn find_call_events(
        &self,
        labels: &[Label],
        segments: &[TimeRange],
        rate: f64,
    ) -> Result<CallEvents> {
        if labels.len() != segments.len() {
            return Err(Error::SegmentCountMismatch {
                labels: labels.len(),
                segments: segments.len(),
            });
        }

        let mut events = CallEvents::default();
        for sex in Sex::ALL {
            let mut found = self.find_sex_candidates(sex, labels, segments, rate)?;
            if self.settings.merge_overlapping {
                found = merge_overlapping(found);
            }
            debug!("Found {} {sex} candidate(s)", found.len());
            match sex {
                Sex::Female => events.females = found,
                Sex::Male => events.males = found,
            }
        }

        Ok(events)
    }

    fn find_sex_candidates(
        &self,
        sex: Sex,
        labels: &[Label],
        segments: &[TimeRange],
        rate: f64,
    ) -> Result<Vec<Candidate>> {
        let target = sex.label();
        let condition: Vec<bool> = labels.iter().map(|&l| l == target).collect();

        let full = self.params(rate, self.settings.min_run_length);
        let border = self.params(rate, self.settings.border_run_length);
        let edge = self.settings.border_run_length.min(labels.len());
        let tail = labels.len() - edge;

        let mut found = find_candidates(&condition, segments, &full)?;
        found.extend(find_candidates(&condition[..edge], &segments[..edge], &border)?);
        found.extend(find_candidates(&condition[tail..], &segments[tail..], &border)?);
        Ok(found)
    }

    fn params(&self, rate: f64, min_run_length: usize) -> ExtractParams {
        ExtractParams {
            rate,
            min_run_length,
            min_calls_density: self.settings.min_calls_density,
            subwindow: self.settings.subwindow_indexing,
        }
    }
}
