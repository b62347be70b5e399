//! JSON report writer.

use crate::config::DetectionConfig;
use crate::detection::{BoundaryCheck, Sex, SubWindowIndexing, Verdict};
use crate::error::{Error, Result};
use crate::output::{CallEvent, OutputWriter};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// JSON report file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReportFile {
    /// Source features file name.
    pub source_file: String,
    /// Analysis timestamp.
    pub analysis_date: DateTime<Utc>,
    /// Whole-recording verdict.
    pub verdict: Verdict,
    /// Analysis settings.
    pub settings: JsonSettings,
    /// Detected call bursts.
    pub candidates: Vec<JsonCandidate>,
    /// Summary statistics.
    pub summary: JsonSummary,
}

/// Analysis settings for JSON output.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSettings {
    /// Calls-per-time normalizing rate.
    pub rate: f64,
    /// Density threshold.
    pub min_calls_density: f64,
    /// Run length for the full-recording scan.
    pub min_run_length: usize,
    /// Run length for the edge scans.
    pub border_run_length: usize,
    /// Edge counting mode.
    pub boundary_check: BoundaryCheck,
    /// Sub-window placement for sparse regions.
    pub subwindow_indexing: SubWindowIndexing,
    /// Whether overlapping candidates were merged.
    pub merge_overlapping: bool,
}

/// Single call burst in JSON format.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonCandidate {
    /// Sex of the calling bird.
    pub sex: Sex,
    /// Start time in seconds.
    pub start_time: f64,
    /// End time in seconds.
    pub end_time: f64,
    /// Call density.
    pub density: f64,
}

/// Summary statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSummary {
    /// Total number of candidates.
    pub total_candidates: usize,
    /// Number of female candidates.
    pub female_candidates: usize,
    /// Number of male candidates.
    pub male_candidates: usize,
    /// Number of analyzed segments.
    pub segments: usize,
}

/// Writer for JSON report files.
pub struct JsonReportWriter {
    events: Vec<CallEvent>,
    output_path: PathBuf,
    source_file: String,
    verdict: Verdict,
    rate: f64,
    settings: DetectionConfig,
    segments: usize,
}

impl JsonReportWriter {
    /// Create a new JSON report writer.
    ///
    /// # Arguments
    ///
    /// * `output_path` - Path to write the JSON file
    /// * `source_file` - Name of the source features file
    /// * `verdict` - Whole-recording verdict
    /// * `rate` - Rate used for density computation
    /// * `settings` - Detection settings used
    /// * `segments` - Number of analyzed segments
    pub fn new(
        output_path: &Path,
        source_file: &str,
        verdict: Verdict,
        rate: f64,
        settings: DetectionConfig,
        segments: usize,
    ) -> Self {
        Self {
            events: Vec::new(),
            output_path: output_path.to_path_buf(),
            source_file: source_file.to_string(),
            verdict,
            rate,
            settings,
            segments,
        }
    }

    fn compute_summary(&self) -> JsonSummary {
        let females = self.events.iter().filter(|e| e.sex == Sex::Female).count();

        JsonSummary {
            total_candidates: self.events.len(),
            female_candidates: females,
            male_candidates: self.events.len() - females,
            segments: self.segments,
        }
    }
}

impl OutputWriter for JsonReportWriter {
    fn write_header(&mut self) -> Result<()> {
        // Written at finalize
        Ok(())
    }

    fn write_event(&mut self, event: &CallEvent) -> Result<()> {
        self.events.push(event.clone());
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let candidates = self
            .events
            .iter()
            .map(|e| JsonCandidate {
                sex: e.sex,
                start_time: e.start_time,
                end_time: e.end_time,
                density: e.density,
            })
            .collect();

        let report = JsonReportFile {
            source_file: self.source_file.clone(),
            analysis_date: Utc::now(),
            verdict: self.verdict,
            settings: JsonSettings {
                rate: self.rate,
                min_calls_density: self.settings.min_calls_density,
                min_run_length: self.settings.min_run_length,
                border_run_length: self.settings.border_run_length,
                boundary_check: self.settings.boundary_check,
                subwindow_indexing: self.settings.subwindow_indexing,
                merge_overlapping: self.settings.merge_overlapping,
            },
            candidates,
            summary: self.compute_summary(),
        };

        let file = File::create(&self.output_path).map_err(|e| Error::OutputWrite {
            path: self.output_path.clone(),
            source: e,
        })?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &report).map_err(|e| Error::JsonWrite {
            path: self.output_path.clone(),
            source: e,
        })?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn event(sex: Sex, start: f64) -> CallEvent {
        CallEvent {
            file_path: PathBuf::from("night.features.csv"),
            sex,
            start_time: start,
            end_time: start + 4.0,
            density: 1.0,
        }
    }

    #[test]
    fn test_json_writer_basic() {
        let dir = tempdir().unwrap();
        let output_path = dir.path().join("night.kiwi.json");

        let mut writer = JsonReportWriter::new(
            &output_path,
            "night.features.csv",
            Verdict::MaleAndFemale,
            1.0,
            DetectionConfig::default(),
            40,
        );
        writer.write_header().unwrap();
        writer.write_event(&event(Sex::Female, 0.0)).unwrap();
        writer.write_event(&event(Sex::Male, 10.0)).unwrap();
        writer.write_event(&event(Sex::Male, 20.0)).unwrap();
        writer.finalize().unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        let report: JsonReportFile = serde_json::from_str(&content).unwrap();

        assert_eq!(report.source_file, "night.features.csv");
        assert_eq!(report.verdict, Verdict::MaleAndFemale);
        assert_eq!(report.candidates.len(), 3);
        assert_eq!(report.candidates[1].start_time, 10.0);
        assert_eq!(report.summary.female_candidates, 1);
        assert_eq!(report.summary.male_candidates, 2);
        assert_eq!(report.summary.segments, 40);
        assert_eq!(report.settings.min_calls_density, 0.5);
        assert!(content.contains("\"Male and Female\""));
    }

    #[test]
    fn test_json_writer_empty_report() {
        let dir = tempdir().unwrap();
        let output_path = dir.path().join("quiet.kiwi.json");

        let mut writer = JsonReportWriter::new(
            &output_path,
            "quiet.features.csv",
            Verdict::None,
            1.0,
            DetectionConfig::default(),
            0,
        );
        writer.finalize().unwrap();

        let report: JsonReportFile =
            serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
        assert_eq!(report.verdict, Verdict::None);
        assert!(report.candidates.is_empty());
    }
}
