//! End-to-end processing of recordings on disk with a stand-in classifier.

#![allow(clippy::unwrap_used)]

use kiwi_finder::Result;
use kiwi_finder::config::{DetectionConfig, OutputFormat};
use kiwi_finder::detection::{KiwiFinder, Label, Verdict};
use kiwi_finder::input::segments_path_for;
use kiwi_finder::model::{CallClassifier, CallModel, FeatureMatrix, FeatureScaler};
use kiwi_finder::output::JsonReportFile;
use kiwi_finder::pipeline::{collect_input_files, output_path_for, process_recording};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct IdentityScaler;

impl FeatureScaler for IdentityScaler {
    fn n_features(&self) -> usize {
        2
    }

    fn transform(&self, features: &FeatureMatrix) -> Result<FeatureMatrix> {
        Ok(features.clone())
    }
}

/// Female when the first feature dominates, male when the second does.
struct DominantFeatureModel;

impl CallModel for DominantFeatureModel {
    fn n_features(&self) -> usize {
        2
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Label>> {
        Ok(features
            .rows()
            .map(|row| match (row[0] > 0.5, row[1] > 0.5) {
                (true, false) => Label::Female,
                (false, true) => Label::Male,
                _ => Label::Background,
            })
            .collect())
    }
}

fn finder() -> KiwiFinder {
    let classifier =
        CallClassifier::new(Box::new(IdentityScaler), Box::new(DominantFeatureModel)).unwrap();
    KiwiFinder::new(classifier, DetectionConfig::default())
}

/// Six female segments then two background ones, one second each.
fn write_recording(dir: &Path, name: &str) -> PathBuf {
    let mut features = String::new();
    for _ in 0..6 {
        features.push_str("2,0\n");
    }
    features.push_str("0,0\n0,0\n");
    let features_path = dir.join(format!("{name}.features.csv"));
    fs::write(&features_path, features).unwrap();

    let mut segments = String::from("start,end\n");
    for i in 0..8 {
        segments.push_str(&format!("{i},{}\n", i + 1));
    }
    fs::write(dir.join(format!("{name}.segments.csv")), segments).unwrap();

    features_path
}

#[test]
fn test_writes_candidate_table() {
    let dir = TempDir::new().unwrap();
    let features = write_recording(dir.path(), "night");
    let mut finder = finder();

    let result = process_recording(
        &features,
        &segments_path_for(&features),
        dir.path(),
        &mut finder,
        1.0,
        &[OutputFormat::Csv],
    )
    .unwrap();

    assert_eq!(result.verdict, Verdict::Female);
    assert_eq!(result.candidates, 2);
    assert_eq!(result.segments, 8);

    let table = fs::read_to_string(dir.path().join("night.kiwi.candidates.csv")).unwrap();
    let mut lines = table.lines();
    assert_eq!(lines.next(), Some("Start (s),End (s),Sex,Density,File"));
    // Full scan, then the leading edge
    assert!(lines.next().unwrap().starts_with("0.00,6.00,female,1.000,"));
    assert!(lines.next().unwrap().starts_with("0.00,3.00,female,1.000,"));
    assert_eq!(lines.next(), None);
    assert_eq!(finder.tally().count(Verdict::Female), 1);
}

#[test]
fn test_writes_json_report_to_output_dir() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let features = write_recording(dir.path(), "night");
    let out_dir = out.path().join("reports");

    process_recording(
        &features,
        &segments_path_for(&features),
        &out_dir,
        &mut finder(),
        1.0,
        &[OutputFormat::Json],
    )
    .unwrap();

    let json_path = output_path_for(&features, &out_dir, OutputFormat::Json);
    let report: JsonReportFile =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(report.source_file, "night.features.csv");
    assert_eq!(report.verdict, Verdict::Female);
    assert_eq!(report.summary.female_candidates, 2);
    assert_eq!(report.summary.male_candidates, 0);
    assert!(!dir.path().join("night.kiwi.json").exists());
}

#[test]
fn test_row_count_mismatch_is_rejected() {
    let dir = TempDir::new().unwrap();
    let features = write_recording(dir.path(), "night");
    fs::write(dir.path().join("night.segments.csv"), "start,end\n0,1\n").unwrap();

    let result = process_recording(
        &features,
        &segments_path_for(&features),
        dir.path(),
        &mut finder(),
        1.0,
        &[OutputFormat::Csv],
    );

    assert!(matches!(
        result,
        Err(kiwi_finder::Error::SegmentCountMismatch {
            labels: 8,
            segments: 1
        })
    ));
    assert!(!dir.path().join("night.kiwi.candidates.csv").exists());
}

#[test]
fn test_missing_segments_file_is_input_error() {
    let dir = TempDir::new().unwrap();
    let features = write_recording(dir.path(), "night");
    fs::remove_file(dir.path().join("night.segments.csv")).unwrap();

    let result = process_recording(
        &features,
        &segments_path_for(&features),
        dir.path(),
        &mut finder(),
        1.0,
        &[OutputFormat::Csv],
    );

    assert!(matches!(
        result,
        Err(kiwi_finder::Error::InputRead { ref path, .. }) if path.ends_with("night.segments.csv")
    ));
}

#[test]
fn test_directory_input_finds_feature_files() {
    let dir = TempDir::new().unwrap();
    let site = dir.path().join("site2");
    fs::create_dir(&site).unwrap();
    write_recording(dir.path(), "night");
    write_recording(&site, "dawn");

    let files = collect_input_files(&[dir.path().to_path_buf()]).unwrap();
    assert_eq!(files.len(), 2);

    let mut finder = finder();
    for file in &files {
        let parent = file.parent().unwrap();
        process_recording(
            file,
            &segments_path_for(file),
            parent,
            &mut finder,
            1.0,
            &[OutputFormat::Csv],
        )
        .unwrap();
    }

    assert!(dir.path().join("night.kiwi.candidates.csv").exists());
    assert!(site.join("dawn.kiwi.candidates.csv").exists());
    assert_eq!(finder.tally().total(), 2);
}
