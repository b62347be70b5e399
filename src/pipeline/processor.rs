//! Single recording processing pipeline.

use crate::config::OutputFormat;
use crate::detection::{CallEvents, KiwiFinder, TimeRange, Verdict};
use crate::error::{Error, Result};
use crate::input::{read_features, read_segments};
use crate::output::{CallEvent, CsvWriter, JsonReportWriter, OutputWriter};
use crate::pipeline::output_path_for;
use std::path::Path;
use tracing::{debug, info};

/// Analyze one recording and write its reports.
///
/// # Arguments
///
/// * `features_path` - Feature matrix CSV for the recording
/// * `segments_path` - Segment time mapping CSV for the recording
/// * `output_dir` - Directory for report files
/// * `finder` - Finder used for labeling and detection
/// * `rate` - Calls-per-time normalizing rate
/// * `formats` - Report formats to write
pub fn process_recording(
    features_path: &Path,
    segments_path: &Path,
    output_dir: &Path,
    finder: &mut KiwiFinder,
    rate: f64,
    formats: &[OutputFormat],
) -> Result<ProcessResult> {
    use std::time::Instant;

    let start_time = Instant::now();

    info!("Processing: {}", features_path.display());

    let features = read_features(features_path)?;
    let segments = read_segments(segments_path)?;
    debug!(
        "Read {} feature rows and {} segments",
        features.n_rows(),
        segments.len()
    );

    if features.n_rows() != segments.len() {
        return Err(Error::SegmentCountMismatch {
            labels: features.n_rows(),
            segments: segments.len(),
        });
    }

    let labels = finder.find_individual_calls(&features)?;
    let verdict = finder.find_kiwi(&labels);
    let events = finder.find_call_events(&labels, &segments, rate)?;

    info!(
        "Verdict: {} ({} female, {} male candidate(s))",
        verdict,
        events.females.len(),
        events.males.len()
    );

    std::fs::create_dir_all(output_dir).map_err(|e| Error::OutputWrite {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    let report = Report {
        features_path,
        verdict,
        events: &events,
        segments: &segments,
        rate,
    };
    for format in formats {
        write_output(&report, finder, output_dir, *format)?;
    }

    let duration_secs = start_time.elapsed().as_secs_f64();
    debug!(
        "Processed {} segments in {:.3}s",
        segments.len(),
        duration_secs
    );

    Ok(ProcessResult {
        verdict,
        candidates: events.len(),
        segments: segments.len(),
        duration_secs,
    })
}

struct Report<'a> {
    features_path: &'a Path,
    verdict: Verdict,
    events: &'a CallEvents,
    segments: &'a [TimeRange],
    rate: f64,
}

/// Write call events to an output file.
fn write_output(
    report: &Report<'_>,
    finder: &KiwiFinder,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<()> {
    let output_path = output_path_for(report.features_path, output_dir, format);
    debug!("Writing {} output: {}", format, output_path.display());

    let mut writer: Box<dyn OutputWriter> = match format {
        OutputFormat::Csv => Box::new(CsvWriter::new(&output_path)?),
        OutputFormat::Json => {
            let source_file = report.features_path.file_name().map_or_else(
                || report.features_path.display().to_string(),
                |n| n.to_string_lossy().into_owned(),
            );
            Box::new(JsonReportWriter::new(
                &output_path,
                &source_file,
                report.verdict,
                report.rate,
                *finder.settings(),
                report.segments.len(),
            ))
        }
    };

    writer.write_header()?;
    for event in CallEvent::from_events(report.events, report.features_path) {
        writer.write_event(&event)?;
    }
    writer.finalize()?;

    Ok(())
}

/// Result of processing a single recording.
#[derive(Debug)]
pub struct ProcessResult {
    /// Whole-recording verdict.
    pub verdict: Verdict,
    /// Number of candidates found across both sexes.
    pub candidates: usize,
    /// Number of segments analyzed.
    pub segments: usize,
    /// Processing duration in seconds.
    pub duration_secs: f64,
}
