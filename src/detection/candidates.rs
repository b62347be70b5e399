//! Candidate call-burst extraction.

use super::{Candidate, Region, TimeRange};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Where the sparse-region rescan places its sub-windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubWindowIndexing {
    /// Sub-window offsets are used directly as segment indices and each
    /// sub-window is scored with the parent region's segment count.
    #[default]
    Raw,
    /// Sub-window offsets are relative to the start of the sparse region and
    /// each sub-window is scored with its own segment count.
    Region,
}

/// Thresholds for one extraction pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractParams {
    /// Normalizing calls-per-time constant.
    pub rate: f64,
    /// Minimum number of matching segments in a region.
    pub min_run_length: usize,
    /// Density a region must exceed to become a candidate.
    pub min_calls_density: f64,
    /// Sub-window placement for sparse regions.
    pub subwindow: SubWindowIndexing,
}

/// Find maximal runs of `true` in `condition`, in order.
pub fn contiguous_regions(condition: &[bool]) -> Vec<Region> {
    let mut regions = Vec::new();
    let mut run_start = None;

    for (idx, &value) in condition.iter().enumerate() {
        match (value, run_start) {
            (true, None) => run_start = Some(idx),
            (false, Some(start)) => {
                regions.push(Region { start, end: idx });
                run_start = None;
            }
            _ => {}
        }
    }

    if let Some(start) = run_start {
        regions.push(Region {
            start,
            end: condition.len(),
        });
    }

    regions
}

/// Turn matching segments into density-scored candidates.
///
/// `condition[i]` says whether segment `i` carries the target label and is
/// mapped to time through `segments[i]`. Regions shorter than
/// `min_run_length` are dropped. A region whose density does not exceed the
/// threshold is rescanned in windows of `min_run_length` segments, and those
/// sub-window candidates follow their parent region in the output. See
/// [`SubWindowIndexing`] for how sub-windows are placed and scored.
///
/// Regions spanning zero (or negative) time produce no candidate.
pub fn find_candidates(
    condition: &[bool],
    segments: &[TimeRange],
    params: &ExtractParams,
) -> Result<Vec<Candidate>> {
    if condition.len() > segments.len() {
        return Err(Error::SegmentCountMismatch {
            labels: condition.len(),
            segments: segments.len(),
        });
    }

    let mut candidates = Vec::new();

    for region in contiguous_regions(condition) {
        let length = region.len();
        if length < params.min_run_length {
            continue;
        }

        let Some(candidate) = score_window(segments, region.start, length, length, params.rate)
        else {
            warn!(
                "Skipping region {}..{}: zero-duration time span",
                region.start, region.end
            );
            continue;
        };

        if candidate.density > params.min_calls_density {
            candidates.push(candidate);
            continue;
        }

        debug!(
            "Region {}..{} too sparse (density {:.3}), rescanning",
            region.start, region.end, candidate.density
        );

        let calls = match params.subwindow {
            SubWindowIndexing::Raw => length,
            SubWindowIndexing::Region => params.min_run_length,
        };
        for offset in 0..length - params.min_run_length {
            let window_start = match params.subwindow {
                SubWindowIndexing::Raw => offset,
                SubWindowIndexing::Region => region.start + offset,
            };
            if let Some(sub) = score_window(
                segments,
                window_start,
                params.min_run_length,
                calls,
                params.rate,
            ) && sub.density > params.min_calls_density
            {
                candidates.push(sub);
            }
        }
    }

    Ok(candidates)
}

/// Map `length` segments starting at `first` to time and score `calls` over that span.
fn score_window(
    segments: &[TimeRange],
    first: usize,
    length: usize,
    calls: usize,
    rate: f64,
) -> Option<Candidate> {
    let last = first + length.checked_sub(1)?;
    let start = segments.get(first)?.start;
    let end = segments.get(last)?.end;
    let duration = end - start;

    if duration.is_nan() || duration <= 0.0 {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let density = rate * calls as f64 / duration;

    Some(Candidate {
        start,
        end,
        density,
    })
}
