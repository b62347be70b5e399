//! Merging of overlapping candidates.

use super::Candidate;

/// Merge candidates whose time ranges overlap or touch.
///
/// The output is sorted by start time. A merged candidate spans the union of
/// its members and keeps the highest density among them.
pub fn merge_overlapping(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut merged: Vec<Candidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match merged.last_mut() {
            Some(current) if candidate.start <= current.end => {
                current.end = current.end.max(candidate.end);
                current.density = current.density.max(candidate.density);
            }
            _ => merged.push(candidate),
        }
    }

    merged
}
