//! Segment time mapping parsing.

use crate::detection::TimeRange;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Internal record for CSV deserialization.
#[derive(Debug, Deserialize)]
struct SegmentRecord {
    start: f64,
    end: f64,
}

/// Read the segment time mapping from a CSV file with a `start,end` header.
///
/// Rows must be finite with `end >= start`. Returns `Ok(vec![])` for a
/// header-only file.
pub fn read_segments(path: &Path) -> Result<Vec<TimeRange>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::InputRead {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut segments = Vec::new();

    for (line_num, result) in reader.deserialize::<SegmentRecord>().enumerate() {
        let record = result.map_err(|e| Error::InvalidInput {
            message: format!("line {}: {e}", line_num + 2),
        })?;

        if !record.start.is_finite() || !record.end.is_finite() || record.end < record.start {
            return Err(Error::InvalidInput {
                message: format!(
                    "line {}: invalid segment {}..{}",
                    line_num + 2,
                    record.start,
                    record.end
                ),
            });
        }

        segments.push(TimeRange::new(record.start, record.end));
    }

    Ok(segments)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_segments() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "start,end").unwrap();
        writeln!(file, "0.0,1.5").unwrap();
        writeln!(file, " 1.5 , 3.0 ").unwrap();
        file.flush().unwrap();

        let segments = read_segments(file.path()).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].start, 1.5);
        assert_eq!(segments[1].end, 3.0);
    }

    #[test]
    fn test_header_only() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "start,end").unwrap();
        file.flush().unwrap();

        assert!(read_segments(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_reversed_segment_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "start,end").unwrap();
        writeln!(file, "3.0,1.0").unwrap();
        file.flush().unwrap();

        let result = read_segments(file.path());
        assert!(matches!(result, Err(Error::InvalidInput { .. })));
    }

    #[test]
    fn test_missing_column() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "start").unwrap();
        writeln!(file, "1.0").unwrap();
        file.flush().unwrap();

        assert!(read_segments(file.path()).is_err());
    }
}
