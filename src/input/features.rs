//! Feature matrix parsing.
//!
//! Feature files are headerless CSV, one row of numbers per segment. Empty
//! cells and `nan`/`inf` values are accepted; the classifier zeroes them
//! before scaling.

use crate::error::{Error, Result};
use crate::model::FeatureMatrix;
use std::path::Path;

/// Read a feature matrix from a CSV file.
pub fn read_features(path: &Path) -> Result<FeatureMatrix> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::InputRead {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut rows = Vec::new();

    for (line_num, result) in reader.records().enumerate() {
        let record = result.map_err(|e| Error::InputRead {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        let row = record
            .iter()
            .enumerate()
            .map(|(col, field)| parse_value(field, line_num + 1, col + 1))
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    FeatureMatrix::from_rows(rows)
}

fn parse_value(field: &str, line: usize, col: usize) -> Result<f64> {
    if field.is_empty() {
        return Ok(f64::NAN);
    }
    field.parse().map_err(|_| Error::InvalidInput {
        message: format!("line {line}, column {col}: '{field}' is not a number"),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_features() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1.0, 2.5, -3").unwrap();
        writeln!(file, "nan,,inf").unwrap();
        file.flush().unwrap();

        let features = read_features(file.path()).unwrap();
        assert_eq!(features.n_rows(), 2);
        assert_eq!(features.n_cols(), 3);

        let second: Vec<f64> = features.rows().nth(1).unwrap().to_vec();
        assert!(second[0].is_nan());
        assert!(second[1].is_nan());
        assert!(second[2].is_infinite());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1,2,3").unwrap();
        writeln!(file, "4,5").unwrap();
        file.flush().unwrap();

        assert!(read_features(file.path()).is_err());
    }

    #[test]
    fn test_non_numeric_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1,abc").unwrap();
        file.flush().unwrap();

        assert!(matches!(
            read_features(file.path()),
            Err(Error::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = read_features(Path::new("nonexistent.features.csv"));
        assert!(matches!(result, Err(Error::InputRead { .. })));
    }
}
