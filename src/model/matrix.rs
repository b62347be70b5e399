//! Row-major feature matrix.

use crate::error::{Error, Result};

/// Feature vectors for a recording, one row per segment.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    data: Vec<f64>,
    n_cols: usize,
}

impl FeatureMatrix {
    /// Build a matrix from equally sized rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * n_cols);

        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(Error::InvalidInput {
                    message: format!(
                        "feature row {} has {} values, expected {n_cols}",
                        idx + 1,
                        row.len()
                    ),
                });
            }
            data.extend(row);
        }

        Ok(Self { data, n_cols })
    }

    /// Number of rows (segments).
    pub fn n_rows(&self) -> usize {
        if self.n_cols == 0 {
            0
        } else {
            self.data.len() / self.n_cols
        }
    }

    /// Number of columns (features per segment).
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on zero
        self.data.chunks_exact(self.n_cols.max(1))
    }

    /// Copy with every NaN and infinity replaced by zero.
    pub fn finite_or_zero(&self) -> Self {
        Self {
            data: self
                .data
                .iter()
                .map(|&v| if v.is_finite() { v } else { 0.0 })
                .collect(),
            n_cols: self.n_cols,
        }
    }

    /// Build a matrix from row-major values.
    pub fn from_flat(data: Vec<f64>, n_cols: usize) -> Result<Self> {
        let fits = if n_cols == 0 {
            data.is_empty()
        } else {
            data.len() % n_cols == 0
        };
        if !fits {
            return Err(Error::InvalidInput {
                message: format!("{} values do not fill rows of {n_cols}", data.len()),
            });
        }
        Ok(Self { data, n_cols })
    }

    /// All values in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.data
    }
}
