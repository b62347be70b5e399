//! Pre-trained call classifier and feature scaler.
//!
//! The detection logic only depends on the [`FeatureScaler`] and
//! [`CallModel`] traits. [`OnnxScaler`] and [`OnnxModel`] run the exported
//! scikit-learn scaler and classifier through ONNX Runtime.

mod classifier;
mod matrix;
mod onnx;

pub use classifier::CallClassifier;
pub use matrix::FeatureMatrix;
pub use onnx::{OnnxModel, OnnxScaler};

use crate::detection::Label;
use crate::error::Result;

/// Feature rescaling fitted at training time.
pub trait FeatureScaler {
    /// Number of columns the scaler was fitted on.
    fn n_features(&self) -> usize;

    /// Rescale every row.
    fn transform(&self, features: &FeatureMatrix) -> Result<FeatureMatrix>;
}

/// Per-segment classifier.
pub trait CallModel {
    /// Number of columns the model was trained on.
    fn n_features(&self) -> usize;

    /// Predict one label per row.
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Label>>;
}
