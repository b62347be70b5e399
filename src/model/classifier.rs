//! Classifier wrapper pairing a scaler with a call model.

use super::{CallModel, FeatureMatrix, FeatureScaler, OnnxModel, OnnxScaler};
use crate::constants::{MODEL_FILE_NAME, SCALER_FILE_NAME};
use crate::detection::Label;
use crate::error::{Error, Result};
use std::path::Path;
use tracing::{debug, info};

/// Scaler and classifier used together to label segments.
pub struct CallClassifier {
    scaler: Box<dyn FeatureScaler>,
    model: Box<dyn CallModel>,
}

impl CallClassifier {
    /// Pair a scaler with a model.
    ///
    /// Fails if they were fitted on different feature counts.
    pub fn new(scaler: Box<dyn FeatureScaler>, model: Box<dyn CallModel>) -> Result<Self> {
        if scaler.n_features() != model.n_features() {
            return Err(Error::InvalidFeatureShape {
                expected: model.n_features(),
                actual: scaler.n_features(),
            });
        }
        Ok(Self { scaler, model })
    }

    /// Load `scaler.onnx` and `model.onnx` from a model directory.
    pub fn from_directory(dir: &Path) -> Result<Self> {
        let scaler_path = dir.join(SCALER_FILE_NAME);
        let model_path = dir.join(MODEL_FILE_NAME);

        let scaler = OnnxScaler::from_file(&scaler_path)?;
        let model = OnnxModel::from_file(&model_path)?;

        if scaler.n_features() != model.n_features() {
            return Err(Error::ModelLoad {
                path: model_path,
                source: format!(
                    "model expects {} features but scaler was fitted on {}",
                    model.n_features(),
                    scaler.n_features()
                )
                .into(),
            });
        }

        info!(
            "Loaded model from {} ({} features)",
            dir.display(),
            model.n_features()
        );

        Self::new(Box::new(scaler), Box::new(model))
    }

    /// Number of features per segment.
    pub fn n_features(&self) -> usize {
        self.model.n_features()
    }

    /// Zero out non-finite values, then apply the fitted rescaling.
    pub fn scale(&self, features: &FeatureMatrix) -> Result<FeatureMatrix> {
        self.check_width(features)?;
        self.scaler.transform(&features.finite_or_zero())
    }

    /// Predict a label for each scaled row.
    pub fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Label>> {
        self.check_width(features)?;
        let labels = self.model.predict(features)?;
        debug!("Predicted {} segment labels", labels.len());
        Ok(labels)
    }

    fn check_width(&self, features: &FeatureMatrix) -> Result<()> {
        if features.n_rows() > 0 && features.n_cols() != self.n_features() {
            return Err(Error::InvalidFeatureShape {
                expected: self.n_features(),
                actual: features.n_cols(),
            });
        }
        Ok(())
    }
}
