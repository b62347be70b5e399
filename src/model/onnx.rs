//! ONNX Runtime backed scaler and classifier.
//!
//! Both graphs take a single `float32 [N, n_features]` input whose feature
//! dimension is fixed. The scaler's first output is the rescaled matrix and
//! the classifier's first output is the `int64 [N]` class tag, which is the
//! layout scikit-learn exports produce.

use super::{CallModel, FeatureMatrix, FeatureScaler};
use crate::detection::Label;
use crate::error::{Error, Result};
use ort::session::Session;
use ort::value::{DynValue, TensorRef, ValueType};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// A loaded ONNX graph with a fixed feature width.
struct OnnxGraph {
    session: Mutex<Session>,
    path: PathBuf,
    n_features: usize,
}

impl OnnxGraph {
    fn load(path: &Path) -> Result<Self> {
        // Checked first so a missing file never touches the runtime library
        if !path.is_file() {
            return Err(Error::ModelLoad {
                path: path.to_path_buf(),
                source: "file not found".into(),
            });
        }

        let load_error = |e: ort::Error| Error::ModelLoad {
            path: path.to_path_buf(),
            source: Box::new(e),
        };
        let session = Session::builder()
            .map_err(load_error)?
            .commit_from_file(path)
            .map_err(load_error)?;

        let n_features = fixed_feature_count(&session).ok_or_else(|| Error::ModelLoad {
            path: path.to_path_buf(),
            source: "first input must be a [N, n_features] tensor with fixed n_features".into(),
        })?;

        debug!(
            "Loaded ONNX graph {} ({} inputs, {} outputs, {} features)",
            path.display(),
            session.inputs().len(),
            session.outputs().len(),
            n_features
        );

        Ok(Self {
            session: Mutex::new(session),
            path: path.to_path_buf(),
            n_features,
        })
    }

    fn check_width(&self, features: &FeatureMatrix) -> Result<()> {
        if features.n_cols() != self.n_features {
            return Err(Error::InvalidFeatureShape {
                expected: self.n_features,
                actual: features.n_cols(),
            });
        }
        Ok(())
    }

    /// Run the graph on `features` and hand its first output to `extract`.
    fn run<R>(
        &self,
        features: &FeatureMatrix,
        extract: impl FnOnce(&DynValue) -> ort::Result<R>,
    ) -> Result<R> {
        #[allow(clippy::cast_possible_truncation)]
        let input: Vec<f32> = features.values().iter().map(|&v| v as f32).collect();
        let tensor =
            TensorRef::from_array_view(([features.n_rows(), features.n_cols()], input.as_slice()))
                .map_err(|e| self.inference_error(e))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| self.inference_error("session mutex poisoned"))?;
        let outputs = session
            .run(ort::inputs![tensor])
            .map_err(|e| self.inference_error(e))?;
        if outputs.len() == 0 {
            return Err(self.inference_error("model produced no outputs"));
        }

        extract(&outputs[0]).map_err(|e| self.inference_error(e))
    }

    fn inference_error(&self, reason: impl Display) -> Error {
        Error::Inference {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

fn fixed_feature_count(session: &Session) -> Option<usize> {
    let input = session.inputs().first()?;
    match input.dtype() {
        ValueType::Tensor { shape, .. } => shape
            .last()
            .and_then(|&dim| usize::try_from(dim).ok())
            .filter(|&n| n > 0),
        _ => None,
    }
}

/// Feature scaler exported to ONNX.
pub struct OnnxScaler {
    graph: OnnxGraph,
}

impl OnnxScaler {
    /// Load a scaler graph.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self {
            graph: OnnxGraph::load(path)?,
        })
    }
}

impl FeatureScaler for OnnxScaler {
    fn n_features(&self) -> usize {
        self.graph.n_features
    }

    fn transform(&self, features: &FeatureMatrix) -> Result<FeatureMatrix> {
        if features.n_rows() == 0 {
            return Ok(features.clone());
        }
        self.graph.check_width(features)?;

        let (shape, values) = self.graph.run(features, |output| {
            let (shape, data) = output.try_extract_tensor::<f32>()?;
            Ok((
                shape.iter().copied().collect::<Vec<i64>>(),
                data.iter().map(|&v| f64::from(v)).collect::<Vec<f64>>(),
            ))
        })?;

        let n_rows = i64::try_from(features.n_rows()).ok();
        let n_cols = i64::try_from(features.n_cols()).ok();
        if shape.first().copied() != n_rows || shape.last().copied() != n_cols {
            return Err(self.graph.inference_error(format!(
                "scaler output shape {shape:?} does not match input [{}, {}]",
                features.n_rows(),
                features.n_cols()
            )));
        }

        FeatureMatrix::from_flat(values, features.n_cols())
    }
}

/// Segment classifier exported to ONNX.
pub struct OnnxModel {
    graph: OnnxGraph,
}

impl OnnxModel {
    /// Load a classifier graph.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self {
            graph: OnnxGraph::load(path)?,
        })
    }
}

impl CallModel for OnnxModel {
    fn n_features(&self) -> usize {
        self.graph.n_features
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Label>> {
        if features.n_rows() == 0 {
            return Ok(Vec::new());
        }
        self.graph.check_width(features)?;

        let tags = self.graph.run(features, |output| {
            let (_, data) = output.try_extract_tensor::<i64>()?;
            Ok(data.to_vec())
        })?;

        if tags.len() != features.n_rows() {
            return Err(self.graph.inference_error(format!(
                "model returned {} labels for {} rows",
                tags.len(),
                features.n_rows()
            )));
        }

        tags.into_iter()
            .map(|tag| Label::try_from(tag).map_err(|reason| self.graph.inference_error(reason)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_scaler_file() {
        let result = OnnxScaler::from_file(Path::new("/nonexistent/scaler.onnx"));
        assert!(matches!(result, Err(Error::ModelLoad { .. })));
    }

    #[test]
    fn test_missing_model_file() {
        let result = OnnxModel::from_file(Path::new("/nonexistent/model.onnx"));
        assert!(matches!(result, Err(Error::ModelLoad { .. })));
    }
}
