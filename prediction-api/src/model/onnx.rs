//! ONNX Runtime backend
//!
//! Expects a regressor exported with a single `float32[1, 6]` input and a
//! float output (the usual shape of a scikit-learn model converted with
//! skl2onnx).

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::{FeatureRow, MagnitudeModel, ModelError, ModelFormat, FEATURE_COUNT};

pub struct OnnxModel {
    // Session::run needs exclusive access
    session: Mutex<Session>,
    output_name: String,
}

impl OnnxModel {
    pub fn from_bytes(model_bytes: &[u8]) -> Result<Self, ModelError> {
        tracing::debug!("Building ONNX session ({} bytes)", model_bytes.len());

        let session = Session::builder()
            .map_err(|e| ModelError::Runtime(format!("Session builder error: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelError::Runtime(format!("Optimization error: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| ModelError::InvalidArtifact(format!("Load from memory error: {}", e)))?;

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| ModelError::InvalidArtifact("No output defined".to_string()))?;

        Ok(Self {
            session: Mutex::new(session),
            output_name,
        })
    }
}

impl MagnitudeModel for OnnxModel {
    fn predict(&self, row: &FeatureRow) -> Result<f64, ModelError> {
        let features: Vec<f32> = row.to_array().iter().map(|&v| v as f32).collect();

        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), features)
            .map_err(|e| ModelError::Runtime(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ModelError::Runtime(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ModelError::Runtime(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(self.output_name.as_str())
            .ok_or(ModelError::EmptyOutput)?;

        let (_, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| ModelError::Runtime(format!("Extract error: {}", e)))?;

        let magnitude = data.first().copied().ok_or(ModelError::EmptyOutput)?;
        Ok(f64::from(magnitude))
    }

    fn format(&self) -> ModelFormat {
        ModelFormat::Onnx
    }
}
