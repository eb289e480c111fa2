//! Model artifact loading and inference
//!
//! The artifact is opaque to the rest of the service: it is loaded once at
//! startup and exposes a single capability, mapping one [`FeatureRow`] to a
//! predicted magnitude. Two on-disk formats are understood, chosen by file
//! extension:
//!
//! - `.onnx`: an exported regressor run through ONNX Runtime
//! - `.json`: a linear regression (intercept + per-feature coefficients)

mod linear;
mod onnx;

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

pub use linear::LinearModel;
pub use onnx::OnnxModel;

/// Number of input features
pub const FEATURE_COUNT: usize = 6;

/// Feature names, in the column order the model was trained on
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] =
    ["latitude", "longitude", "depth", "year", "month", "day"];

// ============================================================================
// FEATURE ROW
// ============================================================================

/// A single row of model input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow {
    pub latitude: f64,
    pub longitude: f64,
    pub depth: f64,
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

impl FeatureRow {
    /// Values in [`FEATURE_NAMES`] order
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.latitude,
            self.longitude,
            self.depth,
            f64::from(self.year),
            f64::from(self.month),
            f64::from(self.day),
        ]
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported model artifact {0}: expected a .onnx or .json file")]
    UnsupportedFormat(String),

    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("onnx runtime error: {0}")]
    Runtime(String),

    #[error("model produced no output")]
    EmptyOutput,
}

// ============================================================================
// BACKEND TRAIT
// ============================================================================

/// A loaded regressor backend
pub trait MagnitudeModel: Send + Sync {
    fn predict(&self, row: &FeatureRow) -> Result<f64, ModelError>;
    fn format(&self) -> ModelFormat;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    Onnx,
    Linear,
}

/// Artifact metadata reported by the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub format: ModelFormat,
    pub path: String,
    pub sha256: String,
    pub features: [&'static str; FEATURE_COUNT],
    pub loaded_at: DateTime<Utc>,
}

/// The process-wide model: a backend plus the metadata of the file it came from
pub struct LoadedModel {
    backend: Box<dyn MagnitudeModel>,
    info: ModelInfo,
}

impl LoadedModel {
    pub fn predict(&self, row: &FeatureRow) -> Result<f64, ModelError> {
        self.backend.predict(row)
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel").field("info", &self.info).finish()
    }
}

/// Load a model artifact from disk
pub fn load(path: &Path) -> Result<LoadedModel, ModelError> {
    let display = path.display().to_string();
    tracing::info!("Loading model artifact from: {}", path.display());

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let bytes = std::fs::read(path).map_err(|source| ModelError::Io {
        path: display.clone(),
        source,
    })?;

    let backend: Box<dyn MagnitudeModel> = match extension.as_deref() {
        Some("onnx") => Box::new(OnnxModel::from_bytes(&bytes)?),
        Some("json") => Box::new(LinearModel::from_json(&bytes)?),
        _ => return Err(ModelError::UnsupportedFormat(display)),
    };

    let info = ModelInfo {
        format: backend.format(),
        path: display,
        sha256: hex::encode(Sha256::digest(&bytes)),
        features: FEATURE_NAMES,
        loaded_at: Utc::now(),
    };

    tracing::info!(
        "Model loaded ({:?}, sha256={})",
        info.format,
        &info.sha256[..12]
    );

    Ok(LoadedModel { backend, info })
}

#[cfg(test)]
pub(crate) const LINEAR_ARTIFACT: &str = r#"{
    "intercept": 2.5,
    "coefficients": {
        "latitude": 0.01,
        "longitude": -0.002,
        "depth": 0.03,
        "year": 0.0001,
        "month": 0.05,
        "day": -0.01
    }
}"#;

/// In-memory linear model for handler tests
#[cfg(test)]
pub(crate) fn test_model() -> LoadedModel {
    let backend = LinearModel::from_json(LINEAR_ARTIFACT.as_bytes()).unwrap();
    LoadedModel {
        info: ModelInfo {
            format: backend.format(),
            path: "<memory>".to_string(),
            sha256: hex::encode(Sha256::digest(LINEAR_ARTIFACT.as_bytes())),
            features: FEATURE_NAMES,
            loaded_at: Utc::now(),
        },
        backend: Box::new(backend),
    }
}
