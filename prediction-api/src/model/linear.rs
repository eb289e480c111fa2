//! Linear regression backend
//!
//! Artifact layout:
//!
//! ```json
//! {
//!   "intercept": 2.31,
//!   "coefficients": { "latitude": 0.004, "longitude": -0.001, "depth": 0.01,
//!                     "year": 0.0002, "month": 0.01, "day": -0.001 }
//! }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{FeatureRow, MagnitudeModel, ModelError, ModelFormat, FEATURE_COUNT, FEATURE_NAMES};

#[derive(Debug, Deserialize)]
struct LinearArtifact {
    intercept: f64,
    coefficients: BTreeMap<String, f64>,
}

/// `intercept + sum(coefficient_i * feature_i)`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    intercept: f64,
    coefficients: [f64; FEATURE_COUNT],
}

impl LinearModel {
    pub fn new(intercept: f64, coefficients: [f64; FEATURE_COUNT]) -> Self {
        Self {
            intercept,
            coefficients,
        }
    }

    /// Parse a JSON artifact; every feature needs a coefficient and unknown names are rejected
    pub fn from_json(bytes: &[u8]) -> Result<Self, ModelError> {
        let artifact: LinearArtifact = serde_json::from_slice(bytes)
            .map_err(|e| ModelError::InvalidArtifact(e.to_string()))?;

        if let Some(unknown) = artifact
            .coefficients
            .keys()
            .find(|name| !FEATURE_NAMES.contains(&name.as_str()))
        {
            return Err(ModelError::InvalidArtifact(format!(
                "unknown feature '{}'",
                unknown
            )));
        }

        let mut coefficients = [0.0; FEATURE_COUNT];
        for (slot, name) in coefficients.iter_mut().zip(FEATURE_NAMES) {
            *slot = *artifact.coefficients.get(name).ok_or_else(|| {
                ModelError::InvalidArtifact(format!("missing coefficient for '{}'", name))
            })?;
        }

        Ok(Self::new(artifact.intercept, coefficients))
    }
}

impl MagnitudeModel for LinearModel {
    fn predict(&self, row: &FeatureRow) -> Result<f64, ModelError> {
        let weighted: f64 = row
            .to_array()
            .iter()
            .zip(self.coefficients.iter())
            .map(|(x, w)| x * w)
            .sum();
        Ok(self.intercept + weighted)
    }

    fn format(&self) -> ModelFormat {
        ModelFormat::Linear
    }
}
