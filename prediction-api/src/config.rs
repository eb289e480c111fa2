//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::validation::ValidationMode;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Path to the model artifact (.onnx or .json)
    pub model_path: PathBuf,

    /// What to do with well-typed but out-of-domain inputs
    pub input_validation: ValidationMode,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),

            port: var("PORT").and_then(|p| p.parse().ok()).unwrap_or(8000),

            model_path: var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("earthquake_model.onnx")),

            input_validation: var("INPUT_VALIDATION")
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
        }
    }
}
