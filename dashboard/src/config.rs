//! Configuration module

use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Events CSV
    pub data_path: PathBuf,

    /// Year preselected in the dropdown; `None` shows every year
    pub default_year: Option<i32>,
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

            port: var("PORT").and_then(|p| p.parse().ok()).unwrap_or(8050),

            data_path: var("DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("processed_data magType.csv")),

            // unset -> 2024, empty -> no preselection
            default_year: match var("DEFAULT_YEAR") {
                None => Some(2024),
                Some(v) => v.trim().parse().ok(),
            },
        }
    }
}
