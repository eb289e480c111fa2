//! Prediction request/response models

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::model::FeatureRow;

/// Query parameters of `POST /predict/`
///
/// Deserialization only coerces types. The range checks below are run by
/// [`crate::validation`] according to the configured mode.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_calendar_date"))]
pub struct PredictionQuery {
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be within [-90, 90]"))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be within [-180, 180]"))]
    pub longitude: f64,

    pub depth: f64,

    #[serde(deserialize_with = "deserialize_whole_number")]
    pub year: i32,

    #[validate(range(min = 1, max = 12, message = "month must be within [1, 12]"))]
    #[serde(deserialize_with = "deserialize_whole_number")]
    pub month: i32,

    #[validate(range(min = 1, max = 31, message = "day must be within [1, 31]"))]
    #[serde(deserialize_with = "deserialize_whole_number")]
    pub day: i32,
}

/// Integer parameter that also accepts a zero fraction (`2024.0`)
fn deserialize_whole_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();

    if let Ok(value) = raw.parse::<i32>() {
        return Ok(value);
    }

    match raw.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX) => {
            Ok(v as i32)
        }
        _ => Err(de::Error::custom(format!(
            "invalid digit found in string '{}'",
            raw
        ))),
    }
}

fn validate_calendar_date(query: &PredictionQuery) -> Result<(), ValidationError> {
    let date = u32::try_from(query.month)
        .ok()
        .zip(u32::try_from(query.day).ok())
        .and_then(|(month, day)| NaiveDate::from_ymd_opt(query.year, month, day));

    match date {
        Some(_) => Ok(()),
        None => {
            let mut error = ValidationError::new("calendar_date");
            error.message = Some(Cow::from(format!(
                "{:04}-{:02}-{:02} is not a calendar date",
                query.year, query.month, query.day
            )));
            Err(error)
        }
    }
}

impl From<&PredictionQuery> for FeatureRow {
    fn from(query: &PredictionQuery) -> Self {
        FeatureRow {
            latitude: query.latitude,
            longitude: query.longitude,
            depth: query.depth,
            year: query.year,
            month: query.month,
            day: query.day,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResponse {
    pub predicted_magnitude: f64,
}

#[derive(Debug, Serialize)]
pub struct RootMessage {
    pub message: &'static str,
}
