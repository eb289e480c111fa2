//! Earthquake event record
//!
//! Every typed field is optional: an empty cell becomes `None` and is drawn
//! by plotly as a gap. Only a cell that holds something unparseable is an
//! error.

use serde::{de, Deserialize, Deserializer, Serialize};

/// One row of the events CSV; columns other than these five are ignored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeRecord {
    #[serde(deserialize_with = "deserialize_year")]
    pub year: Option<i32>,
    pub date: Option<String>,
    pub mag: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Accepts `2024` as well as the `2024.0` a float-typed column writes out
fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<String>::deserialize(deserializer)? {
        Some(raw) => raw,
        None => return Ok(None),
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    if let Ok(year) = raw.parse::<i32>() {
        return Ok(Some(year));
    }

    match raw.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX) => {
            Ok(Some(v as i32))
        }
        _ => Err(de::Error::custom(format!("invalid year '{}'", raw))),
    }
}
