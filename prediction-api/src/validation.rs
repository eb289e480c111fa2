//! Input-domain checks for prediction requests
//!
//! Inputs are never rewritten. Depending on [`ValidationMode`] an
//! out-of-domain request is passed through untouched, passed through with a
//! warning, or rejected.

use std::str::FromStr;

use validator::{Validate, ValidationErrors};

use crate::models::PredictionQuery;
use crate::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// No checks
    Off,
    /// Log violations and predict anyway
    #[default]
    Warn,
    /// Reject violations with 422
    Strict,
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(Self::Off),
            "warn" => Ok(Self::Warn),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown validation mode '{}'", other)),
        }
    }
}

/// Human-readable list of domain violations, sorted by field
pub fn domain_violations(query: &PredictionQuery) -> Vec<String> {
    match query.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => describe(&errors),
    }
}

fn describe(errors: &ValidationErrors) -> Vec<String> {
    let mut violations: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                // struct-level (schema) errors are keyed "__all__"
                let name: &str = if field == "__all__" { "date" } else { &*field };
                let detail = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", name, detail)
            })
        })
        .collect();
    violations.sort();
    violations
}

/// Apply the configured mode to a request
pub fn enforce(mode: ValidationMode, query: &PredictionQuery) -> Result<(), AppError> {
    if mode == ValidationMode::Off {
        return Ok(());
    }

    let violations = domain_violations(query);
    if violations.is_empty() {
        return Ok(());
    }

    match mode {
        ValidationMode::Strict => Err(AppError::OutOfDomain(violations)),
        _ => {
            for violation in &violations {
                tracing::warn!("Out-of-domain prediction input accepted: {}", violation);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(month: i32, day: i32) -> PredictionQuery {
        PredictionQuery {
            latitude: 34.05,
            longitude: -118.25,
            depth: 10.0,
            year: 2024,
            month,
            day,
        }
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("off".parse::<ValidationMode>(), Ok(ValidationMode::Off));
        assert_eq!(" WARN ".parse::<ValidationMode>(), Ok(ValidationMode::Warn));
        assert_eq!("strict".parse::<ValidationMode>(), Ok(ValidationMode::Strict));
        assert!("lenient".parse::<ValidationMode>().is_err());
    }

    #[test]
    fn test_valid_input_has_no_violations() {
        assert!(domain_violations(&query(6, 1)).is_empty());
    }

    #[test]
    fn test_month_out_of_range() {
        let violations = domain_violations(&query(13, 1));
        assert_eq!(violations.len(), 1);
        assert!(violations[0].starts_with("month:"));
    }

    #[test]
    fn test_coordinates_out_of_range() {
        let mut q = query(6, 1);
        q.latitude = 95.0;
        q.longitude = -200.0;
        let violations = domain_violations(&q);
        assert_eq!(violations.len(), 2);
        assert!(violations[0].starts_with("latitude:"));
        assert!(violations[1].starts_with("longitude:"));
    }

    #[test]
    fn test_impossible_calendar_date() {
        let violations = domain_violations(&query(2, 30));
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("2024-02-30"));
    }

    #[test]
    fn test_leap_day_is_valid() {
        assert!(domain_violations(&query(2, 29)).is_empty());
    }

    #[test]
    fn test_enforce_modes() {
        let bad = query(13, 1);
        assert!(enforce(ValidationMode::Off, &bad).is_ok());
        assert!(enforce(ValidationMode::Warn, &bad).is_ok());
        assert!(matches!(
            enforce(ValidationMode::Strict, &bad),
            Err(AppError::OutOfDomain(_))
        ));
        assert!(enforce(ValidationMode::Strict, &query(6, 1)).is_ok());
    }
}
