//! Sighting types

use crate::error::{Result, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const LAT_RANGE: RangeInclusive<f64> = -90.0..=90.0;
pub const LON_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// A persisted sighting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sighting {
    pub id: String,
    #[serde(with = "crate::timestamp")]
    pub created_at_utc: DateTime<Utc>,
    pub lat: f64,
    pub lon: f64,
    pub accuracy_m: Option<f64>,
}

impl Sighting {
    pub fn new(id: String, created_at_utc: DateTime<Utc>, fields: NewSighting) -> Self {
        Self {
            id,
            created_at_utc,
            lat: fields.lat,
            lon: fields.lon,
            accuracy_m: fields.accuracy_m,
        }
    }
}

/// Raw request body for `POST /api/sightings`.
///
/// Every field is optional here so that a missing `lat` or `lon` is reported
/// through [`ValidationError::Missing`] rather than a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SightingInput {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub accuracy_m: Option<f64>,
}

/// Validated sighting fields, ready to be persisted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewSighting {
    pub lat: f64,
    pub lon: f64,
    pub accuracy_m: Option<f64>,
}

impl SightingInput {
    pub fn new(lat: f64, lon: f64, accuracy_m: Option<f64>) -> Self {
        Self {
            lat: Some(lat),
            lon: Some(lon),
            accuracy_m,
        }
    }

    /// Check field constraints in order `lat`, `lon`, `accuracy_m` and
    /// report the first violation.
    pub fn validate(self) -> Result<NewSighting> {
        let lat = require_in_range("lat", self.lat, &LAT_RANGE)?;
        let lon = require_in_range("lon", self.lon, &LON_RANGE)?;

        let accuracy_m = match self.accuracy_m {
            Some(value) if !value.is_finite() || value < 0.0 => {
                return Err(ValidationError::Negative {
                    field: "accuracy_m",
                    value,
                })
            }
            other => other,
        };

        Ok(NewSighting {
            lat,
            lon,
            accuracy_m,
        })
    }
}

fn require_in_range(
    field: &'static str,
    value: Option<f64>,
    range: &RangeInclusive<f64>,
) -> Result<f64> {
    let value = value.ok_or(ValidationError::Missing { field })?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input_is_preserved_exactly() {
        let fields = SightingInput::new(37.7, -122.4, Some(5.0)).validate().unwrap();
        assert_eq!(fields.lat, 37.7);
        assert_eq!(fields.lon, -122.4);
        assert_eq!(fields.accuracy_m, Some(5.0));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        for (lat, lon) in [(-90.0, -180.0), (90.0, 180.0), (0.0, 0.0)] {
            assert!(SightingInput::new(lat, lon, None).validate().is_ok());
        }
        assert!(SightingInput::new(0.0, 0.0, Some(0.0)).validate().is_ok());
    }

    #[test]
    fn test_latitude_out_of_range() {
        let err = SightingInput::new(95.0, 0.0, None).validate().unwrap_err();
        assert_eq!(err.field(), "lat");
        assert!(matches!(err, ValidationError::OutOfRange { value, .. } if value == 95.0));

        let err = SightingInput::new(-90.0001, 0.0, None).validate().unwrap_err();
        assert_eq!(err.field(), "lat");
    }

    #[test]
    fn test_longitude_out_of_range() {
        let err = SightingInput::new(0.0, 180.5, None).validate().unwrap_err();
        assert_eq!(err.field(), "lon");
        assert_eq!(err.to_string(), "lon must be between -180 and 180, got 180.5");
    }

    #[test]
    fn test_negative_accuracy_rejected() {
        let err = SightingInput::new(0.0, 0.0, Some(-1.0)).validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::Negative {
                field: "accuracy_m",
                value: -1.0
            }
        );
    }

    #[test]
    fn test_non_finite_values_rejected() {
        assert!(SightingInput::new(f64::NAN, 0.0, None).validate().is_err());
        assert!(SightingInput::new(0.0, f64::INFINITY, None).validate().is_err());
        assert!(SightingInput::new(0.0, 0.0, Some(f64::NAN)).validate().is_err());
        assert!(SightingInput::new(0.0, 0.0, Some(f64::INFINITY)).validate().is_err());
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let err = SightingInput::default().validate().unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "lat" });

        let input: SightingInput = serde_json::from_str(r#"{"lat": 1.0}"#).unwrap();
        assert_eq!(
            input.validate().unwrap_err(),
            ValidationError::Missing { field: "lon" }
        );
    }

    #[test]
    fn test_null_and_absent_accuracy_are_equivalent() {
        let absent: SightingInput = serde_json::from_str(r#"{"lat": 1.0, "lon": 2.0}"#).unwrap();
        let null: SightingInput =
            serde_json::from_str(r#"{"lat": 1.0, "lon": 2.0, "accuracy_m": null}"#).unwrap();
        assert_eq!(absent, null);
        assert_eq!(absent.validate().unwrap().accuracy_m, None);
    }

    #[test]
    fn test_sighting_json_shape() {
        let created_at = crate::timestamp::parse("2024-05-01T12:30:00.000001+00:00").unwrap();
        let fields = SightingInput::new(1.5, -2.5, None).validate().unwrap();
        let sighting = Sighting::new("abc".to_string(), created_at, fields);

        let json = serde_json::to_value(&sighting).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "abc",
                "created_at_utc": "2024-05-01T12:30:00.000001+00:00",
                "lat": 1.5,
                "lon": -2.5,
                "accuracy_m": null,
            })
        );
    }
}
