//! Validation errors for incoming sightings

use thiserror::Error;

/// A field of a submitted sighting failed its constraint.
///
/// Produced before anything reaches storage; a request that fails
/// validation never creates a record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be greater than or equal to 0, got {value}")]
    Negative { field: &'static str, value: f64 },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::Negative { field, .. } => field,
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
