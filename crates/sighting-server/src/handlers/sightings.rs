//! Sighting handlers

use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sighting_types::{Sighting, SightingInput, SightingList};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    limit: Option<String>,
}

/// Parse a `limit` query value.
///
/// Any integer is accepted; values beyond the `i64` range saturate so that
/// the later clamp still applies. Anything else is a client error.
fn parse_limit(raw: &str) -> Result<i64, ApiError> {
    let invalid = || ApiError::InvalidQuery(format!("limit must be an integer, got {:?}", raw));

    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    Ok(raw.parse::<i64>().unwrap_or(if raw.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }))
}

pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<SightingList>, ApiError> {
    let Query(params) = params?;
    let limit = params.limit.as_deref().map(parse_limit).transpose()?;
    let list = state.sightings.list_recent(limit).await?;
    Ok(Json(list))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<SightingInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Sighting>), ApiError> {
    let Json(input) = body?;

    let sighting = state.sightings.create(input).await?;

    Ok((StatusCode::CREATED, Json(sighting)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit_accepts_integers() {
        assert_eq!(parse_limit("250").unwrap(), 250);
        assert_eq!(parse_limit("+7").unwrap(), 7);
        assert_eq!(parse_limit("-5").unwrap(), -5);
        assert_eq!(parse_limit("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_limit_saturates_on_overflow() {
        assert_eq!(parse_limit("99999999999999999999").unwrap(), i64::MAX);
        assert_eq!(parse_limit("-99999999999999999999").unwrap(), i64::MIN);
    }

    #[test]
    fn test_parse_limit_rejects_non_integers() {
        for raw in ["", "-", "lots", "1.5", "1e3", " 5", "--5"] {
            assert!(
                matches!(parse_limit(raw), Err(ApiError::InvalidQuery(_))),
                "{raw:?}"
            );
        }
    }
}
