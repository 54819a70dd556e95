use crate::client::Symbol;
use crate::errors::api_error::ApiError;
use crate::models::predictions::MAX_PREDICTION_DAYS;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    RequestPartsExt,
};
use serde::Deserialize;

#[derive(Deserialize)]
struct RawFetchQuery {
    symbol: String,
    days: Option<u32>,
}

/// Query parameters for a dashboard fetch: `?symbol=AAPL&days=7`.
#[derive(Debug)]
pub struct FetchQuery {
    pub symbol: Symbol,
    pub days: Option<u32>,
}

impl<S> FromRequestParts<S> for FetchQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = parts
            .extract::<Query<RawFetchQuery>>()
            .await
            .map_err(|err| ApiError::InvalidQuery(err.body_text()))?;

        let symbol = Symbol::parse(&raw.symbol)?;

        if let Some(days) = raw.days {
            if !(1..=MAX_PREDICTION_DAYS).contains(&days) {
                return Err(ApiError::InvalidQuery(format!(
                    "days must be between 1 and {MAX_PREDICTION_DAYS}."
                )));
            }
        }

        Ok(FetchQuery {
            symbol,
            days: raw.days,
        })
    }
}
