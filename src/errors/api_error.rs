use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::fetch_error::FetchError;
use crate::store::UnknownCategory;

#[derive(Debug)]
pub enum ApiError {
    InternalServerError,
    InvalidQuery(String),
    UnknownCategory(String),
}

#[derive(Serialize)]
struct ApiErrorResponse {
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                "Something bad happened.".to_owned(),
            ),
            ApiError::InvalidQuery(msg) => (StatusCode::BAD_REQUEST, "Bad Request", msg),
            ApiError::UnknownCategory(msg) => (StatusCode::NOT_FOUND, "Not Found", msg),
        };

        let body = ApiErrorResponse { error, message };

        (status, Json(body)).into_response()
    }
}

impl From<UnknownCategory> for ApiError {
    fn from(err: UnknownCategory) -> Self {
        ApiError::UnknownCategory(err.to_string())
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::InvalidSymbol(_) | FetchError::InvalidHorizon { .. } => {
                ApiError::InvalidQuery(err.to_string())
            }
            _ => ApiError::InternalServerError,
        }
    }
}
