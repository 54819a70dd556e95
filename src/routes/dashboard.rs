//! # Dashboard handlers
//!
//! JSON surface over the request-state store so any UI can render it. Fetch
//! failures are not HTTP errors here: they land in the slice's `error` and the
//! handler still answers `200 OK` with the slice.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{info, instrument};

use crate::extractors::{category_path::CategoryPath, query_extractor::FetchQuery};
use crate::state::AppState;
use crate::store::{Category, RequestSlice, StoreSnapshot, Transition};

#[derive(Debug, Serialize)]
pub struct FetchResponse {
    pub category: Category,
    pub transition: Transition,
    pub slice: RequestSlice,
}

/// `GET /dashboard`
pub async fn get_dashboard(State(state): State<AppState>) -> Json<StoreSnapshot> {
    Json(state.dashboard.store().snapshot().await)
}

/// `GET /dashboard/{category}`
pub async fn get_slice(
    State(state): State<AppState>,
    CategoryPath(category): CategoryPath,
) -> Json<RequestSlice> {
    Json(state.dashboard.store().slice(category).await)
}

/// `POST /dashboard?symbol=..&days=..`: fetch every category.
#[instrument(skip(state))]
pub async fn load_dashboard(State(state): State<AppState>, query: FetchQuery) -> Json<StoreSnapshot> {
    info!(symbol = %query.symbol, days = ?query.days, "Received dashboard load request.");
    let days = query.days.or(Some(state.config.prediction_days));
    Json(state.dashboard.load_symbol(&query.symbol, days).await)
}

/// `POST /dashboard/{category}?symbol=..&days=..`: fetch one category.
#[instrument(skip(state, category))]
pub async fn fetch_slice(
    State(state): State<AppState>,
    CategoryPath(category): CategoryPath,
    query: FetchQuery,
) -> Json<FetchResponse> {
    info!(category = %category, symbol = %query.symbol, "Received fetch request.");
    let days = query.days.or(Some(state.config.prediction_days));
    let transition = state.dashboard.fetch(category, &query.symbol, days).await;

    Json(FetchResponse {
        category,
        transition,
        slice: state.dashboard.store().slice(category).await,
    })
}

/// `DELETE /dashboard/{category}`
pub async fn clear_slice(
    State(state): State<AppState>,
    CategoryPath(category): CategoryPath,
) -> Json<RequestSlice> {
    state.dashboard.clear(category).await;
    Json(state.dashboard.store().slice(category).await)
}

/// `DELETE /dashboard`
pub async fn clear_dashboard(State(state): State<AppState>) -> Json<StoreSnapshot> {
    state.dashboard.clear_all().await;
    Json(state.dashboard.store().snapshot().await)
}
