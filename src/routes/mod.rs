use axum::{routing::get, Router};
use dashboard::{
    clear_dashboard, clear_slice, fetch_slice, get_dashboard, get_slice, load_dashboard,
};
use health_check::health_check;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod dashboard;
pub mod health_check;

pub fn register_routes(state: AppState) -> Router {
    Router::new()
        .route("/health_check", get(health_check))
        .route(
            "/dashboard",
            get(get_dashboard)
                .post(load_dashboard)
                .delete(clear_dashboard),
        )
        .route(
            "/dashboard/{category}",
            get(get_slice).post(fetch_slice).delete(clear_slice),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
