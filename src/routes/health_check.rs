use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub message: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        message: "Server is running.".to_owned(),
        status: "healthy".to_owned(),
        timestamp: Utc::now(),
    })
}
