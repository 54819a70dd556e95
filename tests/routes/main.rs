use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{json, Value};
use stock_dashboard::{
    client::StockApiClient,
    config::AppConfig,
    dashboard::Dashboard,
    routes::register_routes,
    state::AppState,
    store::DashboardStore,
};
use tower::ServiceExt;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

//
// ----------- Global Setup -----------
//

static INIT: Lazy<()> = Lazy::new(|| {
    dotenvy::dotenv().ok();
});

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

//
// ----------- Test Helpers -----------
//

fn test_config(base_url: String) -> AppConfig {
    AppConfig {
        stock_api_base_url: base_url,
        app_server_port: 8080,
        default_symbol: "AAPL".to_string(),
        prediction_days: 7,
        refresh_interval_secs: 0,
        request_timeout_secs: None,
    }
}

fn app_for(server: &MockServer) -> Router {
    let config = test_config(format!("{}/api/v1/stocks", server.uri()));
    let client = StockApiClient::new(&config.stock_api_base_url);
    let dashboard = Dashboard::new(DashboardStore::new(), client);
    register_routes(AppState::new(config, dashboard))
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("Should receive a response");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("should read body");
    let body = serde_json::from_slice(&bytes).expect("should parse JSON");
    (status, body)
}

async fn mount_json(server: &MockServer, endpoint: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/stocks{endpoint}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

//
// ----------- Happy Path Tests -----------
//

#[tokio::test]
async fn get_dashboard_starts_with_idle_slices() {
    let _ = *INIT;
    let server = MockServer::start().await;
    let app = app_for(&server);

    let (status, body) = send(&app, Method::GET, "/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["revision"], 0);
    for category in [
        "quote",
        "comprehensive",
        "historical",
        "predictions",
        "prediction-summary",
        "news",
    ] {
        assert_eq!(body["slices"][category]["status"], "idle");
        assert!(body["slices"][category]["data"].is_null());
        assert!(body["slices"][category]["error"].is_null());
    }
}

#[tokio::test]
async fn post_category_fetches_and_returns_slice() {
    let _ = *INIT;
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/quote/AAPL",
        json!({ "Global Quote": { "01. symbol": "AAPL", "05. price": "150.0000" } }),
    )
    .await;
    let app = app_for(&server);

    let (status, body) = send(&app, Method::POST, "/dashboard/quote?symbol=aapl").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "quote");
    assert_eq!(body["transition"], "applied");
    assert_eq!(body["slice"]["status"], "succeeded");
    assert_eq!(body["slice"]["symbol"], "AAPL");
    assert_eq!(body["slice"]["data"]["Global Quote"]["05. price"], 150.0);

    let (_, slice) = send(&app, Method::GET, "/dashboard/quote").await;
    assert_eq!(slice["status"], "succeeded");
}

#[tokio::test]
async fn predictions_use_configured_days_by_default() {
    let _ = *INIT;
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/stocks/predictions/AAPL"))
        .and(query_param("days", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "predictions": [] })))
        .expect(1)
        .mount(&server)
        .await;
    let app = app_for(&server);

    let (status, body) = send(&app, Method::POST, "/dashboard/predictions?symbol=AAPL").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slice"]["status"], "succeeded");
}

#[tokio::test]
async fn upstream_failure_is_reported_in_slice_not_status() {
    let _ = *INIT;
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/stocks/news/AAPL"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let app = app_for(&server);

    let (status, body) = send(&app, Method::POST, "/dashboard/news?symbol=AAPL").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slice"]["status"], "failed");
    assert_eq!(
        body["slice"]["error"],
        "Request failed with status code 500"
    );
}

#[tokio::test]
async fn delete_category_resets_slice() {
    let _ = *INIT;
    let server = MockServer::start().await;
    let app = app_for(&server);

    // Unmocked endpoint: the slice ends up failed with a 404.
    send(&app, Method::POST, "/dashboard/historical?symbol=AAPL").await;
    let (status, body) = send(&app, Method::DELETE, "/dashboard/historical").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "idle");
    assert!(body["error"].is_null());
}

#[tokio::test]
async fn delete_dashboard_resets_everything() {
    let _ = *INIT;
    let server = MockServer::start().await;
    let app = app_for(&server);

    send(&app, Method::POST, "/dashboard?symbol=AAPL").await;
    let (status, body) = send(&app, Method::DELETE, "/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    let slices = body["slices"].as_object().expect("slices object");
    assert_eq!(slices.len(), 6);
    assert!(slices.values().all(|slice| slice["status"] == "idle"));
}

//
// ----------- Sad Path Tests -----------
//

#[tokio::test]
async fn unknown_category_returns_404() {
    let _ = *INIT;
    let server = MockServer::start().await;
    let app = app_for(&server);

    let (status, body) = send(&app, Method::GET, "/dashboard/overview").await;
    let error: ErrorResponse = serde_json::from_value(body).expect("error body");

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error.error, "Not Found");
    assert_eq!(error.message, "Unknown category `overview`.");
}

#[tokio::test]
async fn missing_symbol_returns_400() {
    let _ = *INIT;
    let server = MockServer::start().await;
    let app = app_for(&server);

    let (status, body) = send(&app, Method::POST, "/dashboard/quote").await;
    let error: ErrorResponse = serde_json::from_value(body).expect("error body");

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error.error, "Bad Request");
    assert_eq!(
        error.message,
        "Failed to deserialize query string: missing field `symbol`"
    );
}

#[tokio::test]
async fn invalid_symbol_and_days_return_400() {
    let _ = *INIT;
    let server = MockServer::start().await;
    let app = app_for(&server);

    let (status, body) = send(&app, Method::POST, "/dashboard?symbol=AA%20PL").await;
    let error: ErrorResponse = serde_json::from_value(body).expect("error body");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error.message, "Invalid symbol `AA PL`.");

    let (status, body) = send(&app, Method::POST, "/dashboard/predictions?symbol=AAPL&days=45").await;
    let error: ErrorResponse = serde_json::from_value(body).expect("error body");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error.message, "days must be between 1 and 30.");
}
