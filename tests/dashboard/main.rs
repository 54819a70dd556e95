use std::time::Duration;

use serde_json::json;
use stock_dashboard::{
    client::{StockApiClient, Symbol},
    dashboard::Dashboard,
    models::Payload,
    store::{Category, DashboardStore, RequestSlice, SliceStatus, Transition},
};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

//
// ----------- Test Helpers -----------
//

fn dashboard_for(server: &MockServer) -> Dashboard {
    let client = StockApiClient::new(format!("{}/api/v1/stocks", server.uri()));
    Dashboard::new(DashboardStore::new(), client)
}

async fn mount_json(server: &MockServer, endpoint: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/stocks{endpoint}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn symbol(raw: &str) -> Symbol {
    Symbol::parse(raw).expect("valid symbol")
}

fn quote_body(symbol: &str, price: &str) -> serde_json::Value {
    json!({ "Global Quote": { "01. symbol": symbol, "05. price": price } })
}

fn quote_symbol(slice: &RequestSlice) -> Option<String> {
    match &slice.data {
        Some(Payload::Quote(quote)) => quote.symbol().map(str::to_string),
        _ => None,
    }
}

//
// ----------- Lifecycle Tests -----------
//

#[tokio::test]
async fn fetch_quote_moves_slice_to_succeeded() {
    let server = MockServer::start().await;
    mount_json(&server, "/quote/AAPL", quote_body("AAPL", "150.00")).await;
    let dashboard = dashboard_for(&server);

    let transition = dashboard.fetch_quote(&symbol("aapl")).await;
    let slice = dashboard.store().slice(Category::Quote).await;

    assert_eq!(transition, Transition::Applied);
    assert_eq!(slice.status, SliceStatus::Succeeded);
    assert_eq!(slice.symbol.as_deref(), Some("AAPL"));
    assert!(slice.error.is_none());
    match slice.data {
        Some(Payload::Quote(quote)) => assert_eq!(quote.price(), Some(150.0)),
        other => panic!("unexpected data {other:?}"),
    }
}

#[tokio::test]
async fn failed_refetch_keeps_last_good_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/stocks/news/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles": [{ "title": "Apple rallies", "description": "Up 3%" }]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/stocks/news/AAPL"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let dashboard = dashboard_for(&server);

    dashboard.fetch_news(&symbol("AAPL")).await;
    dashboard.fetch_news(&symbol("AAPL")).await;

    let slice = dashboard.store().slice(Category::News).await;
    assert_eq!(slice.status, SliceStatus::Failed);
    assert_eq!(
        slice.error.as_deref(),
        Some("Request failed with status code 503")
    );
    match slice.data {
        Some(Payload::News(feed)) => assert_eq!(feed.headlines(5).len(), 1),
        other => panic!("unexpected data {other:?}"),
    }
}

#[tokio::test]
async fn invalid_horizon_fails_predictions_slice() {
    let server = MockServer::start().await;
    let dashboard = dashboard_for(&server);

    dashboard.fetch_predictions(&symbol("AAPL"), 45).await;

    let slice = dashboard.store().slice(Category::Predictions).await;
    assert_eq!(slice.status, SliceStatus::Failed);
    assert_eq!(
        slice.error.as_deref(),
        Some("Prediction days must be between 1 and 30, got 45.")
    );
}

#[tokio::test]
async fn load_symbol_allows_partial_results() {
    let server = MockServer::start().await;
    mount_json(&server, "/quote/MSFT", quote_body("MSFT", "420.10")).await;
    mount_json(
        &server,
        "/comprehensive/MSFT",
        json!({ "current_data": { "price": 420.1 }, "previous_day_data": { "close": 410.0 } }),
    )
    .await;
    mount_json(&server, "/historical/MSFT", json!({ "Time Series (Daily)": {} })).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/stocks/predictions/MSFT"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "detail": "Prediction failed" })),
        )
        .mount(&server)
        .await;
    mount_json(
        &server,
        "/prediction-summary/MSFT",
        json!({ "prediction_summary": { "trend": "bullish" } }),
    )
    .await;
    // No news mock: wiremock answers 404.

    let dashboard = dashboard_for(&server);
    let snapshot = dashboard.load_symbol(&symbol("msft"), Some(10)).await;

    assert_eq!(snapshot.slice(Category::Quote).status, SliceStatus::Succeeded);
    assert_eq!(
        snapshot.slice(Category::Comprehensive).status,
        SliceStatus::Succeeded
    );
    assert_eq!(snapshot.slice(Category::Historical).status, SliceStatus::Succeeded);
    assert_eq!(
        snapshot.slice(Category::PredictionSummary).status,
        SliceStatus::Succeeded
    );
    assert_eq!(
        snapshot.slice(Category::Predictions).error.as_deref(),
        Some("Request failed with status code 500: Prediction failed")
    );
    assert_eq!(
        snapshot.slice(Category::News).error.as_deref(),
        Some("Request failed with status code 404")
    );
    assert!(!dashboard.store().is_loading().await);

    let active = dashboard.active_query().await.expect("active query");
    assert_eq!(active.symbol.as_str(), "MSFT");
    assert_eq!(active.days, 10);
}

//
// ----------- Race Tests -----------
//

#[tokio::test]
async fn slow_response_for_older_request_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/stocks/quote/AAPL"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(quote_body("AAPL", "150.00"))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;
    mount_json(&server, "/quote/MSFT", quote_body("MSFT", "420.10")).await;
    let dashboard = dashboard_for(&server);

    let aapl = symbol("AAPL");
    let msft = symbol("MSFT");
    let (first, second) = tokio::join!(dashboard.fetch_quote(&aapl), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        dashboard.fetch_quote(&msft).await
    });

    let slice = dashboard.store().slice(Category::Quote).await;
    assert_eq!(first, Transition::Discarded);
    assert_eq!(second, Transition::Applied);
    assert_eq!(slice.status, SliceStatus::Succeeded);
    assert_eq!(quote_symbol(&slice).as_deref(), Some("MSFT"));
}

#[tokio::test]
async fn clear_all_discards_in_flight_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/stocks/quote/AAPL"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(quote_body("AAPL", "150.00"))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    let dashboard = dashboard_for(&server);

    let aapl = symbol("AAPL");
    let (transition, _) = tokio::join!(dashboard.fetch_quote(&aapl), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        dashboard.clear_all().await;
    });

    assert_eq!(transition, Transition::Discarded);
    assert_eq!(
        dashboard.store().slice(Category::Quote).await,
        RequestSlice::default()
    );
    assert!(dashboard.active_query().await.is_none());
}

#[tokio::test]
async fn refresh_does_not_override_newer_load() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/stocks/quote/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(quote_body("AAPL", "150.00")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/stocks/quote/AAPL"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(quote_body("AAPL", "151.00"))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;
    mount_json(&server, "/quote/MSFT", quote_body("MSFT", "420.10")).await;
    let dashboard = dashboard_for(&server);

    dashboard.load_symbol(&symbol("AAPL"), None).await;
    let msft = symbol("MSFT");
    let (refreshed, _) = tokio::join!(dashboard.refresh(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        dashboard.load_symbol(&msft, None).await
    });

    assert!(refreshed.is_some());
    let active = dashboard.active_query().await.expect("active query");
    assert_eq!(active.symbol.as_str(), "MSFT");
    let slice = dashboard.store().slice(Category::Quote).await;
    assert_eq!(quote_symbol(&slice).as_deref(), Some("MSFT"));
}

#[tokio::test]
async fn refresh_after_clear_all_does_nothing() {
    let server = MockServer::start().await;
    mount_json(&server, "/quote/AAPL", quote_body("AAPL", "150.00")).await;
    let dashboard = dashboard_for(&server);

    dashboard.load_symbol(&symbol("AAPL"), None).await;
    dashboard.clear_all().await;

    assert!(dashboard.refresh().await.is_none());
    assert_eq!(
        dashboard.store().slice(Category::Quote).await,
        RequestSlice::default()
    );
}
