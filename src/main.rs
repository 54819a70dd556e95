use std::time::Duration;

use dotenvy::dotenv;
use stock_dashboard::{
    background::refresher::spawn_refresher,
    client::{StockApiClient, Symbol},
    config::AppConfig,
    dashboard::Dashboard,
    routes::register_routes,
    state::AppState,
    store::DashboardStore,
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt().with_target(false).init();

    let config = AppConfig::from_env().expect("should have loaded config.");
    let client = StockApiClient::from_config(&config).expect("should have built HTTP client.");
    info!(base_url = %client.base_url(), "Using stock API");

    let dashboard = Dashboard::new(DashboardStore::new(), client);

    // Populate the dashboard for the default symbol without delaying startup.
    match Symbol::parse(&config.default_symbol) {
        Ok(symbol) => {
            let dashboard = dashboard.clone();
            let days = config.prediction_days;
            tokio::spawn(async move {
                dashboard.load_symbol(&symbol, Some(days)).await;
            });
        }
        Err(err) => error!(error = %err, "Skipping initial load"),
    }

    spawn_refresher(
        dashboard.clone(),
        Duration::from_secs(config.refresh_interval_secs),
    );

    let port = config.app_server_port;
    let app = register_routes(AppState::new(config, dashboard));
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("should have bound listener.");

    info!(address = %listener.local_addr().expect("bound listener has an address"), "Listening");
    axum::serve(listener, app).await.expect("server should run.");
}
