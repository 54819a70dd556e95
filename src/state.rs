use crate::config::AppConfig;
use crate::dashboard::Dashboard;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub dashboard: Dashboard,
}

impl AppState {
    pub fn new(config: AppConfig, dashboard: Dashboard) -> Self {
        Self { config, dashboard }
    }
}
