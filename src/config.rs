use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub stock_api_base_url: String,
    #[serde(default = "default_port")]
    pub app_server_port: u16,
    #[serde(default = "default_symbol")]
    pub default_symbol: String,
    #[serde(default = "default_prediction_days")]
    pub prediction_days: u32,
    /// Zero disables the background refresher.
    #[serde(default)]
    pub refresh_interval_secs: u64,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_port() -> u16 {
    8080
}

fn default_symbol() -> String {
    "AAPL".to_string()
}

fn default_prediction_days() -> u32 {
    7
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        let config = envy::from_env::<AppConfig>()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), envy::Error> {
        if self.stock_api_base_url.trim().is_empty() {
            return Err(envy::Error::Custom(
                "STOCK_API_BASE_URL cannot be empty.".to_string(),
            ));
        }

        if self.default_symbol.trim().is_empty() {
            return Err(envy::Error::Custom(
                "DEFAULT_SYMBOL cannot be empty.".to_string(),
            ));
        }

        if !(1..=30).contains(&self.prediction_days) {
            return Err(envy::Error::Custom(
                "PREDICTION_DAYS must be between 1 and 30.".to_string(),
            ));
        }

        Ok(())
    }
}
