//! # Stock API client
//!
//! Thin reqwest wrapper over the six read-only endpoints of the stock
//! analytics backend (`{base_url}/quote/{symbol}` and friends). The backend
//! computes everything; this client only fetches and decodes.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::AppConfig;
use crate::errors::fetch_error::FetchError;
use crate::models::predictions::{DEFAULT_PREDICTION_DAYS, MAX_PREDICTION_DAYS};
use crate::models::{
    self, ComprehensiveQuote, HistoricalSeries, NewsFeed, Payload, PredictionSet,
    PredictionSummaryReport, Quote,
};
use crate::store::Category;

pub mod symbol;

pub use symbol::Symbol;

#[derive(Debug, Clone)]
pub struct StockApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl StockApiClient {
    /// Client without a request timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(base_url, reqwest::Client::new())
    }

    pub fn with_http(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = config.request_timeout_secs.filter(|secs| *secs > 0) {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self::with_http(&config.stock_api_base_url, builder.build()?))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for `category`. `days` is only used by predictions.
    pub fn endpoint(&self, category: Category, symbol: &Symbol, days: Option<u32>) -> String {
        match (category, days) {
            (Category::Predictions, Some(days)) => {
                format!("{}/predictions/{}?days={}", self.base_url, symbol, days)
            }
            _ => format!("{}/{}/{}", self.base_url, category.as_str(), symbol),
        }
    }

    /// Fetch any category, tagged as a [`Payload`].
    pub async fn fetch(
        &self,
        category: Category,
        symbol: &Symbol,
        days: Option<u32>,
    ) -> Result<Payload, FetchError> {
        let days = match category {
            Category::Predictions => Some(checked_days(
                days.unwrap_or(DEFAULT_PREDICTION_DAYS),
            )?),
            _ => None,
        };
        let value = self.get_json(self.endpoint(category, symbol, days)).await?;
        Ok(Payload::from_value(category, value))
    }

    pub async fn quote(&self, symbol: &Symbol) -> Result<Quote, FetchError> {
        self.get(self.endpoint(Category::Quote, symbol, None)).await
    }

    pub async fn comprehensive(&self, symbol: &Symbol) -> Result<ComprehensiveQuote, FetchError> {
        self.get(self.endpoint(Category::Comprehensive, symbol, None))
            .await
    }

    pub async fn historical(&self, symbol: &Symbol) -> Result<HistoricalSeries, FetchError> {
        self.get(self.endpoint(Category::Historical, symbol, None))
            .await
    }

    /// # Errors
    /// `days` outside `1..=30` is rejected before any request is sent.
    pub async fn predictions(&self, symbol: &Symbol, days: u32) -> Result<PredictionSet, FetchError> {
        let days = checked_days(days)?;
        let value = self
            .get_json(self.endpoint(Category::Predictions, symbol, Some(days)))
            .await?;
        Ok(PredictionSet::from_value(value))
    }

    pub async fn prediction_summary(
        &self,
        symbol: &Symbol,
    ) -> Result<PredictionSummaryReport, FetchError> {
        self.get(self.endpoint(Category::PredictionSummary, symbol, None))
            .await
    }

    pub async fn news(&self, symbol: &Symbol) -> Result<NewsFeed, FetchError> {
        self.get(self.endpoint(Category::News, symbol, None)).await
    }

    async fn get<T>(&self, url: String) -> Result<T, FetchError>
    where
        T: DeserializeOwned + Default,
    {
        Ok(models::lenient_decode(self.get_json(url).await?))
    }

    /// GET `url` as JSON. Non-2xx responses become [`FetchError::Status`]
    /// carrying the backend's `detail` message if any.
    #[instrument(skip(self), err)]
    async fn get_json(&self, url: String) -> Result<Value, FetchError> {
        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        debug!(status = %status, bytes = body.len(), "Received response");

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        serde_json::from_slice(&body).map_err(FetchError::Decode)
    }
}

fn checked_days(days: u32) -> Result<u32, FetchError> {
    if (1..=MAX_PREDICTION_DAYS).contains(&days) {
        Ok(days)
    } else {
        Err(FetchError::InvalidHorizon {
            days,
            max: MAX_PREDICTION_DAYS,
        })
    }
}

/// Pull a human-readable message out of a FastAPI error body:
/// `{"detail": "..."}` or `{"detail": [{"msg": "..."}, ...]}`.
fn error_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
