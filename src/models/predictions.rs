//! Forecast payloads. The predictions themselves are computed server-side;
//! these types only carry them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient_decode;
use crate::utils::{custom_date_serde, lenient, lenient_number};

/// Upper bound the remote API accepts for `?days=`.
pub const MAX_PREDICTION_DAYS: u32 = 30;
pub const DEFAULT_PREDICTION_DAYS: u32 = 7;

/// Body of `/predictions/{symbol}?days={n}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PredictionSet {
    #[serde(default, deserialize_with = "lenient::option")]
    pub symbol: Option<String>,
    #[serde(default, with = "lenient_number")]
    pub current_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub predictions: Vec<DailyPrediction>,
    #[serde(default, with = "lenient_number")]
    pub model_accuracy: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub demo_mode: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DailyPrediction {
    #[serde(default, with = "custom_date_serde")]
    pub date: Option<NaiveDate>,
    #[serde(default, with = "lenient_number")]
    pub predicted_price: Option<f64>,
    #[serde(default, with = "lenient_number")]
    pub confidence: Option<f64>,
}

impl PredictionSet {
    /// Decode a predictions body. A bare array is taken as the per-day list.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => Self {
                predictions: items.into_iter().filter_map(lenient::from_object).collect(),
                ..Self::default()
            },
            other => lenient_decode(other),
        }
    }
}

/// Body of `/prediction-summary/{symbol}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PredictionSummaryReport {
    #[serde(default, deserialize_with = "lenient::option")]
    pub symbol: Option<String>,
    #[serde(default, with = "lenient_number")]
    pub current_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub prediction_summary: Option<PredictionSummary>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub daily_predictions: Vec<DailyPrediction>,
    #[serde(default, with = "lenient_number")]
    pub model_accuracy: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub demo_mode: Option<bool>,
}

/// Aggregate of the daily predictions. `confidence` and `trend_strength` are
/// percentages.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PredictionSummary {
    #[serde(default, with = "lenient_number")]
    pub average_prediction: Option<f64>,
    #[serde(default, with = "lenient_number")]
    pub max_prediction: Option<f64>,
    #[serde(default, with = "lenient_number")]
    pub min_prediction: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub trend: Option<String>,
    #[serde(default, with = "lenient_number")]
    pub trend_strength: Option<f64>,
    #[serde(default, with = "lenient_number")]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Unknown,
}

impl PredictionSummary {
    pub fn trend(&self) -> Trend {
        match self.trend.as_deref().map(str::trim) {
            Some(t) if t.eq_ignore_ascii_case("bullish") => Trend::Bullish,
            Some(t) if t.eq_ignore_ascii_case("bearish") => Trend::Bearish,
            _ => Trend::Unknown,
        }
    }
}

impl PredictionSummaryReport {
    pub fn trend(&self) -> Trend {
        self.prediction_summary
            .as_ref()
            .map_or(Trend::Unknown, PredictionSummary::trend)
    }
}
