use serde::{Deserialize, Serialize};

use super::historical::DayBar;
use super::quote::GlobalQuote;
use crate::utils::lenient;

/// Body of `/comprehensive/{symbol}`: the live quote bundled with the prior
/// and current trading day statistics.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ComprehensiveQuote {
    #[serde(default, deserialize_with = "lenient::option")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub current_data: Option<GlobalQuote>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub previous_day_data: Option<DayBar>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub current_day_data: Option<DayBar>,
}

impl ComprehensiveQuote {
    /// Percent move of the current price against the previous day's close.
    pub fn change_from_previous_close(&self) -> Option<f64> {
        let price = self.current_data.as_ref()?.price?;
        let previous_close = self.previous_day_data.as_ref()?.close?;
        if previous_close == 0.0 {
            return None;
        }
        Some((price - previous_close) / previous_close * 100.0)
    }
}
