use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::custom_date_serde::{self, parse_date};
use crate::utils::lenient::{self, first};
use crate::utils::lenient_number::{self, value_as_f64};

/// Body of `/historical/{symbol}`, an Alpha Vantage `TIME_SERIES_DAILY`
/// passthrough keyed by trading day.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct HistoricalSeries {
    #[serde(rename = "Meta Data", default, deserialize_with = "lenient::object")]
    pub meta_data: Option<SeriesMeta>,
    #[serde(rename = "Time Series (Daily)", default, deserialize_with = "lenient::object")]
    pub series: Option<BTreeMap<String, DayBar>>,
    #[serde(rename = "Note", default, deserialize_with = "lenient::option")]
    pub note: Option<String>,
    #[serde(rename = "Information", default, deserialize_with = "lenient::option")]
    pub information: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SeriesMeta {
    #[serde(rename = "1. Information", default, deserialize_with = "lenient::option")]
    pub information: Option<String>,
    #[serde(rename = "2. Symbol", default, deserialize_with = "lenient::option")]
    pub symbol: Option<String>,
    #[serde(rename = "3. Last Refreshed", default, deserialize_with = "lenient::option")]
    pub last_refreshed: Option<String>,
    #[serde(rename = "4. Output Size", default, deserialize_with = "lenient::option")]
    pub output_size: Option<String>,
    #[serde(rename = "5. Time Zone", default, deserialize_with = "lenient::option")]
    pub time_zone: Option<String>,
}

/// One OHLCV bar. Used both inside the daily time series and for the
/// per-day blocks of the comprehensive payload, which use plain keys
/// ("close") instead of numbered ones ("4. close").
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(from = "Map<String, Value>")]
pub struct DayBar {
    #[serde(serialize_with = "custom_date_serde::serialize")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "1. open", serialize_with = "lenient_number::serialize")]
    pub open: Option<f64>,
    #[serde(rename = "2. high", serialize_with = "lenient_number::serialize")]
    pub high: Option<f64>,
    #[serde(rename = "3. low", serialize_with = "lenient_number::serialize")]
    pub low: Option<f64>,
    #[serde(rename = "4. close", serialize_with = "lenient_number::serialize")]
    pub close: Option<f64>,
    #[serde(rename = "5. volume", serialize_with = "lenient_number::serialize")]
    pub volume: Option<f64>,
}

impl From<Map<String, Value>> for DayBar {
    fn from(map: Map<String, Value>) -> Self {
        let number = |keys: &[&str]| first(&map, keys).and_then(value_as_f64);

        Self {
            date: map.get("date").and_then(Value::as_str).and_then(parse_date),
            open: number(&["1. open", "open"]),
            high: number(&["2. high", "high"]),
            low: number(&["3. low", "low"]),
            close: number(&["4. close", "close"]),
            volume: number(&["5. volume", "volume"]),
        }
    }
}

impl HistoricalSeries {
    /// Bars in chronological order with `date` filled from the series key.
    /// Entries whose key is not a date are skipped.
    pub fn bars(&self) -> Vec<DayBar> {
        let Some(series) = &self.series else {
            return Vec::new();
        };

        let mut bars: Vec<DayBar> = series
            .iter()
            .filter_map(|(key, bar)| {
                let date = custom_date_serde::parse_date(key)?;
                Some(DayBar {
                    date: Some(date),
                    ..bar.clone()
                })
            })
            .collect();
        bars.sort_by_key(|bar| bar.date);
        bars
    }

    pub fn latest_close(&self) -> Option<f64> {
        self.bars().last().and_then(|bar| bar.close)
    }

    pub fn symbol(&self) -> Option<&str> {
        self.meta_data.as_ref().and_then(|m| m.symbol.as_deref())
    }

    pub fn notice(&self) -> Option<&str> {
        self.note.as_deref().or(self.information.as_deref())
    }
}
