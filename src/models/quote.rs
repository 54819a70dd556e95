use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::custom_date_serde::{self, parse_date};
use crate::utils::lenient::{self, first};
use crate::utils::lenient_number::{self, value_as_f64};

/// Body of `/quote/{symbol}`, an Alpha Vantage `GLOBAL_QUOTE` passthrough.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Quote {
    #[serde(rename = "Global Quote", default, deserialize_with = "lenient::object")]
    pub global_quote: Option<GlobalQuote>,
    /// Rate-limit notice the provider returns with a 200.
    #[serde(rename = "Note", default, deserialize_with = "lenient::option")]
    pub note: Option<String>,
    #[serde(rename = "Information", default, deserialize_with = "lenient::option")]
    pub information: Option<String>,
}

impl Quote {
    pub fn price(&self) -> Option<f64> {
        self.global_quote.as_ref().and_then(|q| q.price)
    }

    pub fn symbol(&self) -> Option<&str> {
        self.global_quote.as_ref().and_then(|q| q.symbol.as_deref())
    }

    /// Provider notice, whichever of `Note` or `Information` carried it.
    pub fn notice(&self) -> Option<&str> {
        self.note.as_deref().or(self.information.as_deref())
    }
}

impl From<GlobalQuote> for Quote {
    fn from(global_quote: GlobalQuote) -> Self {
        Self {
            global_quote: Some(global_quote),
            ..Self::default()
        }
    }
}

/// Alpha Vantage numbers every quote key ("05. price"); plain names are
/// accepted too since the comprehensive endpoint reuses this shape. When
/// both are present the numbered key wins.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(from = "Map<String, Value>")]
pub struct GlobalQuote {
    #[serde(rename = "01. symbol")]
    pub symbol: Option<String>,
    #[serde(rename = "02. open", serialize_with = "lenient_number::serialize")]
    pub open: Option<f64>,
    #[serde(rename = "03. high", serialize_with = "lenient_number::serialize")]
    pub high: Option<f64>,
    #[serde(rename = "04. low", serialize_with = "lenient_number::serialize")]
    pub low: Option<f64>,
    #[serde(rename = "05. price", serialize_with = "lenient_number::serialize")]
    pub price: Option<f64>,
    #[serde(rename = "06. volume", serialize_with = "lenient_number::serialize")]
    pub volume: Option<f64>,
    #[serde(
        rename = "07. latest trading day",
        serialize_with = "custom_date_serde::serialize"
    )]
    pub latest_trading_day: Option<NaiveDate>,
    #[serde(rename = "08. previous close", serialize_with = "lenient_number::serialize")]
    pub previous_close: Option<f64>,
    #[serde(rename = "09. change", serialize_with = "lenient_number::serialize")]
    pub change: Option<f64>,
    #[serde(rename = "10. change percent", serialize_with = "lenient_number::serialize")]
    pub change_percent: Option<f64>,
}

impl From<Map<String, Value>> for GlobalQuote {
    fn from(map: Map<String, Value>) -> Self {
        let number = |keys: &[&str]| first(&map, keys).and_then(value_as_f64);

        Self {
            symbol: first(&map, &["01. symbol", "symbol"])
                .and_then(Value::as_str)
                .map(str::to_string),
            open: number(&["02. open", "open"]),
            high: number(&["03. high", "high"]),
            low: number(&["04. low", "low"]),
            price: number(&["05. price", "price"]),
            volume: number(&["06. volume", "volume"]),
            latest_trading_day: first(&map, &["07. latest trading day", "latest_trading_day"])
                .and_then(Value::as_str)
                .and_then(parse_date),
            previous_close: number(&["08. previous close", "previous_close"]),
            change: number(&["09. change", "change"]),
            change_percent: number(&["10. change percent", "change_percent"]),
        }
    }
}
