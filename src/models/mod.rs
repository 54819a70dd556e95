//! Typed payloads for each dashboard category.
//!
//! Every field is optional. A body that is valid JSON always decodes; fields
//! that are missing or of an unexpected type come back as `None`, and a
//! document that is not an object decodes to an empty payload.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::store::Category;
use crate::utils::lenient;

pub mod comprehensive;
pub mod historical;
pub mod news;
pub mod predictions;
pub mod quote;

pub use comprehensive::ComprehensiveQuote;
pub use historical::{DayBar, HistoricalSeries, SeriesMeta};
pub use news::{Article, ArticleSentiment, NewsFeed, Sentiment, SentimentAnalysis};
pub use predictions::{
    DailyPrediction, PredictionSet, PredictionSummary, PredictionSummaryReport, Trend,
};
pub use quote::{GlobalQuote, Quote};

/// Data held by a succeeded slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Quote(Quote),
    Comprehensive(ComprehensiveQuote),
    Historical(HistoricalSeries),
    Predictions(PredictionSet),
    PredictionSummary(PredictionSummaryReport),
    News(NewsFeed),
}

impl Payload {
    pub fn category(&self) -> Category {
        match self {
            Payload::Quote(_) => Category::Quote,
            Payload::Comprehensive(_) => Category::Comprehensive,
            Payload::Historical(_) => Category::Historical,
            Payload::Predictions(_) => Category::Predictions,
            Payload::PredictionSummary(_) => Category::PredictionSummary,
            Payload::News(_) => Category::News,
        }
    }

    /// Decode a JSON document for `category`. Never fails; a document of the
    /// wrong shape yields an empty payload.
    pub fn from_value(category: Category, value: Value) -> Self {
        match category {
            Category::Quote => Payload::Quote(lenient_decode(value)),
            Category::Comprehensive => Payload::Comprehensive(lenient_decode(value)),
            Category::Historical => Payload::Historical(lenient_decode(value)),
            Category::Predictions => Payload::Predictions(PredictionSet::from_value(value)),
            Category::PredictionSummary => Payload::PredictionSummary(lenient_decode(value)),
            Category::News => Payload::News(lenient_decode(value)),
        }
    }
}

/// Decode `value` as `T`, falling back to `T::default()` when the document
/// is not a JSON object.
pub(crate) fn lenient_decode<T: DeserializeOwned + Default>(value: Value) -> T {
    lenient::from_object(value).unwrap_or_default()
}
