use serde::{Deserialize, Serialize};

use crate::utils::lenient;

/// Body of `/news/{symbol}`: a NewsAPI `everything` response with the
/// backend's keyword sentiment attached.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NewsFeed {
    #[serde(default, deserialize_with = "lenient::option")]
    pub status: Option<String>,
    #[serde(rename = "totalResults", default, deserialize_with = "lenient::option")]
    pub total_results: Option<u64>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub articles: Vec<Article>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub sentiment_analysis: Option<SentimentAnalysis>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Article {
    #[serde(default, deserialize_with = "lenient::option")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub author: Option<String>,
    #[serde(rename = "publishedAt", default, deserialize_with = "lenient::option")]
    pub published_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub source: Option<ArticleSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ArticleSource {
    #[serde(default, deserialize_with = "lenient::option")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SentimentAnalysis {
    #[serde(default, deserialize_with = "lenient::seq")]
    pub articles: Vec<ArticleSentiment>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub overall_sentiment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ArticleSentiment {
    #[serde(default, deserialize_with = "lenient::option")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub sentiment: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub score: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("positive") => Sentiment::Positive,
            Some(s) if s.eq_ignore_ascii_case("negative") => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

impl NewsFeed {
    /// First `limit` articles that carry a title.
    pub fn headlines(&self, limit: usize) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|a| a.title.as_deref().is_some_and(|t| !t.trim().is_empty()))
            .take(limit)
            .collect()
    }

    pub fn overall_sentiment(&self) -> Sentiment {
        Sentiment::parse(
            self.sentiment_analysis
                .as_ref()
                .and_then(|s| s.overall_sentiment.as_deref()),
        )
    }
}
