use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The six independently tracked data categories of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Quote,
    Comprehensive,
    Historical,
    Predictions,
    PredictionSummary,
    News,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Quote,
        Category::Comprehensive,
        Category::Historical,
        Category::Predictions,
        Category::PredictionSummary,
        Category::News,
    ];

    /// Name used in URLs, logs and snapshots. Matches the remote endpoint
    /// path segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Quote => "quote",
            Category::Comprehensive => "comprehensive",
            Category::Historical => "historical",
            Category::Predictions => "predictions",
            Category::PredictionSummary => "prediction-summary",
            Category::News => "news",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown category `{}`.", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
