use thiserror::Error;

/// Failure at the fetch boundary. The `Display` text is what ends up in a
/// failed slice's `error`.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid symbol `{0}`.")]
    InvalidSymbol(String),
    #[error("Prediction days must be between 1 and {max}, got {days}.")]
    InvalidHorizon { days: u32, max: u32 },
    #[error("Network Error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Request failed with status code {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },
    #[error("Invalid response body: {0}")]
    Decode(#[source] serde_json::Error),
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) if !detail.trim().is_empty() => format!(": {}", detail.trim()),
        _ => String::new(),
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FetchError::Status {
                status: status.as_u16(),
                detail: None,
            },
            None => FetchError::Network(err),
        }
    }
}
