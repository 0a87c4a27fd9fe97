//! Error types for the NFTGo SDK

use thiserror::Error;

/// Errors that can occur when calling an NFTGo endpoint
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Non-success HTTP status
    #[error("HTTP error: {0}")]
    Http(String),

    /// The backend answered with a non-zero `errorCode`
    #[error("API error code {code}: {message}")]
    Application { code: i64, message: String },

    /// The endpoint has no backend field for the requested ordering
    #[error("Ordering {order_by} is not supported by {endpoint}")]
    UnsupportedOrdering {
        endpoint: &'static str,
        order_by: String,
    },
}

/// Errors raised by the trade trackers and aggregation helpers
#[derive(Debug, Error)]
pub enum TrackerError {
    /// No trade was found in the lookback window while seeding the watermark
    #[error("No trades from {feed} in the last {lookback_secs}s, cannot seed watermark")]
    Bootstrap { feed: String, lookback_secs: u64 },

    /// A page of a forward-paginated aggregation reported an application error
    #[error("Aggregation aborted at offset {offset}: error code {code}: {message}")]
    Aggregation {
        code: i64,
        offset: u32,
        message: String,
    },

    /// Transport-level failure, passed through unmodified
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl TrackerError {
    /// Creates a Bootstrap error
    pub fn bootstrap(feed: &str, lookback_secs: u64) -> Self {
        Self::Bootstrap {
            feed: feed.to_string(),
            lookback_secs,
        }
    }

    /// Creates an Aggregation error
    pub fn aggregation(code: i64, offset: u32, message: impl Into<String>) -> Self {
        Self::Aggregation {
            code,
            offset,
            message: message.into(),
        }
    }
}
