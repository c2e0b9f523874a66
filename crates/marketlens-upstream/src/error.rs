use std::time::Duration;

use thiserror::Error;

/// Failures of the single upstream search call. None of them are retried.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("upstream transport error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("upstream did not answer within {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("upstream request cancelled")]
    Cancelled,

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid upstream base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl UpstreamError {
    /// HTTP status reported by the upstream, when the failure carried one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            UpstreamError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
