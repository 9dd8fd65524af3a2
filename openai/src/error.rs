use thiserror::Error;

/// Errors that can arise when calling an `OpenAI`-compatible API.
#[derive(Debug, Error)]
pub enum OpenAIError {
    /// HTTP transport errors (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status returned by the API.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or status description.
        message: String,
    },

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response decoded but did not carry the expected payload.
    #[error("{0}")]
    MissingData(String),
}

impl OpenAIError {
    /// Returns `true` for failures worth retrying: transport errors, rate
    /// limits, and server-side errors. Client errors (bad request, auth)
    /// and malformed payloads are not retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::Json(_) | Self::MissingData(_) => false,
        }
    }
}
