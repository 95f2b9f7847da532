use thiserror::Error;

/// Errors returned by the suggestion client.
#[derive(Debug, Error)]
pub enum AdviceError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The relay answered with an error status; the message follows the
    /// relay's error body when one is present.
    #[error("{0}")]
    Suggestion(String),

    /// The configured relay base URL is not a valid URL.
    #[error("invalid relay URL: {0}")]
    InvalidBaseUrl(String),
}
