use thiserror::Error;

/// Errors returned by the forecast and geocoding clients.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success HTTP status.
    #[error("weather provider returned status {0}")]
    Upstream(u16),

    /// A success response without the expected current-conditions payload.
    #[error("forecast response is missing current conditions")]
    DataUnavailable,

    /// The geocoder returned zero matches for the query.
    #[error("no matching city found")]
    NotFound,

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A configured provider base URL is not a valid URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}
