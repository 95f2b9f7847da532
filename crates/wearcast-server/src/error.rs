use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Failures of the suggest endpoint.
///
/// Every variant renders as a JSON `{"error": message}` body; the connection
/// is never closed without one.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The caller's body is unusable.
    #[error("{0}")]
    BadRequest(String),

    /// No upstream credential configured for this process.
    #[error("OPEN_AI_KEY is missing in .env")]
    Configuration,

    /// The generation provider answered with an error status.
    #[error("generation provider returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The provider call succeeded but no usable text could be extracted.
    #[error("generation provider returned an empty suggestion")]
    EmptyResult,

    /// Transport failure talking to the provider.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = match &self {
            RelayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::Configuration
            | RelayError::Upstream { .. }
            | RelayError::EmptyResult
            | RelayError::Http(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "suggest request failed");
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
