//! HTTP client for the relay's suggest endpoint.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde_json::Value;

use wearcast_core::WeatherSnapshot;

use crate::error::AdviceError;

/// Shown when an error response carries neither a structured error field nor
/// usable body text.
const FALLBACK_MESSAGE: &str = "The suggestion service is unavailable right now.";

/// Client for the relay's `/api/suggest` endpoint.
///
/// Stateless: each call reads a snapshot and returns the raw suggestion
/// text. Point `base_url` at a wiremock server in tests.
pub struct AdviceClient {
    client: Client,
    base_url: Url,
}

impl AdviceClient {
    /// Creates a new client for the given relay base URL.
    ///
    /// # Errors
    ///
    /// Returns [`AdviceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`AdviceError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, AdviceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| AdviceError::InvalidBaseUrl(format!("'{base_url}': {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Requests a clothing suggestion for the given snapshot.
    ///
    /// The response body is read regardless of its declared content type and
    /// parsed as JSON only when the response says it is JSON; a parse
    /// failure downgrades silently to treating the body as plain text. An
    /// empty suggestion on a success status is returned as `Ok("")` — the
    /// caller decides how to present "nothing to say".
    ///
    /// # Errors
    ///
    /// - [`AdviceError::Suggestion`] on a non-success status, carrying the
    ///   structured `error` field when present, else the raw body, else a
    ///   fixed fallback message.
    /// - [`AdviceError::Http`] on transport failure.
    pub async fn request_suggestion(
        &self,
        snapshot: &WeatherSnapshot,
    ) -> Result<String, AdviceError> {
        let url = self.suggest_url();
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({ "weather": snapshot }))
            .send()
            .await?;

        let status = response.status();
        let declares_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));
        let body = response.text().await?;

        let parsed: Option<Value> = if declares_json {
            serde_json::from_str(&body).ok()
        } else {
            None
        };

        if !status.is_success() {
            let message = parsed
                .as_ref()
                .and_then(|value| value.get("error"))
                .and_then(Value::as_str)
                .map(ToOwned::to_owned)
                .or_else(|| {
                    let trimmed = body.trim();
                    (!trimmed.is_empty()).then(|| trimmed.to_owned())
                })
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_owned());
            return Err(AdviceError::Suggestion(message));
        }

        let suggestion = parsed
            .as_ref()
            .and_then(|value| value.get("suggestion"))
            .and_then(Value::as_str)
            .map_or(body, ToOwned::to_owned);

        Ok(suggestion)
    }

    fn suggest_url(&self) -> Url {
        let mut url = self.base_url.clone();
        url.set_path("/api/suggest");
        url
    }
}
