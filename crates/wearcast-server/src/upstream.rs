//! Client for the text-generation provider's responses endpoint.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::RelayError;

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const RESPONSES_PATH: &str = "/v1/responses";

/// Client for the generation provider. The credential is passed per call so
/// request logic never reads the process environment.
#[derive(Clone)]
pub struct GenerationClient {
    client: Client,
    base_url: Url,
}

#[derive(Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    instructions: &'a str,
    input: &'a str,
}

/// Provider response envelope. Either a flattened convenience field or an
/// ordered list of output items carrying content parts.
#[derive(Debug, Deserialize)]
struct GenerationEnvelope {
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    text: Option<String>,
}

impl GenerationClient {
    /// Creates a client for the given provider base URL.
    ///
    /// # Errors
    ///
    /// Fails if the base URL does not parse or the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)?;

        Ok(Self { client, base_url })
    }

    /// Sends a prompt to the provider and extracts plain suggestion text
    /// from its response envelope.
    ///
    /// # Errors
    ///
    /// - [`RelayError::Upstream`] when the provider answers with status
    ///   >= 400, embedding the status and body.
    /// - [`RelayError::EmptyResult`] when the envelope cannot be decoded.
    /// - [`RelayError::Http`] on transport failure.
    pub async fn generate(
        &self,
        api_key: &str,
        instructions: &str,
        input: &str,
    ) -> Result<String, RelayError> {
        let mut url = self.base_url.clone();
        url.set_path(RESPONSES_PATH);

        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(&GenerationRequest {
                model: DEFAULT_MODEL,
                instructions,
                input,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.as_u16() >= 400 {
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GenerationEnvelope = serde_json::from_str(&body).map_err(|error| {
            tracing::warn!(%error, "generation response envelope did not decode");
            RelayError::EmptyResult
        })?;

        Ok(extract_text(&envelope))
    }
}

/// Prefer the flattened text field when it carries content; otherwise join
/// the text-bearing parts of message-type output items, in order.
fn extract_text(envelope: &GenerationEnvelope) -> String {
    if let Some(text) = &envelope.output_text {
        if !text.trim().is_empty() {
            return text.trim().to_owned();
        }
    }

    envelope
        .output
        .iter()
        .filter(|item| item.kind == "message")
        .flat_map(|item| item.content.iter())
        .filter_map(|part| part.text.as_deref())
        .collect::<Vec<_>>()
        .join("")
        .trim()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(json: serde_json::Value) -> GenerationEnvelope {
        serde_json::from_value(json).expect("envelope")
    }

    #[test]
    fn flattened_field_wins_when_present() {
        let parsed = envelope(serde_json::json!({
            "output_text": "wear a coat",
            "output": [
                { "type": "message", "content": [{ "text": "ignored" }] }
            ]
        }));
        assert_eq!(extract_text(&parsed), "wear a coat");
    }

    #[test]
    fn message_items_are_joined_in_order() {
        let parsed = envelope(serde_json::json!({
            "output": [
                { "type": "reasoning", "content": [{ "text": "skip me" }] },
                { "type": "message", "content": [{ "text": "**Base Layer**: tee\n" }] },
                { "type": "message", "content": [{ "text": "**Accessories**: cap" }] }
            ]
        }));
        assert_eq!(
            extract_text(&parsed),
            "**Base Layer**: tee\n**Accessories**: cap"
        );
    }

    #[test]
    fn parts_without_text_are_skipped() {
        let parsed = envelope(serde_json::json!({
            "output": [
                { "type": "message", "content": [{}, { "text": "scarf" }] }
            ]
        }));
        assert_eq!(extract_text(&parsed), "scarf");
    }

    #[test]
    fn empty_envelope_extracts_to_empty_string() {
        let parsed = envelope(serde_json::json!({}));
        assert_eq!(extract_text(&parsed), "");

        let parsed = envelope(serde_json::json!({ "output_text": "   " }));
        assert_eq!(extract_text(&parsed), "");
    }
}
