//! Generate-content wire types and the HTTP client handle.
//!
//! The endpoint speaks the GenAI REST dialect:
//! `POST {base}/{version}/models/{model}:generateContent` with the credential
//! in the `x-goog-api-key` header. Responses carry candidates whose parts are
//! either text or inline binary data.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ProbeConfig;

/// Failure kinds for a single generate-content call.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Client could not be built; fatal to the whole run.
    #[error("client construction failed: {0}")]
    Construction(String),

    /// Transport-level failure (DNS, connect, TLS, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status or garbage.
    #[error("remote rejected request ({status}): {message}")]
    Remote { status: u16, message: String },

    /// A well-formed response that carried no usable parts.
    #[error("empty response")]
    EmptyResponse,
}

/// Requested output kind for a generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modality {
    Text,
    Image,
}

/// Inline binary payload with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Base64-encoded bytes.
    #[serde(default)]
    pub data: String,
}

/// One unit of response payload: text or inline data, rarely both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(Blob {
                mime_type: Some(mime_type.into()),
                data: data.into(),
            }),
        }
    }
}

/// A turn of content: ordered parts plus an optional role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Generation options; only the modality list matters to the probe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<Modality>>,
}

/// Body of a generate-content request. The model id travels in the URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// One user turn carrying the prompt, asking for the given modalities.
    pub fn new(prompt: &str, modalities: &[Modality]) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part::text(prompt)],
                role: Some("user".to_string()),
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: Some(modalities.to_vec()),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_id: Option<String>,
}

impl GenerateContentResponse {
    /// Parts of the first candidate, in response order.
    pub fn parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.parts.as_slice())
            .unwrap_or(&[])
    }
}

/// Handle over one HTTP client, endpoint, and credential. Read-only after
/// construction; reused across sequential probe calls.
pub struct GenaiClient {
    http: reqwest::Client,
    base_url: String,
    api_version: String,
    api_key: String,
}

impl GenaiClient {
    pub fn new(config: &ProbeConfig) -> Result<Self, ProbeError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ProbeError::Construction(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Literal URL a generate-content call for `model` will POST to.
    pub fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url, self.api_version, model
        )
    }

    /// Send one generate-content request and decode the response.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProbeError> {
        let response = self
            .http
            .post(self.generate_url(model))
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProbeError::Remote {
                status: status.as_u16(),
                message: remote_error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| ProbeError::Remote {
            status: status.as_u16(),
            message: format!("unparseable response body: {}", e),
        })
    }
}

/// Pull `error.message` out of a JSON error body, falling back to the raw
/// text. Gateways differ in how much structure their errors carry.
fn remote_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|error| error.get("message"))
                .and_then(|message| message.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
