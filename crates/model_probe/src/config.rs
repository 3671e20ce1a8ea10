//! Probe configuration, read once from the environment.

use anyhow::Result;
use std::env;

/// Endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://zenmux.ai/api/vertex-ai";

/// API version segment of the request path.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Kept short so a working model answers well before the transport timeout.
pub const DEFAULT_PROMPT: &str = "Create a simple red circle on white background";

/// Model identifiers probed when PROBE_MODELS is not set.
pub const DEFAULT_MODELS: [&str; 4] = [
    "google/gemini-3-pro-image-preview",
    "google/gemini-3-pro-image-preview-free",
    "google/gemini-2.5-flash-image",
    "google/gemini-2.5-flash-image-free",
];

/// Everything a probe run needs, resolved up front.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub api_key: String,
    pub base_url: String,
    pub api_version: String,
    pub models: Vec<String>,
    pub prompt: String,
}

impl ProbeConfig {
    /// Build the configuration from environment variables (a `.env` file is
    /// honored). A missing API key is a construction error; everything else
    /// falls back to defaults.
    ///
    /// Variables:
    /// - `ZENMUX_API_KEY` (or `GEMINI_API_KEY`) - required credential
    /// - `ZENMUX_BASE_URL` (or `GENAI_BASE_URL`) - endpoint base URL
    /// - `GENAI_API_VERSION` - path version segment, default `v1`
    /// - `PROBE_MODELS` - comma-separated model ids to test
    /// - `PROBE_PROMPT` - generation prompt sent to each model
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var("ZENMUX_API_KEY")
            .or_else(|_| env::var("GEMINI_API_KEY"))
            .map_err(|_| {
                anyhow::anyhow!("Missing API key: set ZENMUX_API_KEY or GEMINI_API_KEY")
            })?;

        let base_url = env::var("ZENMUX_BASE_URL")
            .or_else(|_| env::var("GENAI_BASE_URL"))
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let api_version =
            env::var("GENAI_API_VERSION").unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());

        let models = match env::var("PROBE_MODELS") {
            Ok(list) => parse_model_list(&list),
            Err(_) => DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
        };
        if models.is_empty() {
            return Err(anyhow::anyhow!(
                "PROBE_MODELS is set but names no models (expected a comma-separated list)"
            ));
        }

        let prompt = env::var("PROBE_PROMPT").unwrap_or_else(|_| DEFAULT_PROMPT.to_string());

        Ok(Self {
            api_key,
            base_url,
            api_version,
            models,
            prompt,
        })
    }
}

/// Split a comma-separated model list, dropping blanks.
pub fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
