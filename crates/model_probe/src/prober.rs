//! The availability prober: one generate-content call per model identifier.

use colored::Colorize;

use crate::genai::{
    GenaiClient, GenerateContentRequest, GenerateContentResponse, Modality, ProbeError,
};
use crate::report::banner;
use crate::safe_truncate;

/// Longest error preview kept on a failed probe.
pub const ERROR_PREVIEW_LEN: usize = 200;

/// Outcome of probing one model identifier. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub model: String,
    pub success: bool,
    pub has_text: bool,
    pub has_image: bool,
    pub error: Option<String>,
}

/// Probe one model: send a generate request asking for TEXT and IMAGE parts
/// and classify whatever comes back. Every failure is caught here and folded
/// into the result; a broken model never aborts the run.
pub async fn probe(client: &GenaiClient, model: &str, prompt: &str) -> ProbeResult {
    println!();
    banner(&format!("Testing model: {}", model.bright_blue()));
    println!("Calling generate-content endpoint...");

    let request = GenerateContentRequest::new(prompt, &[Modality::Text, Modality::Image]);
    let outcome = client.generate_content(model, &request).await;

    if let Ok(response) = &outcome {
        for part in response.parts() {
            if let Some(text) = part.text.as_deref().filter(|t| !t.is_empty()) {
                println!(
                    "   {} text part: {}...",
                    "✓".green(),
                    safe_truncate(text, 100)
                );
            } else if let Some(blob) = part.inline_data.as_ref().filter(|b| !b.data.is_empty()) {
                println!(
                    "   {} image part (mime_type: {})",
                    "✓".green(),
                    blob.mime_type.as_deref().unwrap_or("unknown")
                );
            }
        }
    }

    let result = classify(model, outcome);
    match result.error.as_deref() {
        None => println!("{} Model available", "✓".green()),
        Some("empty response") => {
            println!("{} Response carried no usable parts", "⚠".yellow())
        }
        Some(error) => println!("{} Failed - {}", "✗".red(), error),
    }

    result
}

/// Turn one call outcome into a `ProbeResult`. Pure; never fails.
pub fn classify(model: &str, outcome: Result<GenerateContentResponse, ProbeError>) -> ProbeResult {
    match outcome {
        Ok(response) => {
            let mut has_text = false;
            let mut has_image = false;
            for part in response.parts() {
                if part.text.as_deref().is_some_and(|t| !t.is_empty()) {
                    has_text = true;
                } else if part.inline_data.as_ref().is_some_and(|b| !b.data.is_empty()) {
                    has_image = true;
                }
            }

            if has_text || has_image {
                ProbeResult {
                    model: model.to_string(),
                    success: true,
                    has_text,
                    has_image,
                    error: None,
                }
            } else {
                ProbeResult {
                    model: model.to_string(),
                    success: false,
                    has_text: false,
                    has_image: false,
                    error: Some(ProbeError::EmptyResponse.to_string()),
                }
            }
        }
        Err(error) => {
            let message = error.to_string();
            ProbeResult {
                model: model.to_string(),
                success: false,
                has_text: false,
                has_image: false,
                error: Some(safe_truncate(&message, ERROR_PREVIEW_LEN).to_string()),
            }
        }
    }
}

/// Probe every model in input order. One attempt per model, no early
/// termination: N models in, N results out.
pub async fn probe_all(client: &GenaiClient, models: &[String], prompt: &str) -> Vec<ProbeResult> {
    let mut results = Vec::with_capacity(models.len());
    for model in models {
        results.push(probe(client, model, prompt).await);
    }
    results
}
