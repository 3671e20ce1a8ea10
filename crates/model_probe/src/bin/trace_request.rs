//! Diagnostic tool that shows the literal HTTP request a probe sends
//!
//! Prints the exact URL, headers, and payload of one generate-content call,
//! then dumps the raw response. Useful when a gateway rewrites paths and a
//! probe fails for URL reasons rather than model availability.

use anyhow::Result;
use model_probe::config::ProbeConfig;
use model_probe::genai::{GenerateContentRequest, Modality};
use model_probe::safe_truncate;
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Trace: generate-content request ===\n");

    let config = ProbeConfig::from_env()?;

    println!("✓ API key found: {}...", safe_truncate(&config.api_key, 20));
    println!("✓ Base URL: {}", config.base_url);

    // One model is enough to see the path; TRACE_MODEL overrides the list.
    let model = match env::var("TRACE_MODEL") {
        Ok(model) => model,
        Err(_) => config
            .models
            .first()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no models configured"))?,
    };
    println!("✓ Model: {}", model);

    println!("\n=== Request ===\n");

    let url = format!(
        "{}/{}/models/{}:generateContent",
        config.base_url.trim_end_matches('/'),
        config.api_version,
        model
    );
    println!("URL: {}", url);

    let payload = GenerateContentRequest::new(&config.prompt, &[Modality::Text, Modality::Image]);
    println!("Payload: {}", serde_json::to_string_pretty(&payload)?);

    let client = reqwest::Client::new();
    let response = client
        .post(&url)
        .header("x-goog-api-key", &config.api_key)
        .header("content-type", "application/json")
        .json(&payload)
        .send()
        .await?;

    println!("\n=== Response ===");
    println!("Status: {}", response.status());
    println!("Headers:");
    for (key, value) in response.headers() {
        println!("  {}: {:?}", key, value);
    }

    let body = response.text().await?;
    println!("\nBody (first 1000 bytes):");
    println!("{}", safe_truncate(&body, 1000));
    if body.len() > 1000 {
        println!("... (truncated, total {} bytes)", body.len());
    }

    println!("\n=== Parsing as JSON ===");
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(json) => {
            println!("✓ Valid JSON:");
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Err(e) => {
            println!("✗ Not valid JSON: {}", e);
            println!("\nThis might be HTML or plain text. First 500 bytes:");
            println!("{}", safe_truncate(&body, 500));
        }
    }

    Ok(())
}
