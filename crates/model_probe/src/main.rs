//! model_probe - check which image-generation model ids an endpoint serves
//!
//! Sends one generate-content request per configured model id, asking for
//! TEXT and IMAGE parts, then reports which ids answered with content.
//! A model that fails only marks itself unavailable; the run always covers
//! the whole list. Only a configuration or client construction problem
//! exits non-zero.
//!
//! Usage:
//!     cargo run --bin model_probe
//!
//! Configuration comes from the environment or a .env file; see
//! `ProbeConfig::from_env` for the variable names.

use anyhow::Result;
use colored::Colorize;
use model_probe::config::ProbeConfig;
use model_probe::genai::GenaiClient;
use model_probe::prober::probe_all;
use model_probe::report::{banner, print_report, summarize};

#[tokio::main]
async fn main() -> Result<()> {
    println!();
    banner("Image-generation model availability probe");

    let config = ProbeConfig::from_env()?;
    println!("Base URL: {}", config.base_url);
    println!("Models to test: {}", config.models.len());

    println!("\nInitializing client...");
    let client = GenaiClient::new(&config)?;
    println!("{}", "✓ Client ready".green());

    let results = probe_all(&client, &config.models, &config.prompt).await;
    let report = summarize(&results);
    print_report(&results, &report);

    Ok(())
}
