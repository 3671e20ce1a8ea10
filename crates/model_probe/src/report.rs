//! Result partitioning and console rendering of the probe summary.

use colored::Colorize;

use crate::prober::ProbeResult;

/// Probe results split by outcome. Input order is preserved within each list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub available: Vec<ProbeResult>,
    pub unavailable: Vec<ProbeResult>,
}

impl Report {
    pub fn total(&self) -> usize {
        self.available.len() + self.unavailable.len()
    }
}

/// Partition results by success. Pure; does no I/O.
pub fn summarize(results: &[ProbeResult]) -> Report {
    let mut report = Report::default();
    for result in results {
        if result.success {
            report.available.push(result.clone());
        } else {
            report.unavailable.push(result.clone());
        }
    }
    report
}

/// Section header in the style the probe output uses throughout.
pub fn banner(title: &str) {
    println!("{}", "=".repeat(60));
    println!("{}", title);
    println!("{}", "=".repeat(60));
}

/// Render the full report: per-model status lines in input order, counted
/// available/unavailable sections, then a recommendation.
pub fn print_report(results: &[ProbeResult], report: &Report) {
    println!();
    banner("Probe summary");

    for result in results {
        if result.success {
            let mut flags = String::new();
            if result.has_image {
                flags.push_str("🖼️ ");
            }
            if result.has_text {
                flags.push_str("📝");
            }
            println!("{} {} - {}", "✓".green(), result.model, flags.trim_end());
        } else {
            let error = result.error.as_deref().unwrap_or("unknown error");
            println!("{} {} - {}", "✗".red(), result.model, error);
        }
    }

    println!();
    banner(&format!(
        "Available models ({}/{})",
        report.available.len(),
        report.total()
    ));
    if report.available.is_empty() {
        println!("  (none)");
    } else {
        for result in &report.available {
            println!("  - {}", result.model);
        }
    }

    if !report.unavailable.is_empty() {
        println!();
        banner(&format!(
            "Unavailable models ({}/{})",
            report.unavailable.len(),
            report.total()
        ));
        for result in &report.unavailable {
            println!("  - {}", result.model);
        }
    }

    print_recommendation(report);
}

fn print_recommendation(report: &Report) {
    println!();
    banner("Recommendation");

    if let Some(first) = report.available.first() {
        println!(
            "{}",
            format!("Found {} usable model(s)", report.available.len()).green()
        );
        println!("Use the first one as your default image model:");
        println!("  {}", first.model.bright_blue());
        println!();
        println!("To pin future probe runs to the working models, add to .env:");
        let models = report
            .available
            .iter()
            .map(|result| result.model.as_str())
            .collect::<Vec<_>>()
            .join(",");
        println!("  PROBE_MODELS={}", models);
    } else {
        println!("{}", "No usable models found".red());
        println!("Check:");
        println!("  1. The API key is valid");
        println!("  2. The base URL is correct");
        println!("  3. The network can reach the endpoint");
        println!("  4. The provider still serves these model ids");
    }
}
