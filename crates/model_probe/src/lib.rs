//! Availability probing for image-generation model identifiers.
//!
//! A thin diagnostic library: send one generate-content request per model id
//! against a GenAI-compatible endpoint and report which ids answered with
//! text or image parts. Drives the `model_probe` and `trace_request`
//! binaries.

pub mod config;
pub mod genai;
pub mod prober;
pub mod report;

pub use config::ProbeConfig;
pub use genai::{GenaiClient, ProbeError};
pub use prober::{probe, probe_all, ProbeResult};
pub use report::{summarize, Report};

/// Truncate a string at a UTF-8 character boundary.
///
/// `&s[..n]` panics when n lands inside a multi-byte character; this walks
/// back to the largest valid boundary <= max_bytes.
pub fn safe_truncate(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }

    let mut boundary = max_bytes;
    while boundary > 0 && !s.is_char_boundary(boundary) {
        boundary -= 1;
    }

    &s[..boundary]
}
