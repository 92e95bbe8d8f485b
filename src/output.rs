//! CLI output formatting for analysis reports.
//!
//! # Verdict-First Display
//!
//! Every report leads with the one line a user acts on (recommendation,
//! provenance, trust score), followed by indented context lines explaining
//! how it was reached. Limitations are printed verbatim, never summarized.
//!
//! # Output Format
//!
//! ## Quality
//!
//! ```text
//! Quality: acceptable (75/100)
//!     pass  resolution      Resolution 2000x2600 is sufficient
//!     pass  brightness      Brightness is acceptable (average 182.5)
//!     FAIL  focus           Image appears blurry (focus score 42.0); hold steady and tap to focus
//!     pass  card detection  Card detected in the center of the frame
//! ```
//!
//! ## Metadata
//!
//! ```text
//! Provenance: camera
//!     Device: Apple iPhone 14 Pro
//!     Captured: 2024-03-15T14:22:05
//!     GPS: present
//! ```
//!
//! ## Analyze
//!
//! ```text
//! Trust: 65/100 (medium), confidence medium
//!     Note: Score reduced by 15: ...
//! <quality report>
//! <metadata report>
//! Limitations
//!     - This is a preliminary, automated signal, ...
//! ```
//!
//! # Architecture
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::types::{AuthenticityResult, ImageQualityResult, MetadataResult, QualityCheck};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn check_line(label: &str, check: &QualityCheck) -> String {
    let status = if check.passed { "pass" } else { "FAIL" };
    format!("{}{status}  {label:<14}  {}", indent(1), check.message)
}

pub fn format_quality(quality: &ImageQualityResult) -> Vec<String> {
    let c = &quality.checks;
    vec![
        format!(
            "Quality: {} ({}/100)",
            quality.recommendation.as_str(),
            quality.score
        ),
        check_line("resolution", &c.resolution),
        check_line("brightness", &c.brightness),
        check_line("focus", &c.focus),
        check_line("card detection", &c.card_detection),
    ]
}

pub fn print_quality(quality: &ImageQualityResult) {
    for line in format_quality(quality) {
        println!("{}", line);
    }
}

pub fn format_metadata(metadata: &MetadataResult) -> Vec<String> {
    let mut lines = vec![format!("Provenance: {}", metadata.image_source.as_str())];

    let device: Vec<&str> = [&metadata.device_make, &metadata.device_model]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .collect();
    if !device.is_empty() {
        lines.push(format!("{}Device: {}", indent(1), device.join(" ")));
    }
    if let Some(date) = &metadata.capture_date {
        lines.push(format!("{}Captured: {}", indent(1), date));
    }
    if metadata.has_gps {
        lines.push(format!("{}GPS: present", indent(1)));
    }
    for warning in &metadata.warnings {
        lines.push(format!("{}Warning: {}", indent(1), warning));
    }
    lines
}

pub fn print_metadata(metadata: &MetadataResult) {
    for line in format_metadata(metadata) {
        println!("{}", line);
    }
}

pub fn format_authenticity(result: &AuthenticityResult) -> Vec<String> {
    let mut lines = vec![format!(
        "Trust: {}/100 ({}), confidence {}",
        result.trust_score,
        result.trust_level.as_str(),
        result.confidence.as_str()
    )];
    if let Some(note) = &result.score_note {
        lines.push(format!("{}Note: {}", indent(1), note));
    }
    lines.extend(format_quality(&result.image_quality));
    lines.extend(format_metadata(&result.metadata_check));
    lines.push("Limitations".to_string());
    lines.extend(
        result
            .limitations
            .iter()
            .map(|l| format!("{}- {}", indent(1), l)),
    );
    lines
}

pub fn print_authenticity(result: &AuthenticityResult) {
    for line in format_authenticity(result) {
        println!("{}", line);
    }
}
