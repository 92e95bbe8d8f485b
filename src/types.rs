//! Shared result types produced by the analysis stages.
//!
//! Every type here is created once per submission and never mutated after it
//! leaves the stage that built it. All of them serialize to a flat JSON tree
//! with the camelCase field names callers depend on, so renaming a field is a
//! breaking change for every consumer of the JSON output.

use serde::{Deserialize, Serialize};

/// Outcome of a single image-quality check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityCheck {
    pub passed: bool,
    /// Measured value (pixels, luma, focus score or edge ratio depending on the check).
    pub value: f64,
    /// The bound the value was compared against.
    pub threshold: f64,
    pub message: String,
}

/// The four quality checks, one per named slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityChecks {
    pub resolution: QualityCheck,
    pub brightness: QualityCheck,
    pub focus: QualityCheck,
    pub card_detection: QualityCheck,
}

impl QualityChecks {
    /// All four checks in a fixed order: resolution, brightness, focus, card detection.
    pub fn iter(&self) -> impl Iterator<Item = &QualityCheck> {
        [
            &self.resolution,
            &self.brightness,
            &self.focus,
            &self.card_detection,
        ]
        .into_iter()
    }

    pub fn passed_count(&self) -> usize {
        self.iter().filter(|c| c.passed).count()
    }
}

/// What the caller should ask the user to do with this photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Good,
    Acceptable,
    Retake,
}

impl Recommendation {
    /// Map the number of passing checks (0–4) to a recommendation.
    pub fn from_passed(passed: usize) -> Self {
        match passed {
            0 | 1 => Self::Retake,
            2 | 3 => Self::Acceptable,
            _ => Self::Good,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Acceptable => "acceptable",
            Self::Retake => "retake",
        }
    }
}

/// Aggregated quality verdict for one photo.
///
/// `score` is always one of 0, 25, 50, 75 or 100 and both `recommendation`
/// and `is_acceptable` are pure functions of the passing-check count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageQualityResult {
    pub is_acceptable: bool,
    pub score: u8,
    pub checks: QualityChecks,
    pub recommendation: Recommendation,
}

/// Where the photo most likely came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    Camera,
    Screenshot,
    Unknown,
}

impl ImageSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Camera => "camera",
            Self::Screenshot => "screenshot",
            Self::Unknown => "unknown",
        }
    }
}

/// Provenance findings from embedded capture metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataResult {
    pub has_exif: bool,
    pub has_device_info: bool,
    pub has_capture_date: bool,
    #[serde(rename = "hasGPS")]
    pub has_gps: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture_date: Option<String>,
    pub image_source: ImageSource,
    /// Advisory warnings in priority order.
    pub warnings: Vec<String>,
}

impl MetadataResult {
    /// The conservative result: nothing known, provenance unknown, no warnings yet.
    pub fn empty() -> Self {
        Self {
            has_exif: false,
            has_device_info: false,
            has_capture_date: false,
            has_gps: false,
            device_make: None,
            device_model: None,
            capture_date: None,
            image_source: ImageSource::Unknown,
            warnings: Vec::new(),
        }
    }
}

/// One factor reported by the remote risk assessment.
///
/// Only `confidence` is interpreted here; the other fields are carried for
/// display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 0–100.
    pub confidence: f64,
}

/// Externally produced AI risk assessment. Higher `risk_score` = less trustworthy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// 0–100, risk polarity.
    pub risk_score: f64,
    #[serde(default)]
    pub factors: Vec<RiskFactor>,
    #[serde(default)]
    pub positive_signals: Vec<String>,
    #[serde(default)]
    pub uncertain_areas: Vec<String>,
}

/// Three-step scale shared by trust, confidence and risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Final fused verdict handed to the caller. Higher `trust_score` = more trustworthy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticityResult {
    pub trust_score: u8,
    pub trust_level: Level,
    pub confidence: Level,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_note: Option<String>,
    /// Never empty; meant to be displayed verbatim next to the score.
    pub limitations: Vec<String>,
    pub image_quality: ImageQualityResult,
    pub metadata_check: MetadataResult,
}
