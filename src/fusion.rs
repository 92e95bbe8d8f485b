//! Score fusion: risk assessment + quality + provenance → one trust verdict.
//!
//! Two 0–100 scales meet here with opposite meaning. The assessment reports
//! *risk* (higher = more likely counterfeit); everything this module returns
//! is *trust* (higher = more likely genuine). [`normalize_trust`] is the only
//! place one becomes the other; no risk-polarity number leaves [`fuse`].
//!
//! ```text
//! riskScore ──normalize──► trust ──metadata modifier──► trustScore ──► trustLevel
//!                                                            │
//! factor confidences + quality score ──────────────────► confidence
//! quality, back image, assessment gaps ────────────────► limitations
//! ```
//!
//! Nothing here fails. A missing assessment yields a neutral base score,
//! low confidence, and a limitation saying so.

use crate::config::FusionConfig;
use crate::types::{
    AuthenticityResult, ImageQualityResult, ImageSource, Level, MetadataResult, Recommendation,
    RiskAssessment,
};
use tracing::debug;

pub const LIMIT_DISCLAIMER: &str = "This is a preliminary, automated signal, not an authoritative authentication";
pub const LIMIT_LOW_QUALITY: &str =
    "Image quality is low, which reduces the reliability of this assessment";
pub const LIMIT_NO_BACK: &str = "No secondary (back-side) image was provided";
pub const LIMIT_BACK_RETAKE: &str =
    "The back-side image is too poor to analyze; consider retaking it";
pub const LIMIT_AI_UNAVAILABLE: &str =
    "AI risk assessment was unavailable; the score reflects image quality and metadata only";

/// Quality score below which the low-quality limitation is added.
const QUALITY_LIMIT_THRESHOLD: u8 = 75;

/// Convert a risk-polarity score into trust polarity.
///
/// Out-of-range input is clamped to 0–100 first; the result is rounded.
pub fn normalize_trust(risk_score: f64) -> u8 {
    (100.0 - risk_score.clamp(0.0, 100.0)).round() as u8
}

/// Adjust a trust score for what the metadata says about capture provenance.
///
/// Screenshots are capped, unknown sources lose a fixed penalty, camera
/// captures pass through. Every adjustment comes with a note for the user.
pub fn apply_metadata_modifier(
    trust_score: u8,
    metadata: &MetadataResult,
    config: &FusionConfig,
) -> (u8, Option<String>) {
    match metadata.image_source {
        ImageSource::Screenshot => (
            trust_score.min(config.screenshot_cap),
            Some(format!(
                "Score capped at {}: the image appears to be a screenshot, edited, or generated rather than a camera photo",
                config.screenshot_cap
            )),
        ),
        ImageSource::Unknown => (
            trust_score.saturating_sub(config.unknown_source_penalty),
            Some(format!(
                "Score reduced by {}: the capture device could not be verified from the image metadata",
                config.unknown_source_penalty
            )),
        ),
        ImageSource::Camera => (trust_score, None),
    }
}

/// Classify a risk-polarity score.
pub fn classify_risk(risk_score: f64) -> Level {
    if risk_score <= 30.0 {
        Level::Low
    } else if risk_score <= 60.0 {
        Level::Medium
    } else {
        Level::High
    }
}

/// Classify a trust-polarity score; the mirror of [`classify_risk`].
pub fn classify_trust(trust_score: u8) -> Level {
    match trust_score {
        70.. => Level::High,
        40..=69 => Level::Medium,
        _ => Level::Low,
    }
}

/// Average of the mean factor confidence and the image-quality score.
///
/// Factor confidences are clamped to 0–100 before averaging.
///
/// Without an assessment there is nothing to be confident about: always low.
pub fn classify_confidence(
    risk: Option<&RiskAssessment>,
    quality_score: u8,
    config: &FusionConfig,
) -> Level {
    let Some(risk) = risk else {
        return Level::Low;
    };
    let factor_confidence = if risk.factors.is_empty() {
        config.default_factor_confidence
    } else {
        risk.factors
            .iter()
            .map(|f| f.confidence.clamp(0.0, 100.0))
            .sum::<f64>()
            / risk.factors.len() as f64
    };
    let combined = (factor_confidence + quality_score as f64) / 2.0;
    if combined >= 75.0 {
        Level::High
    } else if combined >= 50.0 {
        Level::Medium
    } else {
        Level::Low
    }
}

/// Assemble the user-facing limitations. Never empty; the disclaimer is first.
pub fn build_limitations(
    risk: Option<&RiskAssessment>,
    quality: &ImageQualityResult,
    back: Option<&ImageQualityResult>,
) -> Vec<String> {
    let mut limitations = vec![LIMIT_DISCLAIMER.to_string()];

    if quality.score < QUALITY_LIMIT_THRESHOLD {
        limitations.push(LIMIT_LOW_QUALITY.to_string());
    }
    match back {
        None => limitations.push(LIMIT_NO_BACK.to_string()),
        Some(b) if b.recommendation == Recommendation::Retake => {
            limitations.push(LIMIT_BACK_RETAKE.to_string())
        }
        Some(_) => {}
    }
    match risk {
        None => limitations.push(LIMIT_AI_UNAVAILABLE.to_string()),
        Some(r) if !r.uncertain_areas.is_empty() => limitations.push(format!(
            "The assessment was uncertain about: {}",
            r.uncertain_areas.join(", ")
        )),
        Some(_) => {}
    }
    limitations
}

/// Fuse all signals into the final verdict.
///
/// `risk` is `None` when the assessment was unavailable. `back` is the
/// quality result of the secondary image, if one was submitted; the
/// reported `image_quality` is always the front image's.
pub fn fuse(
    risk: Option<&RiskAssessment>,
    quality: ImageQualityResult,
    metadata: MetadataResult,
    back: Option<&ImageQualityResult>,
    config: &FusionConfig,
) -> AuthenticityResult {
    let base = match risk {
        Some(r) => normalize_trust(r.risk_score),
        None => config.unavailable_base_trust,
    };
    let (trust_score, score_note) = apply_metadata_modifier(base, &metadata, config);

    debug!(
        risk_level = risk.map(|r| classify_risk(r.risk_score).as_str()),
        base,
        trust_score,
        source = metadata.image_source.as_str(),
        "scores fused"
    );

    AuthenticityResult {
        trust_score,
        trust_level: classify_trust(trust_score),
        confidence: classify_confidence(risk, quality.score, config),
        score_note,
        limitations: build_limitations(risk, &quality, back),
        image_quality: quality,
        metadata_check: metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessor::tests::assessment;
    use crate::quality::aggregate;
    use crate::types::{QualityCheck, QualityChecks};

    fn cfg() -> FusionConfig {
        FusionConfig::default()
    }

    fn metadata(source: ImageSource) -> MetadataResult {
        MetadataResult {
            image_source: source,
            ..MetadataResult::empty()
        }
    }

    fn quality(passed: usize) -> ImageQualityResult {
        let check = |i: usize| QualityCheck {
            passed: i < passed,
            value: 0.0,
            threshold: 0.0,
            message: String::new(),
        };
        aggregate(QualityChecks {
            resolution: check(0),
            brightness: check(1),
            focus: check(2),
            card_detection: check(3),
        })
    }

    // =========================================================================
    // Polarity
    // =========================================================================

    #[test]
    fn normalize_inverts_and_clamps() {
        assert_eq!(normalize_trust(0.0), 100);
        assert_eq!(normalize_trust(100.0), 0);
        assert_eq!(normalize_trust(20.0), 80);
        assert_eq!(normalize_trust(-5.0), 100);
        assert_eq!(normalize_trust(250.0), 0);
        assert_eq!(normalize_trust(33.4), 67);
        assert_eq!(normalize_trust(33.6), 66);
    }

    // =========================================================================
    // Metadata modifier
    // =========================================================================

    #[test]
    fn unknown_source_loses_fifteen_points() {
        let (score, note) = apply_metadata_modifier(80, &metadata(ImageSource::Unknown), &cfg());
        assert_eq!(score, 65);
        assert!(note.is_some());
    }

    #[test]
    fn unknown_penalty_floors_at_zero() {
        let (score, _) = apply_metadata_modifier(10, &metadata(ImageSource::Unknown), &cfg());
        assert_eq!(score, 0);
    }

    #[test]
    fn screenshot_is_capped_at_thirty() {
        let (score, note) = apply_metadata_modifier(80, &metadata(ImageSource::Screenshot), &cfg());
        assert!(score <= 30);
        assert!(note.is_some());
        let (score, _) = apply_metadata_modifier(12, &metadata(ImageSource::Screenshot), &cfg());
        assert_eq!(score, 12);
    }

    #[test]
    fn camera_is_unchanged_without_note() {
        let (score, note) = apply_metadata_modifier(80, &metadata(ImageSource::Camera), &cfg());
        assert_eq!(score, 80);
        assert_eq!(note, None);
    }

    // =========================================================================
    // Classification
    // =========================================================================

    #[test]
    fn risk_bands() {
        assert_eq!(classify_risk(0.0), Level::Low);
        assert_eq!(classify_risk(30.0), Level::Low);
        assert_eq!(classify_risk(30.5), Level::Medium);
        assert_eq!(classify_risk(60.0), Level::Medium);
        assert_eq!(classify_risk(61.0), Level::High);
    }

    #[test]
    fn trust_bands_mirror_risk_bands() {
        for risk in [0.0, 30.0, 31.0, 60.0, 61.0, 100.0] {
            let mirrored = match classify_risk(risk) {
                Level::Low => Level::High,
                Level::Medium => Level::Medium,
                Level::High => Level::Low,
            };
            assert_eq!(classify_trust(normalize_trust(risk)), mirrored, "risk {risk}");
        }
    }

    #[test]
    fn confidence_without_factors_uses_default() {
        // (50 + 100) / 2 = 75
        let a = assessment(10.0, &[]);
        assert_eq!(classify_confidence(Some(&a), 100, &cfg()), Level::High);
        // (50 + 50) / 2 = 50
        assert_eq!(classify_confidence(Some(&a), 50, &cfg()), Level::Medium);
        // (50 + 25) / 2 = 37.5
        assert_eq!(classify_confidence(Some(&a), 25, &cfg()), Level::Low);
    }

    #[test]
    fn confidence_averages_factor_confidences() {
        // mean 90, (90 + 75) / 2 = 82.5
        let a = assessment(10.0, &[80.0, 100.0]);
        assert_eq!(classify_confidence(Some(&a), 75, &cfg()), Level::High);
        // mean 20, (20 + 75) / 2 = 47.5
        let a = assessment(10.0, &[10.0, 30.0]);
        assert_eq!(classify_confidence(Some(&a), 75, &cfg()), Level::Low);
    }

    #[test]
    fn out_of_range_factor_confidence_is_clamped() {
        // clamped to 100: (100 + 0) / 2 = 50
        let a = assessment(10.0, &[500.0]);
        assert_eq!(classify_confidence(Some(&a), 0, &cfg()), Level::Medium);
        // clamped to 0: (0 + 100) / 2 = 50
        let a = assessment(10.0, &[-300.0]);
        assert_eq!(classify_confidence(Some(&a), 100, &cfg()), Level::Medium);
    }

    #[test]
    fn confidence_without_assessment_is_low() {
        assert_eq!(classify_confidence(None, 100, &cfg()), Level::Low);
    }

    // =========================================================================
    // Limitations
    // =========================================================================

    #[test]
    fn limitations_always_start_with_disclaimer() {
        let a = assessment(0.0, &[]);
        let lims = build_limitations(Some(&a), &quality(4), Some(&quality(4)));
        assert_eq!(lims, vec![LIMIT_DISCLAIMER]);
    }

    #[test]
    fn low_quality_and_missing_back_are_noted() {
        let a = assessment(0.0, &[]);
        let lims = build_limitations(Some(&a), &quality(2), None);
        assert_eq!(lims, vec![LIMIT_DISCLAIMER, LIMIT_LOW_QUALITY, LIMIT_NO_BACK]);
    }

    #[test]
    fn quality_of_seventy_five_is_not_low() {
        let a = assessment(0.0, &[]);
        let lims = build_limitations(Some(&a), &quality(3), Some(&quality(4)));
        assert!(!lims.iter().any(|l| l == LIMIT_LOW_QUALITY));
    }

    #[test]
    fn poor_back_image_is_noted() {
        let a = assessment(0.0, &[]);
        let lims = build_limitations(Some(&a), &quality(4), Some(&quality(1)));
        assert_eq!(lims, vec![LIMIT_DISCLAIMER, LIMIT_BACK_RETAKE]);
    }

    #[test]
    fn uncertain_areas_are_consolidated_last() {
        let mut a = assessment(0.0, &[]);
        a.uncertain_areas = vec!["edge wear".into(), "font kerning".into()];
        let lims = build_limitations(Some(&a), &quality(4), None);
        assert_eq!(lims.len(), 3);
        assert_eq!(lims[2], "The assessment was uncertain about: edge wear, font kerning");
    }

    #[test]
    fn unavailable_assessment_follows_back_image_note() {
        let lims = build_limitations(None, &quality(4), None);
        assert_eq!(lims, vec![LIMIT_DISCLAIMER, LIMIT_NO_BACK, LIMIT_AI_UNAVAILABLE]);
    }

    // =========================================================================
    // fuse
    // =========================================================================

    #[test]
    fn clean_camera_capture_has_no_penalty() {
        let a = assessment(0.0, &[]);
        let result = fuse(
            Some(&a),
            quality(4),
            metadata(ImageSource::Camera),
            None,
            &cfg(),
        );
        assert_eq!(result.trust_score, 100);
        assert_eq!(result.trust_level, Level::High);
        assert_eq!(result.confidence, Level::High);
        assert_eq!(result.score_note, None);
    }

    #[test]
    fn risky_screenshot_is_low_trust() {
        let a = assessment(20.0, &[90.0]);
        let result = fuse(
            Some(&a),
            quality(4),
            metadata(ImageSource::Screenshot),
            None,
            &cfg(),
        );
        assert_eq!(result.trust_score, 30);
        assert_eq!(result.trust_level, Level::Low);
        assert!(result.score_note.is_some());
    }

    #[test]
    fn unavailable_assessment_degrades_gracefully() {
        let result = fuse(None, quality(4), metadata(ImageSource::Unknown), None, &cfg());
        assert_eq!(result.trust_score, 35);
        assert_eq!(result.trust_level, Level::Low);
        assert_eq!(result.confidence, Level::Low);
        assert!(result.limitations.iter().any(|l| l == LIMIT_AI_UNAVAILABLE));

        let result = fuse(None, quality(4), metadata(ImageSource::Camera), None, &cfg());
        assert_eq!(result.trust_score, 50);
        assert_eq!(result.trust_level, Level::Medium);
    }

    #[test]
    fn result_carries_front_quality_and_metadata() {
        let a = assessment(40.0, &[]);
        let front = quality(3);
        let meta = metadata(ImageSource::Camera);
        let result = fuse(Some(&a), front.clone(), meta.clone(), Some(&quality(0)), &cfg());
        assert_eq!(result.image_quality, front);
        assert_eq!(result.metadata_check, meta);
        assert_eq!(result.trust_score, 60);
    }
}
