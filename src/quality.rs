//! Image-quality analysis.
//!
//! Answers one question: is this photo good enough to support any judgment at
//! all? Four independent, stateless checks run over the decoded [`Raster`]:
//!
//! | Check | Measures | Passes when |
//! |---|---|---|
//! | resolution | width, height | `width ≥ 1200 ∧ height ≥ 1600` |
//! | brightness | mean BT.601 luma | mean ∈ `[80, 220]` |
//! | focus | variance of Laplacian | score ≥ 100 |
//! | card detection | edge ratio in the central 60% × 60% | `0.05 < ratio < 0.5` |
//!
//! Each passing check contributes 25 points. The recommendation and the
//! acceptability flag are pure functions of how many checks passed, so the
//! score is always one of 0, 25, 50, 75 or 100.
//!
//! Thresholds come from [`QualityConfig`]; the numbers above are the stock
//! defaults. The checks are weighted equally even though card detection is
//! far cruder than brightness; that weighting is a calibration candidate.
//!
//! Analysis never fails for a valid raster. Buffers too small for the 3×3
//! kernel or the edge scan get a failing check with an explanatory message.

use crate::config::QualityConfig;
use crate::imaging::Raster;
use crate::imaging::calculations::{LumaPlane, central_region, edge_ratio, laplacian_variance};
use crate::types::{ImageQualityResult, QualityCheck, QualityChecks, Recommendation};
use tracing::debug;

/// Run all four checks and aggregate them.
pub fn analyze_quality(raster: &Raster, config: &QualityConfig) -> ImageQualityResult {
    let plane = LumaPlane::from_raster(raster);

    let checks = QualityChecks {
        resolution: check_resolution(raster.width(), raster.height(), config),
        brightness: check_brightness(&plane, config),
        focus: check_focus(&plane, config),
        card_detection: check_card_detection(&plane, config),
    };

    let result = aggregate(checks);
    debug!(
        width = raster.width(),
        height = raster.height(),
        brightness = result.checks.brightness.value,
        focus = result.checks.focus.value,
        edge_ratio = result.checks.card_detection.value,
        score = result.score,
        recommendation = result.recommendation.as_str(),
        "image quality analyzed"
    );
    result
}

/// Combine the four checks into the final verdict.
pub fn aggregate(checks: QualityChecks) -> ImageQualityResult {
    let passed = checks.passed_count();
    ImageQualityResult {
        is_acceptable: passed >= 2,
        score: (passed * 25) as u8,
        recommendation: Recommendation::from_passed(passed),
        checks,
    }
}

pub fn check_resolution(width: u32, height: u32, config: &QualityConfig) -> QualityCheck {
    let passed = width >= config.min_width && height >= config.min_height;
    let message = if passed {
        format!("Resolution {width}x{height} is sufficient")
    } else {
        format!(
            "Resolution {width}x{height} is below the {}x{} minimum; move closer or use a higher resolution camera",
            config.min_width, config.min_height
        )
    };
    QualityCheck {
        passed,
        value: width.min(height) as f64,
        threshold: config.min_width as f64,
        message,
    }
}

pub fn check_brightness(plane: &LumaPlane, config: &QualityConfig) -> QualityCheck {
    let mean = plane.mean();
    let (passed, threshold, message) = if mean < config.brightness_min {
        (
            false,
            config.brightness_min,
            format!("Image is too dark (average brightness {mean:.1}); add more light"),
        )
    } else if mean > config.brightness_max {
        (
            false,
            config.brightness_max,
            format!("Image is too bright (average brightness {mean:.1}); reduce glare or exposure"),
        )
    } else {
        (
            true,
            config.brightness_min,
            format!("Brightness is acceptable (average {mean:.1})"),
        )
    };
    QualityCheck {
        passed,
        value: mean,
        threshold,
        message,
    }
}

pub fn check_focus(plane: &LumaPlane, config: &QualityConfig) -> QualityCheck {
    let Some(score) = laplacian_variance(plane) else {
        return QualityCheck {
            passed: false,
            value: 0.0,
            threshold: config.focus_min,
            message: format!(
                "Image is too small ({}x{}) to measure focus",
                plane.width, plane.height
            ),
        };
    };

    let passed = score >= config.focus_min;
    let message = if passed {
        format!("Image is sharp (focus score {score:.1})")
    } else {
        format!("Image appears blurry (focus score {score:.1}); hold steady and tap to focus")
    };
    QualityCheck {
        passed,
        value: score,
        threshold: config.focus_min,
        message,
    }
}

pub fn check_card_detection(plane: &LumaPlane, config: &QualityConfig) -> QualityCheck {
    let region = central_region(plane.width, plane.height, config.region_trim);
    let Some(ratio) = edge_ratio(plane, region, config.edge_gradient) else {
        return QualityCheck {
            passed: false,
            value: 0.0,
            threshold: config.edge_ratio_min,
            message: format!(
                "Image is too small ({}x{}) to detect a card",
                plane.width, plane.height
            ),
        };
    };

    let (passed, threshold, message) = if ratio <= config.edge_ratio_min {
        (
            false,
            config.edge_ratio_min,
            "No distinct card detected in the center of the frame".to_string(),
        )
    } else if ratio >= config.edge_ratio_max {
        (
            false,
            config.edge_ratio_max,
            "Background is too cluttered to isolate the card; use a plain surface".to_string(),
        )
    } else {
        (
            true,
            config.edge_ratio_min,
            "Card detected in the center of the frame".to_string(),
        )
    };
    QualityCheck {
        passed,
        value: ratio,
        threshold,
        message,
    }
}
