//! Analysis configuration.
//!
//! Every threshold the analyzers and the fusion engine use lives here, with
//! stock defaults matching the calibrated values. A user `card-trust.toml`
//! only needs to name the keys it wants to change:
//!
//! ```toml
//! # Loosen the focus requirement for a macro lens rig
//! [quality]
//! focus_min = 60.0
//! ```
//!
//! Loading merges the user file over the stock defaults (see [`merge_toml`]),
//! rejects unknown keys to catch typos early, and validates ranges before
//! anything is analyzed.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level configuration. All sections default to the stock values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Image-quality check thresholds.
    pub quality: QualityConfig,
    /// Score fusion constants.
    pub fusion: FusionConfig,
    /// Execution settings.
    pub processing: ProcessingConfig,
}

/// Thresholds for the four image-quality checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QualityConfig {
    /// Minimum width in pixels.
    pub min_width: u32,
    /// Minimum height in pixels.
    pub min_height: u32,
    /// Average luma below this is "too dark".
    pub brightness_min: f64,
    /// Average luma above this is "too bright".
    pub brightness_max: f64,
    /// Minimum variance-of-Laplacian focus score.
    pub focus_min: f64,
    /// Luma step between adjacent pixels that counts as an edge (exclusive).
    pub edge_gradient: f64,
    /// Edge ratio must be strictly above this...
    pub edge_ratio_min: f64,
    /// ...and strictly below this.
    pub edge_ratio_max: f64,
    /// Fraction of width/height trimmed from each side before edge counting.
    pub region_trim: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_width: 1200,
            min_height: 1600,
            brightness_min: 80.0,
            brightness_max: 220.0,
            focus_min: 100.0,
            edge_gradient: 30.0,
            edge_ratio_min: 0.05,
            edge_ratio_max: 0.5,
            region_trim: 0.2,
        }
    }
}

/// Constants used when fusing the risk assessment with local signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FusionConfig {
    /// Trust ceiling for images classified as screenshots.
    pub screenshot_cap: u8,
    /// Trust points removed when provenance is unknown.
    pub unknown_source_penalty: u8,
    /// Factor confidence assumed when the assessment lists no factors.
    pub default_factor_confidence: f64,
    /// Neutral trust score used when no risk assessment is available.
    pub unavailable_base_trust: u8,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            screenshot_cap: 30,
            unknown_source_penalty: 15,
            default_factor_confidence: 50.0,
            unavailable_base_trust: 50,
        }
    }
}

/// Execution settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Run the quality and metadata analyzers on separate rayon workers.
    /// Results are identical either way.
    pub parallel: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl AnalysisConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let q = &self.quality;
        if q.min_width == 0 || q.min_height == 0 {
            return Err(ConfigError::Validation(
                "quality.min_width and quality.min_height must be non-zero".into(),
            ));
        }
        let luma_range = 0.0..=255.0;
        if !luma_range.contains(&q.brightness_min)
            || !luma_range.contains(&q.brightness_max)
            || q.brightness_min >= q.brightness_max
        {
            return Err(ConfigError::Validation(
                "quality.brightness_min must be below quality.brightness_max, both 0-255".into(),
            ));
        }
        if q.focus_min < 0.0 || q.edge_gradient < 0.0 {
            return Err(ConfigError::Validation(
                "quality.focus_min and quality.edge_gradient must not be negative".into(),
            ));
        }
        let unit = 0.0..=1.0;
        if !unit.contains(&q.edge_ratio_min)
            || !unit.contains(&q.edge_ratio_max)
            || q.edge_ratio_min >= q.edge_ratio_max
        {
            return Err(ConfigError::Validation(
                "quality.edge_ratio_min must be below quality.edge_ratio_max, both 0-1".into(),
            ));
        }
        if !(0.0..0.5).contains(&q.region_trim) {
            return Err(ConfigError::Validation(
                "quality.region_trim must be in [0, 0.5)".into(),
            ));
        }

        let f = &self.fusion;
        if f.screenshot_cap > 100 || f.unknown_source_penalty > 100 || f.unavailable_base_trust > 100
        {
            return Err(ConfigError::Validation(
                "fusion scores must be 0-100".into(),
            ));
        }
        if !(0.0..=100.0).contains(&f.default_factor_confidence) {
            return Err(ConfigError::Validation(
                "fusion.default_factor_confidence must be 0-100".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(AnalysisConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AnalysisConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AnalysisConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from an optional TOML file.
///
/// `None` yields the validated stock defaults. A path that does not exist is
/// an IO error: an explicitly named config file must be there.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig, ConfigError> {
    let overlay = match path {
        Some(p) => {
            let content = fs::read_to_string(p)?;
            Some(toml::from_str::<toml::Value>(&content)?)
        }
        None => None,
    };
    resolve_config(stock_defaults_value()?, overlay)
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# card-trust configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Image-quality checks
# ---------------------------------------------------------------------------
[quality]
# Resolution: both edges must meet these minimums (portrait card framing).
min_width = 1200
min_height = 1600

# Brightness: average BT.601 luma must fall inside [min, max].
brightness_min = 80.0
brightness_max = 220.0

# Focus: minimum variance-of-Laplacian score. Relative, content dependent.
focus_min = 100.0

# Card detection: a pixel is an edge when its luma step to a neighbour
# exceeds edge_gradient. The edge ratio inside the central region must be
# strictly between edge_ratio_min and edge_ratio_max.
edge_gradient = 30.0
edge_ratio_min = 0.05
edge_ratio_max = 0.5

# Fraction of width and height trimmed from each side to get the central region.
region_trim = 0.2

# ---------------------------------------------------------------------------
# Score fusion
# ---------------------------------------------------------------------------
[fusion]
# Screenshots and edited images never score above this.
screenshot_cap = 30

# Trust points removed when the capture source cannot be determined.
unknown_source_penalty = 15

# Confidence assumed for the AI assessment when it reports no factors.
default_factor_confidence = 50.0

# Neutral trust score used when the AI assessment is unavailable.
unavailable_base_trust = 50

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Run the quality and metadata analyzers concurrently.
parallel = true
"##
}
