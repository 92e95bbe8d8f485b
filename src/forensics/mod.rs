//! Capture-provenance analysis from embedded metadata.
//!
//! Classifies a submission as camera-captured, screenshot/synthetic, or
//! unknown, and explains why through ordered warnings.
//!
//! ## Screenshot / synthetic-origin heuristic
//!
//! Fires when any one of these holds for an image that carries EXIF:
//!
//! 1. The `Software` tag names a screen-capture tool, image editor or
//!    generative-image tool ([`signatures::NON_CAMERA_SOFTWARE`]).
//! 2. Neither maker nor model is present and the declared pixel size is a
//!    common screen size in either orientation
//!    ([`signatures::COMMON_SCREEN_RESOLUTIONS`]).
//! 3. The container is PNG and no maker is present.
//!
//! Images without any EXIF block skip the heuristic entirely and land on
//! `unknown`.
//!
//! ## Failure policy
//!
//! Nothing here returns an error. A corrupt EXIF block degrades to the
//! all-false `unknown` result warning "metadata unreadable" then "no
//! capture-device information".

pub mod exif_reader;
pub mod signatures;

use crate::imaging::ContainerFormat;
use crate::types::{ImageSource, MetadataResult};
use exif_reader::{CaptureMetadata, read_capture_metadata};
use tracing::{debug, warn};

pub const WARN_NO_METADATA: &str =
    "No metadata present: the image carries no capture information";
pub const WARN_NO_DEVICE: &str =
    "No capture-device information: camera make and model are missing";
pub const WARN_NON_CAMERA: &str =
    "Possible non-camera origin: the image may be a screenshot, edited, or AI-generated";
pub const WARN_UNREADABLE: &str =
    "Metadata unreadable: the embedded capture information is corrupt";

/// Which rule of the screenshot heuristic fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenshotSignal {
    /// Authoring software matched this table entry.
    Software(&'static str),
    /// No device tags and a common screen size.
    ScreenResolution(u32, u32),
    /// Lossless raster container without a maker tag.
    LosslessWithoutMaker,
}

/// Analyze the capture metadata embedded in `bytes`.
///
/// `format` is the sniffed container; formats that cannot carry EXIF go
/// straight to the no-metadata result.
pub fn analyze_metadata(bytes: &[u8], format: ContainerFormat) -> MetadataResult {
    if !format.carries_exif() {
        return no_metadata();
    }
    match read_capture_metadata(bytes) {
        Ok(Some(record)) => evaluate(&record, format),
        Ok(None) => no_metadata(),
        Err(err) => {
            warn!(error = %err, "capture metadata unreadable; provenance unknown");
            unreadable()
        }
    }
}

/// Classify an already-extracted EXIF record.
pub fn evaluate(record: &CaptureMetadata, format: ContainerFormat) -> MetadataResult {
    let has_device_info = record.make.is_some() && record.model.is_some();
    let signal = screenshot_signal(record, format);

    let image_source = match (signal, has_device_info) {
        (Some(_), _) => ImageSource::Screenshot,
        (None, true) => ImageSource::Camera,
        (None, false) => ImageSource::Unknown,
    };

    let mut warnings = Vec::new();
    if record.is_empty() {
        warnings.push(WARN_NO_METADATA.to_string());
    }
    if !has_device_info {
        warnings.push(WARN_NO_DEVICE.to_string());
    }
    if signal.is_some() {
        warnings.push(WARN_NON_CAMERA.to_string());
    }

    debug!(
        source = image_source.as_str(),
        signal = ?signal,
        signatures = signatures::SIGNATURES_VERSION,
        "provenance classified"
    );

    MetadataResult {
        has_exif: true,
        has_device_info,
        has_capture_date: record.captured_at.is_some(),
        has_gps: record.latitude.is_some() && record.longitude.is_some(),
        device_make: record.make.clone(),
        device_model: record.model.clone(),
        capture_date: record.captured_at.clone(),
        image_source,
        warnings,
    }
}

/// The first screenshot rule that fires, checked in rule order.
pub fn screenshot_signal(
    record: &CaptureMetadata,
    format: ContainerFormat,
) -> Option<ScreenshotSignal> {
    if let Some(entry) = record.software.as_deref().and_then(signatures::match_software) {
        return Some(ScreenshotSignal::Software(entry));
    }
    if record.make.is_none() && record.model.is_none() {
        if let Some((w, h)) = record.pixel_dimensions {
            if signatures::is_screen_resolution(w, h) {
                return Some(ScreenshotSignal::ScreenResolution(w, h));
            }
        }
    }
    if format.is_lossless_raster() && record.make.is_none() {
        return Some(ScreenshotSignal::LosslessWithoutMaker);
    }
    None
}

fn no_metadata() -> MetadataResult {
    MetadataResult {
        warnings: vec![WARN_NO_METADATA.to_string(), WARN_NO_DEVICE.to_string()],
        ..MetadataResult::empty()
    }
}

fn unreadable() -> MetadataResult {
    MetadataResult {
        warnings: vec![WARN_UNREADABLE.to_string(), WARN_NO_DEVICE.to_string()],
        ..MetadataResult::empty()
    }
}
