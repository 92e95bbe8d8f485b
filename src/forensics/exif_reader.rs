//! Capture-metadata extraction via the `exif` crate.
//!
//! Pulls the handful of EXIF attributes provenance analysis cares about:
//!
//! | Attribute | Tag(s) |
//! |---|---|
//! | device maker | `Make` (0x010F) |
//! | device model | `Model` (0x0110) |
//! | capture time | `DateTimeOriginal` (0x9003), then `DateTimeDigitized` (0x9004) |
//! | authoring software | `Software` (0x0131) |
//! | declared size | `PixelXDimension`/`PixelYDimension`, then `ImageWidth`/`ImageLength` |
//! | GPS position | `GPSLatitude`/`GPSLongitude` + their `Ref` tags |
//!
//! The container (JPEG APP1, TIFF, HEIF, PNG `eXIf`, WebP) is located by
//! `exif::Reader::read_from_container`.

use exif::{Exif, In, Tag, Value};
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExifReadError {
    #[error("EXIF block is unreadable: {0}")]
    Unreadable(#[from] exif::Error),
}

/// The capture attributes found in one EXIF block. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureMetadata {
    pub make: Option<String>,
    pub model: Option<String>,
    /// ISO-8601 local time when parseable, otherwise the raw tag text.
    pub captured_at: Option<String>,
    pub software: Option<String>,
    pub pixel_dimensions: Option<(u32, u32)>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl CaptureMetadata {
    /// True when none of the tracked attributes were present.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Read capture metadata from encoded image bytes.
///
/// `Ok(None)` means the container holds no EXIF block (or an empty one);
/// an error means a block exists but could not be parsed.
pub fn read_capture_metadata(bytes: &[u8]) -> Result<Option<CaptureMetadata>, ExifReadError> {
    let exif = match exif::Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    if exif.fields().next().is_none() {
        return Ok(None);
    }

    Ok(Some(CaptureMetadata {
        make: ascii(&exif, Tag::Make),
        model: ascii(&exif, Tag::Model),
        captured_at: capture_time(&exif),
        software: ascii(&exif, Tag::Software),
        pixel_dimensions: dimensions(&exif),
        latitude: coordinate(&exif, Tag::GPSLatitude, Tag::GPSLatitudeRef, b'S'),
        longitude: coordinate(&exif, Tag::GPSLongitude, Tag::GPSLongitudeRef, b'W'),
    }))
}

/// First non-empty string of an ASCII tag, NUL padding and whitespace trimmed.
fn ascii(exif: &Exif, tag: Tag) -> Option<String> {
    let parts = ascii_parts(exif, tag)?;
    parts
        .iter()
        .map(|p| {
            String::from_utf8_lossy(p)
                .trim_matches(char::from(0))
                .trim()
                .to_string()
        })
        .find(|s| !s.is_empty())
}

fn ascii_parts(exif: &Exif, tag: Tag) -> Option<&Vec<Vec<u8>>> {
    match &exif.get_field(tag, In::PRIMARY)?.value {
        Value::Ascii(parts) => Some(parts),
        _ => None,
    }
}

fn capture_time(exif: &Exif) -> Option<String> {
    [Tag::DateTimeOriginal, Tag::DateTimeDigitized]
        .into_iter()
        .find_map(|tag| {
            let raw = ascii_parts(exif, tag)?.first()?;
            match exif::DateTime::from_ascii(raw) {
                Ok(dt) => Some(format!(
                    "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
                    dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second
                )),
                Err(_) => ascii(exif, tag),
            }
        })
}

fn uint(exif: &Exif, tag: Tag) -> Option<u32> {
    exif.get_field(tag, In::PRIMARY)?.value.get_uint(0)
}

fn dimensions(exif: &Exif) -> Option<(u32, u32)> {
    let pair = |w, h| Some((uint(exif, w)?, uint(exif, h)?));
    pair(Tag::PixelXDimension, Tag::PixelYDimension)
        .or_else(|| pair(Tag::ImageWidth, Tag::ImageLength))
}

/// Decimal degrees from a degrees/minutes/seconds rational triple.
/// Southern latitudes and western longitudes are negative.
fn coordinate(exif: &Exif, tag: Tag, ref_tag: Tag, negative_ref: u8) -> Option<f64> {
    let Value::Rational(dms) = &exif.get_field(tag, In::PRIMARY)?.value else {
        return None;
    };
    let [deg, min, sec] = dms.get(..3)? else {
        return None;
    };
    let degrees = deg.to_f64() + min.to_f64() / 60.0 + sec.to_f64() / 3600.0;
    if !degrees.is_finite() {
        return None;
    }

    let negative = ascii_parts(exif, ref_tag)
        .and_then(|parts| parts.first())
        .and_then(|r| r.first())
        .is_some_and(|&c| c.eq_ignore_ascii_case(&negative_ref));
    Some(if negative { -degrees } else { degrees })
}
