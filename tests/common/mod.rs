//! Integration-test copies of the crate's private `test_helpers` builders.
//!
//! Kept in the same shape as `src/test_helpers.rs` so unit and integration
//! tests see identical synthetic images.

#![allow(dead_code)]

use card_trust::imaging::Raster;
use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use image::ImageEncoder;
use std::io::Cursor;

// =========================================================================
// Synthetic rasters
// =========================================================================

/// Single-color raster.
pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Raster {
    Raster::from_fn(width, height, |_, _| rgb)
}

/// A well-lit "card" in the middle half of the frame on a plain light
/// background, with 4-pixel vertical stripes on the card face.
pub fn striped_card(width: u32, height: u32) -> Raster {
    let (x0, x1) = (width / 4, width * 3 / 4);
    let (y0, y1) = (height / 4, height * 3 / 4);
    Raster::from_fn(width, height, |x, y| {
        let on_card = (x0..x1).contains(&x) && (y0..y1).contains(&y);
        let v = if on_card && ((x - x0) / 4) % 2 == 0 {
            60
        } else {
            200
        };
        [v, v, v]
    })
}

// =========================================================================
// Encoders
// =========================================================================

pub fn encode_png(raster: &Raster) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::codecs::png::PngEncoder::new(&mut bytes)
        .write_image(
            raster.as_bytes(),
            raster.width(),
            raster.height(),
            image::ExtendedColorType::Rgb8,
        )
        .unwrap();
    bytes
}

pub fn encode_jpeg(raster: &Raster) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, 92)
        .write_image(
            raster.as_bytes(),
            raster.width(),
            raster.height(),
            image::ExtendedColorType::Rgb8,
        )
        .unwrap();
    bytes
}

// =========================================================================
// EXIF
// =========================================================================

pub fn ascii(tag: Tag, text: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![text.as_bytes().to_vec()]),
    }
}

pub fn long(tag: Tag, value: u32) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Long(vec![value]),
    }
}

/// Degrees/minutes/seconds as three rationals.
pub fn dms(tag: Tag, degrees: u32, minutes: u32, seconds: u32) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Rational(vec![
            Rational {
                num: degrees,
                denom: 1,
            },
            Rational {
                num: minutes,
                denom: 1,
            },
            Rational {
                num: seconds,
                denom: 1,
            },
        ]),
    }
}

/// A phone capture: maker, model, timestamp and a southern-hemisphere GPS
/// position.
pub fn camera_fields() -> Vec<Field> {
    vec![
        ascii(Tag::Make, "Google"),
        ascii(Tag::Model, "Pixel 8"),
        ascii(Tag::DateTimeOriginal, "2024:06:01 09:30:00"),
        ascii(Tag::GPSLatitudeRef, "S"),
        dms(Tag::GPSLatitude, 33, 52, 4),
        ascii(Tag::GPSLongitudeRef, "E"),
        dms(Tag::GPSLongitude, 151, 12, 26),
    ]
}

/// A screen grab: no device tags, a full-HD declared size.
pub fn screenshot_fields() -> Vec<Field> {
    vec![
        long(Tag::PixelXDimension, 1080),
        long(Tag::PixelYDimension, 1920),
    ]
}

/// Serialize fields into a little-endian TIFF/EXIF blob.
pub fn exif_blob(fields: &[Field]) -> Vec<u8> {
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut out = Cursor::new(Vec::new());
    writer.write(&mut out, true).unwrap();
    out.into_inner()
}

/// Insert an APP1 `Exif` segment right after the JPEG SOI marker.
pub fn insert_exif_segment(jpeg: &[u8], tiff: &[u8]) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "not a JPEG");
    let seg_len = (2 + 6 + tiff.len()) as u16;
    let mut out = Vec::with_capacity(jpeg.len() + seg_len as usize + 2);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&seg_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(tiff);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// Encode `raster` as JPEG carrying `fields` in an EXIF block.
pub fn jpeg_with_exif(raster: &Raster, fields: &[Field]) -> Vec<u8> {
    insert_exif_segment(&encode_jpeg(raster), &exif_blob(fields))
}
