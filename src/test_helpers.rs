//! Shared test utilities for the card-trust test suite.
//!
//! Provides synthetic rasters with known properties (flat, striped card on a
//! plain background, checkerboard, blurred copies) and encoders that produce
//! real JPEG/PNG bytes, optionally carrying an EXIF block built with the
//! `exif` crate's writer.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let raster = striped_card(2000, 2600);
//! let bytes = jpeg_with_exif(&raster, &camera_fields());
//! let metadata = analyze_metadata(&bytes, ContainerFormat::Jpeg);
//! assert_eq!(metadata.image_source, ImageSource::Camera);
//! ```

use crate::imaging::Raster;
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

/// Gray checkerboard with square blocks of `block` pixels.
pub fn checkerboard(width: u32, height: u32, block: u32, lo: u8, hi: u8) -> Raster {
    Raster::from_fn(width, height, |x, y| {
        let v = if (x / block + y / block) % 2 == 0 { lo } else { hi };
        [v, v, v]
    })
}

/// A well-lit "card" in the middle half of the frame on a plain light
/// background. The card face carries 4-pixel vertical stripes so it has
/// texture for the focus check and a moderate edge density.
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

/// 3×3 box blur with clamped edges.
pub fn box_blur(raster: &Raster) -> Raster {
    let (w, h) = (raster.width() as i64, raster.height() as i64);
    let pixels: Vec<[u8; 3]> = raster.rgb_pixels().collect();
    Raster::from_fn(raster.width(), raster.height(), |x, y| {
        let mut sum = [0u32; 3];
        for dy in -1..=1 {
            for dx in -1..=1 {
                let sx = (x as i64 + dx).clamp(0, w - 1);
                let sy = (y as i64 + dy).clamp(0, h - 1);
                let px = pixels[(sy * w + sx) as usize];
                for c in 0..3 {
                    sum[c] += px[c] as u32;
                }
            }
        }
        [(sum[0] / 9) as u8, (sum[1] / 9) as u8, (sum[2] / 9) as u8]
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

/// A phone capture: maker, model, timestamp and GPS position.
pub fn camera_fields() -> Vec<Field> {
    vec![
        ascii(Tag::Make, "Apple"),
        ascii(Tag::Model, "iPhone 14 Pro"),
        ascii(Tag::DateTimeOriginal, "2024:03:15 14:22:05"),
        ascii(Tag::GPSLatitudeRef, "N"),
        dms(Tag::GPSLatitude, 40, 44, 54),
        ascii(Tag::GPSLongitudeRef, "W"),
        dms(Tag::GPSLongitude, 73, 59, 8),
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
