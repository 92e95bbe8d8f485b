//! Pure Rust raster decoder on top of the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Format sniffing | `image::guess_format` (magic bytes) + ISO-BMFF `ftyp` check for HEIF |
//! | Decode (JPEG, PNG, TIFF, WebP, BMP, GIF) | `image::load_from_memory_with_format` |
//! | Pixel layout | `DynamicImage::to_rgb8` / `to_rgba8` depending on alpha |

use super::backend::{ContainerFormat, DecodeError, RasterDecoder};
use super::raster::{Channels, Raster};
use image::{DynamicImage, ImageFormat};
use std::sync::LazyLock;

/// Formats whose decoders are compiled in.
const DECODE_CANDIDATES: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Tiff,
    ImageFormat::WebP,
    ImageFormat::Bmp,
    ImageFormat::Gif,
];

static DECODABLE: LazyLock<Vec<ImageFormat>> = LazyLock::new(|| {
    DECODE_CANDIDATES
        .iter()
        .copied()
        .filter(|fmt| fmt.reading_enabled())
        .collect()
});

/// Returns the formats that have working decoders compiled in.
pub fn decodable_formats() -> &'static [ImageFormat] {
    &DECODABLE
}

/// HEIF/HEIC brands that appear in the `ftyp` box of phone captures.
const HEIF_BRANDS: &[&[u8; 4]] = &[b"heic", b"heix", b"mif1", b"msf1", b"heim", b"heis"];

fn is_heif(bytes: &[u8]) -> bool {
    bytes.len() >= 12
        && &bytes[4..8] == b"ftyp"
        && HEIF_BRANDS.iter().any(|brand| &bytes[8..12] == *brand)
}

/// Production decoder: the `image` crate ecosystem.
pub struct ImageCrateDecoder;

impl ImageCrateDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageCrateDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn into_raster(img: DynamicImage) -> Result<Raster, DecodeError> {
    let (width, height) = (img.width(), img.height());
    if img.color().has_alpha() {
        Raster::new(width, height, Channels::Rgba, img.into_rgba8().into_raw())
    } else {
        Raster::new(width, height, Channels::Rgb, img.into_rgb8().into_raw())
    }
}

impl RasterDecoder for ImageCrateDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Raster, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }
        let format = image::guess_format(bytes).map_err(|_| DecodeError::UnsupportedFormat)?;
        if !decodable_formats().contains(&format) {
            return Err(DecodeError::UnsupportedFormat);
        }
        let img = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| DecodeError::Malformed(e.to_string()))?;
        into_raster(img)
    }

    fn container_format(&self, bytes: &[u8]) -> ContainerFormat {
        if is_heif(bytes) {
            return ContainerFormat::Heif;
        }
        match image::guess_format(bytes) {
            Ok(ImageFormat::Jpeg) => ContainerFormat::Jpeg,
            Ok(ImageFormat::Png) => ContainerFormat::Png,
            Ok(ImageFormat::Tiff) => ContainerFormat::Tiff,
            Ok(ImageFormat::WebP) => ContainerFormat::WebP,
            Ok(ImageFormat::Avif) => ContainerFormat::Heif,
            _ => ContainerFormat::Other,
        }
    }
}
