//! Raster decoding trait and shared types.
//!
//! The [`RasterDecoder`] trait is the single boundary between encoded image
//! bytes and the analyzers: bytes in, [`Raster`] out, or a [`DecodeError`].
//! Decoding has no side effects and must accept any dimensions from 1×1 up.
//!
//! The production implementation is
//! [`ImageCrateDecoder`](super::rust_backend::ImageCrateDecoder), built on the
//! pure-Rust `image` crate.

use super::raster::Raster;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("no image data supplied")]
    Empty,
    #[error("unrecognized or unsupported image format")]
    UnsupportedFormat,
    #[error("image data is corrupt: {0}")]
    Malformed(String),
    #[error("pixel buffer of {actual} bytes does not match {width}x{height} (expected {expected})")]
    InvalidBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Encoded container format, as far as the analyzers care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    Jpeg,
    Png,
    Tiff,
    WebP,
    Heif,
    Other,
}

impl ContainerFormat {
    /// Lossless compressed raster formats typical of screen captures.
    pub fn is_lossless_raster(self) -> bool {
        matches!(self, Self::Png)
    }

    /// Formats that can carry an EXIF block.
    pub fn carries_exif(self) -> bool {
        !matches!(self, Self::Other)
    }
}

/// Trait for raster decoders.
///
/// `Sync` so a single decoder can serve concurrent requests and be shared
/// across rayon workers.
pub trait RasterDecoder: Sync {
    /// Decode encoded bytes into an RGB or RGBA raster.
    fn decode(&self, bytes: &[u8]) -> Result<Raster, DecodeError>;

    /// Sniff the container format from magic bytes without decoding pixels.
    fn container_format(&self, bytes: &[u8]) -> ContainerFormat;
}
