//! Pixel access and pixel math: pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Sniff container** | `image::guess_format` + HEIF `ftyp` brand check |
//! | **Decode** | `image::load_from_memory_with_format` → [`Raster`] |
//! | **Luma, focus, edges** | [`calculations`], pure functions over a luma plane |
//!
//! The module is split into:
//! - **Raster**: library-independent row-major pixel buffer
//! - **Backend**: [`RasterDecoder`] trait + [`ImageCrateDecoder`]
//! - **Calculations**: pure pixel math (unit testable with synthetic buffers)

pub mod backend;
pub mod calculations;
pub mod raster;
pub mod rust_backend;

pub use backend::{ContainerFormat, DecodeError, RasterDecoder};
pub use raster::{Channels, Raster};
pub use rust_backend::ImageCrateDecoder;
