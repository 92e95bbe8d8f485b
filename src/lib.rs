//! # Card Trust
//!
//! Offline, deterministic analysis of a photo of a collectible card: is the
//! photo good enough to judge, where did it come from, and how far should an
//! AI risk assessment of it be trusted?
//!
//! # Architecture: Decode, Analyze, Fuse
//!
//! ```text
//! 1. Decode   bytes   →  Raster                 (RasterDecoder, fatal on failure)
//! 2. Analyze  Raster  →  ImageQualityResult     (four pixel checks)
//!             bytes   →  MetadataResult         (EXIF provenance, never fails)
//! 3. Fuse     risk + quality + metadata  →  AuthenticityResult
//! ```
//!
//! The two analyzers in stage 2 are pure functions of their input and share
//! nothing, so they run side by side on rayon workers. The AI risk assessment
//! is an injected capability ([`assessor::RiskAssessor`]); this crate never
//! talks to the network itself.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | `Raster` buffer, `RasterDecoder` trait + `image`-crate decoder, pixel math |
//! | [`quality`] | Resolution, brightness, focus and card-detection checks |
//! | [`forensics`] | EXIF extraction and the screenshot / synthetic-origin heuristic |
//! | [`assessor`] | The risk-assessment capability and its static / unavailable implementations |
//! | [`fusion`] | Risk → trust normalization, metadata modifier, confidence, limitations |
//! | [`pipeline`] | End-to-end orchestration and the error taxonomy |
//! | [`config`] | `card-trust.toml` loading, merging over stock defaults, validation |
//! | [`types`] | The serializable result types (camelCase JSON) |
//! | [`output`] | CLI text reports |
//!
//! # Design Decisions
//!
//! ## One Polarity Boundary
//!
//! The risk assessment scores *risk* (higher = worse); every result this
//! crate returns scores *trust* (higher = better). The conversion happens in
//! exactly one function, [`fusion::normalize_trust`], so the two scales never
//! coexist past it.
//!
//! ## Library-Independent Raster
//!
//! Analyzers take a [`imaging::Raster`] (row-major bytes + width + height +
//! channel layout), not an `image::DynamicImage`. The checks are unit tested
//! with hand-built buffers, and the decoder can be swapped without touching
//! them.
//!
//! ## Degrade, Don't Fail
//!
//! Only undecodable image bytes stop a submission. Corrupt metadata falls
//! back to "unknown provenance" with a warning; a missing risk assessment
//! falls back to a neutral score with low confidence and an explicit
//! limitation. See [`pipeline::ErrorKind`].
//!
//! ## Versioned Signature Tables
//!
//! The screenshot-tool names and common screen resolutions live in
//! [`forensics::signatures`] as plain constant data with a version string,
//! separate from the detection rules that consult them.

pub mod assessor;
pub mod config;
pub mod forensics;
pub mod fusion;
pub mod imaging;
pub mod output;
pub mod pipeline;
pub mod quality;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
