//! End-to-end submission analysis.
//!
//! ```text
//! front bytes ──decode──► Raster ──┬─► quality ──┐
//!             └──────────────────  └─► metadata ─┼─► fuse ──► AuthenticityResult
//! back bytes  ──decode──► Raster ────► quality ──┤
//! front/back  ──────────────────────► assessor ──┘   (may be unavailable)
//! ```
//!
//! Only a decode failure stops a submission. Unreadable metadata and a
//! missing risk assessment degrade the verdict instead (see [`ErrorKind`]).
//! Every call is independent: no state is shared between submissions, so one
//! decoder and one assessor can serve many threads.

use crate::assessor::{AssessmentError, RiskAssessor};
use crate::config::AnalysisConfig;
use crate::forensics::analyze_metadata;
use crate::forensics::exif_reader::ExifReadError;
use crate::fusion::fuse;
use crate::imaging::{DecodeError, Raster, RasterDecoder};
use crate::quality::analyze_quality;
use crate::types::{AuthenticityResult, ImageQualityResult, MetadataResult};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Failure taxonomy across the pipeline.
///
/// Only `DecodeFailure` ever reaches a caller as an error; the other two are
/// absorbed into a degraded result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DecodeFailure,
    MetadataUnreadable,
    RiskAssessmentUnavailable,
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("front image could not be decoded: {0}")]
    DecodeFailure(#[from] DecodeError),
    #[error("back image could not be decoded: {0}")]
    BackDecodeFailure(DecodeError),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DecodeFailure(_) | Self::BackDecodeFailure(_) => ErrorKind::DecodeFailure,
        }
    }
}

impl AssessmentError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::RiskAssessmentUnavailable
    }
}

impl ExifReadError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::MetadataUnreadable
    }
}

/// Analyze a front image, plus an optional back image, into a trust verdict.
pub fn analyze_submission(
    front: &[u8],
    back: Option<&[u8]>,
    assessor: &dyn RiskAssessor,
    decoder: &impl RasterDecoder,
    config: &AnalysisConfig,
) -> Result<AuthenticityResult, PipelineError> {
    let front_raster = decoder.decode(front)?;
    let back_raster = back
        .map(|bytes| decoder.decode(bytes))
        .transpose()
        .map_err(PipelineError::BackDecodeFailure)?;

    let (quality, metadata) = analyze_front(front, &front_raster, decoder, config);
    let back_quality = back_raster
        .as_ref()
        .map(|raster| analyze_quality(raster, &config.quality));

    let risk = match assessor.assess(front, back) {
        Ok(risk) => Some(risk),
        Err(err) => {
            warn!(error = %err, kind = ?err.kind(), "continuing without AI risk assessment");
            None
        }
    };

    let result = fuse(
        risk.as_ref(),
        quality,
        metadata,
        back_quality.as_ref(),
        &config.fusion,
    );
    info!(
        trust_score = result.trust_score,
        trust_level = result.trust_level.as_str(),
        confidence = result.confidence.as_str(),
        source = result.metadata_check.image_source.as_str(),
        recommendation = result.image_quality.recommendation.as_str(),
        "submission analyzed"
    );
    Ok(result)
}

/// Decode one image and run only the quality checks.
pub fn analyze_image_quality(
    bytes: &[u8],
    decoder: &impl RasterDecoder,
    config: &AnalysisConfig,
) -> Result<ImageQualityResult, PipelineError> {
    let raster = decoder.decode(bytes)?;
    Ok(analyze_quality(&raster, &config.quality))
}

/// Run only the metadata forensics. Never fails.
pub fn analyze_image_metadata(bytes: &[u8], decoder: &impl RasterDecoder) -> MetadataResult {
    analyze_metadata(bytes, decoder.container_format(bytes))
}

/// The two front-image analyzers share nothing, so they may run side by side.
fn analyze_front(
    bytes: &[u8],
    raster: &Raster,
    decoder: &impl RasterDecoder,
    config: &AnalysisConfig,
) -> (ImageQualityResult, MetadataResult) {
    let format = decoder.container_format(bytes);
    debug!(?format, parallel = config.processing.parallel, "analyzing front image");
    let quality = || analyze_quality(raster, &config.quality);
    let metadata = || analyze_metadata(bytes, format);
    if config.processing.parallel {
        rayon::join(quality, metadata)
    } else {
        (quality(), metadata())
    }
}
