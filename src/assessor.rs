//! The AI risk-assessment capability.
//!
//! The remote model call lives outside this crate. The pipeline only sees a
//! [`RiskAssessor`]: something that, given the submitted bytes, returns a
//! [`RiskAssessment`] or says why it could not. Failures are never fatal;
//! the pipeline falls back to a quality-and-metadata-only verdict.
//!
//! Two implementations ship:
//!
//! - [`StaticAssessor`] replays a pre-computed assessment, typically loaded
//!   from the JSON the remote service returned.
//! - [`UnavailableAssessor`] always fails, which is what a caller without
//!   any assessment at hand should inject.
//!
//! [`assessor_from_file`] picks between the two for an optional risk file. A
//! file that cannot be read or parsed degrades to unavailable, like any other
//! assessment failure.

use crate::types::RiskAssessment;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum AssessmentError {
    #[error("risk assessment unavailable: {0}")]
    Unavailable(String),
    #[error("risk assessment timed out")]
    Timeout,
    #[error("risk assessment malformed: {0}")]
    Malformed(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Assess image content for counterfeit risk.
///
/// Implementations must be callable from several requests at once.
pub trait RiskAssessor: Sync {
    fn assess(&self, front: &[u8], back: Option<&[u8]>) -> Result<RiskAssessment, AssessmentError>;
}

/// Replays one fixed assessment for every submission.
#[derive(Debug, Clone)]
pub struct StaticAssessor {
    assessment: RiskAssessment,
}

impl StaticAssessor {
    pub fn new(assessment: RiskAssessment) -> Result<Self, AssessmentError> {
        validate(&assessment)?;
        Ok(Self { assessment })
    }

    /// Parse the service's JSON response shape (`riskScore`, `factors`, ...).
    pub fn from_json(json: &str) -> Result<Self, AssessmentError> {
        let assessment: RiskAssessment =
            serde_json::from_str(json).map_err(|e| AssessmentError::Malformed(e.to_string()))?;
        Self::new(assessment)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, AssessmentError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

impl RiskAssessor for StaticAssessor {
    fn assess(&self, _front: &[u8], _back: Option<&[u8]>) -> Result<RiskAssessment, AssessmentError> {
        Ok(self.assessment.clone())
    }
}

/// Stand-in for a missing or unreachable assessment service.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableAssessor;

impl RiskAssessor for UnavailableAssessor {
    fn assess(&self, _front: &[u8], _back: Option<&[u8]>) -> Result<RiskAssessment, AssessmentError> {
        Err(AssessmentError::Unavailable(
            "no risk assessment service configured".into(),
        ))
    }
}

/// Assessor backed by an optional risk-assessment JSON file.
///
/// No path, or a file that fails to load, yields [`UnavailableAssessor`].
pub fn assessor_from_file(path: Option<&Path>) -> Box<dyn RiskAssessor> {
    match path.map(StaticAssessor::from_json_file) {
        Some(Ok(assessor)) => Box::new(assessor),
        Some(Err(err)) => {
            warn!(error = %err, kind = ?err.kind(), "risk assessment file unusable");
            Box::new(UnavailableAssessor)
        }
        None => Box::new(UnavailableAssessor),
    }
}

/// Scores must be finite; out-of-range values are clamped later, at fusion.
fn validate(assessment: &RiskAssessment) -> Result<(), AssessmentError> {
    if !assessment.risk_score.is_finite() {
        return Err(AssessmentError::Malformed("riskScore is not a number".into()));
    }
    if assessment.factors.iter().any(|f| !f.confidence.is_finite()) {
        return Err(AssessmentError::Malformed(
            "factor confidence is not a number".into(),
        ));
    }
    Ok(())
}
