//! Error types for chart construction and sexagenary arithmetic.

use saju_time::TimeError;
use thiserror::Error;

use crate::branch::Branch;
use crate::stem::Stem;

/// Errors from chart-level calculations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BaseError {
    /// Malformed date, time or sex input. Raised before any computation.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A (stem, branch) pair whose positions differ in parity.
    ///
    /// Returned by `Pillar::new` and `index_of` for mismatched parity.
    #[error("invalid pillar: {stem}{branch} is not a sexagenary pair")]
    InvalidPillar { stem: Stem, branch: Branch },
}

impl From<TimeError> for BaseError {
    fn from(e: TimeError) -> Self {
        match e {
            TimeError::InvalidInput(msg) => Self::InvalidInput(msg),
            other => Self::InvalidInput(other.to_string()),
        }
    }
}
