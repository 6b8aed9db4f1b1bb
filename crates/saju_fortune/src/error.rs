//! Error types for scoring, timelines and configuration.

use saju_base::BaseError;
use saju_time::TimeError;
use thiserror::Error;

/// Errors from the fortune pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FortuneError {
    #[error(transparent)]
    Base(#[from] BaseError),
    /// Configuration or phrase-book loading/validation failed.
    #[error("config error: {0}")]
    Config(String),
}

impl From<TimeError> for FortuneError {
    fn from(e: TimeError) -> Self {
        Self::Base(e.into())
    }
}

pub(crate) fn config(msg: impl Into<String>) -> FortuneError {
    FortuneError::Config(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_error_lifts_through_base() {
        let e: FortuneError = TimeError::InvalidInput("month 13".into()).into();
        assert_eq!(
            e,
            FortuneError::Base(BaseError::InvalidInput("month 13".into()))
        );
        assert_eq!(e.to_string(), "invalid input: month 13");
    }

    #[test]
    fn config_display() {
        assert_eq!(config("bad").to_string(), "config error: bad");
    }
}
