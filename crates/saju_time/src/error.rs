//! Error types for civil date/time handling.

use thiserror::Error;

/// Errors from parsing or validating civil date/time input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Date, time or sex fields could not be turned into a valid input.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl TimeError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message() {
        let e = TimeError::invalid("month 13 out of range");
        assert_eq!(e.to_string(), "invalid input: month 13 out of range");
    }
}
