use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that end a submit or recommend request
///
/// Every transport variant means the brief can no longer be recovered and the
/// user has to submit it again. Nothing is retried and no partial result is
/// returned.
#[derive(Debug, Error, PartialEq)]
pub enum RecommendationError {
    #[error("Invalid brief: {0}")]
    Validation(String),

    #[error("No brief token present")]
    TransportNotFound,

    #[error("Brief token expired at {expired_at}")]
    TransportExpired { expired_at: DateTime<Utc> },

    #[error("Brief token is unreadable: {0}")]
    TransportCorrupt(String),

    #[error("Brief token is {size} bytes, limit is {limit}")]
    TransportOversized { size: usize, limit: usize },
}

impl RecommendationError {
    /// Whether the user must go back and submit the brief again
    pub fn requires_resubmit(&self) -> bool {
        !matches!(self, RecommendationError::Validation(_))
    }

    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            RecommendationError::Validation(_) => "validation_error",
            RecommendationError::TransportNotFound => "brief_not_found",
            RecommendationError::TransportExpired { .. } => "brief_expired",
            RecommendationError::TransportCorrupt(_) => "brief_corrupt",
            RecommendationError::TransportOversized { .. } => "brief_too_large",
        }
    }
}

pub type Result<T> = std::result::Result<T, RecommendationError>;
