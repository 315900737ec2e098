//! Error types for the bet book

use crate::types::{BetId, ChannelId};
use thiserror::Error;

/// Result type for bet book operations
pub type Result<T> = std::result::Result<T, Error>;

/// Bet book errors
#[derive(Error, Debug)]
pub enum Error {
    /// Bet not found
    #[error("Bet not found: {0}")]
    BetNotFound(BetId),

    /// Channel not found
    #[error("Channel not found: {0}")]
    ChannelNotFound(ChannelId),

    /// Patch names a field that cannot be edited
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Patch value does not fit the field
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// What was wrong
        reason: String,
    },

    /// Bet record violates an invariant
    #[error("Invalid bet: {0}")]
    InvalidBet(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Metrics registration error
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}
