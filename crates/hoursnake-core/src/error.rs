//! Error types for hoursnake.

use crate::ids::IdError;

/// Result type for hoursnake core operations.
pub type Result<T> = std::result::Result<T, GameError>;

/// Validation errors for inbound game requests.
///
/// These are client faults, rejected before any storage is touched. An
/// insufficient balance is deliberately *not* represented here: that is a
/// normal business outcome, reported as `ok: false` rather than an error.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Invalid player identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),

    /// Top-up amount must be a positive integer.
    #[error("invalid amount: {0} (must be positive)")]
    InvalidAmount(i64),

    /// Score must be a non-negative integer.
    #[error("invalid score: {0} (must be non-negative)")]
    InvalidScore(i64),
}

/// Validate a top-up or reward amount.
///
/// # Errors
///
/// Returns [`GameError::InvalidAmount`] if the amount is zero or negative.
pub fn validate_amount(amount: i64) -> Result<i64> {
    if amount <= 0 {
        return Err(GameError::InvalidAmount(amount));
    }
    Ok(amount)
}

/// Validate a submitted score.
///
/// # Errors
///
/// Returns [`GameError::InvalidScore`] if the score is negative.
pub fn validate_score(score: i64) -> Result<i64> {
    if score < 0 {
        return Err(GameError::InvalidScore(score));
    }
    Ok(score)
}
