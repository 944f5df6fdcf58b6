//! Identifier types for hoursnake.
//!
//! This module provides the two identifiers the ledgers are keyed by: the
//! externally supplied numeric player id, and the hour bucket a score
//! belongs to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds per hour bucket.
const BUCKET_SECONDS: i64 = 3600;

/// A player identifier.
///
/// This is the numeric id supplied by the messaging platform. It is trusted
/// as given (no identity verification) but must be a positive integer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PlayerId(i64);

impl PlayerId {
    /// Create a player id from a raw platform id.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidPlayerId`] if the id is zero or negative.
    pub fn new(raw: i64) -> Result<Self, IdError> {
        if raw <= 0 {
            return Err(IdError::InvalidPlayerId(raw));
        }
        Ok(Self(raw))
    }

    /// Return the raw numeric id.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }

    /// Return the id as big-endian bytes, suitable for ordered storage keys.
    #[must_use]
    pub fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl TryFrom<i64> for PlayerId {
    type Error = IdError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<PlayerId> for i64 {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}

impl FromStr for PlayerId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i64 = s.parse().map_err(|_| IdError::Unparseable)?;
        Self::new(raw)
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fixed 60-minute scoring window.
///
/// Identified by the number of whole hours elapsed since the unix epoch,
/// `floor(unix_seconds / 3600)`. A pure function of wall-clock time; no
/// stored state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourBucket(i64);

impl HourBucket {
    /// Create a bucket from a raw bucket number.
    #[must_use]
    pub const fn new(bucket: i64) -> Self {
        Self(bucket)
    }

    /// The bucket that contains the given unix timestamp.
    #[must_use]
    pub const fn from_unix_seconds(unix_seconds: i64) -> Self {
        Self(unix_seconds.div_euclid(BUCKET_SECONDS))
    }

    /// The bucket that contains the current wall-clock time.
    ///
    /// # Panics
    ///
    /// Panics if the system clock is set before the unix epoch.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn current() -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before unix epoch");
        Self::from_unix_seconds(now.as_secs() as i64)
    }

    /// The immediately preceding (just-closed) bucket.
    #[must_use]
    pub const fn prev(self) -> Self {
        Self(self.0 - 1)
    }

    /// The unix timestamp at which this bucket starts.
    #[must_use]
    pub const fn start_unix_seconds(self) -> i64 {
        self.0 * BUCKET_SECONDS
    }

    /// Return the raw bucket number.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }

    /// Return the bucket as big-endian bytes, suitable for ordered storage keys.
    #[must_use]
    pub fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl fmt::Debug for HourBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HourBucket({})", self.0)
    }
}

impl fmt::Display for HourBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur when constructing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The player id is zero or negative.
    #[error("invalid player id: {0}")]
    InvalidPlayerId(i64),

    /// The input is not a numeric id.
    #[error("id is not a valid integer")]
    Unparseable,
}
