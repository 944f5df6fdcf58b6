//! Core types and utilities for hoursnake.
//!
//! This crate provides the foundational types used throughout the hoursnake
//! backend:
//!
//! - **Identifiers**: `PlayerId`, `HourBucket`
//! - **Accounts**: `Account`, the star ledger record
//! - **Scores**: `ScoreEntry`, `ScoreMerge`
//! - **Rewards**: `RewardTable`
//!
//! # Stars
//!
//! Stars are the spendable currency. One game costs one star (configurable),
//! and the top three scorers of each closed hour are paid from a fixed
//! reward table. Balances are stored as `i64` and are never negative: the
//! spend path checks sufficiency before mutating, it does not rely on a
//! post-hoc constraint.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod error;
pub mod ids;
pub mod rewards;
pub mod score;

pub use account::{Account, DEFAULT_ENTRY_FEE, DEFAULT_STARTING_STARS};
pub use error::{validate_amount, validate_score, GameError, Result};
pub use ids::{HourBucket, IdError, PlayerId};
pub use rewards::{
    RewardTable, DEFAULT_FIRST_PLACE_STARS, DEFAULT_SECOND_PLACE_STARS, DEFAULT_THIRD_PLACE_STARS,
};
pub use score::{ScoreEntry, ScoreMerge};
