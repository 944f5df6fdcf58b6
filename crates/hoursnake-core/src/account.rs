//! Account types for hoursnake.
//!
//! An account is one player's row in the star ledger: spendable balance plus
//! the cumulative all-time score used by the all-time leaderboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::PlayerId;

// ============================================================================
// Constants
// ============================================================================

/// Stars granted when an account is first created.
pub const DEFAULT_STARTING_STARS: i64 = 100;

/// Stars deducted per game entry.
pub const DEFAULT_ENTRY_FEE: i64 = 1;

/// A player's star-ledger account.
///
/// Created on first contact (first bot command or first API call) with a
/// configurable starting balance. Never deleted. The balance is never
/// negative: spends are conditional and refuse to go below zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// The externally supplied player id. Unique, immutable after creation.
    pub player_id: PlayerId,

    /// Optional human-readable label. Last write wins.
    pub display_name: Option<String>,

    /// Current spendable star balance. Never negative.
    pub star_balance: i64,

    /// Cumulative score across all hour buckets, fed by hourly-best
    /// improvements. Drives the all-time leaderboard.
    pub lifetime_score: i64,

    /// When the account was created.
    pub created_at: DateTime<Utc>,

    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with the given starting balance.
    #[must_use]
    pub fn new(player_id: PlayerId, display_name: Option<String>, starting_balance: i64) -> Self {
        let now = Utc::now();
        Self {
            player_id,
            display_name,
            star_balance: starting_balance.max(0),
            lifetime_score: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the balance covers a deduction.
    #[must_use]
    pub fn has_sufficient_stars(&self, amount: i64) -> bool {
        self.star_balance >= amount
    }
}
