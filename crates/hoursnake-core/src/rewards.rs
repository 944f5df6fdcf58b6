//! Reward table for the hourly payout cycle.

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Stars paid to the first-placed scorer of a closed hour.
pub const DEFAULT_FIRST_PLACE_STARS: i64 = 50;

/// Stars paid to the second-placed scorer of a closed hour.
pub const DEFAULT_SECOND_PLACE_STARS: i64 = 25;

/// Stars paid to the third-placed scorer of a closed hour.
pub const DEFAULT_THIRD_PLACE_STARS: i64 = 10;

/// Fixed star payouts for the top three ranks of a closed hour bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTable {
    /// Payout for rank 1.
    pub first: i64,

    /// Payout for rank 2.
    pub second: i64,

    /// Payout for rank 3.
    pub third: i64,
}

impl RewardTable {
    /// Number of ranks this table pays.
    pub const RANKS: usize = 3;

    /// The payout for a zero-based rank, or `None` beyond the table.
    #[must_use]
    pub const fn amount_for_rank(&self, rank: usize) -> Option<i64> {
        match rank {
            0 => Some(self.first),
            1 => Some(self.second),
            2 => Some(self.third),
            _ => None,
        }
    }
}

impl Default for RewardTable {
    fn default() -> Self {
        Self {
            first: DEFAULT_FIRST_PLACE_STARS,
            second: DEFAULT_SECOND_PLACE_STARS,
            third: DEFAULT_THIRD_PLACE_STARS,
        }
    }
}
