//! `RocksDB` storage layer for hoursnake.
//!
//! This crate provides persistent storage for the star ledger and the
//! hourly score ledger, using `RocksDB` with column families.
//!
//! # Architecture
//!
//! - `accounts`: star-ledger accounts, keyed by big-endian player id
//! - `scores`: hourly best scores, keyed by `hour_bucket || player_id`
//!
//! All check-then-act mutations (`try_spend`, `submit_score`) go through an
//! internal write lock plus a `WriteBatch`, so two concurrent spends of the
//! same last star cannot both succeed and a score merge never loses the
//! maximum.
//!
//! # Example
//!
//! ```no_run
//! use hoursnake_store::{RocksStore, Store};
//! use hoursnake_core::PlayerId;
//!
//! let store = RocksStore::open("/tmp/hoursnake-db").unwrap();
//!
//! let player = PlayerId::new(42).unwrap();
//! let account = store.ensure_account(player, Some("alice"), 100).unwrap();
//! assert_eq!(account.star_balance, 100);
//!
//! let outcome = store.try_spend(player, 1).unwrap();
//! assert!(outcome.ok);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hoursnake_core::{Account, HourBucket, PlayerId, ScoreMerge};

/// The outcome of a conditional spend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpendOutcome {
    /// Whether the deduction happened.
    pub ok: bool,

    /// The balance after the attempt (unchanged when `ok` is false;
    /// zero for an account that does not exist).
    pub balance: i64,
}

/// One row of the hourly leaderboard projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedScore {
    /// The player.
    pub player_id: PlayerId,

    /// The player's display name, if one was ever supplied.
    pub display_name: Option<String>,

    /// The best score in the bucket.
    pub score: i64,

    /// When the player first submitted in the bucket (tie-break).
    pub submitted_at: DateTime<Utc>,
}

/// One row of the all-time leaderboard projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedTotal {
    /// The player.
    pub player_id: PlayerId,

    /// The player's display name, if one was ever supplied.
    pub display_name: Option<String>,

    /// Cumulative score across all buckets.
    pub lifetime_score: i64,
}

/// The storage trait defining all ledger operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations (e.g., `RocksDB`, in-memory for testing).
pub trait Store: Send + Sync {
    // =========================================================================
    // Account Ledger
    // =========================================================================

    /// Insert or update an account record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_account(&self, account: &Account) -> Result<()>;

    /// Get an account by player id. A pure read; never creates.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_account(&self, player_id: PlayerId) -> Result<Option<Account>>;

    /// Create the account with the given starting balance if it does not
    /// exist; otherwise leave balance and name untouched. Safe to call
    /// repeatedly. Returns the stored account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn ensure_account(
        &self,
        player_id: PlayerId,
        display_name: Option<&str>,
        starting_balance: i64,
    ) -> Result<Account>;

    /// Atomically deduct `amount` stars if the balance covers it.
    ///
    /// An insufficient balance (or a missing account) is a normal outcome
    /// reported as `ok: false` with nothing mutated, never an error. Two
    /// concurrent spends of a balance of 1 admit exactly one winner.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn try_spend(&self, player_id: PlayerId, amount: i64) -> Result<SpendOutcome>;

    /// Unconditionally add `amount` stars. Returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the account doesn't exist; callers
    /// are expected to `ensure_account` first.
    fn credit(&self, player_id: PlayerId, amount: i64) -> Result<i64>;

    // =========================================================================
    // Hourly Score Ledger
    // =========================================================================

    /// Merge a submission into the `(player, bucket)` entry with
    /// monotonic-max semantics, crediting any improvement delta to the
    /// account's lifetime score in the same atomic write.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the account doesn't exist.
    fn submit_score(
        &self,
        player_id: PlayerId,
        bucket: HourBucket,
        score: i64,
    ) -> Result<ScoreMerge>;

    /// Up to `n` entries for one bucket, best first. Ties resolve by
    /// earliest submission, then player id, so the order never depends on
    /// storage iteration order. An empty bucket yields an empty vec.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn hourly_top(&self, bucket: HourBucket, n: usize) -> Result<Vec<RankedScore>>;

    /// Up to `n` accounts by lifetime score, best first. Ties resolve by
    /// earliest account creation, then player id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn all_time_top(&self, n: usize) -> Result<Vec<RankedTotal>>;
}
