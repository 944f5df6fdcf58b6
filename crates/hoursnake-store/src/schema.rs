//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Star-ledger accounts, keyed by big-endian player id.
    pub const ACCOUNTS: &str = "accounts";

    /// Hourly best scores, keyed by `hour_bucket || player_id`
    /// (both big-endian), so one bucket's entries are a contiguous range.
    pub const SCORES: &str = "scores";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::ACCOUNTS, cf::SCORES]
}
