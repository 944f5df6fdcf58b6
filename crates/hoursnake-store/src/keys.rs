//! Key encoding utilities for `RocksDB`.
//!
//! Keys use big-endian integer encoding so that lexicographic key order
//! matches numeric order, which makes bucket-prefix iteration work.

use hoursnake_core::{HourBucket, PlayerId};

/// Create an account key from a player id.
#[must_use]
pub fn account_key(player_id: PlayerId) -> Vec<u8> {
    player_id.to_be_bytes().to_vec()
}

/// Create a score-entry key.
///
/// Format: `hour_bucket (8 bytes) || player_id (8 bytes)`, both big-endian.
/// All entries for one bucket share an 8-byte prefix.
#[must_use]
pub fn score_key(bucket: HourBucket, player_id: PlayerId) -> Vec<u8> {
    let mut key = Vec::with_capacity(16);
    key.extend_from_slice(&bucket.to_be_bytes());
    key.extend_from_slice(&player_id.to_be_bytes());
    key
}

/// Create a prefix for iterating all score entries in one bucket.
#[must_use]
pub fn bucket_prefix(bucket: HourBucket) -> Vec<u8> {
    bucket.to_be_bytes().to_vec()
}
