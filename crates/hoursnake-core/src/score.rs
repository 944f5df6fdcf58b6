//! Score-ledger types for hoursnake.
//!
//! One [`ScoreEntry`] holds a player's best score within one hour bucket.
//! Submissions merge with monotonic-max semantics: a stored score is only
//! ever replaced by a strictly greater one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{HourBucket, PlayerId};

/// A player's best score within one hour bucket.
///
/// At most one entry exists per `(player, bucket)` pair. Entries are created
/// on first submission in a bucket and retained afterwards for history;
/// normal operation never deletes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// The owning player.
    pub player_id: PlayerId,

    /// The hour window this entry belongs to.
    pub hour_bucket: HourBucket,

    /// The best score submitted so far in this bucket. Never negative,
    /// never decreases.
    pub score: i64,

    /// When the first submission for this bucket arrived. Used as the
    /// leaderboard tie-break, so it is fixed at creation.
    pub submitted_at: DateTime<Utc>,
}

impl ScoreEntry {
    /// Create the entry for a player's first submission in a bucket.
    #[must_use]
    pub fn new(player_id: PlayerId, hour_bucket: HourBucket, score: i64) -> Self {
        Self {
            player_id,
            hour_bucket,
            score,
            submitted_at: Utc::now(),
        }
    }

    /// Merge a new submission into this entry.
    ///
    /// Returns the improvement delta: zero when the submission did not beat
    /// the stored best, otherwise the amount by which the best increased.
    pub fn merge(&mut self, score: i64) -> i64 {
        if score > self.score {
            let delta = score - self.score;
            self.score = score;
            delta
        } else {
            0
        }
    }
}

/// The outcome of a score submission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreMerge {
    /// The stored best for the bucket after the merge.
    pub best: i64,

    /// Whether this submission raised the stored best.
    pub improved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: i64) -> ScoreEntry {
        ScoreEntry::new(PlayerId::new(1).unwrap(), HourBucket::new(483_000), score)
    }

    #[test]
    fn merge_keeps_maximum() {
        let mut e = entry(10);
        assert_eq!(e.merge(7), 0);
        assert_eq!(e.score, 10);
        assert_eq!(e.merge(15), 5);
        assert_eq!(e.score, 15);
    }

    #[test]
    fn merge_equal_score_is_not_an_improvement() {
        let mut e = entry(10);
        assert_eq!(e.merge(10), 0);
        assert_eq!(e.score, 10);
    }

    #[test]
    fn submitted_at_survives_merges() {
        let mut e = entry(3);
        let created = e.submitted_at;
        e.merge(9);
        assert_eq!(e.submitted_at, created);
    }
}
