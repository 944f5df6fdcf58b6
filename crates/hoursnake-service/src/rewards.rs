//! The hourly reward cycle.
//!
//! A periodic task that, once per closed hour bucket, pays the bucket's top
//! three scorers from the configured reward table. The cycle keeps the last
//! disbursed bucket in process memory, so re-firing inside the same hour is
//! a no-op, and a failed payout leaves the bucket undisbursed so the whole
//! bucket is retried on the next firing.

use std::sync::Arc;
use std::time::Duration;

use hoursnake_core::{HourBucket, PlayerId, RewardTable};
use hoursnake_store::{Result, Store};

/// One paid rank of a disbursed bucket.
#[derive(Debug, Clone)]
pub struct Payout {
    /// Who was paid.
    pub player_id: PlayerId,
    /// Zero-based rank in the bucket.
    pub rank: usize,
    /// Stars credited.
    pub amount: i64,
}

/// The report of one disbursed bucket.
#[derive(Debug, Clone)]
pub struct Disbursement {
    /// The bucket that was paid.
    pub bucket: HourBucket,
    /// The payouts applied, in rank order.
    pub payouts: Vec<Payout>,
}

/// The reward cycle state: storage handle, reward table, and the guard
/// against paying the same bucket twice.
pub struct RewardCycle<S> {
    store: Arc<S>,
    rewards: RewardTable,
    last_disbursed: Option<HourBucket>,
}

impl<S: Store> RewardCycle<S> {
    /// Create a cycle that has not disbursed anything yet.
    pub fn new(store: Arc<S>, rewards: RewardTable) -> Self {
        Self {
            store,
            rewards,
            last_disbursed: None,
        }
    }

    /// Run one firing of the cycle for the given wall-clock bucket.
    ///
    /// Pays the just-closed bucket `now.prev()` unless it was already paid
    /// by this process. Returns `None` when the guard skipped the firing.
    ///
    /// # Errors
    ///
    /// Propagates storage failures. On error `last_disbursed` does not
    /// advance, so the entire bucket is retried on the next firing rather
    /// than leaving a partial payout unrecorded.
    pub fn run_once(&mut self, now: HourBucket) -> Result<Option<Disbursement>> {
        let target = now.prev();

        if self.last_disbursed == Some(target) {
            tracing::debug!(bucket = %target, "Rewards already disbursed, skipping");
            return Ok(None);
        }

        let ranked = self.store.hourly_top(target, RewardTable::RANKS)?;

        let mut payouts = Vec::new();
        for (rank, entry) in ranked.iter().enumerate() {
            // A zero score means the player never actually scored in this
            // bucket; ranking in an otherwise-empty bucket earns nothing.
            if entry.score == 0 {
                continue;
            }
            let Some(amount) = self.rewards.amount_for_rank(rank) else {
                break;
            };

            self.store.credit(entry.player_id, amount)?;
            payouts.push(Payout {
                player_id: entry.player_id,
                rank,
                amount,
            });
        }

        self.last_disbursed = Some(target);

        for payout in &payouts {
            tracing::info!(
                bucket = %target,
                player = %payout.player_id,
                rank = payout.rank + 1,
                amount = payout.amount,
                "Hourly reward credited"
            );
        }

        Ok(Some(Disbursement {
            bucket: target,
            payouts,
        }))
    }

    /// Drive the cycle forever, firing every `period`.
    ///
    /// Each firing targets the just-closed bucket, so any poll period at or
    /// under an hour disburses every bucket at least once shortly after it
    /// closes.
    pub async fn run(mut self, period: Duration) {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            match self.run_once(HourBucket::current()) {
                Ok(Some(report)) => {
                    tracing::info!(
                        bucket = %report.bucket,
                        winners = report.payouts.len(),
                        "Reward cycle disbursed bucket"
                    );
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(error = %e, "Reward cycle failed, will retry next firing");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use hoursnake_core::{Account, ScoreMerge};
    use hoursnake_store::{RankedScore, RankedTotal, RocksStore, SpendOutcome, StoreError};
    use tempfile::TempDir;

    fn create_test_store() -> (Arc<RocksStore>, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(RocksStore::open(dir.path()).unwrap());
        (store, dir)
    }

    /// Store wrapper whose next `failures_left` credit calls fail with a
    /// database error, for exercising payout failure handling.
    struct FlakyCredits {
        inner: RocksStore,
        failures_left: AtomicUsize,
    }

    impl Store for FlakyCredits {
        fn put_account(&self, account: &Account) -> Result<()> {
            self.inner.put_account(account)
        }

        fn get_account(&self, player_id: PlayerId) -> Result<Option<Account>> {
            self.inner.get_account(player_id)
        }

        fn ensure_account(
            &self,
            player_id: PlayerId,
            display_name: Option<&str>,
            starting_balance: i64,
        ) -> Result<Account> {
            self.inner
                .ensure_account(player_id, display_name, starting_balance)
        }

        fn try_spend(&self, player_id: PlayerId, amount: i64) -> Result<SpendOutcome> {
            self.inner.try_spend(player_id, amount)
        }

        fn credit(&self, player_id: PlayerId, amount: i64) -> Result<i64> {
            if self.failures_left.load(Ordering::SeqCst) > 0 {
                self.failures_left.fetch_sub(1, Ordering::SeqCst);
                return Err(StoreError::Database("credit write failed".into()));
            }
            self.inner.credit(player_id, amount)
        }

        fn submit_score(
            &self,
            player_id: PlayerId,
            bucket: HourBucket,
            score: i64,
        ) -> Result<ScoreMerge> {
            self.inner.submit_score(player_id, bucket, score)
        }

        fn hourly_top(&self, bucket: HourBucket, n: usize) -> Result<Vec<RankedScore>> {
            self.inner.hourly_top(bucket, n)
        }

        fn all_time_top(&self, n: usize) -> Result<Vec<RankedTotal>> {
            self.inner.all_time_top(n)
        }
    }

    fn player(raw: i64) -> PlayerId {
        PlayerId::new(raw).unwrap()
    }

    fn balance(store: &RocksStore, raw: i64) -> i64 {
        store.get_account(player(raw)).unwrap().unwrap().star_balance
    }

    #[test]
    fn pays_top_three_of_the_closed_bucket() {
        let (store, _dir) = create_test_store();
        let closed = HourBucket::new(483_000);
        let now = HourBucket::new(483_001);

        for (raw, score) in [(1, 40), (2, 30), (3, 20), (4, 10)] {
            store.ensure_account(player(raw), None, 0).unwrap();
            store.submit_score(player(raw), closed, score).unwrap();
        }

        let mut cycle = RewardCycle::new(Arc::clone(&store), RewardTable::default());
        let report = cycle.run_once(now).unwrap().unwrap();

        assert_eq!(report.bucket, closed);
        assert_eq!(report.payouts.len(), 3);
        assert_eq!(balance(&store, 1), 50);
        assert_eq!(balance(&store, 2), 25);
        assert_eq!(balance(&store, 3), 10);
        // Fourth place earns nothing.
        assert_eq!(balance(&store, 4), 0);
    }

    #[test]
    fn refiring_within_the_same_bucket_is_a_no_op() {
        let (store, _dir) = create_test_store();
        let closed = HourBucket::new(483_000);
        let now = HourBucket::new(483_001);

        store.ensure_account(player(1), None, 0).unwrap();
        store.submit_score(player(1), closed, 40).unwrap();

        let mut cycle = RewardCycle::new(Arc::clone(&store), RewardTable::default());
        assert!(cycle.run_once(now).unwrap().is_some());
        assert!(cycle.run_once(now).unwrap().is_none());
        assert!(cycle.run_once(now).unwrap().is_none());

        // Paid exactly once.
        assert_eq!(balance(&store, 1), 50);
    }

    #[test]
    fn advancing_the_clock_disburses_the_next_bucket() {
        let (store, _dir) = create_test_store();

        store.ensure_account(player(1), None, 0).unwrap();
        store.submit_score(player(1), HourBucket::new(483_000), 10).unwrap();
        store.submit_score(player(1), HourBucket::new(483_001), 10).unwrap();

        let mut cycle = RewardCycle::new(Arc::clone(&store), RewardTable::default());
        assert!(cycle.run_once(HourBucket::new(483_001)).unwrap().is_some());
        assert!(cycle.run_once(HourBucket::new(483_002)).unwrap().is_some());

        assert_eq!(balance(&store, 1), 100);
    }

    #[test]
    fn zero_scores_are_never_rewarded() {
        let (store, _dir) = create_test_store();
        let closed = HourBucket::new(483_000);

        // A:40, B:0, C:0 — only A actually scored.
        for (raw, score) in [(1, 40), (2, 0), (3, 0)] {
            store.ensure_account(player(raw), None, 0).unwrap();
            store.submit_score(player(raw), closed, score).unwrap();
        }

        let mut cycle = RewardCycle::new(Arc::clone(&store), RewardTable::default());
        let report = cycle.run_once(HourBucket::new(483_001)).unwrap().unwrap();

        assert_eq!(report.payouts.len(), 1);
        assert_eq!(balance(&store, 1), 50);
        assert_eq!(balance(&store, 2), 0);
        assert_eq!(balance(&store, 3), 0);
    }

    #[test]
    fn empty_bucket_disburses_nothing() {
        let (store, _dir) = create_test_store();

        let mut cycle = RewardCycle::new(Arc::clone(&store), RewardTable::default());
        let report = cycle.run_once(HourBucket::new(483_001)).unwrap().unwrap();
        assert!(report.payouts.is_empty());
    }

    #[test]
    fn fewer_than_three_entries_pays_only_existing_ranks() {
        let (store, _dir) = create_test_store();
        let closed = HourBucket::new(483_000);

        for (raw, score) in [(1, 40), (2, 30)] {
            store.ensure_account(player(raw), None, 0).unwrap();
            store.submit_score(player(raw), closed, score).unwrap();
        }

        let mut cycle = RewardCycle::new(Arc::clone(&store), RewardTable::default());
        let report = cycle.run_once(HourBucket::new(483_001)).unwrap().unwrap();

        assert_eq!(report.payouts.len(), 2);
        assert_eq!(balance(&store, 1), 50);
        assert_eq!(balance(&store, 2), 25);
    }

    #[test]
    fn custom_reward_table_is_honored() {
        let (store, _dir) = create_test_store();
        let closed = HourBucket::new(483_000);

        store.ensure_account(player(1), None, 0).unwrap();
        store.submit_score(player(1), closed, 40).unwrap();

        let table = RewardTable {
            first: 7,
            second: 5,
            third: 3,
        };
        let mut cycle = RewardCycle::new(Arc::clone(&store), table);
        cycle.run_once(HourBucket::new(483_001)).unwrap();

        assert_eq!(balance(&store, 1), 7);
    }

    #[test]
    fn failed_payout_leaves_the_bucket_for_retry() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(FlakyCredits {
            inner: RocksStore::open(dir.path()).unwrap(),
            failures_left: AtomicUsize::new(1),
        });
        let closed = HourBucket::new(483_000);
        let now = HourBucket::new(483_001);

        for (raw, score) in [(1, 40), (2, 30)] {
            store.ensure_account(player(raw), None, 0).unwrap();
            store.submit_score(player(raw), closed, score).unwrap();
        }

        let mut cycle = RewardCycle::new(Arc::clone(&store), RewardTable::default());

        // The first firing hits the injected write failure; the bucket
        // must not be marked disbursed.
        assert!(cycle.run_once(now).is_err());
        assert_eq!(balance(&store.inner, 1), 0);
        assert_eq!(balance(&store.inner, 2), 0);

        // The next firing retries the same bucket and pays it out.
        let report = cycle.run_once(now).unwrap().unwrap();
        assert_eq!(report.bucket, closed);
        assert_eq!(report.payouts.len(), 2);
        assert_eq!(balance(&store.inner, 1), 50);
        assert_eq!(balance(&store.inner, 2), 25);

        // And it stays settled afterwards.
        assert!(cycle.run_once(now).unwrap().is_none());
    }
}
