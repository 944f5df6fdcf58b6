//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::cmp::Reverse;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use hoursnake_core::{Account, HourBucket, PlayerId, ScoreEntry, ScoreMerge};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::{RankedScore, RankedTotal, SpendOutcome, Store};

/// RocksDB-backed storage implementation.
///
/// Mutations that read, check, and then write (spend, score merge, ensure)
/// serialize behind `write_lock`, which turns each of them into a single
/// atomic unit with respect to concurrent callers.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    write_lock: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Mutex::new(()),
        })
    }

    /// Take the write lock, recovering the guard if a previous writer
    /// panicked mid-operation.
    fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn read_account(&self, player_id: PlayerId) -> Result<Option<Account>> {
        let cf = self.cf(cf::ACCOUNTS)?;
        let key = keys::account_key(player_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn write_account(&self, account: &Account) -> Result<()> {
        let cf = self.cf(cf::ACCOUNTS)?;
        let key = keys::account_key(account.player_id);
        let value = Self::serialize(account)?;

        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    /// Collect all score entries for one bucket via prefix iteration.
    fn bucket_entries(&self, bucket: HourBucket) -> Result<Vec<ScoreEntry>> {
        let cf = self.cf(cf::SCORES)?;
        let prefix = keys::bucket_prefix(bucket);

        let mut entries = Vec::new();
        let iter = self.db.iterator_cf(
            &cf,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        for item in iter {
            let (key, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            entries.push(Self::deserialize(&value)?);
        }

        Ok(entries)
    }
}

impl Store for RocksStore {
    // =========================================================================
    // Account Ledger
    // =========================================================================

    fn put_account(&self, account: &Account) -> Result<()> {
        let _guard = self.write_guard();
        self.write_account(account)
    }

    fn get_account(&self, player_id: PlayerId) -> Result<Option<Account>> {
        self.read_account(player_id)
    }

    fn ensure_account(
        &self,
        player_id: PlayerId,
        display_name: Option<&str>,
        starting_balance: i64,
    ) -> Result<Account> {
        let _guard = self.write_guard();

        if let Some(existing) = self.read_account(player_id)? {
            return Ok(existing);
        }

        let account = Account::new(
            player_id,
            display_name.map(str::to_owned),
            starting_balance,
        );
        self.write_account(&account)?;
        Ok(account)
    }

    fn try_spend(&self, player_id: PlayerId, amount: i64) -> Result<SpendOutcome> {
        let _guard = self.write_guard();

        let Some(mut account) = self.read_account(player_id)? else {
            return Ok(SpendOutcome {
                ok: false,
                balance: 0,
            });
        };

        if !account.has_sufficient_stars(amount) {
            return Ok(SpendOutcome {
                ok: false,
                balance: account.star_balance,
            });
        }

        account.star_balance -= amount;
        account.updated_at = chrono::Utc::now();
        self.write_account(&account)?;

        Ok(SpendOutcome {
            ok: true,
            balance: account.star_balance,
        })
    }

    fn credit(&self, player_id: PlayerId, amount: i64) -> Result<i64> {
        let _guard = self.write_guard();

        let mut account = self.read_account(player_id)?.ok_or(StoreError::NotFound)?;

        account.star_balance += amount;
        account.updated_at = chrono::Utc::now();
        self.write_account(&account)?;

        Ok(account.star_balance)
    }

    // =========================================================================
    // Hourly Score Ledger
    // =========================================================================

    fn submit_score(
        &self,
        player_id: PlayerId,
        bucket: HourBucket,
        score: i64,
    ) -> Result<ScoreMerge> {
        let _guard = self.write_guard();

        let mut account = self.read_account(player_id)?.ok_or(StoreError::NotFound)?;

        let cf_scores = self.cf(cf::SCORES)?;
        let score_key = keys::score_key(bucket, player_id);

        let existing = self
            .db
            .get_cf(&cf_scores, &score_key)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        // The entry is created on first submission even at score 0, so a
        // player who entered but never scored still appears in the bucket.
        let (entry, delta, is_new) = match existing {
            Some(data) => {
                let mut entry: ScoreEntry = Self::deserialize(&data)?;
                let delta = entry.merge(score);
                (entry, delta, false)
            }
            None => (ScoreEntry::new(player_id, bucket, score), score, true),
        };

        if delta == 0 && !is_new {
            return Ok(ScoreMerge {
                best: entry.score,
                improved: false,
            });
        }

        // Lifetime score accrues the improvement of the hourly best, which
        // keeps it idempotent under client retries and double-submits.
        account.lifetime_score += delta;
        account.updated_at = chrono::Utc::now();

        let cf_accounts = self.cf(cf::ACCOUNTS)?;
        let account_key = keys::account_key(player_id);
        let account_value = Self::serialize(&account)?;
        let entry_value = Self::serialize(&entry)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_scores, &score_key, &entry_value);
        batch.put_cf(&cf_accounts, &account_key, &account_value);

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(ScoreMerge {
            best: entry.score,
            improved: delta > 0,
        })
    }

    fn hourly_top(&self, bucket: HourBucket, n: usize) -> Result<Vec<RankedScore>> {
        let mut entries = self.bucket_entries(bucket)?;

        // Best score first; ties go to the earliest submitter, with the
        // player id as a final total-order guard.
        entries.sort_by_key(|e| (Reverse(e.score), e.submitted_at, e.player_id));
        entries.truncate(n);

        entries
            .into_iter()
            .map(|entry| {
                let display_name = self
                    .read_account(entry.player_id)?
                    .and_then(|a| a.display_name);
                Ok(RankedScore {
                    player_id: entry.player_id,
                    display_name,
                    score: entry.score,
                    submitted_at: entry.submitted_at,
                })
            })
            .collect()
    }

    fn all_time_top(&self, n: usize) -> Result<Vec<RankedTotal>> {
        let cf = self.cf(cf::ACCOUNTS)?;

        let mut accounts = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            let account: Account = Self::deserialize(&value)?;
            accounts.push(account);
        }

        accounts.sort_by_key(|a| (Reverse(a.lifetime_score), a.created_at, a.player_id));
        accounts.truncate(n);

        Ok(accounts
            .into_iter()
            .map(|a| RankedTotal {
                player_id: a.player_id,
                display_name: a.display_name,
                lifetime_score: a.lifetime_score,
            })
            .collect())
    }
}
