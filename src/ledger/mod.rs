//! Ledger store: append-only persistence of [`Transaction`] rows.

#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::domain::{Transaction, TransactionNote};
use crate::error::StorageError;

/// Read/append surface used outside an atomic unit.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn latest_balance(&self, wallet_id: Uuid, currency: &str) -> Result<Decimal, StorageError>;

    async fn distinct_currencies(&self, wallet_id: Uuid) -> Result<BTreeSet<String>, StorageError>;

    /// `created_at` descending; `from`/`to` both inclusive, `to` defaults to
    /// "now" at query entry when unset.
    async fn list(
        &self,
        wallet_id: Uuid,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Transaction>, i64), StorageError>;

    async fn by_proposal(&self, proposal_id: Uuid) -> Result<Vec<Transaction>, StorageError>;

    async fn get(&self, uid: Uuid) -> Result<Option<Transaction>, StorageError>;

    /// Opens the atomic unit a proposal commit runs inside. The unit also
    /// carries the per-wallet row lock and note-append surface so a
    /// single-engine implementation can serialize everything in one
    /// storage-level transaction.
    async fn begin<'a>(&'a self) -> Result<Box<dyn LedgerUnit + 'a>, StorageError>;
}

/// One atomic unit of work: the commit phase of exactly one proposal.
#[async_trait]
pub trait LedgerUnit: Send {
    /// Takes a row lock on the wallet record. Callers MUST invoke this for
    /// every source wallet, in ascending `wallet_id` order, before reading
    /// balances for the solvency re-check.
    async fn lock_wallet(&mut self, wallet_id: Uuid) -> Result<(), StorageError>;

    /// Reads the latest balance for `(wallet_id, currency)` as seen from
    /// inside this unit (i.e. consistent with prior writes in the same
    /// unit).
    async fn latest_balance(&mut self, wallet_id: Uuid, currency: &str) -> Result<Decimal, StorageError>;

    /// Appends a transaction row. Fails with [`StorageError::Immutable`] if
    /// a row with the same `uid` already exists.
    async fn append(&mut self, transaction: Transaction) -> Result<(), StorageError>;

    async fn append_note(&mut self, note: TransactionNote) -> Result<(), StorageError>;

    async fn commit(self: Box<Self>) -> Result<(), StorageError>;

    async fn rollback(self: Box<Self>) -> Result<(), StorageError>;
}
