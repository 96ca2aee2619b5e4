//! In-memory [`LedgerStore`] fake, used by this crate's own tests and
//! exported for downstream consumers under the `test-util` feature.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use super::{LedgerStore, LedgerUnit};
use crate::domain::{transaction::Transaction, TransactionNote};
use crate::error::StorageError;

#[derive(Default)]
struct LedgerData {
    transactions: Vec<Transaction>,
    notes: Vec<TransactionNote>,
}

impl LedgerData {
    fn latest_balance(&self, wallet_id: Uuid, currency: &str) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.wallet_id == wallet_id && t.currency == currency && !t.is_deleted)
            .max_by_key(|t| (t.created_at, t.uid))
            .map(|t| t.balance)
            .unwrap_or(Decimal::ZERO)
    }
}

#[derive(Clone)]
pub struct InMemoryLedgerStore {
    inner: Arc<Mutex<LedgerData>>,
}

impl Default for InMemoryLedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(LedgerData::default())),
        }
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn latest_balance(&self, wallet_id: Uuid, currency: &str) -> Result<Decimal, StorageError> {
        Ok(self.inner.lock().await.latest_balance(wallet_id, currency))
    }

    async fn distinct_currencies(&self, wallet_id: Uuid) -> Result<BTreeSet<String>, StorageError> {
        let data = self.inner.lock().await;
        Ok(data
            .transactions
            .iter()
            .filter(|t| t.wallet_id == wallet_id && !t.is_deleted)
            .map(|t| t.currency.clone())
            .collect())
    }

    async fn list(
        &self,
        wallet_id: Uuid,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Transaction>, i64), StorageError> {
        let to = to.unwrap_or_else(Utc::now);
        let data = self.inner.lock().await;
        let mut items: Vec<Transaction> = data
            .transactions
            .iter()
            .filter(|t| {
                t.wallet_id == wallet_id
                    && t.created_at <= to
                    && from.map(|f| t.created_at >= f).unwrap_or(true)
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.uid.cmp(&a.uid)));
        let total = items.len() as i64;
        let page = items
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        Ok((page, total))
    }

    async fn by_proposal(&self, proposal_id: Uuid) -> Result<Vec<Transaction>, StorageError> {
        let data = self.inner.lock().await;
        Ok(data
            .transactions
            .iter()
            .filter(|t| t.proposal_id == proposal_id)
            .cloned()
            .collect())
    }

    async fn get(&self, uid: Uuid) -> Result<Option<Transaction>, StorageError> {
        let data = self.inner.lock().await;
        Ok(data.transactions.iter().find(|t| t.uid == uid).cloned())
    }

    async fn begin<'a>(&'a self) -> Result<Box<dyn LedgerUnit + 'a>, StorageError> {
        let guard = self.inner.clone().lock_owned().await;
        Ok(Box::new(InMemoryLedgerUnit {
            guard: Some(guard),
            pending_transactions: Vec::new(),
            pending_notes: Vec::new(),
        }))
    }
}

/// Holds the store's single mutex for the unit's whole lifetime — a test
/// fake is allowed to serialize everything, where the real engine only
/// needs to serialize per source wallet.
pub struct InMemoryLedgerUnit {
    guard: Option<OwnedMutexGuard<LedgerData>>,
    pending_transactions: Vec<Transaction>,
    pending_notes: Vec<TransactionNote>,
}

#[async_trait]
impl LedgerUnit for InMemoryLedgerUnit {
    async fn lock_wallet(&mut self, _wallet_id: Uuid) -> Result<(), StorageError> {
        // Already holding the store-wide lock for this unit's duration.
        Ok(())
    }

    async fn latest_balance(&mut self, wallet_id: Uuid, currency: &str) -> Result<Decimal, StorageError> {
        if let Some(t) = self
            .pending_transactions
            .iter()
            .rev()
            .find(|t| t.wallet_id == wallet_id && t.currency == currency)
        {
            return Ok(t.balance);
        }
        let guard = self.guard.as_ref().expect("unit used after commit/rollback");
        Ok(guard.latest_balance(wallet_id, currency))
    }

    async fn append(&mut self, transaction: Transaction) -> Result<(), StorageError> {
        let guard = self.guard.as_ref().expect("unit used after commit/rollback");
        let exists = guard.transactions.iter().any(|t| t.uid == transaction.uid)
            || self.pending_transactions.iter().any(|t| t.uid == transaction.uid);
        if exists {
            return Err(StorageError::Immutable(transaction.uid.to_string()));
        }
        self.pending_transactions.push(transaction);
        Ok(())
    }

    async fn append_note(&mut self, note: TransactionNote) -> Result<(), StorageError> {
        self.pending_notes.push(note);
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> Result<(), StorageError> {
        let mut guard = self.guard.take().expect("unit used after commit/rollback");
        guard.transactions.append(&mut self.pending_transactions);
        guard.notes.append(&mut self.pending_notes);
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> Result<(), StorageError> {
        self.guard.take();
        Ok(())
    }
}
