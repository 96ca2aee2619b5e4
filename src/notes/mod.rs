//! Note log: append-only notes on a transaction, surfaced as a single
//! "latest note" on read.

#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::TransactionNote;
use crate::error::StorageError;

#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn append(&self, note: TransactionNote) -> Result<TransactionNote, StorageError>;

    async fn latest(&self, transaction_id: Uuid) -> Result<Option<TransactionNote>, StorageError>;
}
