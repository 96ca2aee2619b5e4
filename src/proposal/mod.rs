//! Proposal repository: CRUD plus the single-entry compare-and-swap that
//! serializes `start_processing`.

#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod postgres;
pub mod processor;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Proposal, TaskStatus};
use crate::error::StorageError;

#[async_trait]
pub trait ProposalStore: Send + Sync {
    async fn create(&self, proposal: Proposal) -> Result<Proposal, StorageError>;

    async fn get(&self, uid: Uuid) -> Result<Option<Proposal>, StorageError>;

    async fn list(
        &self,
        business_name: &str,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Proposal>, i64), StorageError>;

    /// Replaces a `draft` proposal's mutable fields. Callers enforce that
    /// the proposal is still `draft` and that, if present, the patch's
    /// `task_status` is `init`.
    async fn update_draft(&self, proposal: Proposal) -> Result<Proposal, StorageError>;

    /// The serialization point: atomically flips `task_status` from `init`
    /// to `processing`. Returns `true` iff exactly one row was affected —
    /// i.e. this caller, and no other, may proceed to commit.
    async fn try_begin_processing(&self, uid: Uuid) -> Result<bool, StorageError>;

    /// Writes the terminal status (`completed` or `error`) and, for
    /// `error`, the failure message. Called **outside** the ledger's
    /// atomic unit.
    async fn finish(
        &self,
        uid: Uuid,
        status: TaskStatus,
        error_message: Option<String>,
    ) -> Result<Proposal, StorageError>;
}
