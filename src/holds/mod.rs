//! Hold store: time- and status-scoped wallet reservations.

#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::hold::{HoldFilter, HoldPatch};
use crate::domain::WalletHold;
use crate::error::StorageError;

#[async_trait]
pub trait HoldStore: Send + Sync {
    async fn create(&self, hold: WalletHold) -> Result<WalletHold, StorageError>;

    async fn get(&self, uid: Uuid) -> Result<Option<WalletHold>, StorageError>;

    async fn update(&self, uid: Uuid, patch: HoldPatch) -> Result<WalletHold, StorageError>;

    async fn list_holds(
        &self,
        filter: HoldFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<WalletHold>, i64), StorageError>;

    /// ∑`amount` over active, non-expired, non-deleted holds for
    /// `(wallet_id, currency)` as of `now`.
    async fn active_sum(&self, wallet_id: Uuid, currency: &str, now: DateTime<Utc>) -> Result<Decimal, StorageError>;
}
