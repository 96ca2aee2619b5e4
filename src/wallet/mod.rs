//! Wallet repository: CRUD + listing for [`Wallet`] rows. Owns wallet
//! metadata and `wallet_type`/`main_currency`; balance derivation lives in
//! `wallet_view`.

#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Wallet;
use crate::error::StorageError;

#[async_trait]
pub trait WalletStore: Send + Sync {
    async fn create(&self, wallet: Wallet) -> Result<Wallet, StorageError>;

    async fn get(&self, uid: Uuid) -> Result<Option<Wallet>, StorageError>;

    async fn list(
        &self,
        business_name: &str,
        user_id: Option<Uuid>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Wallet>, i64), StorageError>;

    /// Soft-deletes the wallet. The caller is responsible for checking
    /// every currency balance is zero first.
    async fn soft_delete(&self, uid: Uuid) -> Result<Wallet, StorageError>;
}
