//! In-memory [`WalletStore`] fake.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::WalletStore;
use crate::domain::Wallet;
use crate::error::StorageError;

#[derive(Clone, Default)]
pub struct InMemoryWalletStore {
    wallets: Arc<Mutex<Vec<Wallet>>>,
}

impl InMemoryWalletStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WalletStore for InMemoryWalletStore {
    async fn create(&self, wallet: Wallet) -> Result<Wallet, StorageError> {
        self.wallets.lock().await.push(wallet.clone());
        Ok(wallet)
    }

    async fn get(&self, uid: Uuid) -> Result<Option<Wallet>, StorageError> {
        Ok(self.wallets.lock().await.iter().find(|w| w.uid == uid).cloned())
    }

    async fn list(
        &self,
        business_name: &str,
        user_id: Option<Uuid>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Wallet>, i64), StorageError> {
        let wallets = self.wallets.lock().await;
        let mut items: Vec<Wallet> = wallets
            .iter()
            .filter(|w| {
                w.business_name == business_name
                    && !w.is_deleted
                    && user_id.map(|u| u == w.user_id).unwrap_or(true)
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = items.len() as i64;
        let page = items
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        Ok((page, total))
    }

    async fn soft_delete(&self, uid: Uuid) -> Result<Wallet, StorageError> {
        let mut wallets = self.wallets.lock().await;
        let wallet = wallets
            .iter_mut()
            .find(|w| w.uid == uid)
            .ok_or_else(|| StorageError::Backend(sqlx::Error::RowNotFound))?;
        wallet.is_deleted = true;
        wallet.updated_at = Utc::now();
        Ok(wallet.clone())
    }
}
