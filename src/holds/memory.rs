//! In-memory [`HoldStore`] fake.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::HoldStore;
use crate::domain::hold::{HoldFilter, HoldPatch};
use crate::domain::WalletHold;
use crate::error::StorageError;

#[derive(Clone, Default)]
pub struct InMemoryHoldStore {
    holds: Arc<Mutex<Vec<WalletHold>>>,
}

impl InMemoryHoldStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HoldStore for InMemoryHoldStore {
    async fn create(&self, hold: WalletHold) -> Result<WalletHold, StorageError> {
        self.holds.lock().await.push(hold.clone());
        Ok(hold)
    }

    async fn get(&self, uid: Uuid) -> Result<Option<WalletHold>, StorageError> {
        Ok(self.holds.lock().await.iter().find(|h| h.uid == uid).cloned())
    }

    async fn update(&self, uid: Uuid, patch: HoldPatch) -> Result<WalletHold, StorageError> {
        let mut holds = self.holds.lock().await;
        let hold = holds
            .iter_mut()
            .find(|h| h.uid == uid)
            .ok_or_else(|| StorageError::Backend(sqlx::Error::RowNotFound))?;

        if let Some(expires_at) = patch.expires_at {
            hold.expires_at = expires_at;
        }
        if let Some(status) = patch.status {
            hold.status = status;
        }
        if let Some(description) = patch.description {
            hold.description = description;
        }
        if let Some(meta_data) = patch.meta_data {
            hold.meta_data = meta_data;
        }
        hold.updated_at = Utc::now();
        Ok(hold.clone())
    }

    async fn list_holds(
        &self,
        filter: HoldFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<WalletHold>, i64), StorageError> {
        let windowed = filter.from.is_some() || filter.to.is_some();
        let now = Utc::now();
        let holds = self.holds.lock().await;

        let mut items: Vec<WalletHold> = holds
            .iter()
            .filter(|h| {
                h.user_id == filter.user_id
                    && h.business_name == filter.business_name
                    && h.is_deleted == filter.is_deleted
                    && filter.wallet_id.map(|w| w == h.wallet_id).unwrap_or(true)
                    && filter.currency.as_deref().map(|c| c == h.currency).unwrap_or(true)
                    && filter.status.map(|s| s == h.status).unwrap_or(true)
                    && if windowed {
                        filter.from.map(|f| h.created_at >= f).unwrap_or(true)
                            && filter.to.map(|t| h.created_at <= t).unwrap_or(true)
                    } else {
                        h.expires_at > now
                    }
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

    async fn active_sum(&self, wallet_id: Uuid, currency: &str, now: DateTime<Utc>) -> Result<Decimal, StorageError> {
        let holds = self.holds.lock().await;
        Ok(holds
            .iter()
            .filter(|h| h.wallet_id == wallet_id && h.currency == currency && h.is_active_at(now))
            .map(|h| h.amount)
            .sum())
    }
}
