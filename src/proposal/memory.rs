//! In-memory [`ProposalStore`] fake.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::ProposalStore;
use crate::domain::{Proposal, TaskStatus};
use crate::error::StorageError;

#[derive(Clone, Default)]
pub struct InMemoryProposalStore {
    proposals: Arc<Mutex<Vec<Proposal>>>,
}

impl InMemoryProposalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProposalStore for InMemoryProposalStore {
    async fn create(&self, proposal: Proposal) -> Result<Proposal, StorageError> {
        self.proposals.lock().await.push(proposal.clone());
        Ok(proposal)
    }

    async fn get(&self, uid: Uuid) -> Result<Option<Proposal>, StorageError> {
        Ok(self
            .proposals
            .lock()
            .await
            .iter()
            .find(|p| p.uid == uid)
            .cloned())
    }

    async fn list(
        &self,
        business_name: &str,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Proposal>, i64), StorageError> {
        let proposals = self.proposals.lock().await;
        let mut items: Vec<Proposal> = proposals
            .iter()
            .filter(|p| p.business_name == business_name && !p.is_deleted)
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

    async fn update_draft(&self, proposal: Proposal) -> Result<Proposal, StorageError> {
        let mut proposals = self.proposals.lock().await;
        let slot = proposals
            .iter_mut()
            .find(|p| p.uid == proposal.uid)
            .ok_or_else(|| StorageError::Backend(sqlx::Error::RowNotFound))?;
        *slot = proposal.clone();
        Ok(proposal)
    }

    async fn try_begin_processing(&self, uid: Uuid) -> Result<bool, StorageError> {
        let mut proposals = self.proposals.lock().await;
        let Some(p) = proposals.iter_mut().find(|p| p.uid == uid) else {
            return Ok(false);
        };
        if p.task_status != TaskStatus::Init {
            return Ok(false);
        }
        p.task_status = TaskStatus::Processing;
        p.updated_at = crate::domain::now();
        Ok(true)
    }

    async fn finish(
        &self,
        uid: Uuid,
        status: TaskStatus,
        error_message: Option<String>,
    ) -> Result<Proposal, StorageError> {
        let mut proposals = self.proposals.lock().await;
        let p = proposals
            .iter_mut()
            .find(|p| p.uid == uid)
            .ok_or_else(|| StorageError::Backend(sqlx::Error::RowNotFound))?;
        p.task_status = status;
        p.error_message = error_message;
        p.updated_at = crate::domain::now();
        Ok(p.clone())
    }
}
