//! In-memory [`NoteStore`] fake.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::NoteStore;
use crate::domain::TransactionNote;
use crate::error::StorageError;

#[derive(Clone, Default)]
pub struct InMemoryNoteStore {
    notes: Arc<Mutex<Vec<TransactionNote>>>,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteStore for InMemoryNoteStore {
    async fn append(&self, note: TransactionNote) -> Result<TransactionNote, StorageError> {
        self.notes.lock().await.push(note.clone());
        Ok(note)
    }

    async fn latest(&self, transaction_id: Uuid) -> Result<Option<TransactionNote>, StorageError> {
        let notes = self.notes.lock().await;
        Ok(notes
            .iter()
            .filter(|n| n.transaction_id == transaction_id)
            .max_by_key(|n| n.created_at)
            .cloned())
    }
}
