//! TransactionNote entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

use super::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionNote {
    pub uid: Uuid,
    pub business_name: String,
    pub user_id: Uuid,
    pub transaction_id: Uuid,
    pub note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub meta_data: HashMap<String, Value>,
}

impl Entity for TransactionNote {
    fn uid(&self) -> Uuid {
        self.uid
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
    fn meta_data(&self) -> &HashMap<String, Value> {
        &self.meta_data
    }
}

impl TransactionNote {
    pub fn new(
        business_name: impl Into<String>,
        user_id: Uuid,
        transaction_id: Uuid,
        note: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            uid: Uuid::new_v4(),
            business_name: business_name.into(),
            user_id,
            transaction_id,
            note: note.into(),
            created_at: now,
            updated_at: now,
            is_deleted: false,
            meta_data: HashMap::new(),
        }
    }
}
