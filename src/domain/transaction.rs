//! Transaction entity — the immutable ledger row.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

use super::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub uid: Uuid,
    pub business_name: String,
    pub user_id: Uuid,
    pub proposal_id: Uuid,
    pub wallet_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    /// Running balance for `(wallet_id, currency)` after this row.
    pub balance: Decimal,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub meta_data: HashMap<String, Value>,
}

impl Entity for Transaction {
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

#[allow(clippy::too_many_arguments)]
impl Transaction {
    /// Constructs a new ledger row. Only the proposal processor's commit
    /// phase is expected to call this — no other path produces a
    /// `Transaction`.
    pub fn new(
        business_name: impl Into<String>,
        user_id: Uuid,
        proposal_id: Uuid,
        wallet_id: Uuid,
        amount: Decimal,
        currency: impl Into<String>,
        balance: Decimal,
        description: Option<String>,
        mut meta_data: HashMap<String, Value>,
    ) -> Self {
        let now = Utc::now();
        let uid = Uuid::new_v4();
        // Stamp the proposal id into the row's own meta_data alongside
        // whatever the wallet carried.
        meta_data.insert(
            "proposal_id".to_string(),
            Value::String(proposal_id.to_string()),
        );
        Self {
            uid,
            business_name: business_name.into(),
            user_id,
            proposal_id,
            wallet_id,
            amount,
            currency: currency.into(),
            balance,
            description,
            created_at: now,
            updated_at: now,
            is_deleted: false,
            meta_data,
        }
    }
}
