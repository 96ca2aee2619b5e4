//! Proposal entity and its participants.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

use super::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Issuer {
    User,
    Business,
    App,
}

/// `task_status` state machine:
/// `draft -> init -> processing -> {completed, error}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Draft,
    Init,
    Processing,
    Completed,
    Error,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Error)
    }
}

/// One `(wallet_id, signed amount)` leg of a proposal. Positive = recipient,
/// negative = source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub wallet_id: Uuid,
    pub amount: Decimal,
}

impl Participant {
    pub fn is_source(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    pub fn is_recipient(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub uid: Uuid,
    pub business_name: String,
    pub user_id: Uuid,
    pub issuer: Issuer,
    pub issuer_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub description: Option<String>,
    pub note: Option<String>,
    pub task_status: TaskStatus,
    /// Set to the failure message when `task_status = error`. Failures are
    /// captured onto the proposal, not raised to the caller.
    pub error_message: Option<String>,
    pub participants: Vec<Participant>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub meta_data: HashMap<String, Value>,
}

impl Entity for Proposal {
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
impl Proposal {
    pub fn new_draft(
        business_name: impl Into<String>,
        user_id: Uuid,
        issuer: Issuer,
        issuer_id: Uuid,
        amount: Decimal,
        currency: impl Into<String>,
        description: Option<String>,
        note: Option<String>,
        participants: Vec<Participant>,
        task_status: TaskStatus,
        meta_data: HashMap<String, Value>,
    ) -> Self {
        let now = Utc::now();
        Self {
            uid: Uuid::new_v4(),
            business_name: business_name.into(),
            user_id,
            issuer,
            issuer_id,
            amount,
            currency: currency.into(),
            description,
            note,
            task_status,
            error_message: None,
            participants,
            created_at: now,
            updated_at: now,
            is_deleted: false,
            meta_data,
        }
    }

    pub fn sources(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| p.is_source())
    }
}
