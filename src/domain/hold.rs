//! WalletHold entity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

use super::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldStatus {
    Active,
    Inactive,
    Suspended,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletHold {
    pub uid: Uuid,
    pub business_name: String,
    pub user_id: Uuid,
    pub wallet_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub expires_at: DateTime<Utc>,
    pub status: HoldStatus,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub meta_data: HashMap<String, Value>,
}

impl Entity for WalletHold {
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

impl WalletHold {
    /// Builds a new active hold, enforcing the `amount >= 0` invariant.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        business_name: impl Into<String>,
        user_id: Uuid,
        wallet_id: Uuid,
        amount: Decimal,
        currency: impl Into<String>,
        expires_at: DateTime<Utc>,
        description: Option<String>,
        meta_data: HashMap<String, Value>,
    ) -> Result<Self, String> {
        if amount.is_sign_negative() {
            return Err("hold amount must not be negative".to_string());
        }
        let now = Utc::now();
        Ok(Self {
            uid: Uuid::new_v4(),
            business_name: business_name.into(),
            user_id,
            wallet_id,
            amount,
            currency: currency.into(),
            expires_at,
            status: HoldStatus::Active,
            description,
            created_at: now,
            updated_at: now,
            is_deleted: false,
            meta_data,
        })
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.status == HoldStatus::Active && self.expires_at > now && !self.is_deleted
    }
}

/// Patch accepted by `update_hold` — only these fields are mutable.
#[derive(Debug, Clone, Default)]
pub struct HoldPatch {
    pub expires_at: Option<DateTime<Utc>>,
    pub status: Option<HoldStatus>,
    pub description: Option<Option<String>>,
    pub meta_data: Option<HashMap<String, Value>>,
}

/// Filter for `list_holds`.
#[derive(Debug, Clone)]
pub struct HoldFilter {
    pub user_id: Uuid,
    pub business_name: String,
    pub wallet_id: Option<Uuid>,
    pub currency: Option<String>,
    pub status: Option<HoldStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub is_deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn hold(status: HoldStatus, expires_at: DateTime<Utc>) -> WalletHold {
        WalletHold {
            uid: Uuid::new_v4(),
            business_name: "biz".into(),
            user_id: Uuid::new_v4(),
            wallet_id: Uuid::new_v4(),
            amount: dec!(10),
            currency: "USD".into(),
            expires_at,
            status,
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            is_deleted: false,
            meta_data: HashMap::new(),
        }
    }

    #[test]
    fn expired_active_hold_is_not_active() {
        let h = hold(HoldStatus::Active, Utc::now() - chrono::Duration::hours(1));
        assert!(!h.is_active_at(Utc::now()));
    }

    #[test]
    fn unexpired_active_hold_is_active() {
        let h = hold(HoldStatus::Active, Utc::now() + chrono::Duration::hours(1));
        assert!(h.is_active_at(Utc::now()));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let err = WalletHold::new(
            "biz",
            Uuid::new_v4(),
            Uuid::new_v4(),
            dec!(-1),
            "USD",
            Utc::now() + chrono::Duration::hours(1),
            None,
            HashMap::new(),
        )
        .unwrap_err();
        assert!(err.contains("negative"));
    }

    #[test]
    fn zero_amount_is_allowed() {
        let h = WalletHold::new(
            "biz",
            Uuid::new_v4(),
            Uuid::new_v4(),
            dec!(0),
            "USD",
            Utc::now() + chrono::Duration::hours(1),
            None,
            HashMap::new(),
        )
        .unwrap();
        assert_eq!(h.amount, dec!(0));
    }
}
