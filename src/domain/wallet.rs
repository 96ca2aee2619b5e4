//! Wallet entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

use super::{Entity, NO_CURRENCY};

/// `wallet_type` discriminant. `AppIncome` is the infinite-source special
/// case; `AppOperational` is the app's own operating wallet, kept distinct
/// from `App` so operational float and income float never share a ledger
/// identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletType {
    User,
    Business,
    App,
    AppOperational,
    AppIncome,
}

impl WalletType {
    pub fn is_app_income(&self) -> bool {
        matches!(self, WalletType::AppIncome)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub uid: Uuid,
    pub business_name: String,
    pub user_id: Uuid,
    pub wallet_type: WalletType,
    /// Currency code, or [`NO_CURRENCY`] when the wallet has none fixed.
    pub main_currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub meta_data: HashMap<String, Value>,
}

impl Entity for Wallet {
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

impl Wallet {
    /// Builds a new wallet, enforcing the `app_income ⇒ main_currency ≠
    /// none` invariant.
    pub fn new(
        business_name: impl Into<String>,
        user_id: Uuid,
        wallet_type: WalletType,
        main_currency: impl Into<String>,
        meta_data: HashMap<String, Value>,
    ) -> Result<Self, String> {
        let main_currency = main_currency.into();
        if wallet_type.is_app_income() && main_currency == NO_CURRENCY {
            return Err("app_income wallets must declare a main_currency".to_string());
        }
        let now = Utc::now();
        Ok(Self {
            uid: Uuid::new_v4(),
            business_name: business_name.into(),
            user_id,
            wallet_type,
            main_currency,
            created_at: now,
            updated_at: now,
            is_deleted: false,
            meta_data,
        })
    }

    pub fn has_fixed_currency(&self) -> bool {
        self.main_currency != NO_CURRENCY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_income_without_currency_is_rejected() {
        let err = Wallet::new(
            "biz",
            Uuid::new_v4(),
            WalletType::AppIncome,
            NO_CURRENCY,
            HashMap::new(),
        )
        .unwrap_err();
        assert!(err.contains("app_income"));
    }

    #[test]
    fn user_wallet_may_have_no_fixed_currency() {
        let w = Wallet::new("biz", Uuid::new_v4(), WalletType::User, NO_CURRENCY, HashMap::new())
            .unwrap();
        assert!(!w.has_fixed_currency());
    }
}
