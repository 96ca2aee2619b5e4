//! Wallet view: pure read-side derivations over the ledger and hold
//! stores — current balance, currency set, held amount, spendable amount.

use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::{Balance, Wallet, NO_CURRENCY};
use crate::error::StorageError;
use crate::holds::HoldStore;
use crate::ledger::LedgerStore;

pub struct WalletView {
    ledger: Arc<dyn LedgerStore>,
    holds: Arc<dyn HoldStore>,
}

impl WalletView {
    pub fn new(ledger: Arc<dyn LedgerStore>, holds: Arc<dyn HoldStore>) -> Self {
        Self { ledger, holds }
    }

    /// The sorted set of currencies a wallet has ever moved, plus its main
    /// currency if set. `app_income` wallets only ever report their own
    /// main currency and never scan the ledger.
    pub async fn currencies(&self, wallet: &Wallet) -> Result<Vec<String>, StorageError> {
        if wallet.wallet_type.is_app_income() {
            return Ok(vec![wallet.main_currency.clone()]);
        }

        let mut set = self.ledger.distinct_currencies(wallet.uid).await?;
        if wallet.has_fixed_currency() {
            set.insert(wallet.main_currency.clone());
        }
        set.remove(NO_CURRENCY);
        Ok(set.into_iter().collect())
    }

    /// Balance for a single currency, or the union over all of the
    /// wallet's currencies when `currency` is `None`.
    pub async fn balance(
        &self,
        wallet: &Wallet,
        currency: Option<&str>,
    ) -> Result<BTreeMap<String, Balance>, StorageError> {
        if let Some(currency) = currency {
            let balance = self.balance_one(wallet, currency).await?;
            let mut map = BTreeMap::new();
            map.insert(currency.to_string(), balance);
            return Ok(map);
        }

        let mut map = BTreeMap::new();
        for currency in self.currencies(wallet).await? {
            let balance = self.balance_one(wallet, &currency).await?;
            map.insert(currency, balance);
        }
        Ok(map)
    }

    async fn balance_one(&self, wallet: &Wallet, currency: &str) -> Result<Balance, StorageError> {
        if wallet.wallet_type.is_app_income() {
            return Ok(if currency == wallet.main_currency {
                Balance::Unbounded
            } else {
                Balance::zero()
            });
        }
        let amount = self.ledger.latest_balance(wallet.uid, currency).await?;
        Ok(Balance::Finite(amount))
    }

    pub async fn held_amount(&self, wallet: &Wallet, currency: &str) -> Result<Decimal, StorageError> {
        self.holds.active_sum(wallet.uid, currency, Utc::now()).await
    }

    /// `balance - held_amount`; unbounded for `app_income`.
    pub async fn spendable(&self, wallet: &Wallet, currency: &str) -> Result<Balance, StorageError> {
        if wallet.wallet_type.is_app_income() {
            return Ok(if currency == wallet.main_currency {
                Balance::Unbounded
            } else {
                Balance::zero()
            });
        }
        let balance = self.balance_one(wallet, currency).await?;
        let held = self.held_amount(wallet, currency).await?;
        Ok(balance - held)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wallet::WalletType;
    use crate::holds::memory::InMemoryHoldStore;
    use crate::ledger::memory::InMemoryLedgerStore;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use uuid::Uuid;

    fn wallet(wallet_type: WalletType, main_currency: &str) -> Wallet {
        Wallet::new("biz", Uuid::new_v4(), wallet_type, main_currency, HashMap::new()).unwrap()
    }

    #[tokio::test]
    async fn app_income_reports_unbounded_spendable_in_its_currency() {
        let view = WalletView::new(
            Arc::new(InMemoryLedgerStore::new()),
            Arc::new(InMemoryHoldStore::new()),
        );
        let w = wallet(WalletType::AppIncome, "USD");

        let spendable = view.spendable(&w, "USD").await.unwrap();
        assert!(spendable.is_unbounded());

        let other = view.spendable(&w, "EUR").await.unwrap();
        assert_eq!(other, Balance::zero());
    }

    #[tokio::test]
    async fn app_income_currencies_is_just_its_main_currency() {
        let view = WalletView::new(
            Arc::new(InMemoryLedgerStore::new()),
            Arc::new(InMemoryHoldStore::new()),
        );
        let w = wallet(WalletType::AppIncome, "USD");
        assert_eq!(view.currencies(&w).await.unwrap(), vec!["USD".to_string()]);
    }

    #[tokio::test]
    async fn fresh_user_wallet_has_zero_balance_and_no_currencies() {
        let view = WalletView::new(
            Arc::new(InMemoryLedgerStore::new()),
            Arc::new(InMemoryHoldStore::new()),
        );
        let w = wallet(WalletType::User, crate::domain::NO_CURRENCY);
        assert!(view.currencies(&w).await.unwrap().is_empty());
        assert_eq!(
            view.spendable(&w, "USD").await.unwrap(),
            Balance::Finite(dec!(0))
        );
    }
}
