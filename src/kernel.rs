//! Public operations facade. One `AccountingKernel` per business process,
//! composed by value from the storage traits rather than a runtime-resolved
//! auth router layering.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{Authorization, BusinessDirectory};
use crate::config::Config;
use crate::domain::hold::{HoldFilter, HoldPatch};
use crate::domain::proposal::{Issuer, Participant};
use crate::domain::{
    Balance, Proposal, TaskStatus, Transaction, TransactionNote, Wallet, WalletType,
};
use crate::error::AccountingError;
use crate::holds::HoldStore;
use crate::ledger::LedgerStore;
use crate::notes::NoteStore;
use crate::paging::{Page, Paging};
use crate::proposal::processor::ProposalProcessor;
use crate::proposal::ProposalStore;
use crate::wallet::WalletStore;
use crate::wallet_view::WalletView;

/// Body of `CreateWallet`.
pub struct CreateWalletBody {
    pub user_id: Uuid,
    pub wallet_type: WalletType,
    pub main_currency: String,
    pub meta_data: HashMap<String, Value>,
}

/// Body of `CreateHold`.
pub struct CreateHoldBody {
    pub amount: Decimal,
    pub expires_at: DateTime<Utc>,
    pub description: Option<String>,
    pub meta_data: HashMap<String, Value>,
}

/// Filter accepted by `ListTransactions`.
pub struct TransactionFilter {
    pub wallet_id: Uuid,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Body of `CreateProposal`. `task_status` is restricted to
/// `draft`/`init` at the API boundary.
pub struct CreateProposalBody {
    pub user_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub description: Option<String>,
    pub note: Option<String>,
    pub participants: Vec<Participant>,
    pub task_status: TaskStatus,
    pub meta_data: HashMap<String, Value>,
}

/// Patch accepted by `UpdateProposal`, valid only while `task_status = draft`.
#[derive(Default)]
pub struct ProposalPatch {
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub description: Option<Option<String>>,
    pub note: Option<Option<String>>,
    pub participants: Option<Vec<Participant>>,
    pub task_status: Option<TaskStatus>,
}

pub struct AccountingKernel {
    wallets: Arc<dyn WalletStore>,
    ledger: Arc<dyn LedgerStore>,
    holds: Arc<dyn HoldStore>,
    notes: Arc<dyn NoteStore>,
    proposals: Arc<dyn ProposalStore>,
    business: Arc<dyn BusinessDirectory>,
    processor: ProposalProcessor,
    view: WalletView,
    config: Config,
}

impl AccountingKernel {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        wallets: Arc<dyn WalletStore>,
        ledger: Arc<dyn LedgerStore>,
        holds: Arc<dyn HoldStore>,
        notes: Arc<dyn NoteStore>,
        proposals: Arc<dyn ProposalStore>,
        business: Arc<dyn BusinessDirectory>,
        config: Config,
    ) -> Self {
        let processor = ProposalProcessor::new(
            proposals.clone(),
            wallets.clone(),
            ledger.clone(),
            holds.clone(),
            business.clone(),
        );
        let view = WalletView::new(ledger.clone(), holds.clone());
        Self {
            wallets,
            ledger,
            holds,
            notes,
            proposals,
            business,
            processor,
            view,
            config,
        }
    }

    fn require_not_user(&self, auth: &Authorization) -> Result<(), AccountingError> {
        if auth.is_user() {
            return Err(AccountingError::Authorization(
                "operation not permitted for user issuers".to_string(),
            ));
        }
        Ok(())
    }

    /// Creates a default `user`-type wallet for `auth.user_id` the first
    /// time a User issuer has none, in the business's default currency.
    /// Isolated behind an explicit call from `ListWallets`.
    async fn ensure_default_wallet_for_user(&self, auth: &Authorization) -> Result<(), AccountingError> {
        if !auth.is_user() {
            return Ok(());
        }
        let (existing, _) = self
            .wallets
            .list(&auth.business_name, Some(auth.user_id), 0, 1)
            .await?;
        if !existing.is_empty() {
            return Ok(());
        }
        let currency = self.business.default_currency(&auth.business_name).await?;
        let wallet = Wallet::new(
            auth.business_name.clone(),
            auth.user_id,
            WalletType::User,
            currency,
            HashMap::new(),
        )
        .map_err(AccountingError::Validation)?;
        self.wallets.create(wallet).await?;
        Ok(())
    }

    pub async fn list_wallets(
        &self,
        auth: &Authorization,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Page<Wallet>, AccountingError> {
        self.ensure_default_wallet_for_user(auth).await?;
        let paging = Paging::clamp(offset, limit, &self.config);
        let user_id = if auth.is_user() { Some(auth.user_id) } else { None };
        let (items, total) = self
            .wallets
            .list(&auth.business_name, user_id, paging.offset, paging.limit)
            .await?;
        Ok(Page::new(items, total, paging))
    }

    pub async fn get_wallet(
        &self,
        uid: Uuid,
    ) -> Result<(Wallet, BTreeMap<String, Balance>), AccountingError> {
        let wallet = self
            .wallets
            .get(uid)
            .await?
            .filter(|w| !w.is_deleted)
            .ok_or(AccountingError::NotFound("wallet"))?;
        let balance = self.view.balance(&wallet, None).await?;
        Ok((wallet, balance))
    }

    pub async fn create_wallet(
        &self,
        auth: &Authorization,
        body: CreateWalletBody,
    ) -> Result<Wallet, AccountingError> {
        self.require_not_user(auth)?;
        let wallet = Wallet::new(
            auth.business_name.clone(),
            body.user_id,
            body.wallet_type,
            body.main_currency,
            body.meta_data,
        )
        .map_err(AccountingError::Validation)?;
        Ok(self.wallets.create(wallet).await?)
    }

    pub async fn delete_wallet(&self, uid: Uuid) -> Result<Wallet, AccountingError> {
        let wallet = self
            .wallets
            .get(uid)
            .await?
            .ok_or(AccountingError::NotFound("wallet"))?;
        let balances = self.view.balance(&wallet, None).await?;
        // A wallet may be deleted only when every currency balance is
        // exactly zero; `app_income`'s unbounded balance never qualifies.
        let non_zero = balances
            .values()
            .any(|b| matches!(b, Balance::Finite(v) if !v.is_zero()) || b.is_unbounded());
        if non_zero {
            return Err(AccountingError::Validation(
                "wallet has a non-zero balance in at least one currency".to_string(),
            ));
        }
        Ok(self.wallets.soft_delete(uid).await?)
    }

    pub async fn list_holds(
        &self,
        filter: HoldFilter,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Page<crate::domain::WalletHold>, AccountingError> {
        let paging = Paging::clamp(offset, limit, &self.config);
        let (items, total) = self.holds.list_holds(filter, paging.offset, paging.limit).await?;
        Ok(Page::new(items, total, paging))
    }

    pub async fn create_hold(
        &self,
        auth: &Authorization,
        wallet_id: Uuid,
        currency: String,
        body: CreateHoldBody,
    ) -> Result<crate::domain::WalletHold, AccountingError> {
        self.require_not_user(auth)?;
        let wallet = self
            .wallets
            .get(wallet_id)
            .await?
            .filter(|w| !w.is_deleted)
            .ok_or(AccountingError::NotFound("wallet"))?;
        let hold = crate::domain::WalletHold::new(
            wallet.business_name,
            wallet.user_id,
            wallet_id,
            body.amount,
            currency,
            body.expires_at,
            body.description,
            body.meta_data,
        )
        .map_err(AccountingError::Validation)?;
        Ok(self.holds.create(hold).await?)
    }

    pub async fn update_hold(
        &self,
        auth: &Authorization,
        uid: Uuid,
        patch: HoldPatch,
    ) -> Result<crate::domain::WalletHold, AccountingError> {
        self.require_not_user(auth)?;
        Ok(self.holds.update(uid, patch).await?)
    }

    pub async fn list_transactions(
        &self,
        filter: TransactionFilter,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Page<Transaction>, AccountingError> {
        let paging = Paging::clamp(offset, limit, &self.config);
        let (items, total) = self
            .ledger
            .list(filter.wallet_id, filter.from, filter.to, paging.offset, paging.limit)
            .await?;
        Ok(Page::new(items, total, paging))
    }

    /// Returns the transaction alongside its latest note, if any — the log
    /// stays append-only in storage, but a read only ever surfaces the most
    /// recent value.
    pub async fn get_transaction(
        &self,
        uid: Uuid,
    ) -> Result<(Transaction, Option<TransactionNote>), AccountingError> {
        let transaction = self
            .ledger
            .get(uid)
            .await?
            .ok_or(AccountingError::NotFound("transaction"))?;
        let note = self.notes.latest(uid).await?;
        Ok((transaction, note))
    }

    /// Appends a note outside any proposal atomic unit — only
    /// processor-generated notes share the commit's atomic unit.
    pub async fn add_transaction_note(
        &self,
        transaction: &Transaction,
        note: String,
    ) -> Result<TransactionNote, AccountingError> {
        let note = TransactionNote::new(
            transaction.business_name.clone(),
            transaction.user_id,
            transaction.uid,
            note,
        );
        Ok(self.notes.append(note).await?)
    }

    pub async fn list_proposals(
        &self,
        business_name: &str,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Page<Proposal>, AccountingError> {
        let paging = Paging::clamp(offset, limit, &self.config);
        let (items, total) = self.proposals.list(business_name, paging.offset, paging.limit).await?;
        Ok(Page::new(items, total, paging))
    }

    pub async fn get_proposal(&self, uid: Uuid) -> Result<Proposal, AccountingError> {
        self.proposals
            .get(uid)
            .await?
            .ok_or(AccountingError::NotFound("proposal"))
    }

    pub async fn create_proposal(
        &self,
        auth: &Authorization,
        body: CreateProposalBody,
    ) -> Result<Proposal, AccountingError> {
        self.require_not_user(auth)?;
        if !matches!(body.task_status, TaskStatus::Draft | TaskStatus::Init) {
            return Err(AccountingError::Validation(
                "a new proposal must start as draft or init".to_string(),
            ));
        }
        let issuer = match auth.issuer_type {
            Issuer::User => Issuer::User,
            Issuer::Business => Issuer::Business,
            Issuer::App => Issuer::App,
        };
        let proposal = Proposal::new_draft(
            auth.business_name.clone(),
            body.user_id,
            issuer,
            auth.user_id,
            body.amount,
            body.currency,
            body.description,
            body.note,
            body.participants,
            body.task_status,
            body.meta_data,
        );
        Ok(self.proposals.create(proposal).await?)
    }

    pub async fn update_proposal(
        &self,
        auth: &Authorization,
        uid: Uuid,
        patch: ProposalPatch,
    ) -> Result<Proposal, AccountingError> {
        let mut proposal = self
            .proposals
            .get(uid)
            .await?
            .ok_or(AccountingError::NotFound("proposal"))?;
        if auth.user_id != proposal.issuer_id {
            return Err(AccountingError::Authorization(
                "only the proposal's owner may patch it".to_string(),
            ));
        }
        if proposal.task_status != TaskStatus::Draft {
            return Err(AccountingError::Validation(
                "only a draft proposal may be updated".to_string(),
            ));
        }
        if let Some(status) = patch.task_status {
            if status != TaskStatus::Init {
                return Err(AccountingError::Validation(
                    "a draft proposal may only transition to init".to_string(),
                ));
            }
            proposal.task_status = status;
        }
        if let Some(amount) = patch.amount {
            proposal.amount = amount;
        }
        if let Some(currency) = patch.currency {
            proposal.currency = currency;
        }
        if let Some(description) = patch.description {
            proposal.description = description;
        }
        if let Some(note) = patch.note {
            proposal.note = note;
        }
        if let Some(participants) = patch.participants {
            proposal.participants = participants;
        }
        proposal.updated_at = crate::domain::now();
        Ok(self.proposals.update_draft(proposal).await?)
    }

    pub async fn start_proposal(&self, uid: Uuid) -> Result<Proposal, AccountingError> {
        self.processor.start_processing(uid).await
    }
}
