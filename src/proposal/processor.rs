//! Proposal processor: the validation pipeline and the transactional
//! commit phase for an N-party multi-currency proposal, with its own
//! atomic unit and wallet row locking.

use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::auth::BusinessDirectory;
use crate::domain::{Proposal, TaskStatus, Transaction, TransactionNote, Wallet};
use crate::error::AccountingError;
use crate::holds::HoldStore;
use crate::ledger::LedgerStore;
use crate::wallet::WalletStore;
use crate::wallet_view::WalletView;

use super::ProposalStore;

/// Overridable acceptance hook for a resolved participant wallet. The
/// default accepts everything.
pub trait ParticipantPolicy: Send + Sync {
    fn participant_ok(&self, wallet: &Wallet, business_name: &str) -> bool;
}

pub struct AllowAllParticipants;

impl ParticipantPolicy for AllowAllParticipants {
    fn participant_ok(&self, _wallet: &Wallet, _business_name: &str) -> bool {
        true
    }
}

/// Notification hook run after a proposal reaches a terminal state. This is
/// an external collaborator, so the default does nothing and a host wires
/// in whatever notification channel it has without this crate depending on
/// one.
pub trait ProposalObserver: Send + Sync {
    fn on_completed(&self, _proposal: &Proposal, _transactions: &[Transaction]) {}
    fn on_failed(&self, _proposal: &Proposal, _message: &str) {}
}

pub struct NoopObserver;

impl ProposalObserver for NoopObserver {}

pub struct ProposalProcessor {
    proposals: Arc<dyn ProposalStore>,
    wallets: Arc<dyn WalletStore>,
    ledger: Arc<dyn LedgerStore>,
    holds: Arc<dyn HoldStore>,
    business: Arc<dyn BusinessDirectory>,
    policy: Arc<dyn ParticipantPolicy>,
    observer: Arc<dyn ProposalObserver>,
}

impl ProposalProcessor {
    pub fn new(
        proposals: Arc<dyn ProposalStore>,
        wallets: Arc<dyn WalletStore>,
        ledger: Arc<dyn LedgerStore>,
        holds: Arc<dyn HoldStore>,
        business: Arc<dyn BusinessDirectory>,
    ) -> Self {
        Self {
            proposals,
            wallets,
            ledger,
            holds,
            business,
            policy: Arc::new(AllowAllParticipants),
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_policy(mut self, policy: Arc<dyn ParticipantPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ProposalObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Runs the validation and commit pipeline end to end. Never returns a
    /// validation or solvency failure as an `Err` — those are captured onto
    /// the proposal's `task_status = error` and the terminal proposal is
    /// returned. Only a missing proposal or a lost single-entry race
    /// surface as `Err`.
    #[instrument(skip(self), fields(proposal_id = %proposal_id))]
    pub async fn start_processing(&self, proposal_id: Uuid) -> Result<Proposal, AccountingError> {
        self.proposals
            .get(proposal_id)
            .await?
            .ok_or(AccountingError::NotFound("proposal"))?;

        if !self.proposals.try_begin_processing(proposal_id).await? {
            return Err(AccountingError::AlreadyProcessed);
        }

        let proposal = self
            .proposals
            .get(proposal_id)
            .await?
            .ok_or(AccountingError::NotFound("proposal"))?;

        match self.validate_and_commit(&proposal).await {
            Ok(transactions) => {
                let completed = self
                    .proposals
                    .finish(proposal_id, TaskStatus::Completed, None)
                    .await?;
                info!(
                    participants = transactions.len(),
                    currency = %proposal.currency,
                    "proposal committed"
                );
                self.observer.on_completed(&completed, &transactions);
                Ok(completed)
            }
            Err(e) => {
                warn!(error = %e, "proposal failed validation or solvency check");
                let failed = self
                    .proposals
                    .finish(proposal_id, TaskStatus::Error, Some(e.to_string()))
                    .await?;
                self.observer.on_failed(&failed, &e.to_string());
                Ok(failed)
            }
        }
    }

    async fn validate_and_commit(
        &self,
        proposal: &Proposal,
    ) -> Result<Vec<Transaction>, AccountingError> {
        let wallets = self.validate(proposal).await?;
        self.commit(proposal, &wallets).await
    }

    async fn validate(&self, proposal: &Proposal) -> Result<HashMap<Uuid, Wallet>, AccountingError> {
        // 1. Shape.
        if proposal.participants.is_empty() {
            return Err(AccountingError::Validation(
                "proposal has no participants".to_string(),
            ));
        }

        // 2. Tenant.
        if !self.business.exists(&proposal.business_name).await? {
            return Err(AccountingError::Validation(format!(
                "unknown business {}",
                proposal.business_name
            )));
        }

        // 3. Wallet resolution.
        let mut wallets = HashMap::new();
        for p in &proposal.participants {
            if wallets.contains_key(&p.wallet_id) {
                continue;
            }
            let wallet = self
                .wallets
                .get(p.wallet_id)
                .await?
                .filter(|w| !w.is_deleted)
                .ok_or_else(|| {
                    AccountingError::Validation(format!("wallet {} not found", p.wallet_id))
                })?;
            if wallet.business_name != proposal.business_name {
                return Err(AccountingError::Validation(format!(
                    "wallet {} does not belong to business {}",
                    p.wallet_id, proposal.business_name
                )));
            }
            wallets.insert(p.wallet_id, wallet);
        }

        // 4. Amount balance: S⁺ = proposal.amount, S⁰ = 0.
        let s_plus: Decimal = proposal
            .participants
            .iter()
            .filter(|p| p.is_recipient())
            .map(|p| p.amount)
            .sum();
        let s_zero: Decimal = proposal.participants.iter().map(|p| p.amount).sum();
        if !s_zero.is_zero() {
            return Err(AccountingError::Validation(format!(
                "participant amounts do not sum to zero (got {s_zero})"
            )));
        }
        if s_plus != proposal.amount {
            return Err(AccountingError::Validation(format!(
                "declared amount {} does not equal the positive participant sum {}",
                proposal.amount, s_plus
            )));
        }

        // 5. Source solvency.
        let view = WalletView::new(self.ledger.clone(), self.holds.clone());
        let required = required_per_source(proposal);
        for (wallet_id, need) in &required {
            let wallet = &wallets[wallet_id];
            if wallet.wallet_type.is_app_income() {
                continue;
            }
            let spendable = view.spendable(wallet, &proposal.currency).await?;
            if !spendable.at_least(*need) {
                return Err(AccountingError::Validation(format!(
                    "wallet {wallet_id} has insufficient spendable balance: need {need}, have {spendable}"
                )));
            }
        }

        // 6. Participant policy hook.
        for wallet in wallets.values() {
            if !self.policy.participant_ok(wallet, &proposal.business_name) {
                return Err(AccountingError::Validation(format!(
                    "participant wallet {} rejected by policy",
                    wallet.uid
                )));
            }
        }

        Ok(wallets)
    }

    async fn commit(
        &self,
        proposal: &Proposal,
        resolved_wallets: &HashMap<Uuid, Wallet>,
    ) -> Result<Vec<Transaction>, AccountingError> {
        let mut unit = self.ledger.begin().await?;

        // Deterministic ascending lock order on every distinct source
        // wallet, to serialize against a concurrent proposal touching the
        // same wallet and to avoid deadlocks.
        let mut source_ids: Vec<Uuid> = proposal.sources().map(|p| p.wallet_id).collect();
        source_ids.sort();
        source_ids.dedup();
        for wallet_id in &source_ids {
            unit.lock_wallet(*wallet_id).await?;
        }

        // Re-check solvency under lock; the pre-lock check in `validate`
        // only protects against proposals submitted before this one
        // started, not ones racing it to the lock.
        let required = required_per_source(proposal);
        for (wallet_id, need) in &required {
            let wallet = &resolved_wallets[wallet_id];
            if wallet.wallet_type.is_app_income() {
                continue;
            }
            let balance = unit.latest_balance(*wallet_id, &proposal.currency).await?;
            let held = self
                .holds
                .active_sum(*wallet_id, &proposal.currency, Utc::now())
                .await?;
            let spendable = balance - held;
            if spendable < *need {
                unit.rollback().await?;
                return Err(AccountingError::Validation(format!(
                    "wallet {wallet_id} lost the solvency race: need {need}, have {spendable}"
                )));
            }
        }

        let mut cur: HashMap<Uuid, Decimal> = HashMap::new();
        let mut committed = Vec::with_capacity(proposal.participants.len());
        for p in &proposal.participants {
            let wallet = &resolved_wallets[&p.wallet_id];
            let b0 = match cur.get(&p.wallet_id) {
                Some(v) => *v,
                None => unit.latest_balance(p.wallet_id, &proposal.currency).await?,
            };
            let balance = b0 + p.amount;

            let transaction = Transaction::new(
                proposal.business_name.clone(),
                wallet.user_id,
                proposal.uid,
                p.wallet_id,
                p.amount,
                proposal.currency.clone(),
                balance,
                proposal.description.clone(),
                wallet.meta_data.clone(),
            );
            committed.push(transaction.clone());
            unit.append(transaction).await?;
            cur.insert(p.wallet_id, balance);
        }

        if let Some(note) = &proposal.note {
            for transaction in &committed {
                let transaction_note = TransactionNote::new(
                    proposal.business_name.clone(),
                    proposal.user_id,
                    transaction.uid,
                    note.clone(),
                );
                unit.append_note(transaction_note).await?;
            }
        }

        unit.commit().await?;
        Ok(committed)
    }
}

/// Aggregate debit required per source wallet (a wallet may appear as a
/// source more than once in the same proposal).
fn required_per_source(proposal: &Proposal) -> HashMap<Uuid, Decimal> {
    let mut required = HashMap::new();
    for p in proposal.sources() {
        *required.entry(p.wallet_id).or_insert(Decimal::ZERO) += -p.amount;
    }
    required
}
