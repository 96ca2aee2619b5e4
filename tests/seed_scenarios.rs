//! End-to-end tests over the in-memory fakes, covering the seed scenarios.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use accounting_kernel::auth::BusinessDirectory;
use accounting_kernel::domain::hold::HoldPatch;
use accounting_kernel::domain::proposal::{Issuer, Participant};
use accounting_kernel::domain::{HoldStatus, Proposal, TaskStatus, Wallet, WalletHold, WalletType};
use accounting_kernel::error::StorageError;
use accounting_kernel::holds::memory::InMemoryHoldStore;
use accounting_kernel::holds::HoldStore;
use accounting_kernel::ledger::memory::InMemoryLedgerStore;
use accounting_kernel::ledger::LedgerStore;
use accounting_kernel::proposal::memory::InMemoryProposalStore;
use accounting_kernel::proposal::processor::ProposalProcessor;
use accounting_kernel::proposal::ProposalStore;
use accounting_kernel::wallet::memory::InMemoryWalletStore;
use accounting_kernel::wallet::WalletStore;
use accounting_kernel::wallet_view::WalletView;

struct AlwaysExists;

#[async_trait]
impl BusinessDirectory for AlwaysExists {
    async fn exists(&self, _business_name: &str) -> Result<bool, StorageError> {
        Ok(true)
    }

    async fn default_currency(&self, _business_name: &str) -> Result<String, StorageError> {
        Ok("USD".to_string())
    }
}

struct Harness {
    wallets: Arc<InMemoryWalletStore>,
    ledger: Arc<InMemoryLedgerStore>,
    holds: Arc<InMemoryHoldStore>,
    proposals: Arc<InMemoryProposalStore>,
    processor: ProposalProcessor,
}

impl Harness {
    fn new() -> Self {
        let wallets = Arc::new(InMemoryWalletStore::new());
        let ledger = Arc::new(InMemoryLedgerStore::new());
        let holds = Arc::new(InMemoryHoldStore::new());
        let proposals = Arc::new(InMemoryProposalStore::new());
        let processor = ProposalProcessor::new(
            proposals.clone(),
            wallets.clone(),
            ledger.clone(),
            holds.clone(),
            Arc::new(AlwaysExists),
        );
        Self {
            wallets,
            ledger,
            holds,
            proposals,
            processor,
        }
    }

    async fn wallet(&self, wallet_type: WalletType, currency: &str) -> Wallet {
        let w = Wallet::new("biz", Uuid::new_v4(), wallet_type, currency, HashMap::new()).unwrap();
        self.wallets.create(w).await.unwrap()
    }

    fn view(&self) -> WalletView {
        WalletView::new(self.ledger.clone(), self.holds.clone())
    }

    async fn submit(
        &self,
        amount: Decimal,
        currency: &str,
        participants: Vec<Participant>,
        note: Option<String>,
    ) -> Proposal {
        let draft = Proposal::new_draft(
            "biz",
            Uuid::new_v4(),
            Issuer::Business,
            Uuid::new_v4(),
            amount,
            currency,
            None,
            note,
            participants,
            TaskStatus::Init,
            HashMap::new(),
        );
        self.proposals.create(draft).await.unwrap()
    }
}

#[tokio::test]
async fn s1_insolvent_source_fails_and_leaves_no_rows() {
    let h = Harness::new();
    let w1 = h.wallet(WalletType::User, "USD").await;
    let w2 = h.wallet(WalletType::User, "USD").await;

    let proposal = h
        .submit(
            dec!(100),
            "USD",
            vec![
                Participant { wallet_id: w1.uid, amount: dec!(100) },
                Participant { wallet_id: w2.uid, amount: dec!(-100) },
            ],
            None,
        )
        .await;

    let result = h.processor.start_processing(proposal.uid).await.unwrap();
    assert_eq!(result.task_status, TaskStatus::Error);
    assert!(result.error_message.unwrap().contains("insufficient"));

    let rows = h.ledger.by_proposal(proposal.uid).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn s2_app_income_source_is_unbounded_and_never_checked() {
    let h = Harness::new();
    let w1 = h.wallet(WalletType::User, "USD").await;
    let w_inc = h.wallet(WalletType::AppIncome, "USD").await;

    let proposal = h
        .submit(
            dec!(100),
            "USD",
            vec![
                Participant { wallet_id: w1.uid, amount: dec!(100) },
                Participant { wallet_id: w_inc.uid, amount: dec!(-100) },
            ],
            None,
        )
        .await;

    let result = h.processor.start_processing(proposal.uid).await.unwrap();
    assert_eq!(result.task_status, TaskStatus::Completed);

    let view = h.view();
    let balance = view.balance(&w1, Some("USD")).await.unwrap();
    assert_eq!(balance["USD"], accounting_kernel::domain::Balance::Finite(dec!(100)));

    let income_balance = view.balance(&w_inc, Some("USD")).await.unwrap();
    assert!(income_balance["USD"].is_unbounded());
}

#[tokio::test]
async fn s3_unbalanced_participants_are_rejected() {
    let h = Harness::new();
    let w1 = h.wallet(WalletType::User, "USD").await;
    let w2 = h.wallet(WalletType::AppIncome, "USD").await;

    let proposal = h
        .submit(
            dec!(100),
            "USD",
            vec![
                Participant { wallet_id: w1.uid, amount: dec!(100) },
                Participant { wallet_id: w2.uid, amount: dec!(-1000) },
            ],
            None,
        )
        .await;

    let result = h.processor.start_processing(proposal.uid).await.unwrap();
    assert_eq!(result.task_status, TaskStatus::Error);
    assert!(h.ledger.by_proposal(proposal.uid).await.unwrap().is_empty());
}

#[tokio::test]
async fn s4_declared_total_matches_positive_sum() {
    let h = Harness::new();
    let w1 = h.wallet(WalletType::User, "USD").await;
    let w2 = h.wallet(WalletType::User, "USD").await;
    let w3 = h.wallet(WalletType::AppIncome, "USD").await;

    let proposal = h
        .submit(
            dec!(100),
            "USD",
            vec![
                Participant { wallet_id: w1.uid, amount: dec!(50) },
                Participant { wallet_id: w2.uid, amount: dec!(50) },
                Participant { wallet_id: w3.uid, amount: dec!(-100) },
            ],
            None,
        )
        .await;

    let result = h.processor.start_processing(proposal.uid).await.unwrap();
    assert_eq!(result.task_status, TaskStatus::Completed);
    assert_eq!(h.ledger.by_proposal(proposal.uid).await.unwrap().len(), 3);
}

#[tokio::test]
async fn s5_hold_blocks_transfer_until_it_expires() {
    let h = Harness::new();
    let w1 = h.wallet(WalletType::User, "USD").await;
    let w2 = h.wallet(WalletType::User, "USD").await;
    let w_inc = h.wallet(WalletType::AppIncome, "USD").await;

    let fund = h
        .submit(
            dec!(100),
            "USD",
            vec![
                Participant { wallet_id: w1.uid, amount: dec!(100) },
                Participant { wallet_id: w_inc.uid, amount: dec!(-100) },
            ],
            None,
        )
        .await;
    assert_eq!(
        h.processor.start_processing(fund.uid).await.unwrap().task_status,
        TaskStatus::Completed
    );

    let hold = WalletHold {
        uid: Uuid::new_v4(),
        business_name: "biz".to_string(),
        user_id: w1.user_id,
        wallet_id: w1.uid,
        amount: dec!(80),
        currency: "USD".to_string(),
        expires_at: Utc::now() + Duration::hours(1),
        status: HoldStatus::Active,
        description: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        is_deleted: false,
        meta_data: HashMap::new(),
    };
    let hold = h.holds.create(hold).await.unwrap();

    let blocked = h
        .submit(
            dec!(50),
            "USD",
            vec![
                Participant { wallet_id: w1.uid, amount: dec!(-50) },
                Participant { wallet_id: w2.uid, amount: dec!(50) },
            ],
            None,
        )
        .await;
    let result = h.processor.start_processing(blocked.uid).await.unwrap();
    assert_eq!(result.task_status, TaskStatus::Error);

    h.holds
        .update(
            hold.uid,
            HoldPatch {
                status: Some(HoldStatus::Inactive),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let retry = h
        .submit(
            dec!(50),
            "USD",
            vec![
                Participant { wallet_id: w1.uid, amount: dec!(-50) },
                Participant { wallet_id: w2.uid, amount: dec!(50) },
            ],
            None,
        )
        .await;
    let result = h.processor.start_processing(retry.uid).await.unwrap();
    assert_eq!(result.task_status, TaskStatus::Completed);
}

#[tokio::test]
async fn s6_concurrent_start_commits_exactly_once() {
    let h = Harness::new();
    let w1 = h.wallet(WalletType::User, "USD").await;
    let w_inc = h.wallet(WalletType::AppIncome, "USD").await;

    let proposal = h
        .submit(
            dec!(100),
            "USD",
            vec![
                Participant { wallet_id: w1.uid, amount: dec!(100) },
                Participant { wallet_id: w_inc.uid, amount: dec!(-100) },
            ],
            None,
        )
        .await;

    let (a, b) = tokio::join!(
        h.processor.start_processing(proposal.uid),
        h.processor.start_processing(proposal.uid)
    );
    let outcomes = [a, b];
    let completed_count = outcomes
        .iter()
        .filter(|r| matches!(r, Ok(p) if p.task_status == TaskStatus::Completed))
        .count();
    let already_processed_count = outcomes.iter().filter(|r| r.is_err()).count();
    assert_eq!(completed_count, 1);
    assert_eq!(already_processed_count, 1);

    let rows = h.ledger.by_proposal(proposal.uid).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn zero_amount_participant_produces_a_zero_row_with_unchanged_balance() {
    let h = Harness::new();
    let w1 = h.wallet(WalletType::User, "USD").await;
    let w2 = h.wallet(WalletType::AppIncome, "USD").await;
    let w3 = h.wallet(WalletType::User, "USD").await;

    let proposal = h
        .submit(
            dec!(50),
            "USD",
            vec![
                Participant { wallet_id: w1.uid, amount: dec!(50) },
                Participant { wallet_id: w3.uid, amount: dec!(0) },
                Participant { wallet_id: w2.uid, amount: dec!(-50) },
            ],
            None,
        )
        .await;

    let result = h.processor.start_processing(proposal.uid).await.unwrap();
    assert_eq!(result.task_status, TaskStatus::Completed);

    let view = h.view();
    let balance = view.balance(&w3, Some("USD")).await.unwrap();
    assert_eq!(balance["USD"], accounting_kernel::domain::Balance::Finite(dec!(0)));
}
