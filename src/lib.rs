//! Multi-tenant accounting kernel: wallets, holds, and atomic proposal
//! settlement over an append-only ledger.

pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod holds;
pub mod kernel;
pub mod ledger;
pub mod notes;
pub mod paging;
pub mod proposal;
pub mod wallet;
pub mod wallet_view;

pub use auth::Authorization;
pub use domain::{Balance, Proposal, Transaction, TransactionNote, Wallet, WalletHold, WalletType};
pub use error::{AccountingError, StorageError};
pub use kernel::AccountingKernel;
pub use paging::{Page, Paging};
pub use proposal::processor::ProposalProcessor;
