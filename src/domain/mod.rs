//! Domain model: the entities the kernel persists and reasons about,
//! independent of any storage engine.

pub mod balance;
pub mod hold;
pub mod note;
pub mod proposal;
pub mod transaction;
pub mod wallet;

pub use balance::Balance;
pub use hold::{HoldStatus, WalletHold};
pub use note::TransactionNote;
pub use proposal::{Issuer, Participant, Proposal, TaskStatus};
pub use transaction::Transaction;
pub use wallet::{Wallet, WalletType};

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// The currency sentinel meaning "this wallet has no fixed main currency".
pub const NO_CURRENCY: &str = "none";

/// Shared envelope fields every persisted entity carries. Concrete entities
/// embed these fields directly rather than composing this type by value,
/// but it documents the common shape and backs `now()`, used by every
/// mutating store op to stamp `updated_at`.
pub trait Entity {
    fn uid(&self) -> Uuid;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;
    fn is_deleted(&self) -> bool;
    fn meta_data(&self) -> &HashMap<String, Value>;
}

/// Marks the updated_at timestamp. Called by every mutating store op.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
