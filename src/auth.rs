//! Wire surface consumed by the core from authentication/authorization and
//! business-directory lookup — both treated as external collaborators the
//! core only calls into, never implements.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::proposal::Issuer;
use crate::error::StorageError;

/// Opaque authorization context handed to every public operation.
#[derive(Debug, Clone)]
pub struct Authorization {
    pub issuer_type: Issuer,
    pub user_id: Uuid,
    pub business_name: String,
    pub app_id: Option<Uuid>,
    pub scopes: Vec<String>,
}

impl Authorization {
    pub fn is_user(&self) -> bool {
        matches!(self.issuer_type, Issuer::User)
    }
}

/// Resolves whether a tenant exists. The core never creates or lists
/// businesses itself — that lookup lives outside this crate.
#[async_trait]
pub trait BusinessDirectory: Send + Sync {
    async fn exists(&self, business_name: &str) -> Result<bool, StorageError>;

    /// The business's configured default currency, used by
    /// `ensure_default_wallet_for_user`.
    async fn default_currency(&self, business_name: &str) -> Result<String, StorageError>;
}
