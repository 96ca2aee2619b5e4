//! Crate-wide error types.

use thiserror::Error;

/// Error kinds a storage implementation (ledger, hold, note or proposal
/// store) can fail with.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(#[from] sqlx::Error),

    #[error("attempted to mutate an immutable row: {0}")]
    Immutable(String),

    #[error("operation requires an open atomic unit")]
    NoAtomicUnit,
}

/// The single error type returned by every public kernel operation.
///
/// Carries enough shape to build the `{ status_code, error, message }`
/// envelope at the HTTP boundary (out of scope here) without this crate
/// depending on an HTTP framework.
#[derive(Debug, Error)]
pub enum AccountingError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("operation not permitted for this issuer: {0}")]
    Authorization(String),

    #[error("proposal already processed")]
    AlreadyProcessed,

    #[error("ledger row is immutable")]
    Immutable,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AccountingError {
    /// kebab-case identifier used by the error envelope's `error` field.
    pub fn error_code(&self) -> &'static str {
        match self {
            AccountingError::Validation(_) => "validation_error",
            AccountingError::NotFound(_) => "item_not_found",
            AccountingError::Authorization(_) => "authorization_error",
            AccountingError::AlreadyProcessed => "invalid_status",
            AccountingError::Immutable => "invalid_status",
            AccountingError::Storage(_) => "unexpected",
        }
    }

    /// HTTP-ish status code the error envelope would carry.
    pub fn status_code(&self) -> u16 {
        match self {
            AccountingError::Validation(_) => 400,
            AccountingError::NotFound(_) => 404,
            AccountingError::Authorization(_) => 401,
            AccountingError::AlreadyProcessed => 400,
            AccountingError::Immutable => 400,
            AccountingError::Storage(_) => 500,
        }
    }
}

impl From<sqlx::Error> for AccountingError {
    fn from(e: sqlx::Error) -> Self {
        AccountingError::Storage(StorageError::Backend(e))
    }
}
