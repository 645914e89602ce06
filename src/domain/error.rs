//! Error types for ledger operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Email already exists")]
    DuplicateEmail,

    #[error("No account found for this email")]
    NotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Sign in required")]
    Unauthenticated,

    /// Persistence failure. Not classified further.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl From<serde_json::Error> for LedgerError {
    fn from(e: serde_json::Error) -> Self {
        LedgerError::Storage(e.into())
    }
}

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;
