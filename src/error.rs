use thiserror::Error;

use crate::store::StoreError;

/// Typed failures surfaced by repositories and the integrity checker. The
/// client is responsible for turning these into user-visible notifications;
/// the data layer never performs UI side effects.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("credit limit exceeded: {sks} sks > max {max}")]
    CreditLimitExceeded { sks: u32, max: u32 },
    #[error("storage full: {0}")]
    StorageFull(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl DataError {
    /// Stable wire code for the IPC error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            DataError::DuplicateKey(_) => "duplicate_key",
            DataError::NotFound(_) => "not_found",
            DataError::CreditLimitExceeded { .. } => "credit_limit_exceeded",
            DataError::StorageFull(_) => "storage_full",
            DataError::StorageUnavailable(_) => "storage_unavailable",
        }
    }
}

impl From<StoreError> for DataError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Full(msg) => DataError::StorageFull(msg),
            StoreError::Unavailable(msg) => DataError::StorageUnavailable(msg),
        }
    }
}
