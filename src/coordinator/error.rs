//! Use-case error types
//!
//! Errors cover structural and system failures only. Business-rule
//! rejections (insufficient funds, pay-in limit reached) are not errors:
//! they come back as [`super::UseCaseResult::Rejected`].

use thiserror::Error;

use crate::adapters::StoreError;
use crate::core_types::AccountId;

/// Structural or system failure of a use-case execution
#[derive(Debug, Error, Clone)]
pub enum UseCaseError {
    // === Invalid input (rejected before any state is touched) ===
    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("Source and destination accounts must be different")]
    SameAccount,

    // === Idempotency ===
    #[error("Duplicate request (idempotency key already seen)")]
    DuplicateRequest,

    // === Not found (no boundary opened) ===
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    // === System ===
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl UseCaseError {
    /// Stable error code for API-facing callers
    pub fn code(&self) -> &'static str {
        match self {
            UseCaseError::InvalidAmount => "INVALID_AMOUNT",
            UseCaseError::SameAccount => "SAME_ACCOUNT",
            UseCaseError::DuplicateRequest => "DUPLICATE_REQUEST",
            UseCaseError::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            UseCaseError::Storage(_) => "STORAGE_ERROR",
        }
    }
}
