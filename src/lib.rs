//! moneyflow - Validated money movement engine
//!
//! Models validated movement of money between accounts: withdrawals (one
//! account) and transfers (two accounts), enforcing balance and
//! pay-in-limit invariants, raising domain events when thresholds are
//! crossed, and coordinating atomic persistence with post-commit
//! notification dispatch (outbox pattern).
//!
//! # Modules
//!
//! - [`core_types`] - Identity newtypes (AccountId, TransactionId, ...)
//! - [`account`] - Enforced account entity and business thresholds
//! - [`transaction`] - Transaction variants, validation, domain events
//! - [`service`] - Money movement services (validate + mutate)
//! - [`coordinator`] - Use-case entry points (boundary + outbox dispatch)
//! - [`adapters`] - Collaborator seams and in-memory reference adapters
//! - [`config`] - Engine configuration
//! - [`logging`] - tracing subscriber setup

// Core types - must be first!
pub mod core_types;

// Domain model
pub mod account;
pub mod transaction;

// Application layers
pub mod adapters;
pub mod coordinator;
pub mod service;

// Ambient
pub mod config;
pub mod logging;

// Convenient re-exports at crate root
pub use account::{
    Account, AccountHolder, LOW_FUNDS_THRESHOLD, PAY_IN_LIMIT, PAY_IN_WARNING_THRESHOLD,
};
pub use adapters::{
    AccountStore, IdempotencyStore, Notifier, NotifyError, StoreError, TransactionBoundary,
};
pub use config::{DispatchPolicy, EngineConfig};
pub use coordinator::{TransferMoney, UseCaseError, UseCaseResult, WithdrawMoney};
pub use core_types::{AccountId, HolderId, IdempotencyKey, TransactionId};
pub use service::{TransferService, WithdrawalService};
pub use transaction::{
    DomainEvent, TransactionFactory, TransactionResult, TransferTransaction, ValidationResult,
    WithdrawalTransaction,
};
