//! Transaction model
//!
//! A transaction is a validated, in-memory intent to move money:
//! - [`model::WithdrawalTransaction`] - one account
//! - [`model::TransferTransaction`] - source + destination accounts
//!
//! Transactions are built by the [`factory::TransactionFactory`], validated
//! by the money movement services, and carry their accumulated
//! [`events::DomainEvent`]s until the coordinator dispatches them after
//! commit.

pub mod events;
pub mod factory;
pub mod model;
pub mod result;

// Re-exports for convenience
pub use events::DomainEvent;
pub use factory::TransactionFactory;
pub use model::{TransferTransaction, ValidationResult, WithdrawalTransaction};
pub use result::TransactionResult;
