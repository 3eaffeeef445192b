//! Collaborator seams
//!
//! The engine treats persistence, the transactional boundary, notification
//! delivery and idempotency tracking as injected capabilities. Each seam is
//! an object-safe async trait held as `Arc<dyn ...>` by the coordinators.
//!
//! [`memory`] ships in-memory reference implementations that also record
//! their calls, used by the integration tests.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::account::Account;
use crate::core_types::{AccountId, IdempotencyKey};

pub use memory::{
    InMemoryAccountStore, InMemoryIdempotencyStore, RecordingNotifier, StubBoundary,
};

/// Storage-side failure (lookup, save, boundary control)
#[derive(Debug, Error, Clone)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Notification delivery failure
#[derive(Debug, Error, Clone)]
pub enum NotifyError {
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

/// Account lookup and persistence
///
/// `save` is called once per mutated account, only after a successful
/// commit of the transactional boundary is underway.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Load an account by id; `None` means not found
    async fn get(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// Persist an account's current state
    async fn save(&self, account: &Account) -> Result<(), StoreError>;
}

/// Scoped transactional boundary with begin/commit/rollback semantics
///
/// Commit and rollback are mutually exclusive terminal calls per begin.
/// Every coordinator execution that begins a boundary reaches exactly one
/// of the two on every exit path.
#[async_trait]
pub trait TransactionBoundary: Send + Sync {
    async fn begin(&self) -> Result<(), StoreError>;
    async fn commit(&self) -> Result<(), StoreError>;
    async fn rollback(&self) -> Result<(), StoreError>;
}

/// Notification dispatch, fire-and-forget from the engine's perspective
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_funds_low(&self, email: &str) -> Result<(), NotifyError>;
    async fn notify_approaching_pay_in_limit(&self, email: &str) -> Result<(), NotifyError>;
}

/// Idempotency-key tracking
///
/// A key is accepted exactly once per engine lifetime; replays are
/// rejected before any account state is touched.
#[async_trait]
pub trait IdempotencyStore: Send + Sync {
    /// Record the key. Returns `false` if it was already seen.
    async fn record(&self, key: IdempotencyKey) -> Result<bool, StoreError>;
}
