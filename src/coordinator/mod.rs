//! Use-case coordinators
//!
//! The coordinators are the entry point of the engine. Each execution:
//! structural checks -> load accounts -> build transaction -> open the
//! transactional boundary -> run the matching service -> persist or roll
//! back -> commit -> dispatch the accumulated domain events (outbox:
//! notifications never fire unless the commit happened).
//!
//! # Failure semantics
//!
//! - Invalid input, unknown accounts, replayed idempotency keys and
//!   storage faults are `Err(`[`UseCaseError`]`)`.
//! - Business-rule rejections roll back the boundary and come back as
//!   `Ok(`[`UseCaseResult::Rejected`]`)`.
//! - Event dispatch failures never undo the committed mutation and never
//!   fail the use case; handling is governed by
//!   [`crate::config::DispatchPolicy`].

pub mod error;
pub mod transfer;
pub mod withdraw;

pub use error::UseCaseError;
pub use transfer::TransferMoney;
pub use withdraw::WithdrawMoney;

use std::time::Duration;

use tracing::{error, info, warn};

use crate::adapters::{Notifier, TransactionBoundary};
use crate::config::DispatchPolicy;
use crate::core_types::TransactionId;
use crate::transaction::DomainEvent;

/// Outcome of a use-case execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UseCaseResult {
    /// The boundary committed and the mutated accounts were persisted
    Committed { transaction_id: TransactionId },
    /// A business rule rejected the transaction; the boundary was rolled
    /// back and no account was persisted
    Rejected { reason: String },
}

impl UseCaseResult {
    #[inline]
    pub fn is_committed(&self) -> bool {
        matches!(self, UseCaseResult::Committed { .. })
    }

    /// Rejection reason, if rejected
    pub fn rejection(&self) -> Option<&str> {
        match self {
            UseCaseResult::Committed { .. } => None,
            UseCaseResult::Rejected { reason } => Some(reason),
        }
    }
}

/// Delay between delivery retries under [`DispatchPolicy::Retry`]
const RETRY_DELAY: Duration = Duration::from_millis(50);

/// Roll back an open boundary without masking the failure that got us here
pub(crate) async fn rollback_quietly(
    boundary: &dyn TransactionBoundary,
    transaction_id: TransactionId,
) {
    if let Err(e) = boundary.rollback().await {
        error!(
            transaction_id = %transaction_id,
            error = %e,
            "Rollback failed"
        );
    }
}

/// Drain accumulated events to the notifier, in insertion order
///
/// Called only after a successful commit. Delivery is best-effort: a
/// failed delivery is retried per policy, then logged and skipped.
pub(crate) async fn dispatch_events(
    notifier: &dyn Notifier,
    policy: DispatchPolicy,
    transaction_id: TransactionId,
    events: Vec<DomainEvent>,
) {
    for event in events {
        let attempts = policy.max_attempts();
        for attempt in 1..=attempts {
            let delivery = match &event {
                DomainEvent::FundsLow { email, .. } => notifier.notify_funds_low(email).await,
                DomainEvent::ApproachingPayInLimit { email, .. } => {
                    notifier.notify_approaching_pay_in_limit(email).await
                }
            };

            match delivery {
                Ok(()) => {
                    info!(
                        transaction_id = %transaction_id,
                        event = event.kind(),
                        account_id = %event.account_id(),
                        "Notification dispatched"
                    );
                    break;
                }
                Err(e) if attempt < attempts => {
                    warn!(
                        transaction_id = %transaction_id,
                        event = event.kind(),
                        attempt = attempt,
                        error = %e,
                        "Notification delivery failed (will retry)"
                    );
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(e) => {
                    // Mutation is already committed; the event is dropped
                    warn!(
                        transaction_id = %transaction_id,
                        event = event.kind(),
                        attempts = attempts,
                        error = %e,
                        "Notification delivery failed, giving up"
                    );
                }
            }
        }
    }
}
