//! Withdraw money use case

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, error, info};

use crate::adapters::{AccountStore, IdempotencyStore, Notifier, TransactionBoundary};
use crate::config::DispatchPolicy;
use crate::core_types::{AccountId, IdempotencyKey};
use crate::service::WithdrawalService;
use crate::transaction::TransactionFactory;

use super::{UseCaseError, UseCaseResult, dispatch_events, rollback_quietly};

/// Coordinates a single-account withdrawal as an all-or-nothing unit
pub struct WithdrawMoney {
    service: WithdrawalService,
    accounts: Arc<dyn AccountStore>,
    boundary: Arc<dyn TransactionBoundary>,
    notifier: Arc<dyn Notifier>,
    keys: Arc<dyn IdempotencyStore>,
    dispatch_policy: DispatchPolicy,
}

impl WithdrawMoney {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        boundary: Arc<dyn TransactionBoundary>,
        notifier: Arc<dyn Notifier>,
        keys: Arc<dyn IdempotencyStore>,
        dispatch_policy: DispatchPolicy,
    ) -> Self {
        Self {
            service: WithdrawalService::new(),
            accounts,
            boundary,
            notifier,
            keys,
            dispatch_policy,
        }
    }

    /// Execute a withdrawal of `amount` from `from_account_id`
    ///
    /// # Errors
    ///
    /// - [`UseCaseError::InvalidAmount`] for a non-positive amount
    /// - [`UseCaseError::DuplicateRequest`] for a replayed idempotency key
    /// - [`UseCaseError::AccountNotFound`] when the account cannot be loaded
    /// - [`UseCaseError::Storage`] when persistence or the boundary fails;
    ///   the boundary is rolled back first
    ///
    /// Business-rule rejections are `Ok(UseCaseResult::Rejected)`.
    pub async fn execute(
        &self,
        key: IdempotencyKey,
        from_account_id: AccountId,
        amount: Decimal,
    ) -> Result<UseCaseResult, UseCaseError> {
        if amount <= Decimal::ZERO {
            return Err(UseCaseError::InvalidAmount);
        }

        if !self.keys.record(key).await? {
            debug!(key = %key, "Duplicate withdrawal request");
            return Err(UseCaseError::DuplicateRequest);
        }

        let source = self
            .accounts
            .get(from_account_id)
            .await?
            .ok_or(UseCaseError::AccountNotFound(from_account_id))?;

        let transaction = TransactionFactory::withdrawal(amount, source);
        let transaction_id = transaction.id();
        debug!(
            transaction_id = %transaction_id,
            account_id = %from_account_id,
            "Withdrawal transaction created"
        );

        self.boundary.begin().await?;

        let result = self.service.execute(transaction);
        if let Some(reason) = result.error() {
            let reason = reason.to_string();
            rollback_quietly(self.boundary.as_ref(), transaction_id).await;
            return Ok(UseCaseResult::Rejected { reason });
        }

        let mut transaction = result.into_transaction();

        if let Err(e) = self.accounts.save(transaction.source()).await {
            error!(
                transaction_id = %transaction_id,
                error = %e,
                "Failed to persist account, rolling back"
            );
            rollback_quietly(self.boundary.as_ref(), transaction_id).await;
            return Err(e.into());
        }

        if let Err(e) = self.boundary.commit().await {
            error!(
                transaction_id = %transaction_id,
                error = %e,
                "Commit failed, rolling back"
            );
            rollback_quietly(self.boundary.as_ref(), transaction_id).await;
            return Err(e.into());
        }

        info!(
            transaction_id = %transaction_id,
            account_id = %from_account_id,
            "Withdrawal committed"
        );

        // Outbox: only a committed transaction gets its events delivered
        dispatch_events(
            self.notifier.as_ref(),
            self.dispatch_policy,
            transaction_id,
            transaction.take_events(),
        )
        .await;

        Ok(UseCaseResult::Committed { transaction_id })
    }
}
