//! Transfer money use case

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, error, info};

use crate::adapters::{AccountStore, IdempotencyStore, Notifier, TransactionBoundary};
use crate::config::DispatchPolicy;
use crate::core_types::{AccountId, IdempotencyKey};
use crate::service::TransferService;
use crate::transaction::TransactionFactory;

use super::{UseCaseError, UseCaseResult, dispatch_events, rollback_quietly};

/// Coordinates a two-account transfer as an all-or-nothing unit
pub struct TransferMoney {
    service: TransferService,
    accounts: Arc<dyn AccountStore>,
    boundary: Arc<dyn TransactionBoundary>,
    notifier: Arc<dyn Notifier>,
    keys: Arc<dyn IdempotencyStore>,
    dispatch_policy: DispatchPolicy,
}

impl TransferMoney {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        boundary: Arc<dyn TransactionBoundary>,
        notifier: Arc<dyn Notifier>,
        keys: Arc<dyn IdempotencyStore>,
        dispatch_policy: DispatchPolicy,
    ) -> Self {
        Self {
            service: TransferService::new(),
            accounts,
            boundary,
            notifier,
            keys,
            dispatch_policy,
        }
    }

    /// Execute a transfer of `amount` from `from_account_id` to
    /// `to_account_id`
    ///
    /// # Errors
    ///
    /// - [`UseCaseError::InvalidAmount`] for a non-positive amount
    /// - [`UseCaseError::SameAccount`] when source and destination match
    /// - [`UseCaseError::DuplicateRequest`] for a replayed idempotency key
    /// - [`UseCaseError::AccountNotFound`] when either account is missing
    /// - [`UseCaseError::Storage`] when persistence or the boundary fails;
    ///   the boundary is rolled back first
    ///
    /// Business-rule rejections are `Ok(UseCaseResult::Rejected)`.
    pub async fn execute(
        &self,
        key: IdempotencyKey,
        from_account_id: AccountId,
        to_account_id: AccountId,
        amount: Decimal,
    ) -> Result<UseCaseResult, UseCaseError> {
        if amount <= Decimal::ZERO {
            return Err(UseCaseError::InvalidAmount);
        }

        if from_account_id == to_account_id {
            return Err(UseCaseError::SameAccount);
        }

        if !self.keys.record(key).await? {
            debug!(key = %key, "Duplicate transfer request");
            return Err(UseCaseError::DuplicateRequest);
        }

        let source = self
            .accounts
            .get(from_account_id)
            .await?
            .ok_or(UseCaseError::AccountNotFound(from_account_id))?;
        let destination = self
            .accounts
            .get(to_account_id)
            .await?
            .ok_or(UseCaseError::AccountNotFound(to_account_id))?;

        let transaction = TransactionFactory::transfer(amount, source, destination);
        let transaction_id = transaction.id();
        debug!(
            transaction_id = %transaction_id,
            source = %from_account_id,
            destination = %to_account_id,
            "Transfer transaction created"
        );

        self.boundary.begin().await?;

        let result = self.service.execute(transaction);
        if let Some(reason) = result.error() {
            let reason = reason.to_string();
            rollback_quietly(self.boundary.as_ref(), transaction_id).await;
            return Ok(UseCaseResult::Rejected { reason });
        }

        let mut transaction = result.into_transaction();

        // Each mutated account is persisted individually, source first
        for account in [transaction.source(), transaction.destination()] {
            if let Err(e) = self.accounts.save(account).await {
                error!(
                    transaction_id = %transaction_id,
                    account_id = %account.id(),
                    error = %e,
                    "Failed to persist account, rolling back"
                );
                rollback_quietly(self.boundary.as_ref(), transaction_id).await;
                return Err(e.into());
            }
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
            source = %from_account_id,
            destination = %to_account_id,
            "Transfer committed"
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
