//! Transfer service
//!
//! Validate-then-mutate for two-account transfers. On success the source is
//! debited and the destination credited; on failure neither account moves.

use tracing::debug;

use crate::transaction::{TransactionResult, TransferTransaction};

/// Applies transfer transactions to a pair of accounts
#[derive(Debug, Clone, Copy, Default)]
pub struct TransferService;

impl TransferService {
    pub const fn new() -> Self {
        Self
    }

    /// Validate the transaction, then move funds between the two accounts
    pub fn execute(
        &self,
        mut transaction: TransferTransaction,
    ) -> TransactionResult<TransferTransaction> {
        let validation = transaction.validate();
        if let Some(message) = validation.message() {
            debug!(
                transaction_id = %transaction.id(),
                reason = message,
                "Transfer rejected"
            );
            return TransactionResult::failure(transaction, message);
        }

        let amount = transaction.amount();
        let (source, destination) = transaction.accounts_mut();

        // Both legs apply or neither: stage on copies, then write back
        let mut debited = source.clone();
        let mut credited = destination.clone();
        if let Err(e) = debited
            .apply_withdrawal(amount)
            .and_then(|_| credited.apply_deposit(amount))
        {
            return TransactionResult::failure(transaction, e);
        }
        *source = debited;
        *destination = credited;

        debug!(
            transaction_id = %transaction.id(),
            source = %transaction.source().id(),
            destination = %transaction.destination().id(),
            "Transfer applied"
        );
        TransactionResult::success(transaction)
    }
}
