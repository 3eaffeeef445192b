//! Withdrawal service
//!
//! Validate-then-mutate for single-account withdrawals. Validation failures
//! leave the account untouched and raise no events.

use tracing::debug;

use crate::transaction::{TransactionResult, WithdrawalTransaction};

/// Applies withdrawal transactions to account state
#[derive(Debug, Clone, Copy, Default)]
pub struct WithdrawalService;

impl WithdrawalService {
    pub const fn new() -> Self {
        Self
    }

    /// Validate the transaction, then debit the source account
    pub fn execute(
        &self,
        mut transaction: WithdrawalTransaction,
    ) -> TransactionResult<WithdrawalTransaction> {
        let validation = transaction.validate();
        if let Some(message) = validation.message() {
            debug!(
                transaction_id = %transaction.id(),
                reason = message,
                "Withdrawal rejected"
            );
            return TransactionResult::failure(transaction, message);
        }

        let amount = transaction.amount();
        if let Err(e) = transaction.source_mut().apply_withdrawal(amount) {
            // Validation guarantees cover; this only trips on arithmetic limits
            return TransactionResult::failure(transaction, e);
        }

        debug!(
            transaction_id = %transaction.id(),
            account_id = %transaction.source().id(),
            "Withdrawal applied"
        );
        TransactionResult::success(transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{Account, AccountHolder};
    use crate::core_types::{AccountId, HolderId};
    use crate::transaction::TransactionFactory;
    use crate::transaction::model::MSG_INSUFFICIENT_FUNDS_WITHDRAWAL;
    use rust_decimal::Decimal;

    fn account(balance: i64) -> Account {
        Account::open(
            AccountId::new(),
            AccountHolder::new(HolderId::new(), "Test", "test@example.com"),
            Decimal::from(balance),
        )
    }

    #[test]
    fn test_withdrawal_mutates_on_success() {
        let tx = TransactionFactory::withdrawal(Decimal::from(300), account(1000));
        let result = WithdrawalService::new().execute(tx);

        assert!(result.is_successful());
        let tx = result.into_transaction();
        assert_eq!(tx.source().balance(), Decimal::from(700));
        assert_eq!(tx.source().withdrawn(), Decimal::from(-300));
        assert!(tx.events().is_empty());
    }

    #[test]
    fn test_withdrawal_failure_leaves_account_untouched() {
        let tx = TransactionFactory::withdrawal(Decimal::from(200), account(100));
        let result = WithdrawalService::new().execute(tx);

        assert!(!result.is_successful());
        assert_eq!(result.error(), Some(MSG_INSUFFICIENT_FUNDS_WITHDRAWAL));
        let tx = result.into_transaction();
        assert_eq!(tx.source().balance(), Decimal::from(100));
        assert_eq!(tx.source().withdrawn(), Decimal::ZERO);
        assert!(tx.events().is_empty());
    }

    #[test]
    fn test_withdrawal_low_funds_event_rides_on_success() {
        // 1000 - 501 = 499 < 500
        let tx = TransactionFactory::withdrawal(Decimal::from(501), account(1000));
        let result = WithdrawalService::new().execute(tx);

        assert!(result.is_successful());
        let tx = result.into_transaction();
        assert_eq!(tx.source().balance(), Decimal::from(499));
        assert_eq!(tx.events().len(), 1);
    }
}
