//! Transaction construction
//!
//! The factory is the only place transaction variants are built: it stamps
//! the generated id and the capture time so callers cannot forge either.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::account::Account;
use crate::core_types::TransactionId;
use crate::transaction::model::{TransferTransaction, WithdrawalTransaction};

/// Builds transaction variants from raw inputs and the current time
pub struct TransactionFactory;

impl TransactionFactory {
    /// Build a withdrawal transaction over the given account
    pub fn withdrawal(amount: Decimal, source: Account) -> WithdrawalTransaction {
        WithdrawalTransaction::new(TransactionId::new(), amount, Utc::now(), source)
    }

    /// Build a transfer transaction over the given account pair
    pub fn transfer(
        amount: Decimal,
        source: Account,
        destination: Account,
    ) -> TransferTransaction {
        TransferTransaction::new(TransactionId::new(), amount, Utc::now(), source, destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountHolder;
    use crate::core_types::{AccountId, HolderId};

    fn account(balance: i64) -> Account {
        Account::open(
            AccountId::new(),
            AccountHolder::new(HolderId::new(), "Test", "test@example.com"),
            Decimal::from(balance),
        )
    }

    #[test]
    fn test_withdrawal_construction() {
        let source = account(1000);
        let source_id = source.id();
        let tx = TransactionFactory::withdrawal(Decimal::from(100), source);

        assert_eq!(tx.amount(), Decimal::from(100));
        assert_eq!(tx.source().id(), source_id);
        assert!(tx.events().is_empty());
    }

    #[test]
    fn test_transfer_construction() {
        let tx = TransactionFactory::transfer(Decimal::from(100), account(1000), account(0));
        assert_eq!(tx.amount(), Decimal::from(100));
        assert_ne!(tx.source().id(), tx.destination().id());
    }

    #[test]
    fn test_ids_are_unique_per_transaction() {
        let a = TransactionFactory::withdrawal(Decimal::ONE, account(10));
        let b = TransactionFactory::withdrawal(Decimal::ONE, account(10));
        assert_ne!(a.id(), b.id());
    }
}
