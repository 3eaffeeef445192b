//! Service-level transaction result
//!
//! Wraps the transaction with a success/failure outcome. The coordinator
//! depends on this contract to decide persist-vs-rollback, and needs the
//! transaction back either way because the account state lives inside it.

/// Result of applying a money movement service to a transaction
#[derive(Debug)]
pub struct TransactionResult<T> {
    transaction: T,
    error: Option<String>,
}

impl<T> TransactionResult<T> {
    /// Successful execution: the transaction's accounts have been mutated
    pub fn success(transaction: T) -> Self {
        Self {
            transaction,
            error: None,
        }
    }

    /// Business-rule rejection: accounts are untouched
    pub fn failure(transaction: T, error: impl Into<String>) -> Self {
        Self {
            transaction,
            error: Some(error.into()),
        }
    }

    #[inline]
    pub fn is_successful(&self) -> bool {
        self.error.is_none()
    }

    /// Failure message, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn transaction(&self) -> &T {
        &self.transaction
    }

    /// Take the transaction back (accounts and events included)
    pub fn into_transaction(self) -> T {
        self.transaction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success() {
        let result = TransactionResult::success(42u32);
        assert!(result.is_successful());
        assert!(result.error().is_none());
        assert_eq!(result.into_transaction(), 42);
    }

    #[test]
    fn test_failure_keeps_transaction() {
        let result = TransactionResult::failure(7u32, "nope");
        assert!(!result.is_successful());
        assert_eq!(result.error(), Some("nope"));
        assert_eq!(result.into_transaction(), 7);
    }
}
