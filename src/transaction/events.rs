//! Domain events raised during transaction validation
//!
//! Events are facts about thresholds being crossed, accumulated on the
//! transaction and consumed only after the transactional boundary has
//! committed (outbox semantics). The enum is closed so event dispatch is
//! exhaustive and compiler-checked.

use serde::{Deserialize, Serialize};

use crate::core_types::AccountId;

/// A fact raised during validation, delivered after commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainEvent {
    /// Post-transaction balance dropped below the low-funds threshold
    FundsLow { account_id: AccountId, email: String },
    /// Remaining pay-in headroom dropped below the warning threshold
    ApproachingPayInLimit { account_id: AccountId, email: String },
}

impl DomainEvent {
    /// Human-readable event kind for logs
    pub fn kind(&self) -> &'static str {
        match self {
            DomainEvent::FundsLow { .. } => "FUNDS_LOW",
            DomainEvent::ApproachingPayInLimit { .. } => "APPROACHING_PAY_IN_LIMIT",
        }
    }

    /// The account that triggered the event
    pub fn account_id(&self) -> AccountId {
        match self {
            DomainEvent::FundsLow { account_id, .. }
            | DomainEvent::ApproachingPayInLimit { account_id, .. } => *account_id,
        }
    }

    /// The address to notify
    pub fn email(&self) -> &str {
        match self {
            DomainEvent::FundsLow { email, .. }
            | DomainEvent::ApproachingPayInLimit { email, .. } => email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind() {
        let id = AccountId::new();
        let low = DomainEvent::FundsLow {
            account_id: id,
            email: "a@b.c".into(),
        };
        let limit = DomainEvent::ApproachingPayInLimit {
            account_id: id,
            email: "a@b.c".into(),
        };

        assert_eq!(low.kind(), "FUNDS_LOW");
        assert_eq!(limit.kind(), "APPROACHING_PAY_IN_LIMIT");
        assert_eq!(low.account_id(), id);
        assert_eq!(limit.email(), "a@b.c");
    }
}
