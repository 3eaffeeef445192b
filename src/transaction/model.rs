//! Transaction variants and their validation rules
//!
//! A transaction is a validated, in-memory intent to move money. It owns
//! the account state it operates on for the duration of one use-case call
//! (loaded by the coordinator, mutated by a service, handed back for
//! persistence), which makes the no-concurrent-mutation assumption
//! explicit in the types.
//!
//! Validation appends warning events to the transaction; mutation never
//! does. Events stay on the transaction until the coordinator drains them
//! after commit.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::account::{Account, LOW_FUNDS_THRESHOLD, PAY_IN_LIMIT, PAY_IN_WARNING_THRESHOLD};
use crate::core_types::TransactionId;
use crate::transaction::events::DomainEvent;

pub const MSG_WITHDRAWAL_AMOUNT_NOT_POSITIVE: &str =
    "Withdrawal amount must be greater than zero";
pub const MSG_INSUFFICIENT_FUNDS_WITHDRAWAL: &str = "Insufficient funds to make withdrawal";
pub const MSG_TRANSFER_AMOUNT_NOT_POSITIVE: &str = "Transfer amount must be greater than zero";
pub const MSG_SAME_ACCOUNT: &str = "Source and destination accounts cannot be the same";
pub const MSG_INSUFFICIENT_FUNDS_TRANSFER: &str = "Insufficient funds to make transfer";
pub const MSG_PAY_IN_LIMIT_REACHED: &str = "Account pay in limit reached";

/// Outcome of validating a transaction
///
/// Produced once per validation call and never retained beyond it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(&'static str),
}

impl ValidationResult {
    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Failure message, if invalid
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(msg) => Some(msg),
        }
    }
}

/// Intent to withdraw money from a single account
#[derive(Debug, Clone)]
pub struct WithdrawalTransaction {
    id: TransactionId,
    amount: Decimal,
    created_at: DateTime<Utc>,
    source: Account,
    events: Vec<DomainEvent>,
}

impl WithdrawalTransaction {
    pub(crate) fn new(
        id: TransactionId,
        amount: Decimal,
        created_at: DateTime<Utc>,
        source: Account,
    ) -> Self {
        Self {
            id,
            amount,
            created_at,
            source,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> TransactionId {
        self.id
    }

    #[inline]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn source(&self) -> &Account {
        &self.source
    }

    pub(crate) fn source_mut(&mut self) -> &mut Account {
        &mut self.source
    }

    /// Events accumulated during validation, in insertion order
    pub fn events(&self) -> &[DomainEvent] {
        &self.events
    }

    /// Drain accumulated events, in insertion order
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    /// Validate the withdrawal against the source account
    ///
    /// Rules, in order, short-circuiting on first failure:
    /// 1. amount must be strictly positive
    /// 2. source balance must cover the amount
    ///
    /// Additionally appends a `FundsLow` warning event (non-failing) when
    /// the post-withdrawal balance would drop below the low-funds
    /// threshold.
    pub fn validate(&mut self) -> ValidationResult {
        if self.amount <= Decimal::ZERO {
            return ValidationResult::Invalid(MSG_WITHDRAWAL_AMOUNT_NOT_POSITIVE);
        }

        if self.source.balance() < self.amount {
            return ValidationResult::Invalid(MSG_INSUFFICIENT_FUNDS_WITHDRAWAL);
        }

        if self.source.balance() - self.amount < *LOW_FUNDS_THRESHOLD {
            self.events.push(DomainEvent::FundsLow {
                account_id: self.source.id(),
                email: self.source.holder().email.clone(),
            });
        }

        ValidationResult::Valid
    }
}

/// Intent to transfer money between two distinct accounts
#[derive(Debug, Clone)]
pub struct TransferTransaction {
    id: TransactionId,
    amount: Decimal,
    created_at: DateTime<Utc>,
    source: Account,
    destination: Account,
    events: Vec<DomainEvent>,
}

impl TransferTransaction {
    pub(crate) fn new(
        id: TransactionId,
        amount: Decimal,
        created_at: DateTime<Utc>,
        source: Account,
        destination: Account,
    ) -> Self {
        Self {
            id,
            amount,
            created_at,
            source,
            destination,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> TransactionId {
        self.id
    }

    #[inline]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn source(&self) -> &Account {
        &self.source
    }

    #[inline]
    pub fn destination(&self) -> &Account {
        &self.destination
    }

    pub(crate) fn accounts_mut(&mut self) -> (&mut Account, &mut Account) {
        (&mut self.source, &mut self.destination)
    }

    /// Events accumulated during validation, in insertion order
    pub fn events(&self) -> &[DomainEvent] {
        &self.events
    }

    /// Drain accumulated events, in insertion order
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    /// Validate the transfer against both accounts
    ///
    /// Rules, in order, short-circuiting on first failure:
    /// 1. amount must be strictly positive
    /// 2. source and destination must be different accounts
    ///    (defense in depth - the coordinator already rejects this by id)
    /// 3. source balance must cover the amount
    /// 4. destination pay-in total must stay within the pay-in limit
    ///
    /// Warnings (non-failing, both may fire): `FundsLow` for the source,
    /// `ApproachingPayInLimit` for the destination.
    pub fn validate(&mut self) -> ValidationResult {
        if self.amount <= Decimal::ZERO {
            return ValidationResult::Invalid(MSG_TRANSFER_AMOUNT_NOT_POSITIVE);
        }

        if self.source.id() == self.destination.id() {
            return ValidationResult::Invalid(MSG_SAME_ACCOUNT);
        }

        if self.source.balance() < self.amount {
            return ValidationResult::Invalid(MSG_INSUFFICIENT_FUNDS_TRANSFER);
        }

        // A sum that overflows Decimal necessarily exceeds the limit
        let paid_in = match self.destination.paid_in().checked_add(self.amount) {
            Some(total) if total <= *PAY_IN_LIMIT => total,
            _ => return ValidationResult::Invalid(MSG_PAY_IN_LIMIT_REACHED),
        };

        if self.source.balance() - self.amount < *LOW_FUNDS_THRESHOLD {
            self.events.push(DomainEvent::FundsLow {
                account_id: self.source.id(),
                email: self.source.holder().email.clone(),
            });
        }

        if *PAY_IN_LIMIT - paid_in < *PAY_IN_WARNING_THRESHOLD {
            self.events.push(DomainEvent::ApproachingPayInLimit {
                account_id: self.destination.id(),
                email: self.destination.holder().email.clone(),
            });
        }

        ValidationResult::Valid
    }
}
