//! ENFORCED ACCOUNT TYPE
//!
//! This is the single source of truth for account balance state.
//! ALL balance mutations MUST go through these methods.
//!
//! # Enforcement Strategy:
//! 1. Money fields are PRIVATE - no direct access
//! 2. All mutations return Result - errors are explicit
//! 3. checked Decimal arithmetic - overflow protection
//! 4. Balance can never go negative - rejected before mutation

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core_types::{AccountId, HolderId};

/// Maximum cumulative deposits (`paid_in`) an account may reach.
///
/// Fixed business threshold, not per-account configuration.
pub static PAY_IN_LIMIT: Lazy<Decimal> = Lazy::new(|| Decimal::from(4000));

/// Remaining pay-in headroom below which a warning event is raised.
pub static PAY_IN_WARNING_THRESHOLD: Lazy<Decimal> = Lazy::new(|| Decimal::from(500));

/// Balance floor below which a low-funds warning event is raised.
pub static LOW_FUNDS_THRESHOLD: Lazy<Decimal> = Lazy::new(|| Decimal::from(500));

/// Owning user of an account, with the address notifications go to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountHolder {
    pub id: HolderId,
    pub name: String,
    pub email: String,
}

impl AccountHolder {
    pub fn new(id: HolderId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Balance-bearing account entity
///
/// # Invariants (ENFORCED by private fields):
/// - `balance` never goes negative as the result of an applied transaction
/// - `withdrawn` is a negative-signed cumulative running total of withdrawals
/// - `paid_in` is a cumulative running total of deposits
/// - No overflow (checked Decimal arithmetic)
///
/// Lifecycle: loaded from the account store, mutated only by a money
/// movement service during a successful transaction, persisted by the
/// coordinator after the transactional boundary confirms success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    holder: AccountHolder,
    balance: Decimal,
    withdrawn: Decimal,
    paid_in: Decimal,
}

impl Account {
    /// Open an account with an initial balance and zeroed running totals
    pub fn open(id: AccountId, holder: AccountHolder, balance: Decimal) -> Self {
        Self {
            id,
            holder,
            balance,
            withdrawn: Decimal::ZERO,
            paid_in: Decimal::ZERO,
        }
    }

    /// Rehydrate an account from stored state
    pub fn from_parts(
        id: AccountId,
        holder: AccountHolder,
        balance: Decimal,
        withdrawn: Decimal,
        paid_in: Decimal,
    ) -> Self {
        Self {
            id,
            holder,
            balance,
            withdrawn,
            paid_in,
        }
    }

    // ============================================================
    // READ-ONLY GETTERS (safe to expose)
    // ============================================================

    #[inline]
    pub fn id(&self) -> AccountId {
        self.id
    }

    #[inline]
    pub fn holder(&self) -> &AccountHolder {
        &self.holder
    }

    /// Current balance (read-only)
    #[inline]
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Cumulative withdrawals, negative-signed (read-only)
    #[inline]
    pub fn withdrawn(&self) -> Decimal {
        self.withdrawn
    }

    /// Cumulative deposits (read-only)
    #[inline]
    pub fn paid_in(&self) -> Decimal {
        self.paid_in
    }

    // ============================================================
    // VALIDATED MUTATIONS (ENFORCED operations)
    // ============================================================

    /// Apply a withdrawal: `balance -= amount`, `withdrawn -= amount`
    ///
    /// # Errors
    /// - "Insufficient funds" if balance < amount (balance never goes negative)
    /// - arithmetic error on Decimal overflow
    pub fn apply_withdrawal(&mut self, amount: Decimal) -> Result<(), &'static str> {
        if self.balance < amount {
            return Err("Insufficient funds");
        }
        let balance = self
            .balance
            .checked_sub(amount)
            .ok_or("Withdrawal balance underflow")?;
        let withdrawn = self
            .withdrawn
            .checked_sub(amount)
            .ok_or("Withdrawal total underflow")?;
        self.balance = balance;
        self.withdrawn = withdrawn;
        Ok(())
    }

    /// Apply a deposit: `balance += amount`, `paid_in += amount`
    ///
    /// # Errors
    /// - arithmetic error on Decimal overflow
    pub fn apply_deposit(&mut self, amount: Decimal) -> Result<(), &'static str> {
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or("Deposit balance overflow")?;
        let paid_in = self
            .paid_in
            .checked_add(amount)
            .ok_or("Deposit total overflow")?;
        self.balance = balance;
        self.paid_in = paid_in;
        Ok(())
    }
}
