//! In-memory reference adapters
//!
//! Each adapter records the calls made against it so tests can assert on
//! persistence counts, boundary usage and notification delivery. Failure
//! injection flags simulate backend faults (a save that errors, a commit
//! that errors, a notifier that is down).

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::account::Account;
use crate::core_types::{AccountId, IdempotencyKey};

use super::{AccountStore, IdempotencyStore, Notifier, NotifyError, StoreError, TransactionBoundary};

/// HashMap-backed account store with a save log
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: Mutex<HashMap<AccountId, Account>>,
    saves: Mutex<Vec<AccountId>>,
    fail_saves: AtomicBool,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account
    pub fn insert(&self, account: Account) {
        self.accounts
            .lock()
            .expect("account map poisoned")
            .insert(account.id(), account);
    }

    /// Current stored state of an account
    pub fn account(&self, id: AccountId) -> Option<Account> {
        self.accounts
            .lock()
            .expect("account map poisoned")
            .get(&id)
            .cloned()
    }

    /// Ids passed to `save`, in call order
    pub fn saves(&self) -> Vec<AccountId> {
        self.saves.lock().expect("save log poisoned").clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().expect("save log poisoned").len()
    }

    /// Make every subsequent `save` fail
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn get(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self
            .accounts
            .lock()
            .expect("account map poisoned")
            .get(&id)
            .cloned())
    }

    async fn save(&self, account: &Account) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("save failed (injected)".into()));
        }
        self.accounts
            .lock()
            .expect("account map poisoned")
            .insert(account.id(), account.clone());
        self.saves
            .lock()
            .expect("save log poisoned")
            .push(account.id());
        Ok(())
    }
}

/// Counting transactional boundary stub
#[derive(Default)]
pub struct StubBoundary {
    begins: AtomicUsize,
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
    fail_commit: AtomicBool,
}

impl StubBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begins(&self) -> usize {
        self.begins.load(Ordering::SeqCst)
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }

    /// Make every subsequent `commit` fail
    pub fn fail_commit(&self, fail: bool) {
        self.fail_commit.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl TransactionBoundary for StubBoundary {
    async fn begin(&self) -> Result<(), StoreError> {
        self.begins.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn commit(&self) -> Result<(), StoreError> {
        if self.fail_commit.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("commit failed (injected)".into()));
        }
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(&self) -> Result<(), StoreError> {
        self.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Notifier that records delivered addresses per event kind
#[derive(Default)]
pub struct RecordingNotifier {
    funds_low: Mutex<Vec<String>>,
    approaching_limit: Mutex<Vec<String>>,
    attempts: AtomicUsize,
    fail_deliveries: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn funds_low(&self) -> Vec<String> {
        self.funds_low.lock().expect("notifier log poisoned").clone()
    }

    pub fn approaching_limit(&self) -> Vec<String> {
        self.approaching_limit
            .lock()
            .expect("notifier log poisoned")
            .clone()
    }

    /// Total delivery attempts, including failed ones
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Make every subsequent delivery fail
    pub fn fail_deliveries(&self, fail: bool) {
        self.fail_deliveries.store(fail, Ordering::SeqCst);
    }

    fn deliver(&self, log: &Mutex<Vec<String>>, email: &str) -> Result<(), NotifyError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_deliveries.load(Ordering::SeqCst) {
            return Err(NotifyError::Delivery("notifier down (injected)".into()));
        }
        log.lock()
            .expect("notifier log poisoned")
            .push(email.to_string());
        Ok(())
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_funds_low(&self, email: &str) -> Result<(), NotifyError> {
        self.deliver(&self.funds_low, email)
    }

    async fn notify_approaching_pay_in_limit(&self, email: &str) -> Result<(), NotifyError> {
        self.deliver(&self.approaching_limit, email)
    }
}

/// HashSet-backed idempotency store
#[derive(Default)]
pub struct InMemoryIdempotencyStore {
    seen: Mutex<HashSet<IdempotencyKey>>,
}

impl InMemoryIdempotencyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdempotencyStore for InMemoryIdempotencyStore {
    async fn record(&self, key: IdempotencyKey) -> Result<bool, StoreError> {
        Ok(self.seen.lock().expect("key set poisoned").insert(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountHolder;
    use crate::core_types::HolderId;
    use rust_decimal::Decimal;

    fn account() -> Account {
        Account::open(
            AccountId::new(),
            AccountHolder::new(HolderId::new(), "Test", "test@example.com"),
            Decimal::from(100),
        )
    }

    #[tokio::test]
    async fn test_store_get_returns_clone() {
        let store = InMemoryAccountStore::new();
        let acc = account();
        let id = acc.id();
        store.insert(acc);

        let loaded = store.get(id).await.unwrap().unwrap();
        assert_eq!(loaded.id(), id);
        assert!(store.get(AccountId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_records_saves() {
        let store = InMemoryAccountStore::new();
        let acc = account();
        let id = acc.id();

        store.save(&acc).await.unwrap();
        assert_eq!(store.saves(), vec![id]);
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn test_injected_save_failure() {
        let store = InMemoryAccountStore::new();
        store.fail_saves(true);
        assert!(store.save(&account()).await.is_err());
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_boundary_counters() {
        let boundary = StubBoundary::new();
        boundary.begin().await.unwrap();
        boundary.commit().await.unwrap();

        assert_eq!(boundary.begins(), 1);
        assert_eq!(boundary.commits(), 1);
        assert_eq!(boundary.rollbacks(), 0);
    }

    #[tokio::test]
    async fn test_idempotency_store_rejects_replay() {
        let keys = InMemoryIdempotencyStore::new();
        let key = IdempotencyKey::new();

        assert!(keys.record(key).await.unwrap());
        assert!(!keys.record(key).await.unwrap());
        assert!(keys.record(IdempotencyKey::new()).await.unwrap());
    }

    #[tokio::test]
    async fn test_notifier_records_per_kind() {
        let notifier = RecordingNotifier::new();
        notifier.notify_funds_low("a@b.c").await.unwrap();
        notifier.notify_approaching_pay_in_limit("d@e.f").await.unwrap();

        assert_eq!(notifier.funds_low(), vec!["a@b.c"]);
        assert_eq!(notifier.approaching_limit(), vec!["d@e.f"]);
        assert_eq!(notifier.attempts(), 2);
    }
}
