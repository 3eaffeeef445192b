//! End-to-end withdrawal scenarios against in-memory adapters
//!
//! Covers the full coordinator flow: structural checks, transactional
//! boundary usage, persistence counts, and outbox dispatch.

use std::sync::Arc;

use rust_decimal::Decimal;

use moneyflow::adapters::{
    InMemoryAccountStore, InMemoryIdempotencyStore, RecordingNotifier, StubBoundary,
};
use moneyflow::{
    Account, AccountHolder, AccountId, DispatchPolicy, HolderId, IdempotencyKey, UseCaseError,
    WithdrawMoney,
};

struct TestHarness {
    store: Arc<InMemoryAccountStore>,
    boundary: Arc<StubBoundary>,
    notifier: Arc<RecordingNotifier>,
    withdraw: WithdrawMoney,
}

impl TestHarness {
    fn new() -> Self {
        Self::with_policy(DispatchPolicy::BestEffort)
    }

    fn with_policy(policy: DispatchPolicy) -> Self {
        let store = Arc::new(InMemoryAccountStore::new());
        let boundary = Arc::new(StubBoundary::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let keys = Arc::new(InMemoryIdempotencyStore::new());

        let withdraw = WithdrawMoney::new(
            store.clone(),
            boundary.clone(),
            notifier.clone(),
            keys,
            policy,
        );

        Self {
            store,
            boundary,
            notifier,
            withdraw,
        }
    }

    /// Seed an account with the given balance, return its id
    fn seed_account(&self, email: &str, balance: i64) -> AccountId {
        let holder = AccountHolder::new(HolderId::new(), "Holder", email);
        let account = Account::open(AccountId::new(), holder, Decimal::from(balance));
        let id = account.id();
        self.store.insert(account);
        id
    }
}

#[tokio::test]
async fn withdrawal_updates_account_and_persists_once() {
    let harness = TestHarness::new();
    let id = harness.seed_account("alice@example.com", 1000);

    let outcome = harness
        .withdraw
        .execute(IdempotencyKey::new(), id, Decimal::from(300))
        .await
        .unwrap();

    assert!(outcome.is_committed());

    let account = harness.store.account(id).unwrap();
    assert_eq!(account.balance(), Decimal::from(700));
    assert_eq!(account.withdrawn(), Decimal::from(-300));
    assert_eq!(account.paid_in(), Decimal::ZERO);

    assert_eq!(harness.store.save_count(), 1);
    assert_eq!(harness.boundary.begins(), 1);
    assert_eq!(harness.boundary.commits(), 1);
    assert_eq!(harness.boundary.rollbacks(), 0);
    assert!(harness.notifier.funds_low().is_empty());
}

#[tokio::test]
async fn withdrawal_below_threshold_notifies_once() {
    let harness = TestHarness::new();
    let id = harness.seed_account("alice@example.com", 1000);

    // 1000 - 501 = 499 < 500
    let outcome = harness
        .withdraw
        .execute(IdempotencyKey::new(), id, Decimal::from(501))
        .await
        .unwrap();

    assert!(outcome.is_committed());
    assert_eq!(
        harness.store.account(id).unwrap().balance(),
        Decimal::from(499)
    );
    assert_eq!(harness.store.save_count(), 1);
    assert_eq!(harness.notifier.funds_low(), vec!["alice@example.com"]);
}

#[tokio::test]
async fn withdrawal_at_threshold_does_not_notify() {
    let harness = TestHarness::new();
    let id = harness.seed_account("alice@example.com", 1000);

    // 1000 - 500 = 500, not below threshold
    harness
        .withdraw
        .execute(IdempotencyKey::new(), id, Decimal::from(500))
        .await
        .unwrap();

    assert!(harness.notifier.funds_low().is_empty());
}

#[tokio::test]
async fn insufficient_funds_rejects_without_persisting() {
    let harness = TestHarness::new();
    let id = harness.seed_account("alice@example.com", 100);

    let outcome = harness
        .withdraw
        .execute(IdempotencyKey::new(), id, Decimal::from(200))
        .await
        .unwrap();

    assert_eq!(
        outcome.rejection(),
        Some("Insufficient funds to make withdrawal")
    );

    // Account untouched, nothing saved, boundary rolled back
    assert_eq!(
        harness.store.account(id).unwrap().balance(),
        Decimal::from(100)
    );
    assert_eq!(harness.store.save_count(), 0);
    assert_eq!(harness.boundary.begins(), 1);
    assert_eq!(harness.boundary.commits(), 0);
    assert_eq!(harness.boundary.rollbacks(), 1);
    assert!(harness.notifier.funds_low().is_empty());
}

#[tokio::test]
async fn non_positive_amount_is_rejected_before_any_state() {
    let harness = TestHarness::new();
    let id = harness.seed_account("alice@example.com", 1000);

    for amount in [Decimal::ZERO, Decimal::from(-100)] {
        let err = harness
            .withdraw
            .execute(IdempotencyKey::new(), id, amount)
            .await
            .unwrap_err();
        assert!(matches!(err, UseCaseError::InvalidAmount));
    }

    // No boundary was ever opened
    assert_eq!(harness.boundary.begins(), 0);
    assert_eq!(harness.store.save_count(), 0);
}

#[tokio::test]
async fn unknown_account_is_a_not_found_error() {
    let harness = TestHarness::new();

    let err = harness
        .withdraw
        .execute(IdempotencyKey::new(), AccountId::new(), Decimal::from(100))
        .await
        .unwrap_err();

    assert!(matches!(err, UseCaseError::AccountNotFound(_)));
    assert_eq!(harness.boundary.begins(), 0);
}

#[tokio::test]
async fn replayed_idempotency_key_is_rejected() {
    let harness = TestHarness::new();
    let id = harness.seed_account("alice@example.com", 1000);
    let key = IdempotencyKey::new();

    harness
        .withdraw
        .execute(key, id, Decimal::from(100))
        .await
        .unwrap();

    let err = harness
        .withdraw
        .execute(key, id, Decimal::from(100))
        .await
        .unwrap_err();

    assert!(matches!(err, UseCaseError::DuplicateRequest));
    // Only the first execution moved money
    assert_eq!(
        harness.store.account(id).unwrap().balance(),
        Decimal::from(900)
    );
    assert_eq!(harness.store.save_count(), 1);
}

#[tokio::test]
async fn save_failure_rolls_back_and_suppresses_notifications() {
    let harness = TestHarness::new();
    let id = harness.seed_account("alice@example.com", 1000);
    harness.store.fail_saves(true);

    // Would trigger a funds-low event if it committed
    let err = harness
        .withdraw
        .execute(IdempotencyKey::new(), id, Decimal::from(501))
        .await
        .unwrap_err();

    assert!(matches!(err, UseCaseError::Storage(_)));
    assert_eq!(harness.boundary.rollbacks(), 1);
    assert_eq!(harness.boundary.commits(), 0);
    // Outbox guarantee: no commit, no notification
    assert!(harness.notifier.funds_low().is_empty());
}

#[tokio::test]
async fn commit_failure_rolls_back_and_suppresses_notifications() {
    let harness = TestHarness::new();
    let id = harness.seed_account("alice@example.com", 1000);
    harness.boundary.fail_commit(true);

    let err = harness
        .withdraw
        .execute(IdempotencyKey::new(), id, Decimal::from(501))
        .await
        .unwrap_err();

    assert!(matches!(err, UseCaseError::Storage(_)));
    assert_eq!(harness.boundary.rollbacks(), 1);
    assert!(harness.notifier.funds_low().is_empty());
}

#[tokio::test]
async fn notifier_outage_does_not_fail_a_committed_withdrawal() {
    let harness = TestHarness::new();
    let id = harness.seed_account("alice@example.com", 1000);
    harness.notifier.fail_deliveries(true);

    let outcome = harness
        .withdraw
        .execute(IdempotencyKey::new(), id, Decimal::from(501))
        .await
        .unwrap();

    // Commit stands; the event was attempted once and dropped
    assert!(outcome.is_committed());
    assert_eq!(
        harness.store.account(id).unwrap().balance(),
        Decimal::from(499)
    );
    assert_eq!(harness.notifier.attempts(), 1);
    assert!(harness.notifier.funds_low().is_empty());
}

#[tokio::test]
async fn retry_policy_retries_failed_deliveries() {
    let harness = TestHarness::with_policy(DispatchPolicy::Retry { attempts: 3 });
    let id = harness.seed_account("alice@example.com", 1000);
    harness.notifier.fail_deliveries(true);

    let outcome = harness
        .withdraw
        .execute(IdempotencyKey::new(), id, Decimal::from(501))
        .await
        .unwrap();

    assert!(outcome.is_committed());
    assert_eq!(harness.notifier.attempts(), 3);
}
