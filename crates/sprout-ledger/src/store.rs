//! # Ledger Store
//!
//! Append-only, ID-indexed tables for every persisted entity. No business
//! logic lives here; the store's whole job is assignment of IDs and
//! consistency of the secondary indices.
//!
//! ## Table Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          LedgerStore                                    │
//! │                                                                         │
//! │  Primary tables (BTreeMap, key = monotonic u64 starting at 1)          │
//! │  ├── tasks:      id → Task                                             │
//! │  ├── referrals:  id → Referral                                         │
//! │  └── purchases:  id → Purchase                                         │
//! │                                                                         │
//! │  Secondary indices (updated synchronously by the same put)             │
//! │  ├── referral_by_code:      ref_code → referral id   (unique)          │
//! │  └── purchases_by_promoter: promoter → [purchase id] (insertion order) │
//! │                                                                         │
//! │  Sequences (injected, seedable for deterministic tests)                │
//! │  └── task_seq / referral_seq / purchase_seq                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Single Write Path
//! Each table has exactly one `put` method, and that method is the only code
//! that touches the table's indices. The primary map and its index can
//! therefore never drift out of sync.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use sprout_core::{AccountId, LedgerError, LedgerResult, Purchase, Referral, Task};

// =============================================================================
// Sequence
// =============================================================================

/// A monotonic ID generator owned by the store.
///
/// ## Why Explicit Sequences?
/// IDs come from injected `Sequence` values instead of implicit global
/// counters, so tests can construct a store with seeded sequences and get
/// deterministic IDs. No ID is ever reused, including across failed
/// operations: a `put` that fails consumes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequence {
    next: u64,
}

impl Sequence {
    /// Creates a sequence whose first assigned ID is `next`.
    #[inline]
    pub const fn starting_at(next: u64) -> Self {
        Sequence { next }
    }

    /// Returns the ID the next `next_id` call will assign, without consuming
    /// it.
    ///
    /// The minter derives a referral code from the referral's own ID before
    /// the row exists, so the upcoming ID has to be observable.
    #[inline]
    pub const fn peek(&self) -> u64 {
        self.next
    }

    /// Consumes and returns the next ID.
    #[inline]
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Sequences start at 1; ID 0 never exists.
impl Default for Sequence {
    fn default() -> Self {
        Sequence::starting_at(1)
    }
}

// =============================================================================
// LedgerStore
// =============================================================================

/// Holds all persisted entities for the lifetime of the process.
///
/// There is no garbage collection or pruning; rows are appended and never
/// deleted. `BTreeMap` keeps iteration in ID order, which for monotonic IDs
/// is also insertion order.
#[derive(Debug, Default)]
pub struct LedgerStore {
    tasks: BTreeMap<u64, Task>,
    referrals: BTreeMap<u64, Referral>,
    purchases: BTreeMap<u64, Purchase>,

    /// Unique index: referral code → referral ID.
    referral_by_code: HashMap<String, u64>,
    /// Ordered index: promoter → purchase IDs, in insertion order.
    purchases_by_promoter: HashMap<AccountId, Vec<u64>>,

    task_seq: Sequence,
    referral_seq: Sequence,
    purchase_seq: Sequence,
}

impl LedgerStore {
    /// Creates an empty store with all sequences starting at 1.
    pub fn new() -> Self {
        LedgerStore::default()
    }

    /// Creates an empty store with seeded sequences.
    ///
    /// Test-facing: lets a fixture pin the IDs the next operations will
    /// produce.
    pub fn with_sequences(task_seq: Sequence, referral_seq: Sequence, purchase_seq: Sequence) -> Self {
        LedgerStore {
            task_seq,
            referral_seq,
            purchase_seq,
            ..LedgerStore::default()
        }
    }

    // -------------------------------------------------------------------------
    // Task table
    // -------------------------------------------------------------------------

    /// Appends a task and returns its assigned ID.
    ///
    /// The caller's `id` field is ignored; the store always assigns the next
    /// sequence ID.
    pub fn put_task(&mut self, mut task: Task) -> u64 {
        let id = self.task_seq.next_id();
        task.id = id;

        debug!(task_id = id, advertiser = %task.advertiser, "Appending task");
        self.tasks.insert(id, task);
        id
    }

    /// Gets a task by ID.
    pub fn get_task(&self, id: u64) -> LedgerResult<&Task> {
        self.tasks.get(&id).ok_or(LedgerError::TaskNotFound(id))
    }

    /// Gets a mutable task by ID.
    ///
    /// Crate-internal: only the minter, the engine, and the facade may
    /// mutate a task, and only within one atomic operation.
    pub(crate) fn task_mut(&mut self, id: u64) -> LedgerResult<&mut Task> {
        self.tasks.get_mut(&id).ok_or(LedgerError::TaskNotFound(id))
    }

    /// All task IDs, in ascending (= creation) order.
    pub fn task_ids(&self) -> Vec<u64> {
        self.tasks.keys().copied().collect()
    }

    // -------------------------------------------------------------------------
    // Referral table
    // -------------------------------------------------------------------------

    /// The ID the next minted referral will receive.
    pub fn next_referral_id(&self) -> u64 {
        self.referral_seq.peek()
    }

    /// Appends a referral and returns its assigned ID.
    ///
    /// Fails with [`LedgerError::DuplicateRefCode`] if the code is already
    /// indexed; the check runs before the sequence is consumed, so a failed
    /// put has no side effects at all.
    pub fn put_referral(&mut self, mut referral: Referral) -> LedgerResult<u64> {
        if self.referral_by_code.contains_key(&referral.ref_code) {
            return Err(LedgerError::DuplicateRefCode(referral.ref_code));
        }

        // The minter built the code from next_referral_id(); under the
        // exclusive borrow nothing can have consumed the sequence since.
        debug_assert_eq!(referral.id, self.referral_seq.peek());

        let id = self.referral_seq.next_id();
        referral.id = id;

        debug!(
            referral_id = id,
            task_id = referral.task_id,
            promoter = %referral.promoter,
            ref_code = %referral.ref_code,
            "Appending referral"
        );
        self.referral_by_code.insert(referral.ref_code.clone(), id);
        self.referrals.insert(id, referral);
        Ok(id)
    }

    /// Gets a referral by ID.
    pub fn get_referral(&self, id: u64) -> LedgerResult<&Referral> {
        self.referrals
            .get(&id)
            .ok_or(LedgerError::ReferralNotFound(id))
    }

    /// Resolves a referral code to its referral.
    pub fn get_referral_by_code(&self, code: &str) -> LedgerResult<&Referral> {
        let id = self
            .referral_by_code
            .get(code)
            .ok_or_else(|| LedgerError::InvalidReferralCode(code.to_string()))?;

        // The unique index only ever holds IDs inserted by put_referral
        self.get_referral(*id)
    }

    /// Number of referral rows referencing a task.
    ///
    /// Audit query: lets invariant checks compare `Task.referral_count`
    /// against the actual row count.
    pub fn count_referrals_for(&self, task_id: u64) -> u64 {
        self.referrals
            .values()
            .filter(|r| r.task_id == task_id)
            .count() as u64
    }

    // -------------------------------------------------------------------------
    // Purchase table
    // -------------------------------------------------------------------------

    /// Appends a purchase and returns its assigned ID.
    ///
    /// The caller's `id` field is ignored. Synchronously appends the ID to
    /// the promoter's purchase index.
    pub fn put_purchase(&mut self, mut purchase: Purchase) -> u64 {
        let id = self.purchase_seq.next_id();
        purchase.id = id;

        debug!(
            purchase_id = id,
            task_id = purchase.task_id,
            referral_id = purchase.referral_id,
            promoter = %purchase.promoter,
            buyer = %purchase.buyer,
            commission = %purchase.commission_amount,
            "Appending purchase"
        );
        self.purchases_by_promoter
            .entry(purchase.promoter.clone())
            .or_default()
            .push(id);
        self.purchases.insert(id, purchase);
        id
    }

    /// Gets a purchase by ID.
    pub fn get_purchase(&self, id: u64) -> LedgerResult<&Purchase> {
        self.purchases
            .get(&id)
            .ok_or(LedgerError::PurchaseNotFound(id))
    }

    /// Purchase IDs credited to a promoter, oldest first.
    ///
    /// Unknown promoters yield an empty slice rather than an error: an
    /// account with no purchases is a valid, boring answer.
    pub fn purchase_ids_by_promoter(&self, promoter: &AccountId) -> &[u64] {
        self.purchases_by_promoter
            .get(promoter)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of purchase rows referencing a task.
    ///
    /// Audit query, mirror of [`LedgerStore::count_referrals_for`].
    pub fn count_purchases_for(&self, task_id: u64) -> u64 {
        self.purchases
            .values()
            .filter(|p| p.task_id == task_id)
            .count() as u64
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sprout_core::{CommissionRate, Money};

    fn sample_task() -> Task {
        Task {
            id: 0,
            advertiser: AccountId::from("adv"),
            title: "Task".into(),
            description: String::new(),
            product_price: Money::from_cents(100),
            commission_rate: CommissionRate::from_percent(10),
            bonus_pool: Money::from_cents(1000),
            initial_bonus_pool: Money::from_cents(1000),
            cover_image_hash: "Qm".into(),
            is_active: true,
            referral_count: 0,
            purchase_count: 0,
            created_at: Utc::now(),
        }
    }

    fn sample_referral(store: &LedgerStore, code: &str) -> Referral {
        Referral {
            id: store.next_referral_id(),
            task_id: 1,
            promoter: AccountId::from("p1"),
            ref_code: code.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_task_ids_are_monotonic_from_one() {
        let mut store = LedgerStore::new();
        assert_eq!(store.put_task(sample_task()), 1);
        assert_eq!(store.put_task(sample_task()), 2);
        assert_eq!(store.put_task(sample_task()), 3);
        assert_eq!(store.task_ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_caller_supplied_id_is_ignored() {
        let mut store = LedgerStore::new();
        let mut task = sample_task();
        task.id = 999;
        let id = store.put_task(task);
        assert_eq!(id, 1);
        assert_eq!(store.get_task(1).unwrap().id, 1);
        assert!(store.get_task(999).is_err());
    }

    #[test]
    fn test_seeded_sequences() {
        let mut store = LedgerStore::with_sequences(
            Sequence::starting_at(100),
            Sequence::starting_at(200),
            Sequence::starting_at(300),
        );
        assert_eq!(store.put_task(sample_task()), 100);
        assert_eq!(store.next_referral_id(), 200);
    }

    #[test]
    fn test_get_unknown_ids_fail() {
        let store = LedgerStore::new();
        assert!(matches!(store.get_task(1), Err(LedgerError::TaskNotFound(1))));
        assert!(matches!(
            store.get_referral(1),
            Err(LedgerError::ReferralNotFound(1))
        ));
        assert!(matches!(
            store.get_purchase(1),
            Err(LedgerError::PurchaseNotFound(1))
        ));
        assert!(matches!(
            store.get_referral_by_code("R1-NOPE"),
            Err(LedgerError::InvalidReferralCode(_))
        ));
    }

    #[test]
    fn test_referral_code_index_stays_in_sync() {
        let mut store = LedgerStore::new();
        store.put_task(sample_task());

        let referral = sample_referral(&store, "R1-AAAAAAAA");
        let id = store.put_referral(referral).unwrap();

        let resolved = store.get_referral_by_code("R1-AAAAAAAA").unwrap();
        assert_eq!(resolved.id, id);
        assert_eq!(store.get_referral(id).unwrap().ref_code, "R1-AAAAAAAA");
    }

    #[test]
    fn test_duplicate_code_rejected_without_side_effects() {
        let mut store = LedgerStore::new();
        store.put_task(sample_task());

        store.put_referral(sample_referral(&store, "R1-AAAAAAAA")).unwrap();
        let next_before = store.next_referral_id();

        let dup = sample_referral(&store, "R1-AAAAAAAA");
        let err = store.put_referral(dup).unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateRefCode(_)));

        // the failed put consumed no ID
        assert_eq!(store.next_referral_id(), next_before);
    }

    #[test]
    fn test_promoter_purchase_index_appends_in_order() {
        let mut store = LedgerStore::new();
        let promoter = AccountId::from("p1");

        for _ in 0..3 {
            store.put_purchase(Purchase {
                id: 0,
                task_id: 1,
                referral_id: 1,
                promoter: promoter.clone(),
                buyer: AccountId::from("buyer"),
                product_price: Money::from_cents(100),
                commission_amount: Money::from_cents(10),
                created_at: Utc::now(),
            });
        }

        assert_eq!(store.purchase_ids_by_promoter(&promoter), &[1, 2, 3]);
        assert_eq!(
            store.purchase_ids_by_promoter(&AccountId::from("nobody")),
            &[] as &[u64]
        );
        assert_eq!(store.count_purchases_for(1), 3);
    }
}
