//! # Task Ledger Facade
//!
//! The single entry point for every ledger operation. Composes the store,
//! the minter, and the engine, and enforces the invariants that span calls:
//! creation-parameter validation, deactivation authority and terminality,
//! and the read-only query surface.
//!
//! ## Operation Surface
//! ```text
//! Mutating (take &mut self, all-or-nothing):
//!   create_task      ──► LedgerStore
//!   deactivate_task  ──► LedgerStore            (advertiser only, terminal)
//!   accept_task      ──► minter ──► LedgerStore
//!   purchase         ──► engine ──► LedgerStore
//!
//! Read-only (take &self, idempotent):
//!   get_task / get_referral / get_purchase
//!   promoter_purchases / promoter_commission_total / all_tasks
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use sprout_core::{
    validation, AccountId, CommissionRate, LedgerError, LedgerResult, Money, Purchase, Referral,
    Task, MAX_COMMISSION_PERCENT,
};

use crate::engine::{self, PurchaseOutcome};
use crate::minter;
use crate::store::LedgerStore;

// =============================================================================
// Task Draft
// =============================================================================

/// Creation parameters for a task, as supplied by the advertiser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    /// Price a buyer must pay exactly.
    pub product_price: Money,
    /// Commission in whole percent, 0..=100.
    pub commission_percent: u8,
    /// Declared bonus pool; must equal the escrowed value.
    pub bonus_pool: Money,
    /// Opaque content hash of the cover image.
    pub cover_image_hash: String,
}

// =============================================================================
// Task Ledger
// =============================================================================

/// The commission ledger state machine.
///
/// Mutating operations require `&mut self`: the exclusive borrow is the
/// serialization point the concurrency model relies on. The embedder
/// linearizes concurrent requests before calling in.
#[derive(Debug, Default)]
pub struct TaskLedger {
    store: LedgerStore,
}

impl TaskLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        TaskLedger::default()
    }

    /// Creates a ledger around a pre-seeded store.
    ///
    /// Test-facing, paired with [`LedgerStore::with_sequences`].
    pub fn with_store(store: LedgerStore) -> Self {
        TaskLedger { store }
    }

    /// Read access to the underlying store, for audits and invariant checks.
    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    // -------------------------------------------------------------------------
    // Mutating Operations
    // -------------------------------------------------------------------------

    /// Creates a task and returns its ID.
    ///
    /// `escrowed` is the value the execution environment actually received
    /// with the call; it must equal the declared `bonus_pool` exactly, or
    /// the creation fails with [`LedgerError::InvalidFunding`].
    pub fn create_task(
        &mut self,
        advertiser: AccountId,
        draft: TaskDraft,
        escrowed: Money,
    ) -> LedgerResult<u64> {
        if draft.commission_percent > MAX_COMMISSION_PERCENT {
            return Err(LedgerError::InvalidCommissionRate(draft.commission_percent));
        }
        validation::validate_title(&draft.title)?;
        validation::validate_description(&draft.description)?;
        validation::validate_product_price(draft.product_price)?;
        validation::validate_bonus_pool(draft.bonus_pool)?;
        if draft.bonus_pool != escrowed {
            return Err(LedgerError::InvalidFunding {
                declared: draft.bonus_pool,
                escrowed,
            });
        }

        let task_id = self.store.put_task(Task {
            id: 0, // assigned by the store
            advertiser,
            title: draft.title,
            description: draft.description,
            product_price: draft.product_price,
            commission_rate: CommissionRate::from_percent(draft.commission_percent),
            bonus_pool: draft.bonus_pool,
            initial_bonus_pool: draft.bonus_pool,
            cover_image_hash: draft.cover_image_hash,
            is_active: true,
            referral_count: 0,
            purchase_count: 0,
            created_at: Utc::now(),
        });

        debug!(task_id, "Task created");
        Ok(task_id)
    }

    /// Deactivates a task. Terminal: there is no reactivation path.
    ///
    /// Only the task's advertiser may deactivate it.
    pub fn deactivate_task(&mut self, caller: &AccountId, task_id: u64) -> LedgerResult<()> {
        let task = self.store.get_task(task_id)?;
        if &task.advertiser != caller {
            return Err(LedgerError::Unauthorized {
                task_id,
                caller: caller.clone(),
            });
        }
        if !task.is_active {
            return Err(LedgerError::AlreadyInactive(task_id));
        }

        self.store.task_mut(task_id)?.is_active = false;
        debug!(task_id, caller = %caller, "Task deactivated");
        Ok(())
    }

    /// Claims a referral code for `promoter` and returns the referral ID.
    pub fn accept_task(&mut self, promoter: AccountId, task_id: u64) -> LedgerResult<u64> {
        let referral = minter::mint(&mut self.store, task_id, promoter)?;
        Ok(referral.id)
    }

    /// Executes a purchase through `ref_code`.
    ///
    /// `payment` must equal the task's product price exactly. The returned
    /// [`PurchaseOutcome`] carries the settlement for the embedder to flush
    /// after this call returns.
    pub fn purchase(
        &mut self,
        ref_code: &str,
        payment: Money,
        buyer: AccountId,
    ) -> LedgerResult<PurchaseOutcome> {
        engine::purchase(&mut self.store, ref_code, payment, buyer)
    }

    // -------------------------------------------------------------------------
    // Query Surface (pure reads)
    // -------------------------------------------------------------------------

    /// Gets a task by ID.
    pub fn get_task(&self, task_id: u64) -> LedgerResult<&Task> {
        self.store.get_task(task_id)
    }

    /// Gets a referral by ID.
    pub fn get_referral(&self, referral_id: u64) -> LedgerResult<&Referral> {
        self.store.get_referral(referral_id)
    }

    /// Gets a purchase by ID.
    pub fn get_purchase(&self, purchase_id: u64) -> LedgerResult<&Purchase> {
        self.store.get_purchase(purchase_id)
    }

    /// Purchase IDs credited to a promoter, oldest first.
    pub fn promoter_purchases(&self, promoter: &AccountId) -> &[u64] {
        self.store.purchase_ids_by_promoter(promoter)
    }

    /// Total commission a promoter has earned across all their purchases.
    ///
    /// Derived read over the promoter's purchase history; the original
    /// leaderboard flow recomputes this by walking purchases, so it gets a
    /// first-class query.
    pub fn promoter_commission_total(&self, promoter: &AccountId) -> Money {
        self.promoter_purchases(promoter)
            .iter()
            .filter_map(|id| self.store.get_purchase(*id).ok())
            .fold(Money::zero(), |sum, p| sum + p.commission_amount)
    }

    /// All task IDs, in creation order.
    pub fn all_tasks(&self) -> Vec<u64> {
        self.store.task_ids()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
