//! # Commission Engine
//!
//! Validates a purchase against a referral code, computes the split, debits
//! the bonus pool, and records the transaction.
//!
//! ## Settlement Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. resolve code          ──► InvalidReferralCode                       │
//! │  2. load task             ──► TaskInactive                              │
//! │  3. exact payment check   ──► IncorrectPayment                          │
//! │  4. desired = paid × rate / 100   (truncating)                          │
//! │  5. actual  = min(desired, pool)                                        │
//! │  ── everything above is read-only ──────────────────────────────────   │
//! │  6. debit pool, bump purchase_count                                     │
//! │  7. append Purchase row                                                 │
//! │  8. return Settlement to the caller                                     │
//! │                                                                         │
//! │  State commits BEFORE any funds can leave the ledger: the settlement   │
//! │  is a value handed back to the embedder, not an outbound call, so no   │
//! │  transfer can re-enter and observe a half-updated task.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pool Exhaustion Is Not an Error
//! When the pool cannot fund the full commission the promoter receives
//! whatever remains, the pool hits exactly zero, and the purchase still
//! completes. The shortfall is retained by the ledger, never returned to
//! the buyer.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use sprout_core::{AccountId, LedgerError, LedgerResult, Money, Purchase};

use crate::store::LedgerStore;

// =============================================================================
// Settlement
// =============================================================================

/// The fund movements one purchase produces.
///
/// The engine never executes transfers; it returns this value after the
/// state is committed and the embedder flushes it. The credits always
/// conserve the paid amount:
///
/// `advertiser_credit + promoter_credit + retained == paid`
///
/// `retained` is non-zero exactly when the pre-purchase pool could not fund
/// the full commission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Who receives the sale proceeds.
    pub advertiser: AccountId,
    /// Who receives the commission.
    pub promoter: AccountId,
    /// Sale proceeds: paid amount net of the full desired commission.
    pub advertiser_credit: Money,
    /// Commission actually funded by the pool.
    pub promoter_credit: Money,
    /// Commission shortfall kept by the ledger when the pool underfunds.
    pub retained: Money,
}

impl Settlement {
    /// Sum of all credits; always equals the paid amount.
    pub fn total(&self) -> Money {
        self.advertiser_credit + self.promoter_credit + self.retained
    }
}

/// A completed purchase together with the settlement it produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOutcome {
    pub purchase: Purchase,
    pub settlement: Settlement,
}

// =============================================================================
// Purchase Execution
// =============================================================================

/// Executes a purchase through `ref_code`.
///
/// All failure modes are detected before any state mutation; once mutation
/// starts nothing in this function can fail, which is what makes steps 6-8
/// atomic as a unit.
pub fn purchase(
    store: &mut LedgerStore,
    ref_code: &str,
    paid: Money,
    buyer: AccountId,
) -> LedgerResult<PurchaseOutcome> {
    // Steps 1-2: resolve and validate, read-only
    let referral = store.get_referral_by_code(ref_code)?;
    let referral_id = referral.id;
    let promoter = referral.promoter.clone();
    let task_id = referral.task_id;

    let task = store.get_task(task_id)?;
    if !task.is_active {
        return Err(LedgerError::TaskInactive(task_id));
    }

    // Step 3: exact-match payment policy, no change-making
    if paid != task.product_price {
        return Err(LedgerError::IncorrectPayment {
            expected: task.product_price,
            paid,
        });
    }

    // Steps 4-5: commission, capped by the pool balance captured inside
    // this same operation
    let desired = paid.commission(task.commission_rate);
    let actual = desired.min(task.bonus_pool);
    let advertiser = task.advertiser.clone();

    debug!(
        task_id,
        referral_id,
        buyer = %buyer,
        desired = %desired,
        actual = %actual,
        "Executing purchase"
    );

    // Step 6: commit task state
    {
        let task = store.task_mut(task_id)?;
        task.bonus_pool -= actual;
        task.purchase_count += 1;
    }

    // Step 7: append the purchase row
    let purchase_id = store.put_purchase(Purchase {
        id: 0, // assigned by the store
        task_id,
        referral_id,
        promoter: promoter.clone(),
        buyer,
        product_price: paid,
        commission_amount: actual,
        created_at: Utc::now(),
    });
    let purchase = store.get_purchase(purchase_id)?.clone();

    // Step 8: hand the fund movements back to the embedder
    let settlement = Settlement {
        advertiser,
        promoter,
        advertiser_credit: paid - desired,
        promoter_credit: actual,
        retained: desired - actual,
    };

    Ok(PurchaseOutcome { purchase, settlement })
}

// =============================================================================
// Unit Tests
// =============================================================================
