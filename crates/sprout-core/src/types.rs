//! # Domain Types
//!
//! Core domain types used throughout the Sprout ledger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Task        │   │    Referral     │   │    Purchase     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u64)       │   │  id (u64)       │   │  id (u64)       │       │
//! │  │  advertiser     │   │  task_id (FK)   │   │  task_id (FK)   │       │
//! │  │  product_price  │   │  promoter       │   │  referral_id    │       │
//! │  │  bonus_pool     │   │  ref_code       │   │  commission     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ CommissionRate  │   │   AccountId     │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  percent (u8)   │   │  opaque string  │                             │
//! │  │  10 = 10%       │   │  identity       │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `Purchase` freezes the promoter (from the referral) and the product price
//! (from the task) at purchase time, so the purchase history stays truthful
//! even if a task is later deactivated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Account Identity
// =============================================================================

/// An opaque caller identity (advertiser, promoter, or buyer).
///
/// The ledger never interprets the contents; the execution environment is
/// responsible for authenticating it before an operation reaches the core.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Creates an account identity from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        AccountId(id.into())
    }

    /// Returns the identity as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        AccountId(s.to_string())
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        AccountId(s)
    }
}

// =============================================================================
// Commission Rate
// =============================================================================

/// Commission rate in integer percent (10 = 10%).
///
/// ## Why Integer Percent?
/// The split algorithm is specified in whole percent with truncating
/// division; finer granularity would change the forfeited-remainder policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionRate(u8);

impl CommissionRate {
    /// Creates a commission rate from a whole percentage.
    ///
    /// Range checking happens in [`crate::validation::validate_commission_rate`];
    /// this constructor stays const and infallible, like the rest of the
    /// value types.
    #[inline]
    pub const fn from_percent(percent: u8) -> Self {
        CommissionRate(percent)
    }

    /// Returns the rate as a whole percentage.
    #[inline]
    pub const fn percent(&self) -> u8 {
        self.0
    }

    /// Zero commission rate.
    #[inline]
    pub const fn zero() -> Self {
        CommissionRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for CommissionRate {
    fn default() -> Self {
        CommissionRate::zero()
    }
}

impl fmt::Display for CommissionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// Task
// =============================================================================

/// An advertiser-funded promotable product listing.
///
/// ## Invariants (enforced by sprout-ledger)
/// - `bonus_pool <= initial_bonus_pool` at all times; the pool only shrinks
/// - `referral_count` / `purchase_count` equal the number of persisted
///   Referral / Purchase rows referencing this task
/// - deactivation is terminal; there is no reactivation path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned monotonically starting at 1.
    pub id: u64,

    /// Owning identity; authorizes deactivation and nothing else.
    pub advertiser: AccountId,

    /// Display title.
    pub title: String,

    /// Longer product copy.
    pub description: String,

    /// Price a buyer must pay exactly (no change-making).
    pub product_price: Money,

    /// Promoter's share of each purchase, in whole percent.
    pub commission_rate: CommissionRate,

    /// Remaining escrowed funds commissions are budgeted against.
    pub bonus_pool: Money,

    /// Pool size at creation; kept so the monotonicity invariant is checkable.
    pub initial_bonus_pool: Money,

    /// Content hash of the cover image; opaque to the ledger.
    pub cover_image_hash: String,

    /// Whether the task accepts new referrals and purchases.
    pub is_active: bool,

    /// Number of referral codes minted against this task.
    pub referral_count: u64,

    /// Number of completed purchases against this task.
    pub purchase_count: u64,

    /// When the task was created.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Total commission paid out so far.
    #[inline]
    pub fn commission_paid(&self) -> Money {
        self.initial_bonus_pool - self.bonus_pool
    }

    /// Checks whether the pool can still fund any commission.
    #[inline]
    pub fn pool_exhausted(&self) -> bool {
        self.bonus_pool.is_zero()
    }
}

// =============================================================================
// Referral
// =============================================================================

/// A minted referral code binding one promoter to one task.
///
/// Immutable after creation. A promoter may hold several referrals, including
/// several for the same task; each mint produces a fresh, globally unique
/// code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Referral {
    /// Globally unique identifier, assigned monotonically starting at 1.
    pub id: u64,

    /// The task this referral promotes.
    pub task_id: u64,

    /// The identity that claimed the code.
    pub promoter: AccountId,

    /// Globally unique code buyers present at purchase time.
    pub ref_code: String,

    /// When the referral was minted.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Purchase
// =============================================================================

/// A completed purchase routed through a referral code.
///
/// Append-only and never deleted. Uses the snapshot pattern: `promoter` and
/// `product_price` are frozen copies taken at purchase time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    /// Globally unique identifier, assigned monotonically starting at 1.
    pub id: u64,

    /// The task that was purchased.
    pub task_id: u64,

    /// The referral the buyer's code resolved to.
    pub referral_id: u64,

    /// Promoter at time of purchase (frozen from the referral).
    pub promoter: AccountId,

    /// The identity that paid.
    pub buyer: AccountId,

    /// Product price at time of purchase (frozen from the task).
    pub product_price: Money,

    /// Commission actually credited to the promoter; capped by the pool
    /// balance before this purchase.
    pub commission_amount: Money,

    /// When the purchase completed.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
