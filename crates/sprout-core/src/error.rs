//! # Error Types
//!
//! Domain-specific error types for the Sprout ledger.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sprout-core errors (this file)                                        │
//! │  ├── LedgerError      - State-transition failures                      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Every failure is detected BEFORE any state mutation: a failed         │
//! │  operation leaves the ledger byte-identical to before the call.       │
//! │  The caller decides whether to resubmit; the core never retries.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (task id, code, amounts)
//! 3. Errors are enum variants, never String
//! 4. Pool exhaustion is NOT an error - it degrades the payout instead

use thiserror::Error;

use crate::money::Money;
use crate::types::AccountId;

// =============================================================================
// Ledger Error
// =============================================================================

/// State-transition errors surfaced by ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Task ID is unknown.
    #[error("Task not found: {0}")]
    TaskNotFound(u64),

    /// Referral ID is unknown.
    #[error("Referral not found: {0}")]
    ReferralNotFound(u64),

    /// Purchase ID is unknown.
    #[error("Purchase not found: {0}")]
    PurchaseNotFound(u64),

    /// A referral code that maps to no referral.
    ///
    /// Distinct from [`LedgerError::ReferralNotFound`]: the buyer presented a
    /// string, not an ID, and the string resolved to nothing.
    #[error("Invalid referral code: '{0}'")]
    InvalidReferralCode(String),

    /// Operation attempted against a deactivated task.
    ///
    /// Deactivation is terminal, so resubmitting can never succeed.
    #[error("Task {0} is inactive")]
    TaskInactive(u64),

    /// Deactivation attempted on an already-inactive task.
    #[error("Task {0} is already inactive")]
    AlreadyInactive(u64),

    /// Caller lacks rights for a privileged action.
    ///
    /// Only the task's advertiser may deactivate it.
    #[error("Account '{caller}' is not authorized to manage task {task_id}")]
    Unauthorized { task_id: u64, caller: AccountId },

    /// Value attached to a call does not exactly match the required amount.
    ///
    /// Exact-match policy: the ledger makes no change.
    #[error("Incorrect payment: expected {expected}, got {paid}")]
    IncorrectPayment { expected: Money, paid: Money },

    /// Commission rate outside 0..=100 percent.
    #[error("Invalid commission rate: {0}% (must be 0-100)")]
    InvalidCommissionRate(u8),

    /// Declared bonus pool does not equal the value actually escrowed.
    #[error("Invalid funding: declared {declared}, escrowed {escrowed}")]
    InvalidFunding { declared: Money, escrowed: Money },

    /// A mint produced a referral code that already exists.
    ///
    /// Unreachable with the ID-prefixed derivation scheme; kept so the
    /// store's single write path can refuse to let the code index drift.
    #[error("Referral code '{0}' already exists")]
    DuplicateRefCode(String),

    /// Input validation failure (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when creation parameters don't meet requirements.
/// Used for early validation before state-transition logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with LedgerError.
pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// Unit Tests
// =============================================================================
