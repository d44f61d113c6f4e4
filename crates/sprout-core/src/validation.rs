//! # Validation Module
//!
//! Input validation for task creation parameters.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Execution environment                                        │
//! │  ├── Authentication of caller identities                               │
//! │  └── Value transfer matching (did the funds actually arrive?)          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - parameter validation                           │
//! │  ├── Non-empty title, bounded lengths                                  │
//! │  ├── Positive price, non-negative pool                                 │
//! │  └── Commission rate in 0..=100                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Ledger invariants (sprout-ledger)                            │
//! │  ├── ID/code index consistency                                         │
//! │  └── Fund conservation on every purchase                               │
//! │                                                                         │
//! │  All of it runs BEFORE any state mutation.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a task title.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most [`MAX_TITLE_LEN`] characters
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

/// Validates a task description.
///
/// ## Rules
/// - May be empty
/// - Must be at most [`MAX_DESCRIPTION_LEN`] characters
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Monetary Validators
// =============================================================================

/// Validates a product price.
///
/// ## Rules
/// - Must be strictly positive; a free product has nothing to commission
pub fn validate_product_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "product_price".to_string(),
        });
    }

    Ok(())
}

/// Validates a bonus pool amount.
///
/// ## Rules
/// - Must be non-negative
/// - Zero is allowed: a task with an empty pool still completes purchases,
///   the promoter just earns nothing
pub fn validate_bonus_pool(pool: Money) -> ValidationResult<()> {
    if pool.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "bonus_pool".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
