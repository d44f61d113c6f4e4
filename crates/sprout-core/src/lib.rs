//! # sprout-core: Pure Domain Logic for the Sprout Commission Ledger
//!
//! This crate is the **heart** of the Sprout ledger. It contains the domain
//! types and the commission math as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Sprout Ledger Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Execution Environment                           │   │
//! │  │   request intake ──► signing ──► linearization ──► transfers    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ serialized operations                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              sprout-ledger (state machine)                      │   │
//! │  │    TaskLedger ──► Minter / Engine ──► LedgerStore               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sprout-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   error   │  │ validation│  │   │
//! │  │   │   Task    │  │   Money   │  │  Ledger   │  │   rules   │  │   │
//! │  │   │  Referral │  │ Commission│  │  Error    │  │  checks   │  │   │
//! │  │   │  Purchase │  │   Rate    │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Task, Referral, Purchase, CommissionRate, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use sprout_core::money::Money;
//! use sprout_core::types::CommissionRate;
//!
//! // Create money from cents (never from floats!)
//! let price = Money::from_cents(100); // $1.00
//!
//! // Commission truncates toward zero; fractional cents are forfeited
//! let rate = CommissionRate::from_percent(10);
//! let commission = price.commission(rate);
//! assert_eq!(commission.cents(), 10);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use sprout_core::Money` instead of
// `use sprout_core::money::Money`

pub use error::{LedgerError, LedgerResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a task title.
///
/// ## Business Reason
/// Keeps titles displayable in listings; longer copy belongs in the
/// description.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of a task description.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Maximum commission rate, in integer percent.
///
/// A task may hand the entire product price to the promoter (100%) but never
/// more.
pub const MAX_COMMISSION_PERCENT: u8 = 100;
