//! # sprout-ledger: The Sprout Commission State Machine
//!
//! Advertisers post tasks funded by a bonus pool; promoters claim unique
//! referral codes; buyers redeem a code to purchase, triggering a
//! deterministic split of funds. This crate is the state-transition core:
//! everything else (signing, RPC, wallets, actual transfers) is the
//! embedder's job.
//!
//! ## Component Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         sprout-ledger                                   │
//! │                                                                         │
//! │                      ┌──────────────────┐                               │
//! │   every operation ──►│    TaskLedger    │  facade, global invariants    │
//! │                      └───┬─────┬────┬───┘                               │
//! │                          │     │    │                                   │
//! │             accept_task  │     │    │  purchase                         │
//! │                  ┌───────▼─┐   │  ┌─▼────────┐                          │
//! │                  │  minter │   │  │  engine  │                          │
//! │                  └───────┬─┘   │  └─┬────────┘                          │
//! │                          │     │    │                                   │
//! │                      ┌───▼─────▼────▼───┐                               │
//! │                      │    LedgerStore   │  append-only tables,          │
//! │                      │                  │  sequences, indices           │
//! │                      └──────────────────┘                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency Model
//!
//! The ledger is a deterministic state machine. Every mutating operation is
//! an all-or-nothing transaction against `&mut TaskLedger`; the exclusive
//! borrow makes interleaved half-applied operations unrepresentable in the
//! type system. The execution environment linearizes concurrent requests
//! before they reach the facade.
//!
//! ## Example
//!
//! ```rust
//! use sprout_core::{AccountId, Money};
//! use sprout_ledger::{TaskDraft, TaskLedger};
//!
//! let mut ledger = TaskLedger::new();
//!
//! let pool = Money::from_cents(1000);
//! let task_id = ledger
//!     .create_task(
//!         AccountId::from("advertiser"),
//!         TaskDraft {
//!             title: "Premium skincare promo".into(),
//!             description: "Suitable for all skin types".into(),
//!             product_price: Money::from_cents(100),
//!             commission_percent: 10,
//!             bonus_pool: pool,
//!             cover_image_hash: "QmXxx".into(),
//!         },
//!         pool, // escrowed value must match the declared pool
//!     )
//!     .unwrap();
//!
//! let referral_id = ledger
//!     .accept_task(AccountId::from("promoter"), task_id)
//!     .unwrap();
//! let code = ledger.get_referral(referral_id).unwrap().ref_code.clone();
//!
//! let outcome = ledger
//!     .purchase(&code, Money::from_cents(100), AccountId::from("buyer"))
//!     .unwrap();
//! assert_eq!(outcome.settlement.promoter_credit.cents(), 10);
//! ```

pub mod engine;
pub mod ledger;
pub mod minter;
pub mod store;

pub use engine::{PurchaseOutcome, Settlement};
pub use ledger::{TaskDraft, TaskLedger};
pub use store::{LedgerStore, Sequence};
