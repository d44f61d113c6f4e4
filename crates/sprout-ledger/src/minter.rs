//! # Referral Minter
//!
//! Mints a unique referral code for a (task, promoter) pair and registers it
//! against the store. Moves no funds.
//!
//! ## Code Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SHA-256( "{task_id}:{promoter}:{referral_id}" )                        │
//! │       │                                                                 │
//! │       ▼  first 8 bytes, mapped onto an unambiguous alphabet            │
//! │  "3F9KQ2ZC"                                                             │
//! │       │                                                                 │
//! │       ▼  prefixed with the referral's own ID                           │
//! │  "R7-3F9KQ2ZC"                                                          │
//! │                                                                         │
//! │  The ID prefix makes system-wide uniqueness structural: two codes      │
//! │  can only collide if two referrals share an ID, which sequences        │
//! │  forbid. The hash part exists so codes are not guessable from the      │
//! │  ID alone.                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::debug;

use sprout_core::{AccountId, LedgerError, LedgerResult, Referral};

use crate::store::LedgerStore;

/// Length of the hash portion of a referral code.
pub const REF_CODE_HASH_LEN: usize = 8;

/// Uppercase alphanumerics minus lookalikes (no I/L/O/0/1).
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Mints a referral for `promoter` against `task_id`.
///
/// ## Failure Modes
/// - [`LedgerError::TaskNotFound`] if the task does not exist
/// - [`LedgerError::TaskInactive`] if the task was deactivated
///
/// ## Repeat Claims
/// A promoter may accept the same task any number of times; every mint
/// produces a fresh referral with a fresh code. There is no duplicate-claim
/// check.
pub fn mint(store: &mut LedgerStore, task_id: u64, promoter: AccountId) -> LedgerResult<Referral> {
    let task = store.get_task(task_id)?;
    if !task.is_active {
        return Err(LedgerError::TaskInactive(task_id));
    }

    // The code embeds the referral's own ID, so it has to be derived from
    // the ID the store will assign next.
    let referral_id = store.next_referral_id();
    let ref_code = derive_ref_code(task_id, &promoter, referral_id);

    debug!(task_id, referral_id, promoter = %promoter, ref_code = %ref_code, "Minting referral");

    let id = store.put_referral(Referral {
        id: referral_id,
        task_id,
        promoter,
        ref_code,
        created_at: Utc::now(),
    })?;
    store.task_mut(task_id)?.referral_count += 1;

    Ok(store.get_referral(id)?.clone())
}

/// Derives a referral code from the mint inputs.
///
/// Deterministic: the same `(task_id, promoter, referral_id)` triple always
/// yields the same code.
pub fn derive_ref_code(task_id: u64, promoter: &AccountId, referral_id: u64) -> String {
    let digest = Sha256::digest(format!("{task_id}:{promoter}:{referral_id}").as_bytes());

    let hash: String = digest
        .iter()
        .take(REF_CODE_HASH_LEN)
        .map(|byte| CODE_ALPHABET[*byte as usize % CODE_ALPHABET.len()] as char)
        .collect();

    format!("R{referral_id}-{hash}")
}

// =============================================================================
// Unit Tests
// =============================================================================
