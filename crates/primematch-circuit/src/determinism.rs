//! Result digests for cross-mode verification.
//!
//! Simulate and execute modes must produce the exact same output. The
//! result root is a SHA-256 hash over that output, so the two can be
//! compared (and logged) without printing order contents.

use primematch_types::ResultEntry;
use sha2::{Digest, Sha256};

/// Hash a typed round's entries, in order.
#[must_use]
pub fn compute_result_root(entries: &[ResultEntry]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"primematch:result_root:v1:");
    hasher.update((entries.len() as u64).to_le_bytes());

    for entry in entries {
        hasher.update(entry.side.code().to_le_bytes());
        hasher.update(entry.symbol.code().to_le_bytes());
        hasher.update(entry.filled_quantity.to_le_bytes());
    }

    finalize(hasher)
}

/// Hash a single-symbol round's slot fills, in order.
#[must_use]
pub fn compute_slot_root(fills: &[u64]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"primematch:slot_root:v1:");
    hasher.update((fills.len() as u64).to_le_bytes());
    for fill in fills {
        hasher.update(fill.to_le_bytes());
    }
    finalize(hasher)
}

/// Recompute the root over `entries` and compare with `expected_root`.
#[must_use]
pub fn verify_result_root(entries: &[ResultEntry], expected_root: &[u8; 32]) -> bool {
    compute_result_root(entries) == *expected_root
}

fn finalize(hasher: Sha256) -> [u8; 32] {
    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}
