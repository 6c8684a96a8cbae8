//! Per-user nonce registry — the system's sole replay-protection mechanism.
//!
//! Each user has a strictly increasing counter, implicitly 0 before first
//! use. A transfer authorization is valid only while its embedded nonce
//! equals the stored value; [`NonceRegistry::advance`] is a
//! compare-and-increment, so of two concurrent submissions carrying the same
//! nonce only one can ever win.

use std::collections::HashMap;

use openrelay_types::{Address, RelayError, Result};

/// Tracks the next expected nonce per user.
#[derive(Debug, Default)]
pub struct NonceRegistry {
    nonces: HashMap<Address, u64>,
}

impl NonceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The next nonce expected from `user` (0 if never seen).
    #[must_use]
    pub fn current_nonce(&self, user: Address) -> u64 {
        self.nonces.get(&user).copied().unwrap_or(0)
    }

    /// Compare-and-increment: succeeds only when `expected` equals the
    /// stored value, then advances it by 1.
    ///
    /// # Errors
    /// Returns `NonceMismatch` if `expected` is stale or from the future.
    pub fn advance(&mut self, user: Address, expected: u64) -> Result<()> {
        let current = self.nonces.entry(user).or_insert(0);
        if *current != expected {
            return Err(RelayError::NonceMismatch {
                expected: *current,
                got: expected,
            });
        }
        *current += 1;
        Ok(())
    }
}
