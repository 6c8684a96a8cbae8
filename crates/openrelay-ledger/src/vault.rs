//! The external-balance boundary.
//!
//! A [`TokenVault`] holds the balances users keep *outside* custody. The
//! ledger pulls value in on deposit and pushes it back out on withdrawal and
//! emergency unwind. The vault must never fabricate value: every coin it
//! hands out debits the owner's external balance first.

use std::collections::HashMap;

use openrelay_types::{Address, Coin, RelayError, Result, TokenTag};

/// Boundary to users' externally-held token balances.
pub trait TokenVault {
    /// Debit `amount` from the owner's external balance and hand it out as
    /// a coin.
    ///
    /// # Errors
    /// Returns `InsufficientExternalBalance` if the owner cannot cover it.
    fn withdraw(&mut self, owner: Address, token: &str, amount: u64) -> Result<Coin>;

    /// Credit a coin back to the owner's external balance.
    ///
    /// # Errors
    /// Returns `BalanceOverflow` if the owner's external balance cannot hold
    /// the coin's value; the balance is unchanged on failure.
    fn deposit(&mut self, owner: Address, coin: Coin) -> Result<()>;
}

/// In-memory vault used by tests and single-process deployments.
#[derive(Debug, Default)]
pub struct MemoryVault {
    balances: HashMap<(Address, TokenTag), u64>,
}

impl MemoryVault {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an external balance.
    ///
    /// # Errors
    /// Returns `BalanceOverflow` if the resulting balance would exceed
    /// `u64::MAX`.
    pub fn fund(&mut self, owner: Address, token: &str, amount: u64) -> Result<()> {
        let entry = self
            .balances
            .entry((owner, token.to_string()))
            .or_default();
        *entry = entry
            .checked_add(amount)
            .ok_or(RelayError::BalanceOverflow {
                value: *entry,
                added: amount,
            })?;
        Ok(())
    }

    /// External balance for a (owner, token) pair; 0 when absent.
    #[must_use]
    pub fn balance(&self, owner: Address, token: &str) -> u64 {
        self.balances
            .get(&(owner, token.to_string()))
            .copied()
            .unwrap_or(0)
    }
}

impl TokenVault for MemoryVault {
    fn withdraw(&mut self, owner: Address, token: &str, amount: u64) -> Result<Coin> {
        let available = self
            .balances
            .get_mut(&(owner, token.to_string()))
            .ok_or(RelayError::InsufficientExternalBalance {
                needed: amount,
                available: 0,
            })?;

        if *available < amount {
            return Err(RelayError::InsufficientExternalBalance {
                needed: amount,
                available: *available,
            });
        }

        *available -= amount;
        if *available == 0 {
            self.balances.remove(&(owner, token.to_string()));
        }
        Ok(Coin::new(token, amount))
    }

    fn deposit(&mut self, owner: Address, coin: Coin) -> Result<()> {
        let token = coin.token().to_string();
        let entry = self.balances.entry((owner, token)).or_default();
        *entry = entry
            .checked_add(coin.value())
            .ok_or(RelayError::BalanceOverflow {
                value: *entry,
                added: coin.value(),
            })?;
        Ok(())
    }
}
