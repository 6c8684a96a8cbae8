//! Custodial balance store.
//!
//! Holds one merged [`Coin`] per (owner, token) pair. All mutations are
//! atomic: either the full operation succeeds or the store is unchanged.
//! A record that reaches zero is removed — the store never holds a
//! present-but-zero record.

use std::collections::{hash_map::Entry, HashMap, HashSet};

use openrelay_types::{Address, Coin, RelayError, Result, TokenTag};

use crate::vault::TokenVault;

/// The source of truth for all custodial balance state.
///
/// Token types are dynamic: storage is keyed by [`TokenTag`] at runtime, and
/// every operation checks the tag has been registered rather than relying on
/// implicit absence.
#[derive(Debug, Default)]
pub struct LedgerStore {
    /// One merged coin per (owner, token) pair.
    custody: HashMap<(Address, TokenTag), Coin>,
    /// Token tags this ledger accepts.
    registered: HashSet<TokenTag>,
}

impl LedgerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token type. Idempotent.
    pub fn register_token(&mut self, token: &str) {
        self.registered.insert(token.to_string());
    }

    /// Whether a token type has been registered.
    #[must_use]
    pub fn is_registered(&self, token: &str) -> bool {
        self.registered.contains(token)
    }

    fn ensure_registered(&self, token: &str) -> Result<()> {
        if self.is_registered(token) {
            Ok(())
        } else {
            Err(RelayError::TokenTypeNotInitialized(token.to_string()))
        }
    }

    /// Move `amount` from the owner's external balance into custody.
    ///
    /// # Errors
    /// - `TokenTypeNotInitialized` for an unregistered tag
    /// - `ZeroAmount` for a zero deposit
    /// - `BalanceOverflow` if custody could not hold the combined value
    /// - `InsufficientExternalBalance` if the vault cannot cover it
    pub fn deposit(
        &mut self,
        vault: &mut dyn TokenVault,
        owner: Address,
        token: &str,
        amount: u64,
    ) -> Result<()> {
        self.ensure_registered(token)?;
        if amount == 0 {
            return Err(RelayError::ZeroAmount);
        }

        // Check custody capacity before debiting the vault, so an
        // over-capacity deposit leaves the external balance untouched.
        let held = self.balance_of(owner, token);
        if held.checked_add(amount).is_none() {
            return Err(RelayError::BalanceOverflow {
                value: held,
                added: amount,
            });
        }

        let coin = vault.withdraw(owner, token, amount)?;
        self.absorb(owner, coin)?;

        tracing::debug!(owner = %owner.short(), token, amount, "custody deposit");
        Ok(())
    }

    /// Move `amount` out of custody back to the owner's external balance.
    ///
    /// # Errors
    /// - `TokenTypeNotInitialized` for an unregistered tag
    /// - `InsufficientCustodialBalance` if custody cannot cover it
    /// - `BalanceOverflow` if the external balance could not hold the value
    pub fn withdraw(
        &mut self,
        vault: &mut dyn TokenVault,
        owner: Address,
        token: &str,
        amount: u64,
    ) -> Result<()> {
        self.ensure_registered(token)?;
        let coin = self.debit(owner, token, amount)?;
        if let Err(err) = vault.deposit(owner, coin) {
            // Restore the debited value so a refused deposit leaves
            // custody exactly as it was.
            self.absorb(owner, Coin::new(token, amount))?;
            return Err(err);
        }

        tracing::debug!(owner = %owner.short(), token, amount, "custody withdrawal");
        Ok(())
    }

    /// Custodial balance for a (owner, token) pair; 0 when absent.
    #[must_use]
    pub fn balance_of(&self, owner: Address, token: &str) -> u64 {
        self.custody
            .get(&(owner, token.to_string()))
            .map_or(0, Coin::value)
    }

    /// Sum of all custodial balances for a token. Settlements only move
    /// value between records, so this total is invariant across them.
    #[must_use]
    pub fn total_custody(&self, token: &str) -> u64 {
        self.custody
            .iter()
            .filter(|((_, t), _)| t == token)
            .map(|(_, coin)| coin.value())
            .sum()
    }

    /// Split `amount` out of the owner's custodial coin.
    ///
    /// Settlement-engine primitive: moves value out of custody without
    /// touching the external vault. The depleted record is removed.
    ///
    /// # Errors
    /// Returns `InsufficientCustodialBalance` if the stored value is less
    /// than `amount`.
    pub fn debit(&mut self, owner: Address, token: &str, amount: u64) -> Result<Coin> {
        let key = (owner, token.to_string());
        let Some(held) = self.custody.get_mut(&key) else {
            return Err(RelayError::InsufficientCustodialBalance {
                needed: amount,
                available: 0,
            });
        };

        if held.value() < amount {
            return Err(RelayError::InsufficientCustodialBalance {
                needed: amount,
                available: held.value(),
            });
        }

        let taken = held.split(amount)?;
        if held.is_zero() {
            // Exact depletion deletes the record rather than retaining zero.
            let drained = self.custody.remove(&key);
            if let Some(coin) = drained {
                coin.destroy_if_zero()?;
            }
        }
        Ok(taken)
    }

    /// Merge a coin into the owner's custodial record.
    ///
    /// Settlement-engine primitive. A zero-value coin is destroyed instead
    /// of creating an empty record.
    ///
    /// # Errors
    /// Returns `BalanceOverflow` if the owner's record could not hold the
    /// combined value (the stored record is unchanged), or
    /// `CoinTypeMismatch` if the coin's tag differs from an existing
    /// record's tag (cannot happen for keys built from `coin.token()`).
    pub fn credit(&mut self, owner: Address, coin: Coin) -> Result<()> {
        self.absorb(owner, coin)
    }

    fn absorb(&mut self, owner: Address, coin: Coin) -> Result<()> {
        if coin.is_zero() {
            return coin.destroy_if_zero();
        }
        match self.custody.entry((owner, coin.token().to_string())) {
            Entry::Occupied(mut held) => held.get_mut().merge(coin),
            Entry::Vacant(slot) => {
                slot.insert(coin);
                Ok(())
            }
        }
    }
}
