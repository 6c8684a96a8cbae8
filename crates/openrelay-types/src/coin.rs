//! The coin custody primitive.
//!
//! A [`Coin`] is a value-holding token object with conserved semantics:
//! value moves between coins via [`Coin::merge`] and [`Coin::split`] and is
//! never created or destroyed by those operations. The ledger stores one
//! merged coin per (owner, token) pair.

use serde::{Deserialize, Serialize};

use crate::{RelayError, Result, TokenTag};

/// A quantity of a single token type.
///
/// Fields are private: the only ways to change a coin's value are `merge`
/// (absorb another coin of the same type) and `split` (carve off an exact
/// amount into a new coin).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coin {
    token: TokenTag,
    value: u64,
}

impl Coin {
    /// Mint a coin. Callers at the custody boundary (vaults, test fixtures)
    /// are responsible for backing the minted value.
    #[must_use]
    pub fn new(token: impl Into<TokenTag>, value: u64) -> Self {
        Self {
            token: token.into(),
            value,
        }
    }

    /// The token type this coin holds.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Whether this coin holds no value.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Absorb `other` into this coin. Consumes `other` so its value cannot
    /// be double-counted.
    ///
    /// # Errors
    /// Returns `CoinTypeMismatch` if the token types differ, or
    /// `BalanceOverflow` if the combined value would exceed `u64::MAX`.
    /// This coin is unchanged on either failure.
    pub fn merge(&mut self, other: Coin) -> Result<()> {
        if self.token != other.token {
            return Err(RelayError::CoinTypeMismatch {
                expected: self.token.clone(),
                got: other.token,
            });
        }
        self.value = self
            .value
            .checked_add(other.value)
            .ok_or(RelayError::BalanceOverflow {
                value: self.value,
                added: other.value,
            })?;
        Ok(())
    }

    /// Carve `amount` out of this coin into a new coin.
    ///
    /// # Errors
    /// Returns `SplitExceedsValue` if `amount > self.value()`.
    pub fn split(&mut self, amount: u64) -> Result<Coin> {
        if amount > self.value {
            return Err(RelayError::SplitExceedsValue {
                requested: amount,
                value: self.value,
            });
        }
        self.value -= amount;
        Ok(Coin {
            token: self.token.clone(),
            value: amount,
        })
    }

    /// Destroy a depleted coin.
    ///
    /// # Errors
    /// Returns `CoinNotEmpty` if the coin still holds value.
    pub fn destroy_if_zero(self) -> Result<()> {
        if self.value > 0 {
            return Err(RelayError::CoinNotEmpty { value: self.value });
        }
        Ok(())
    }
}
