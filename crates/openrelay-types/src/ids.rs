//! Identifiers used throughout OpenRelay.
//!
//! Accounts are raw 32-byte addresses; audit events use UUIDv7 for
//! time-ordered lexicographic sorting.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 32-byte account address.
///
/// Addresses identify senders, recipients, relayers, the treasury, and the
/// admin. The engine treats them as opaque: in particular, an address is
/// **not** derived from an ed25519 public key, and the verifier never checks
/// that a signing key corresponds to the address it claims to act for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Address(pub [u8; 32]);

impl Address {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Short hex form for log lines.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "addr:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// TokenTag
// ---------------------------------------------------------------------------

/// Runtime identifier for a token type (e.g., "USDC", "WBTC").
///
/// Custodial storage is keyed by tag at runtime rather than by compile-time
/// generics; a tag must be registered with the ledger before use.
pub type TokenTag = String;

// ---------------------------------------------------------------------------
// EventId
// ---------------------------------------------------------------------------

/// Globally unique audit-event identifier. Uses UUIDv7 for time-ordered sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "evt:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
