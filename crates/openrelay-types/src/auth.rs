//! # TransferAuthorization — the off-line signed transfer request
//!
//! A user authorizes a gasless transfer by signing the canonical digest of a
//! `TransferAuthorization`. The authorization is ephemeral: it exists only
//! for the duration of one settlement call and is never stored.
//!
//! ## Signing Digest
//!
//! ```text
//! digest = SHA-256( DOMAIN_TAG ∥ SHA-256(TYPE_DESCRIPTOR) ∥ fields )
//! fields = sender(32) ∥ recipient(32) ∥ amount(u64 LE) ∥ max_fee(u64 LE) ∥
//!          token_len(u32 LE) ∥ token ∥ nonce(u64 LE) ∥ deadline(u64 LE) ∥
//!          gas_cost(u64 LE)
//! ```
//!
//! The byte layout is the one bit-exact artifact of the protocol: any
//! off-chain signer must reproduce it identically. The length prefix on the
//! token name keeps the encoding injective; every other field is fixed-width.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{constants, Address, TokenTag};

/// One user-authorized transfer request, as reconstructed by the relayer.
///
/// `sender` is a caller-supplied field: it is hashed into the digest and
/// covered by the signature, but the verifier does not check that the
/// signing key belongs to `sender`. The off-chain layer owns the
/// key-to-address mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransferAuthorization {
    /// The balance owner authorizing the transfer.
    pub sender: Address,
    /// Where the transferred amount goes.
    pub recipient: Address,
    /// Amount to transfer, in token base units.
    pub amount: u64,
    /// The most the sender is willing to pay in total fees.
    pub max_fee: u64,
    /// Token type being transferred.
    pub token: TokenTag,
    /// Must equal the sender's current nonce at settlement time.
    pub nonce: u64,
    /// Seconds since epoch; the authorization is dead after this instant.
    pub deadline: u64,
    /// Gas cost the relayer declares it will spend (and be reimbursed).
    pub gas_cost: u64,
}

impl TransferAuthorization {
    /// Canonical field encoding, without the domain/type tags.
    #[must_use]
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(128 + self.token.len());
        bytes.extend_from_slice(&self.sender.0);
        bytes.extend_from_slice(&self.recipient.0);
        bytes.extend_from_slice(&self.amount.to_le_bytes());
        bytes.extend_from_slice(&self.max_fee.to_le_bytes());
        #[allow(clippy::cast_possible_truncation)]
        bytes.extend_from_slice(&(self.token.len() as u32).to_le_bytes());
        bytes.extend_from_slice(self.token.as_bytes());
        bytes.extend_from_slice(&self.nonce.to_le_bytes());
        bytes.extend_from_slice(&self.deadline.to_le_bytes());
        bytes.extend_from_slice(&self.gas_cost.to_le_bytes());
        bytes
    }

    /// The 32-byte digest the sender signs:
    /// `SHA-256(DOMAIN_TAG ∥ type_tag ∥ canonical_bytes)`.
    #[must_use]
    pub fn signing_digest(&self) -> [u8; 32] {
        let type_tag: [u8; 32] = Sha256::digest(constants::TYPE_DESCRIPTOR).into();

        let mut hasher = Sha256::new();
        hasher.update(constants::DOMAIN_TAG);
        hasher.update(type_tag);
        hasher.update(self.canonical_bytes());
        hasher.finalize().into()
    }
}

/// Dummy authorization and signing helpers for tests.
/// **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl TransferAuthorization {
    /// Create a dummy authorization for unit tests.
    #[must_use]
    pub fn dummy(sender: Address, recipient: Address, amount: u64, nonce: u64) -> Self {
        Self {
            sender,
            recipient,
            amount,
            max_fee: 1_000,
            token: "USDC".to_string(),
            nonce,
            deadline: u64::MAX,
            gas_cost: 100,
        }
    }

    /// Sign the digest with `key`, returning `(signature, public_key)` bytes
    /// in the exact shape the settlement engine accepts.
    #[must_use]
    pub fn signed_by(&self, key: &ed25519_dalek::SigningKey) -> (Vec<u8>, Vec<u8>) {
        use ed25519_dalek::Signer;
        let signature = key.sign(&self.signing_digest());
        (
            signature.to_bytes().to_vec(),
            key.verifying_key().to_bytes().to_vec(),
        )
    }
}
