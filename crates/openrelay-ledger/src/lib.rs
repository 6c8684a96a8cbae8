//! # openrelay-ledger
//!
//! **Custody Plane**: per-user custodial balances, replay-protection nonces,
//! and the boundary to users' externally-held token balances.
//!
//! ## Architecture
//!
//! The custody plane sits between the token vault and the settlement engine:
//! 1. **LedgerStore**: one merged [`Coin`](openrelay_types::Coin) per
//!    (owner, token) pair; zero records are removed, absent reads are 0
//! 2. **NonceRegistry**: per-user strictly increasing counter; the
//!    compare-and-increment on settlement is the system's sole
//!    concurrency-control primitive
//! 3. **TokenVault**: trait boundary to external balances; deposits pull a
//!    coin in, withdrawals push a coin back out
//!
//! ## Flow
//!
//! ```text
//! vault.withdraw() → LedgerStore.deposit() → [settlement debit/credit]
//!                  → LedgerStore.withdraw() → vault.deposit()
//! ```
//!
//! Only the settlement engine calls the internal debit/credit primitives;
//! everything else moves value through deposit/withdraw and the vault.

pub mod nonce;
pub mod store;
pub mod vault;

pub use nonce::NonceRegistry;
pub use store::LedgerStore;
pub use vault::{MemoryVault, TokenVault};
