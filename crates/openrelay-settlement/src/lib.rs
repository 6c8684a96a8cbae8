//! # openrelay-settlement
//!
//! **Settlement Plane**: authorization verification, fee computation, the
//! atomic three-way settlement, admin controls, and the audit event sink.
//!
//! ## Settlement Flow
//!
//! A relayer submits a [`TransferAuthorization`](openrelay_types::TransferAuthorization)
//! plus the sender's detached ed25519 signature. The engine then runs a
//! sequence of hard gates:
//!
//! 1. Config: not paused, deadline not passed, amount > 0, gas floor
//! 2. Fees: margin over gas cost, checked arithmetic, max-fee bound
//! 3. Signature: strict ed25519 over the canonical signing digest
//! 4. State: token registered, nonce matches, balance covers amount + fee
//! 5. Commit: advance nonce, debit sender, credit recipient / treasury /
//!    relayer, append audit event
//!
//! The first failing gate aborts the whole call; all reads precede all
//! writes, so a failed settlement leaves every balance and the sender's
//! nonce untouched.

pub mod admin;
pub mod engine;
pub mod events;
pub mod fees;
pub mod verifier;

pub use engine::SettlementEngine;
pub use events::{EventSink, MemoryEventLog};
pub use fees::FeeBreakdown;
