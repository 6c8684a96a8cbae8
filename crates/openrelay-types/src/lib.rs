//! # openrelay-types
//!
//! Shared types, errors, and configuration for the **OpenRelay** gasless
//! settlement engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Address`], [`EventId`], [`TokenTag`]
//! - **Custody primitive**: [`Coin`] with merge/split/destroy semantics
//! - **Authorization model**: [`TransferAuthorization`] and its canonical
//!   signing payload (domain tag ∥ type tag ∥ fields)
//! - **Configuration**: [`ProtocolConfig`] (admin, pause flag, fee parameters)
//! - **Receipt model**: [`SettlementReceipt`], [`AuditEvent`]
//! - **Time**: [`TimeSource`] injection point for deadline checks
//! - **Errors**: [`RelayError`] with `RL_ERR_` prefix codes
//! - **Constants**: signing tags, key lengths, fee defaults

pub mod auth;
pub mod coin;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod receipt;
pub mod time;

// Re-export all primary types at crate root for ergonomic imports:
//   use openrelay_types::{Address, Coin, TransferAuthorization, ...};

pub use auth::*;
pub use coin::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use receipt::*;
pub use time::*;

// Constants are accessed via `openrelay_types::constants::FOO`
// (not re-exported to avoid name collisions).
