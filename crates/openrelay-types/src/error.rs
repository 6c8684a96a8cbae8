//! Error types for the OpenRelay settlement engine.
//!
//! All errors use the `RL_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Coin / vault errors
//! - 2xx: Ledger errors
//! - 3xx: Authorization errors
//! - 4xx: Settlement errors
//! - 5xx: Admin errors

use thiserror::Error;

use crate::Address;

/// Central error enum for all OpenRelay operations.
///
/// Every failure is synchronous and typed; no partial state survives a
/// failed settlement (the engine performs all mutations only after every
/// gate has passed).
#[derive(Debug, Error)]
pub enum RelayError {
    // =================================================================
    // Coin / Vault Errors (1xx)
    // =================================================================
    /// Two coins of different token types cannot be merged.
    #[error("RL_ERR_100: Coin type mismatch: expected {expected}, got {got}")]
    CoinTypeMismatch { expected: String, got: String },

    /// A coin with remaining value cannot be destroyed.
    #[error("RL_ERR_101: Coin still holds value {value}, refusing to destroy")]
    CoinNotEmpty { value: u64 },

    /// A split asked for more value than the coin holds.
    #[error("RL_ERR_102: Split of {requested} exceeds coin value {value}")]
    SplitExceedsValue { requested: u64, value: u64 },

    /// The external (non-custodial) balance cannot cover the requested amount.
    #[error("RL_ERR_103: Insufficient external balance: need {needed}, have {available}")]
    InsufficientExternalBalance { needed: u64, available: u64 },

    /// Adding value to a balance would exceed `u64::MAX`. The operation is
    /// refused rather than allowed to cap or wrap.
    #[error("RL_ERR_104: Balance overflow: {value} + {added} exceeds capacity")]
    BalanceOverflow { value: u64, added: u64 },

    // =================================================================
    // Ledger Errors (2xx)
    // =================================================================
    /// The custodial balance cannot cover the requested amount.
    #[error("RL_ERR_200: Insufficient custodial balance: need {needed}, have {available}")]
    InsufficientCustodialBalance { needed: u64, available: u64 },

    /// The token type has not been registered with the ledger.
    #[error("RL_ERR_201: Token type not initialized: {0}")]
    TokenTypeNotInitialized(String),

    /// Zero-amount deposits, withdrawals, and transfers are rejected.
    #[error("RL_ERR_202: Amount must be greater than zero")]
    ZeroAmount,

    // =================================================================
    // Authorization Errors (3xx)
    // =================================================================
    /// Public key or signature bytes have the wrong length or are not a
    /// valid curve point.
    #[error("RL_ERR_300: Malformed signature input: {reason}")]
    MalformedSignatureInput { reason: String },

    /// Strict ed25519 verification of the signing digest failed.
    #[error("RL_ERR_301: Signature verification failed")]
    SignatureMismatch,

    /// The authorization deadline has passed.
    #[error("RL_ERR_302: Authorization expired: deadline {deadline}, now {now}")]
    AuthorizationExpired { deadline: u64, now: u64 },

    /// The embedded nonce does not match the sender's current nonce.
    #[error("RL_ERR_303: Nonce mismatch: expected {expected}, got {got}")]
    NonceMismatch { expected: u64, got: u64 },

    // =================================================================
    // Settlement Errors (4xx)
    // =================================================================
    /// The protocol is paused; no settlements are accepted.
    #[error("RL_ERR_400: Protocol is paused")]
    ProtocolPaused,

    /// The declared gas cost is below the configured floor.
    #[error("RL_ERR_401: Gas cost {gas_cost} below floor {floor}")]
    GasCostBelowFloor { gas_cost: u64, floor: u64 },

    /// The computed total fee exceeds the sender's authorized maximum.
    #[error("RL_ERR_402: Total fee {total_fee} exceeds authorized max {max_fee}")]
    FeeExceedsMax { total_fee: u64, max_fee: u64 },

    /// Fee arithmetic overflowed; the settlement is rejected rather than
    /// allowed to wrap.
    #[error("RL_ERR_403: Fee computation overflow")]
    FeeOverflow,

    /// Sender and recipient are the same address and the policy flag
    /// rejecting self-transfers is enabled.
    #[error("RL_ERR_404: Self-transfer blocked for {0}")]
    SelfTransferBlocked(Address),

    // =================================================================
    // Admin Errors (5xx)
    // =================================================================
    /// The caller is not the configured admin.
    #[error("RL_ERR_500: Caller {0} is not the admin")]
    NotAdmin(Address),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, RelayError>;
