//! System-wide constants and defaults.

/// Domain-separation tag prepended to every signing payload.
///
/// Scopes a signature to this protocol and version; a signature produced for
/// any other protocol (or a future OpenRelay version) can never verify here.
pub const DOMAIN_TAG: &[u8] = b"openrelay:transfer:v1:";

/// Type descriptor naming the authorization fields and their semantic types.
///
/// The SHA-256 of this string is the type tag hashed into every signing
/// digest. Any change to the field set or order is a new message type.
pub const TYPE_DESCRIPTOR: &[u8] = b"TransferAuthorization(address sender,address recipient,u64 amount,u64 max_fee,string token,u64 nonce,u64 deadline,u64 gas_cost)";

/// Exact ed25519 public key length accepted by the verifier.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Exact ed25519 signature length accepted by the verifier.
pub const SIGNATURE_LENGTH: usize = 64;

/// Fee margin representing "no markup" (the percent denominator).
pub const FEE_MARGIN_UNIT: u64 = 100;

/// Default fee margin: gas cost + 10%.
pub const DEFAULT_FEE_MARGIN: u64 = 110;

/// Default minimum declared gas cost accepted by the engine.
pub const DEFAULT_BASE_GAS_COST: u64 = 1;
