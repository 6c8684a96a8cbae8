//! End-to-end integration tests across the custody and settlement planes.
//!
//! These tests exercise the full gasless-transfer lifecycle:
//! vault -> `LedgerStore` deposit -> signed authorization -> `SettlementEngine`
//!
//! They verify the planes work together correctly in realistic scenarios:
//! fee splits, replay protection, expiry, pause, admin controls, emergency
//! unwind, and custody conservation.

use ed25519_dalek::SigningKey;
use openrelay_ledger::MemoryVault;
use openrelay_settlement::{MemoryEventLog, SettlementEngine};
use openrelay_types::*;

const ADMIN: Address = Address([0xAD; 32]);
const TREASURY: Address = Address([0x77; 32]);
const RELAYER: Address = Address([0xEE; 32]);
const NOW: u64 = 1_000_000;

/// Helper: engine + vault + event log wired together on a pinned clock.
struct Harness {
    engine: SettlementEngine,
    vault: MemoryVault,
    log: MemoryEventLog,
}

impl Harness {
    fn new() -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let config = ProtocolConfig::new(ADMIN, TREASURY);
        let mut engine =
            SettlementEngine::with_clock(config, Box::new(FixedTimeSource(NOW)));
        engine.register_token(ADMIN, "USDC").expect("admin registers");
        Self {
            engine,
            vault: MemoryVault::new(),
            log: MemoryEventLog::new(),
        }
    }

    /// Fund a user externally and move the full amount into custody.
    fn deposit(&mut self, user: Address, amount: u64) {
        self.vault.fund(user, "USDC", amount).expect("fund");
        self.engine
            .deposit(&mut self.vault, user, "USDC", amount)
            .expect("deposit should succeed");
    }

    fn settle(
        &mut self,
        auth: &TransferAuthorization,
        key: &SigningKey,
    ) -> Result<SettlementReceipt> {
        let (sig, pk) = auth.signed_by(key);
        self.engine
            .execute(RELAYER, auth, &sig, &pk, &mut self.log)
    }
}

fn auth(
    sender: Address,
    recipient: Address,
    amount: u64,
    max_fee: u64,
    nonce: u64,
) -> TransferAuthorization {
    TransferAuthorization {
        sender,
        recipient,
        amount,
        max_fee,
        token: "USDC".to_string(),
        nonce,
        deadline: NOW + 3_600,
        gas_cost: 100,
    }
}

// =============================================================================
// Test: The reference scenario — 1000 deposited, 500 transferred, margin 110
// =============================================================================
#[test]
fn e2e_reference_scenario() {
    let mut h = Harness::new();
    let sender = Address([1u8; 32]);
    let recipient = Address([2u8; 32]);
    let key = SigningKey::from_bytes(&[42u8; 32]);

    h.deposit(sender, 1_000);
    let receipt = h.settle(&auth(sender, recipient, 500, 150, 0), &key).unwrap();

    assert_eq!(receipt.amount, 500);
    assert_eq!(receipt.gas_cost, 100);
    assert_eq!(receipt.protocol_fee, 10);
    assert_eq!(receipt.total_fee, 110);

    assert_eq!(h.engine.balance_of(recipient, "USDC"), 500);
    assert_eq!(h.engine.balance_of(TREASURY, "USDC"), 10);
    assert_eq!(h.engine.balance_of(RELAYER, "USDC"), 100);
    assert_eq!(h.engine.balance_of(sender, "USDC"), 390);
    assert_eq!(h.engine.current_nonce(sender), 1);

    // Custody conservation: settlement only moves value between records.
    assert_eq!(h.engine.total_custody("USDC"), 1_000);

    // Exactly one audit event, mirroring the receipt.
    assert_eq!(h.log.len(), 1);
    let event = h.log.last().unwrap();
    assert_eq!(event.amount, 500);
    assert_eq!(event.total_fee, 110);
    assert_eq!(event.relayer, RELAYER);
}

// =============================================================================
// Test: Replay of a settled authorization always fails with NonceMismatch
// =============================================================================
#[test]
fn e2e_replay_blocked() {
    let mut h = Harness::new();
    let sender = Address([1u8; 32]);
    let recipient = Address([2u8; 32]);
    let key = SigningKey::from_bytes(&[42u8; 32]);

    h.deposit(sender, 10_000);
    let first = auth(sender, recipient, 500, 150, 0);
    h.settle(&first, &key).unwrap();

    // Identical, previously-successful authorization
    let err = h.settle(&first, &key).unwrap_err();
    assert!(matches!(
        err,
        RelayError::NonceMismatch {
            expected: 1,
            got: 0
        }
    ));
    // One settlement's worth of movement only
    assert_eq!(h.engine.balance_of(recipient, "USDC"), 500);
    assert_eq!(h.log.len(), 1);

    // The next nonce goes through
    h.settle(&auth(sender, recipient, 500, 150, 1), &key).unwrap();
    assert_eq!(h.engine.balance_of(recipient, "USDC"), 1_000);
}

// =============================================================================
// Test: Fee bound is exact — max_fee 109 fails, 110 succeeds
// =============================================================================
#[test]
fn e2e_fee_bound_exact() {
    let mut h = Harness::new();
    let sender = Address([1u8; 32]);
    let recipient = Address([2u8; 32]);
    let key = SigningKey::from_bytes(&[42u8; 32]);

    h.deposit(sender, 10_000);

    let err = h
        .settle(&auth(sender, recipient, 500, 109, 0), &key)
        .unwrap_err();
    assert!(matches!(
        err,
        RelayError::FeeExceedsMax {
            total_fee: 110,
            max_fee: 109
        }
    ));
    // Nothing moved, nonce untouched
    assert_eq!(h.engine.balance_of(sender, "USDC"), 10_000);
    assert_eq!(h.engine.current_nonce(sender), 0);

    h.settle(&auth(sender, recipient, 500, 110, 0), &key).unwrap();
    assert_eq!(h.engine.balance_of(recipient, "USDC"), 500);
}

// =============================================================================
// Test: Expiry is enforced regardless of signature validity
// =============================================================================
#[test]
fn e2e_expired_authorization() {
    let mut h = Harness::new();
    let sender = Address([1u8; 32]);
    let key = SigningKey::from_bytes(&[42u8; 32]);

    h.deposit(sender, 1_000);
    let mut a = auth(sender, Address([2u8; 32]), 500, 150, 0);
    a.deadline = NOW - 1;

    let err = h.settle(&a, &key).unwrap_err();
    assert!(matches!(err, RelayError::AuthorizationExpired { .. }));
    assert_eq!(h.engine.balance_of(sender, "USDC"), 1_000);
}

// =============================================================================
// Test: Tampering with any signed field invalidates the signature
// =============================================================================
#[test]
fn e2e_tampered_authorization_rejected() {
    let mut h = Harness::new();
    let sender = Address([1u8; 32]);
    let key = SigningKey::from_bytes(&[42u8; 32]);

    h.deposit(sender, 10_000);
    let signed = auth(sender, Address([2u8; 32]), 500, 150, 0);
    let (sig, pk) = signed.signed_by(&key);

    // Relayer tries to redirect the transfer to itself
    let mut tampered = signed.clone();
    tampered.recipient = RELAYER;
    let err = h
        .engine
        .execute(RELAYER, &tampered, &sig, &pk, &mut h.log)
        .unwrap_err();
    assert!(matches!(err, RelayError::SignatureMismatch));

    // Relayer tries to inflate its reimbursement
    let mut tampered = signed.clone();
    tampered.gas_cost = 150;
    tampered.max_fee = 10_000;
    let err = h
        .engine
        .execute(RELAYER, &tampered, &sig, &pk, &mut h.log)
        .unwrap_err();
    assert!(matches!(err, RelayError::SignatureMismatch));

    assert_eq!(h.engine.balance_of(sender, "USDC"), 10_000);
    assert!(h.log.is_empty());
}

// =============================================================================
// Test: Fee arithmetic near u64::MAX fails cleanly instead of wrapping
// =============================================================================
#[test]
fn e2e_fee_overflow_rejected() {
    let mut h = Harness::new();
    let sender = Address([1u8; 32]);
    let key = SigningKey::from_bytes(&[42u8; 32]);

    h.deposit(sender, 1_000);
    h.engine
        .update_config(ADMIN, TREASURY, u64::MAX, 1)
        .unwrap();

    let mut a = auth(sender, Address([2u8; 32]), 500, u64::MAX, 0);
    a.gas_cost = u64::MAX;
    let err = h.settle(&a, &key).unwrap_err();
    assert!(matches!(err, RelayError::FeeOverflow));
    assert_eq!(h.engine.balance_of(sender, "USDC"), 1_000);
    assert_eq!(h.engine.current_nonce(sender), 0);
}

// =============================================================================
// Test: Gas cost below the configured floor is rejected
// =============================================================================
#[test]
fn e2e_gas_floor_enforced() {
    let mut h = Harness::new();
    let sender = Address([1u8; 32]);
    let key = SigningKey::from_bytes(&[42u8; 32]);

    h.deposit(sender, 10_000);
    h.engine.update_config(ADMIN, TREASURY, 110, 500).unwrap();

    let err = h
        .settle(&auth(sender, Address([2u8; 32]), 500, 150, 0), &key)
        .unwrap_err();
    assert!(matches!(
        err,
        RelayError::GasCostBelowFloor {
            gas_cost: 100,
            floor: 500
        }
    ));
}

// =============================================================================
// Test: Pause blocks settlement immediately; unpause restores it
// =============================================================================
#[test]
fn e2e_pause_unpause() {
    let mut h = Harness::new();
    let sender = Address([1u8; 32]);
    let key = SigningKey::from_bytes(&[42u8; 32]);

    h.deposit(sender, 10_000);
    h.engine.set_paused(ADMIN, true).unwrap();

    let a = auth(sender, Address([2u8; 32]), 500, 150, 0);
    let err = h.settle(&a, &key).unwrap_err();
    assert!(matches!(err, RelayError::ProtocolPaused));

    h.engine.set_paused(ADMIN, false).unwrap();
    h.settle(&a, &key).unwrap();
    assert_eq!(h.engine.balance_of(sender, "USDC"), 10_000 - 610);
}

// =============================================================================
// Test: Exact-drain settlement removes the sender's record entirely
// =============================================================================
#[test]
fn e2e_exact_drain_removes_record() {
    let mut h = Harness::new();
    let sender = Address([1u8; 32]);
    let key = SigningKey::from_bytes(&[42u8; 32]);

    h.deposit(sender, 610);
    // amount 500 + total fee 110 == balance exactly
    h.settle(&auth(sender, Address([2u8; 32]), 500, 150, 0), &key)
        .unwrap();

    assert_eq!(h.engine.balance_of(sender, "USDC"), 0);
    assert_eq!(h.engine.total_custody("USDC"), 610);
}

// =============================================================================
// Test: Zero amount is rejected before any signature work
// =============================================================================
#[test]
fn e2e_zero_amount_rejected() {
    let mut h = Harness::new();
    let sender = Address([1u8; 32]);
    let key = SigningKey::from_bytes(&[42u8; 32]);

    h.deposit(sender, 1_000);
    let err = h
        .settle(&auth(sender, Address([2u8; 32]), 0, 150, 0), &key)
        .unwrap_err();
    assert!(matches!(err, RelayError::ZeroAmount));
}

// =============================================================================
// Test: New fee parameters apply to subsequent settlements
// =============================================================================
#[test]
fn e2e_updated_margin_changes_split() {
    let mut h = Harness::new();
    let sender = Address([1u8; 32]);
    let recipient = Address([2u8; 32]);
    let key = SigningKey::from_bytes(&[42u8; 32]);

    h.deposit(sender, 10_000);
    // 50% margin: protocol fee = 50 on gas cost 100
    h.engine.update_config(ADMIN, TREASURY, 150, 1).unwrap();

    let receipt = h
        .settle(&auth(sender, recipient, 500, 200, 0), &key)
        .unwrap();
    assert_eq!(receipt.protocol_fee, 50);
    assert_eq!(receipt.total_fee, 150);
    assert_eq!(h.engine.balance_of(TREASURY, "USDC"), 50);
}

// =============================================================================
// Test: Deposit/withdraw round-trip through the vault
// =============================================================================
#[test]
fn e2e_deposit_withdraw_roundtrip() {
    let mut h = Harness::new();
    let user = Address([1u8; 32]);

    h.vault.fund(user, "USDC", 5_000).unwrap();
    h.engine.deposit(&mut h.vault, user, "USDC", 3_000).unwrap();
    assert_eq!(h.engine.balance_of(user, "USDC"), 3_000);
    assert_eq!(h.vault.balance(user, "USDC"), 2_000);

    h.engine
        .withdraw(&mut h.vault, user, "USDC", 3_000)
        .unwrap();
    assert_eq!(h.engine.balance_of(user, "USDC"), 0);
    assert_eq!(h.vault.balance(user, "USDC"), 5_000);
}

// =============================================================================
// Test: A freshly generated key settles like any other
// =============================================================================
#[test]
fn e2e_fresh_random_key_settles() {
    let mut h = Harness::new();
    let sender = Address([0x31; 32]);
    let key = SigningKey::generate(&mut rand::rngs::OsRng);

    h.deposit(sender, 1_000);
    h.settle(&auth(sender, Address([0x32; 32]), 500, 150, 0), &key)
        .unwrap();
    assert_eq!(h.engine.balance_of(sender, "USDC"), 390);
}

// =============================================================================
// Test: Emergency withdrawal unwinds custody to the same user
// =============================================================================
#[test]
fn e2e_emergency_withdraw_unwinds_to_owner() {
    let mut h = Harness::new();
    let user = Address([1u8; 32]);

    h.deposit(user, 2_000);
    h.engine
        .emergency_withdraw(ADMIN, &mut h.vault, user, "USDC", 2_000)
        .unwrap();

    assert_eq!(h.engine.balance_of(user, "USDC"), 0);
    assert_eq!(h.vault.balance(user, "USDC"), 2_000);
}

// =============================================================================
// Test: Multiple senders settle independently through one relayer
// =============================================================================
#[test]
fn e2e_multiple_senders_one_relayer() {
    let mut h = Harness::new();
    let recipient = Address([0x22; 32]);

    let senders: Vec<(Address, SigningKey)> = (1u8..=3)
        .map(|i| (Address([i; 32]), SigningKey::from_bytes(&[i; 32])))
        .collect();

    for (sender, _) in &senders {
        h.deposit(*sender, 1_000);
    }
    for (sender, key) in &senders {
        h.settle(&auth(*sender, recipient, 500, 150, 0), key).unwrap();
    }

    assert_eq!(h.engine.balance_of(recipient, "USDC"), 1_500);
    assert_eq!(h.engine.balance_of(RELAYER, "USDC"), 300);
    assert_eq!(h.engine.balance_of(TREASURY, "USDC"), 30);
    assert_eq!(h.engine.total_custody("USDC"), 3_000);
    assert_eq!(h.log.len(), 3);

    // Nonces advanced per sender, independently
    for (sender, _) in &senders {
        assert_eq!(h.engine.current_nonce(*sender), 1);
    }
}
