//! The settlement engine — one gasless transfer, end to end.
//!
//! The engine owns the protocol configuration, the custodial ledger, and the
//! nonce registry, and executes every call as one indivisible unit: there is
//! no suspension inside a call, and no two calls observe an interleaved
//! intermediate state. The nonce compare-and-increment is the only
//! serialization point that matters — of two submissions carrying the same
//! authorization, exactly one can win it.

use std::collections::HashMap;

use openrelay_ledger::{LedgerStore, NonceRegistry, TokenVault};
use openrelay_types::{
    Address, ProtocolConfig, RelayError, Result, SettlementReceipt, SystemTimeSource, TimeSource,
    TransferAuthorization,
};

use crate::events::EventSink;
use crate::{fees, verifier};

/// Orchestrates deposits, withdrawals, and gasless settlements against the
/// shared ledger, nonce registry, and configuration.
///
/// State is explicitly owned and injected at construction — multiple
/// independent engines can coexist in one process.
pub struct SettlementEngine {
    pub(crate) config: ProtocolConfig,
    pub(crate) ledger: LedgerStore,
    pub(crate) nonces: NonceRegistry,
    clock: Box<dyn TimeSource>,
}

impl SettlementEngine {
    /// Create an engine on the system clock.
    #[must_use]
    pub fn new(config: ProtocolConfig) -> Self {
        Self::with_clock(config, Box::new(SystemTimeSource))
    }

    /// Create an engine with an injected time source.
    #[must_use]
    pub fn with_clock(config: ProtocolConfig, clock: Box<dyn TimeSource>) -> Self {
        Self {
            config,
            ledger: LedgerStore::new(),
            nonces: NonceRegistry::new(),
            clock,
        }
    }

    /// Current protocol configuration.
    #[must_use]
    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// Custodial balance for a (owner, token) pair; 0 when absent.
    #[must_use]
    pub fn balance_of(&self, owner: Address, token: &str) -> u64 {
        self.ledger.balance_of(owner, token)
    }

    /// Sum of all custodial balances for a token.
    #[must_use]
    pub fn total_custody(&self, token: &str) -> u64 {
        self.ledger.total_custody(token)
    }

    /// The next nonce expected from `user`.
    #[must_use]
    pub fn current_nonce(&self, user: Address) -> u64 {
        self.nonces.current_nonce(user)
    }

    /// Deposit from the owner's external balance into custody.
    pub fn deposit(
        &mut self,
        vault: &mut dyn TokenVault,
        owner: Address,
        token: &str,
        amount: u64,
    ) -> Result<()> {
        self.ledger.deposit(vault, owner, token, amount)
    }

    /// Withdraw from custody back to the owner's external balance.
    pub fn withdraw(
        &mut self,
        vault: &mut dyn TokenVault,
        owner: Address,
        token: &str,
        amount: u64,
    ) -> Result<()> {
        self.ledger.withdraw(vault, owner, token, amount)
    }

    /// Settle one relayed transfer.
    ///
    /// Gates run in a fixed order and the first failure aborts the call;
    /// every read precedes every write, so a failed settlement leaves all
    /// balances and the sender's nonce exactly as they were.
    ///
    /// # Errors
    /// One of: `ProtocolPaused`, `AuthorizationExpired`, `ZeroAmount`,
    /// `GasCostBelowFloor`, `FeeOverflow`, `FeeExceedsMax`,
    /// `SelfTransferBlocked`, `MalformedSignatureInput`, `SignatureMismatch`,
    /// `TokenTypeNotInitialized`, `NonceMismatch`,
    /// `InsufficientCustodialBalance`, `BalanceOverflow`.
    pub fn execute(
        &mut self,
        relayer: Address,
        auth: &TransferAuthorization,
        signature: &[u8],
        public_key: &[u8],
        sink: &mut dyn EventSink,
    ) -> Result<SettlementReceipt> {
        // --- Gates (reads only) ---------------------------------------
        if self.config.paused {
            return Err(RelayError::ProtocolPaused);
        }

        let now = self.clock.now_secs();
        if now > auth.deadline {
            return Err(RelayError::AuthorizationExpired {
                deadline: auth.deadline,
                now,
            });
        }

        if auth.amount == 0 {
            return Err(RelayError::ZeroAmount);
        }

        if auth.gas_cost < self.config.base_gas_cost {
            return Err(RelayError::GasCostBelowFloor {
                gas_cost: auth.gas_cost,
                floor: self.config.base_gas_cost,
            });
        }

        let fee = fees::compute(auth.gas_cost, self.config.fee_margin, auth.max_fee)?;

        if self.config.reject_self_transfer && auth.recipient == auth.sender {
            return Err(RelayError::SelfTransferBlocked(auth.sender));
        }

        verifier::verify(auth, signature, public_key)?;

        if !self.ledger.is_registered(&auth.token) {
            return Err(RelayError::TokenTypeNotInitialized(auth.token.clone()));
        }

        let expected_nonce = self.nonces.current_nonce(auth.sender);
        if expected_nonce != auth.nonce {
            return Err(RelayError::NonceMismatch {
                expected: expected_nonce,
                got: auth.nonce,
            });
        }

        let required = auth
            .amount
            .checked_add(fee.total_fee)
            .ok_or(RelayError::FeeOverflow)?;
        let available = self.ledger.balance_of(auth.sender, &auth.token);
        if available < required {
            return Err(RelayError::InsufficientCustodialBalance {
                needed: required,
                available,
            });
        }

        // No credited party may be pushed past u64::MAX. Credited parties
        // can alias each other (and the sender), so project the post-debit
        // balances and apply each credit against the running value.
        let mut projected: HashMap<Address, u64> = HashMap::new();
        projected.insert(auth.sender, available - required);
        for (party, credit) in [
            (auth.recipient, auth.amount),
            (self.config.treasury, fee.protocol_fee),
            (relayer, fee.gas_cost),
        ] {
            let balance = projected
                .entry(party)
                .or_insert_with(|| self.ledger.balance_of(party, &auth.token));
            *balance = balance
                .checked_add(credit)
                .ok_or(RelayError::BalanceOverflow {
                    value: *balance,
                    added: credit,
                })?;
        }

        // --- Commit (every gate has passed; none of these can fail) ---
        self.nonces.advance(auth.sender, auth.nonce)?;

        let mut debited = self.ledger.debit(auth.sender, &auth.token, required)?;
        let to_recipient = debited.split(auth.amount)?;
        let to_treasury = debited.split(fee.protocol_fee)?;
        // What remains of the debited coin is exactly the gas reimbursement.
        self.ledger.credit(auth.recipient, to_recipient)?;
        self.ledger.credit(self.config.treasury, to_treasury)?;
        self.ledger.credit(relayer, debited)?;

        // The receipt is stamped with the same clock the deadline gate
        // used, so injected time sources stay consistent end to end.
        let executed_at = chrono::DateTime::from_timestamp(
            i64::try_from(now).unwrap_or(i64::MAX),
            0,
        )
        .unwrap_or_default();

        let receipt = SettlementReceipt {
            sender: auth.sender,
            recipient: auth.recipient,
            relayer,
            token: auth.token.clone(),
            amount: auth.amount,
            gas_cost: fee.gas_cost,
            protocol_fee: fee.protocol_fee,
            total_fee: fee.total_fee,
            executed_at,
        };
        sink.append(openrelay_types::AuditEvent::from_receipt(&receipt));

        tracing::info!(
            sender = %auth.sender.short(),
            recipient = %auth.recipient.short(),
            relayer = %relayer.short(),
            token = %auth.token,
            amount = auth.amount,
            total_fee = fee.total_fee,
            nonce = auth.nonce,
            "settlement committed"
        );

        Ok(receipt)
    }
}
