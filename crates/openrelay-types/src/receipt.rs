//! Settlement receipts and audit events.
//!
//! A [`SettlementReceipt`] is returned to the relayer that submitted the
//! transfer; an [`AuditEvent`] with the same figures is appended to the
//! event sink. Events are purely observational — the engine never reads
//! them back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Address, EventId, TokenTag};

/// Outcome of one successful settlement, returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettlementReceipt {
    /// The balance owner who authorized the transfer.
    pub sender: Address,
    /// Who received `amount`.
    pub recipient: Address,
    /// Who submitted the transfer and received the gas reimbursement.
    pub relayer: Address,
    /// Token type transferred.
    pub token: TokenTag,
    /// Amount credited to the recipient.
    pub amount: u64,
    /// Gas reimbursement credited to the relayer.
    pub gas_cost: u64,
    /// Margin credited to the treasury.
    pub protocol_fee: u64,
    /// `gas_cost + protocol_fee`; what the sender paid on top of `amount`.
    pub total_fee: u64,
    /// When the settlement committed.
    pub executed_at: DateTime<Utc>,
}

/// One append-only audit record, written once per settlement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditEvent {
    /// Unique, time-ordered event id.
    pub id: EventId,
    pub sender: Address,
    pub recipient: Address,
    pub relayer: Address,
    pub token: TokenTag,
    pub amount: u64,
    pub gas_cost: u64,
    pub protocol_fee: u64,
    pub total_fee: u64,
    /// When the settlement committed.
    pub recorded_at: DateTime<Utc>,
}

impl AuditEvent {
    /// Build the audit event matching a receipt.
    #[must_use]
    pub fn from_receipt(receipt: &SettlementReceipt) -> Self {
        Self {
            id: EventId::new(),
            sender: receipt.sender,
            recipient: receipt.recipient,
            relayer: receipt.relayer,
            token: receipt.token.clone(),
            amount: receipt.amount,
            gas_cost: receipt.gas_cost,
            protocol_fee: receipt.protocol_fee,
            total_fee: receipt.total_fee,
            recorded_at: receipt.executed_at,
        }
    }
}
