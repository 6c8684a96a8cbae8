//! Fee computation for gasless settlement.
//!
//! The sender pays `total_fee = gas_cost + protocol_fee` out of the
//! transferred token, where
//! `protocol_fee = floor(gas_cost * (fee_margin - 100) / 100)`.
//! The multiplication runs in `u128`; an intermediate product that does not
//! fit back into `u64` fails with `FeeOverflow` instead of wrapping.

use openrelay_types::{constants::FEE_MARGIN_UNIT, RelayError, Result};

/// The three components of what the sender pays on top of `amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeBreakdown {
    /// Reimbursement credited to the relayer.
    pub gas_cost: u64,
    /// Margin credited to the treasury.
    pub protocol_fee: u64,
    /// `gas_cost + protocol_fee`.
    pub total_fee: u64,
}

/// Compute the fee split and enforce the sender's `max_fee` bound.
///
/// A `fee_margin` at or below 100 yields a zero protocol fee.
///
/// # Errors
/// - `FeeOverflow` if the margin product or the total does not fit in `u64`
/// - `FeeExceedsMax` if `total_fee > max_fee`
pub fn compute(gas_cost: u64, fee_margin: u64, max_fee: u64) -> Result<FeeBreakdown> {
    let margin = fee_margin.saturating_sub(FEE_MARGIN_UNIT);

    let product = u128::from(gas_cost) * u128::from(margin);
    let protocol_fee =
        u64::try_from(product / u128::from(FEE_MARGIN_UNIT)).map_err(|_| RelayError::FeeOverflow)?;

    let total_fee = gas_cost
        .checked_add(protocol_fee)
        .ok_or(RelayError::FeeOverflow)?;

    if total_fee > max_fee {
        return Err(RelayError::FeeExceedsMax { total_fee, max_fee });
    }

    Ok(FeeBreakdown {
        gas_cost,
        protocol_fee,
        total_fee,
    })
}
