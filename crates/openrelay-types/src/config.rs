//! Protocol configuration: admin identity, pause flag, and fee parameters.

use serde::{Deserialize, Serialize};

use crate::{constants, Address};

/// The singleton protocol configuration.
///
/// Mutated only through the admin operations on the settlement engine; the
/// admin identity itself is transferable in a single step. `update_config`
/// deliberately performs no bounds validation on the new fee margin or gas
/// floor — operators self-police these values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProtocolConfig {
    /// The one address allowed to mutate this configuration.
    pub admin: Address,
    /// When set, every settlement attempt fails immediately.
    pub paused: bool,
    /// Fee multiplier over gas cost, in percent (110 = gas cost + 10%).
    pub fee_margin: u64,
    /// Where the protocol's fee margin is credited.
    pub treasury: Address,
    /// Minimum gas cost a relayer may declare.
    pub base_gas_cost: u64,
    /// Policy flag: reject transfers where recipient == sender.
    /// Off by default; the base protocol allows self-transfers.
    pub reject_self_transfer: bool,
}

impl ProtocolConfig {
    /// Create a config with default fee parameters, unpaused.
    #[must_use]
    pub fn new(admin: Address, treasury: Address) -> Self {
        Self {
            admin,
            paused: false,
            fee_margin: constants::DEFAULT_FEE_MARGIN,
            treasury,
            base_gas_cost: constants::DEFAULT_BASE_GAS_COST,
            reject_self_transfer: false,
        }
    }
}
