//! Admin controls: pause, parameter updates, admin transfer, token
//! registration, and emergency unwind.
//!
//! Every operation here requires `caller == config.admin`. Admin transfer is
//! single-step; there is no propose/accept handshake. `update_config` applies
//! the new values without bounds validation — operators self-police.

use openrelay_ledger::TokenVault;
use openrelay_types::{Address, RelayError, Result};

use crate::engine::SettlementEngine;

impl SettlementEngine {
    fn require_admin(&self, caller: Address) -> Result<()> {
        if caller == self.config.admin {
            Ok(())
        } else {
            Err(RelayError::NotAdmin(caller))
        }
    }

    /// Pause or unpause settlement. Takes effect for all subsequent calls.
    pub fn set_paused(&mut self, caller: Address, paused: bool) -> Result<()> {
        self.require_admin(caller)?;
        self.config.paused = paused;
        tracing::warn!(admin = %caller.short(), paused, "pause flag changed");
        Ok(())
    }

    /// Replace treasury address, fee margin, and gas-cost floor.
    pub fn update_config(
        &mut self,
        caller: Address,
        treasury: Address,
        fee_margin: u64,
        base_gas_cost: u64,
    ) -> Result<()> {
        self.require_admin(caller)?;
        self.config.treasury = treasury;
        self.config.fee_margin = fee_margin;
        self.config.base_gas_cost = base_gas_cost;
        tracing::info!(
            admin = %caller.short(),
            treasury = %treasury.short(),
            fee_margin,
            base_gas_cost,
            "config updated"
        );
        Ok(())
    }

    /// Toggle the self-transfer rejection policy.
    pub fn set_reject_self_transfer(&mut self, caller: Address, reject: bool) -> Result<()> {
        self.require_admin(caller)?;
        self.config.reject_self_transfer = reject;
        Ok(())
    }

    /// Hand the admin role to `new_admin`. Single-step and immediate.
    pub fn transfer_admin(&mut self, caller: Address, new_admin: Address) -> Result<()> {
        self.require_admin(caller)?;
        self.config.admin = new_admin;
        tracing::warn!(
            old = %caller.short(),
            new = %new_admin.short(),
            "admin transferred"
        );
        Ok(())
    }

    /// Register a token type with the custodial ledger.
    pub fn register_token(&mut self, caller: Address, token: &str) -> Result<()> {
        self.require_admin(caller)?;
        self.ledger.register_token(token);
        Ok(())
    }

    /// Unwind a user's custodial balance back to that same user's external
    /// balance. This is not a seizure: value can only return to its owner.
    ///
    /// # Errors
    /// - `NotAdmin` for any caller but the admin
    /// - `InsufficientCustodialBalance` if the user's stored amount is below
    ///   `amount`
    pub fn emergency_withdraw(
        &mut self,
        caller: Address,
        vault: &mut dyn TokenVault,
        user: Address,
        token: &str,
        amount: u64,
    ) -> Result<()> {
        self.require_admin(caller)?;
        self.ledger.withdraw(vault, user, token, amount)?;
        tracing::warn!(
            admin = %caller.short(),
            user = %user.short(),
            token,
            amount,
            "emergency withdrawal"
        );
        Ok(())
    }
}
