// Treasury - Custodies escrowed funds and performs disbursements

use crate::identity::AccountId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur while moving funds
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TransferError {
    #[error("Escrow balance would overflow")]
    EscrowOverflow,

    #[error("Escrow underflow: held {held}, required {required}")]
    EscrowUnderflow { held: u64, required: u64 },

    #[error("Account balance would overflow")]
    BalanceOverflow,

    #[error("Unexpected funds pot would overflow")]
    UnexpectedOverflow,
}

/// Holds custodied escrow and per-account disbursed balances.
///
/// Every movement uses checked arithmetic; a failed movement leaves the
/// treasury untouched so the calling operation can abort cleanly.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Treasury {
    /// Total escrowed funds across all open orders
    custodied: u64,
    /// Funds disbursed to accounts (payouts and refunds), withdrawable by them
    balances: HashMap<AccountId, u64>,
    /// Unsolicited incoming funds, held apart from escrow
    unexpected: u64,
}

impl Treasury {
    /// Create an empty treasury
    pub fn new() -> Self {
        Self::default()
    }

    /// Total funds currently held in escrow
    pub fn custodied(&self) -> u64 {
        self.custodied
    }

    /// Disbursed balance of an account
    pub fn balance_of(&self, account: &AccountId) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Unsolicited funds held apart from escrow
    pub fn unexpected(&self) -> u64 {
        self.unexpected
    }

    /// Take a payment into escrow custody
    pub fn custody(&mut self, amount: u64) -> Result<(), TransferError> {
        self.custodied = self
            .custodied
            .checked_add(amount)
            .ok_or(TransferError::EscrowOverflow)?;
        Ok(())
    }

    /// Move `amount` out of escrow into an account's disbursed balance.
    ///
    /// Used for both seller payouts and buyer refunds. Both sides of the
    /// movement are computed before either is committed.
    pub fn disburse(&mut self, to: &AccountId, amount: u64) -> Result<(), TransferError> {
        let remaining = self
            .custodied
            .checked_sub(amount)
            .ok_or(TransferError::EscrowUnderflow {
                held: self.custodied,
                required: amount,
            })?;

        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TransferError::BalanceOverflow)?;

        self.custodied = remaining;
        self.balances.insert(to.clone(), credited);
        Ok(())
    }

    /// Accept unsolicited incoming funds
    pub fn accept_unexpected(&mut self, amount: u64) -> Result<(), TransferError> {
        self.unexpected = self
            .unexpected
            .checked_add(amount)
            .ok_or(TransferError::UnexpectedOverflow)?;
        Ok(())
    }

    /// Credit an account directly, bypassing escrow. Test-only hook for
    /// forcing disbursement overflow.
    #[cfg(test)]
    pub(crate) fn credit_raw(&mut self, to: &AccountId, amount: u64) {
        self.balances.insert(to.clone(), amount);
    }
}
