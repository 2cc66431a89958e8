//! Validator records from the feed

use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validator {
    pub address: String,

    /// Own deposit in the smallest unit
    pub deposit_stake: u64,

    /// Stake delegated by others in the smallest unit
    pub delegated_stake: u64,

    /// Share of total network stake (0.0-100.0)
    pub stake_portion: f64,

    /// Recent transactions in feed order (not necessarily chronological)
    pub transactions: Vec<Transaction>,
}

impl Validator {
    pub fn new(
        address: impl Into<String>,
        deposit_stake: u64,
        delegated_stake: u64,
        stake_portion: f64,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            address: address.into(),
            deposit_stake,
            delegated_stake,
            stake_portion,
            transactions,
        }
    }

    pub fn total_stake(&self) -> u64 {
        self.deposit_stake.saturating_add(self.delegated_stake)
    }
}
