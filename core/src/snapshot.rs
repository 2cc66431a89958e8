//! Validator snapshot ingestion
//!
//! The feed is parsed into loosely typed `Raw*` records first, then checked
//! field by field. Missing or out-of-range required fields reject the whole
//! snapshot instead of being defaulted, so everything downstream works on a
//! fully typed [`Snapshot`].

use crate::error::{Result, SnapshotError};
use crate::transaction::Transaction;
use crate::validator::Validator;
use serde::{Deserialize, Serialize};

/// One validated feed snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Consensus label reported by the feed
    pub consensus: String,
    pub validators: Vec<Validator>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    consensus: Option<String>,
    validators: Option<Vec<RawValidator>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawValidator {
    address: Option<String>,
    deposit: Option<f64>,
    delegated_stake: Option<f64>,
    portion: Option<f64>,
    transactions: Option<Vec<RawTransaction>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransaction {
    hash: Option<String>,
    block_number: Option<u64>,
    timestamp: Option<i64>,
    to: Option<String>,
    value: Option<u64>,
    #[serde(default)]
    data: Option<String>,
}

impl Snapshot {
    pub fn new(consensus: impl Into<String>, validators: Vec<Validator>) -> Self {
        Self {
            consensus: consensus.into(),
            validators,
        }
    }

    /// Parse and validate a snapshot from the feed's JSON body
    pub fn from_json(body: &str) -> Result<Self> {
        let raw: RawSnapshot = serde_json::from_str(body)?;
        raw.validate()
    }
}

fn require<T>(value: Option<T>, path: &str, field: &'static str) -> Result<T> {
    value.ok_or_else(|| SnapshotError::MissingField {
        path: path.to_string(),
        field,
    })
}

/// Stakes arrive as JSON numbers but must be whole, non-negative amounts.
fn stake_amount(value: f64, path: &str, field: &'static str) -> Result<u64> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(SnapshotError::InvalidField {
            path: path.to_string(),
            field,
            reason: format!("expected a non-negative whole amount, got {}", value),
        });
    }
    Ok(value as u64)
}

impl RawSnapshot {
    fn validate(self) -> Result<Snapshot> {
        let consensus = require(self.consensus, "snapshot", "consensus")?;
        let validators = require(self.validators, "snapshot", "validators")?
            .into_iter()
            .enumerate()
            .map(|(i, v)| v.validate(&format!("validators[{}]", i)))
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Ingested snapshot with {} validators", validators.len());

        Ok(Snapshot {
            consensus,
            validators,
        })
    }
}

impl RawValidator {
    fn validate(self, path: &str) -> Result<Validator> {
        let address = require(self.address, path, "address")?;
        let deposit = stake_amount(require(self.deposit, path, "deposit")?, path, "deposit")?;
        let delegated = stake_amount(
            require(self.delegated_stake, path, "delegatedStake")?,
            path,
            "delegatedStake",
        )?;

        let portion = require(self.portion, path, "portion")?;
        if !portion.is_finite() || !(0.0..=100.0).contains(&portion) {
            return Err(SnapshotError::InvalidField {
                path: path.to_string(),
                field: "portion",
                reason: format!("expected a percentage between 0 and 100, got {}", portion),
            });
        }

        let transactions = require(self.transactions, path, "transactions")?
            .into_iter()
            .enumerate()
            .map(|(i, tx)| tx.validate(&format!("{}.transactions[{}]", path, i)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Validator {
            address,
            deposit_stake: deposit,
            delegated_stake: delegated,
            stake_portion: portion,
            transactions,
        })
    }
}

impl RawTransaction {
    fn validate(self, path: &str) -> Result<Transaction> {
        Ok(Transaction {
            hash: require(self.hash, path, "hash")?,
            recipient: require(self.to, path, "to")?,
            block_height: require(self.block_number, path, "blockNumber")?,
            timestamp_seconds: require(self.timestamp, path, "timestamp")?,
            value: require(self.value, path, "value")?,
            payload: self.data,
        })
    }
}
