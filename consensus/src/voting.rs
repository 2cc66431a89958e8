//! Readiness votes per window

use crate::classifier::{classify_readiness_vote, first_qualifying};
use readiness_core::{MonitorConfig, Validator, Window};
use serde::{Deserialize, Serialize};

/// A validator's vote for one window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessVote {
    /// Proposed candidate hash (the vote payload)
    pub candidate_value: String,

    /// Hash of the voting transaction
    pub transaction_reference: String,
}

/// One entry per window, in window order. `None` means the validator has
/// not voted in that window.
pub fn evaluate_readiness(
    validator: &Validator,
    windows: &[Window],
    config: &MonitorConfig,
) -> Vec<Option<ReadinessVote>> {
    windows
        .iter()
        .map(|window| {
            first_qualifying(&validator.transactions, |txn| {
                classify_readiness_vote(txn, &config.burn_address, window)
            })
            .and_then(|txn| {
                txn.payload.as_ref().map(|payload| ReadinessVote {
                    candidate_value: payload.clone(),
                    transaction_reference: txn.hash.clone(),
                })
            })
        })
        .collect()
}
