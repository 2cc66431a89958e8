//! Consolidated per-snapshot report

use crate::aggregator::WindowRanking;
use crate::heartbeat::{OnlineStatus, RecencyBand};
use crate::voting::ReadinessVote;
use serde::{Deserialize, Serialize};

/// Derived state of one validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorView {
    pub address: String,

    /// Deposit plus delegated stake, smallest unit
    pub total_stake: u64,

    pub stake_portion: f64,

    pub online: OnlineStatus,

    pub recency: RecencyBand,

    /// One entry per configured window
    pub votes: Vec<Option<ReadinessVote>>,
}

/// How a validator's vote in one window relates to that window's leader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyCell<'a> {
    NotReady,
    /// Voted for the leading candidate
    Leading(&'a ReadinessVote),
    /// Voted for some other candidate
    Dissenting(&'a ReadinessVote),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Consensus label passed through from the feed
    pub consensus: String,

    /// Evaluation time used for recency, unix milliseconds
    pub generated_at_millis: i64,

    /// Sum of all validators' total stake, smallest unit
    pub total_stake: u64,

    /// Stake portion of validators with a fresh heartbeat
    pub online_percentage: f64,

    pub validators: Vec<ValidatorView>,

    /// One ranking per configured window, in window order
    pub windows: Vec<WindowRanking>,
}

impl Report {
    pub fn has_votes(&self) -> bool {
        self.windows.iter().any(|w| !w.candidates.is_empty())
    }

    /// Last configured window that received any vote
    pub fn latest_active_window(&self) -> Option<&WindowRanking> {
        self.windows.iter().rev().find(|w| !w.candidates.is_empty())
    }

    /// Leader's stake portion in the latest active window, 0 when nobody voted
    pub fn ready_percentage(&self) -> f64 {
        self.latest_active_window()
            .and_then(WindowRanking::leader)
            .map(|leader| leader.accumulated_portion)
            .unwrap_or(0.0)
    }

    pub fn ready_cell(&self, validator_index: usize, window_index: usize) -> ReadyCell<'_> {
        let vote = self
            .validators
            .get(validator_index)
            .and_then(|v| v.votes.get(window_index))
            .and_then(Option::as_ref);

        match (vote, self.windows.get(window_index)) {
            (Some(vote), Some(ranking)) if ranking.is_leading(&vote.candidate_value) => {
                ReadyCell::Leading(vote)
            }
            (Some(vote), _) => ReadyCell::Dissenting(vote),
            (None, _) => ReadyCell::NotReady,
        }
    }
}
