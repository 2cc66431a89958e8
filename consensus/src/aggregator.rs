//! Stake-weighted aggregation across validators
//!
//! Tallies are built fresh for every snapshot and returned by value.
//! Floating-point sums depend on addition order, so contributions are sorted
//! before they are folded. Rankings are then identical whatever order the
//! validators arrived in.

use crate::heartbeat::RecencyBand;
use crate::voting::ReadinessVote;
use readiness_core::Window;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Accumulated stake portion per candidate value for one window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowTally {
    entries: BTreeMap<String, f64>,
}

impl WindowTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `(stake_portion, vote)` pairs. Pairs without a vote are skipped.
    pub fn from_votes<'a, I>(votes: I) -> Self
    where
        I: IntoIterator<Item = (f64, Option<&'a ReadinessVote>)>,
    {
        let mut contributions: Vec<(&str, f64)> = votes
            .into_iter()
            .filter_map(|(portion, vote)| vote.map(|v| (v.candidate_value.as_str(), portion)))
            .collect();

        contributions.sort_by(|(a, pa), (b, pb)| a.cmp(b).then_with(|| pa.total_cmp(pb)));

        let mut tally = Self::new();
        for (candidate, portion) in contributions {
            tally.add(candidate, portion);
        }
        tally
    }

    pub fn add(&mut self, candidate_value: &str, stake_portion: f64) {
        *self.entries.entry(candidate_value.to_string()).or_insert(0.0) += stake_portion;
    }

    pub fn get(&self, candidate_value: &str) -> Option<f64> {
        self.entries.get(candidate_value).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all accumulated portions
    pub fn total_portion(&self) -> f64 {
        self.entries.values().sum()
    }

    /// Candidates by accumulated portion, highest first. Equal portions are
    /// ordered by ascending candidate value.
    pub fn ranked(&self) -> Vec<RankedCandidate> {
        let mut ranked: Vec<RankedCandidate> = self
            .entries
            .iter()
            .map(|(candidate, portion)| RankedCandidate {
                candidate_value: candidate.clone(),
                accumulated_portion: *portion,
            })
            .collect();
        ranked.sort_by(compare_ranked);
        ranked
    }
}

fn compare_ranked(a: &RankedCandidate, b: &RankedCandidate) -> Ordering {
    b.accumulated_portion
        .total_cmp(&a.accumulated_portion)
        .then_with(|| a.candidate_value.cmp(&b.candidate_value))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub candidate_value: String,
    pub accumulated_portion: f64,
}

/// Ranked candidates for one configured window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRanking {
    pub window: Window,
    pub candidates: Vec<RankedCandidate>,
}

impl WindowRanking {
    pub fn from_tally(window: Window, tally: &WindowTally) -> Self {
        Self {
            window,
            candidates: tally.ranked(),
        }
    }

    /// Candidate with the most stake behind it, if anyone voted
    pub fn leader(&self) -> Option<&RankedCandidate> {
        self.candidates.first()
    }

    pub fn is_leading(&self, candidate_value: &str) -> bool {
        self.leader()
            .is_some_and(|leader| leader.candidate_value == candidate_value)
    }
}

/// Stake share of validators whose heartbeat is fresh
pub fn online_percentage<I>(validators: I) -> f64
where
    I: IntoIterator<Item = (f64, RecencyBand)>,
{
    let mut portions: Vec<f64> = validators
        .into_iter()
        .filter(|(_, band)| band.counts_as_online())
        .map(|(portion, _)| portion)
        .collect();
    portions.sort_by(f64::total_cmp);
    portions.into_iter().sum()
}
