//! Snapshot processing
//!
//! Evaluates every validator independently (in parallel), then folds the
//! votes per window. The report is returned only once complete.

use crate::aggregator::{online_percentage, WindowRanking, WindowTally};
use crate::heartbeat::evaluate_online;
use crate::report::{Report, ValidatorView};
use crate::voting::evaluate_readiness;
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use readiness_core::{MonitorConfig, Snapshot, SnapshotError, Validator};

/// Tolerance for rounding in the feed's portions
const PORTION_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Default)]
pub struct SnapshotProcessor {
    config: MonitorConfig,
}

impl SnapshotProcessor {
    pub fn new(config: MonitorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Ingest a raw feed body and process it. Malformed snapshots produce no
    /// report at all.
    pub fn process_json(&self, body: &str, now: DateTime<Utc>) -> Result<Report, SnapshotError> {
        let snapshot = Snapshot::from_json(body)?;
        Ok(self.process(&snapshot, now))
    }

    /// Derive the report for one snapshot as of `now`
    pub fn process(&self, snapshot: &Snapshot, now: DateTime<Utc>) -> Report {
        let total_stake = snapshot
            .validators
            .iter()
            .map(Validator::total_stake)
            .fold(0u64, u64::saturating_add);

        let validators: Vec<ValidatorView> = snapshot
            .validators
            .par_iter()
            .map(|v| self.evaluate_validator(v, now))
            .collect();

        let windows: Vec<WindowRanking> = self
            .config
            .windows
            .iter()
            .enumerate()
            .map(|(index, window)| {
                let tally = WindowTally::from_votes(validators.iter().map(|v| {
                    let vote = v.votes.get(index).and_then(Option::as_ref);
                    (v.stake_portion, vote)
                }));

                if tally.total_portion() > 100.0 + PORTION_EPSILON {
                    log::warn!(
                        "Window #{}-#{} tally exceeds 100% ({:.4}%)",
                        window.start,
                        window.end,
                        tally.total_portion()
                    );
                }

                WindowRanking::from_tally(*window, &tally)
            })
            .collect();

        let online_percentage =
            online_percentage(validators.iter().map(|v| (v.stake_portion, v.recency)));

        log::debug!(
            "Processed snapshot: {} validators, total stake {}, {:.2}% online",
            validators.len(),
            total_stake,
            online_percentage
        );
        for ranking in &windows {
            if let Some(leader) = ranking.leader() {
                log::debug!(
                    "Window #{}-#{}: leader {} with {:.2}%",
                    ranking.window.start,
                    ranking.window.end,
                    leader.candidate_value,
                    leader.accumulated_portion
                );
            }
        }

        Report {
            consensus: snapshot.consensus.clone(),
            generated_at_millis: now.timestamp_millis(),
            total_stake,
            online_percentage,
            validators,
            windows,
        }
    }

    /// Everything derived from a single validator; never looks at others.
    fn evaluate_validator(&self, validator: &Validator, now: DateTime<Utc>) -> ValidatorView {
        let online = evaluate_online(validator, &self.config);
        let recency = online.recency(now, &self.config);
        let votes = evaluate_readiness(validator, &self.config.windows, &self.config);

        ValidatorView {
            address: validator.address.clone(),
            total_stake: validator.total_stake(),
            stake_portion: validator.stake_portion,
            online,
            recency,
            votes,
        }
    }
}
