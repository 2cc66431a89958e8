//! Readiness Monitor Consensus Signals
//!
//! Derives online status, per-window readiness votes and stake-weighted
//! candidate rankings from a validator snapshot.

pub mod aggregator;
pub mod classifier;
pub mod heartbeat;
pub mod processor;
pub mod report;
pub mod voting;

pub use aggregator::{online_percentage, RankedCandidate, WindowRanking, WindowTally};
pub use classifier::{classify_heartbeat, classify_readiness_vote, first_qualifying};
pub use heartbeat::{evaluate_online, OnlineStatus, RecencyBand};
pub use processor::SnapshotProcessor;
pub use report::{ReadyCell, Report, ValidatorView};
pub use voting::{evaluate_readiness, ReadinessVote};
