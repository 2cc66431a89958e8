//! Online status from heartbeat transactions
//!
//! A validator is online once any qualifying heartbeat is seen. How recent
//! that heartbeat is gets reported separately as a [`RecencyBand`].

use crate::classifier::{classify_heartbeat, first_qualifying};
use chrono::{DateTime, Utc};
use readiness_core::{MonitorConfig, Validator};
use serde::{Deserialize, Serialize};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineStatus {
    pub is_online: bool,

    /// Heartbeat time in unix milliseconds
    pub last_heartbeat_millis: Option<i64>,
}

impl OnlineStatus {
    pub fn offline() -> Self {
        Self {
            is_online: false,
            last_heartbeat_millis: None,
        }
    }

    pub fn online(last_heartbeat_millis: i64) -> Self {
        Self {
            is_online: true,
            last_heartbeat_millis: Some(last_heartbeat_millis),
        }
    }

    /// Feed timestamps are unbounded, so the difference saturates
    pub fn hours_since_heartbeat(&self, now: DateTime<Utc>) -> Option<f64> {
        self.last_heartbeat_millis
            .map(|hb| now.timestamp_millis().saturating_sub(hb) as f64 / MILLIS_PER_HOUR)
    }

    /// Classify heartbeat age against the configured thresholds
    pub fn recency(&self, now: DateTime<Utc>, config: &MonitorConfig) -> RecencyBand {
        match self.hours_since_heartbeat(now) {
            Some(hours) if self.is_online => {
                RecencyBand::from_hours(hours, config.fresh_threshold_hours, config.stale_threshold_hours)
            }
            _ => RecencyBand::Offline,
        }
    }
}

/// Heartbeat age classification shown to operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecencyBand {
    /// Heartbeat younger than the fresh threshold
    Fresh,
    /// Between the fresh and stale thresholds
    Stale,
    /// Older than the stale threshold
    LikelyDown,
    /// No heartbeat seen
    Offline,
}

impl RecencyBand {
    pub fn from_hours(hours: f64, fresh_threshold: f64, stale_threshold: f64) -> Self {
        if hours < fresh_threshold {
            RecencyBand::Fresh
        } else if hours < stale_threshold {
            RecencyBand::Stale
        } else {
            RecencyBand::LikelyDown
        }
    }

    /// Only fresh validators count toward the online percentage.
    pub fn counts_as_online(&self) -> bool {
        matches!(self, RecencyBand::Fresh)
    }
}

/// Online status from the first qualifying heartbeat in feed order
pub fn evaluate_online(validator: &Validator, config: &MonitorConfig) -> OnlineStatus {
    first_qualifying(&validator.transactions, |txn| {
        classify_heartbeat(txn, &config.burn_address, config.online_floor_block_height)
    })
    .map(|txn| OnlineStatus::online(txn.timestamp_millis()))
    .unwrap_or_else(OnlineStatus::offline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use readiness_core::config::DEFAULT_BURN_ADDRESS;
    use readiness_core::Transaction;

    const ONLINE: &str = "6f6e6c696e65";

    fn heartbeat(hash: &str, height: u64, timestamp: i64) -> Transaction {
        Transaction::new(hash, DEFAULT_BURN_ADDRESS, height, timestamp, 1, Some(ONLINE.to_string()))
    }

    fn config() -> MonitorConfig {
        MonitorConfig {
            online_floor_block_height: 1_000,
            ..MonitorConfig::default()
        }
    }

    #[test]
    fn test_no_heartbeat_is_offline() {
        let v = Validator::new("v", 1, 0, 10.0, vec![]);
        assert_eq!(evaluate_online(&v, &config()), OnlineStatus::offline());
    }

    #[test]
    fn test_first_heartbeat_in_feed_order_wins() {
        let v = Validator::new(
            "v",
            1,
            0,
            10.0,
            vec![
                heartbeat("older", 1_100, 1_000),
                heartbeat("newer", 1_200, 9_000),
            ],
        );
        let status = evaluate_online(&v, &config());
        assert!(status.is_online);
        assert_eq!(status.last_heartbeat_millis, Some(1_000_000));
    }

    #[test]
    fn test_heartbeat_below_floor_ignored() {
        let v = Validator::new("v", 1, 0, 10.0, vec![heartbeat("early", 999, 1_000)]);
        assert_eq!(evaluate_online(&v, &config()), OnlineStatus::offline());
    }

    #[test]
    fn test_skips_non_qualifying_before_first_match() {
        let noise = Transaction::new("noise", "NQ07 XXXX", 1_100, 5, 1, Some(ONLINE.to_string()));
        let v = Validator::new("v", 1, 0, 10.0, vec![noise, heartbeat("hb", 1_100, 7)]);
        assert_eq!(evaluate_online(&v, &config()).last_heartbeat_millis, Some(7_000));
    }

    #[test]
    fn test_recency_bands() {
        let config = config();
        let now = DateTime::from_timestamp(100_000, 0).unwrap();
        let hours_ago = |h: i64| OnlineStatus::online(now.timestamp_millis() - h * 3_600_000);

        assert_eq!(hours_ago(0).recency(now, &config), RecencyBand::Fresh);
        assert_eq!(hours_ago(2).recency(now, &config), RecencyBand::Fresh);
        assert_eq!(hours_ago(3).recency(now, &config), RecencyBand::Stale);
        assert_eq!(hours_ago(5).recency(now, &config), RecencyBand::Stale);
        assert_eq!(hours_ago(6).recency(now, &config), RecencyBand::LikelyDown);
        assert_eq!(hours_ago(30).recency(now, &config), RecencyBand::LikelyDown);
        assert_eq!(OnlineStatus::offline().recency(now, &config), RecencyBand::Offline);
    }

    #[test]
    fn test_hours_since_heartbeat() {
        let now = DateTime::from_timestamp(7_200, 0).unwrap();
        let status = OnlineStatus::online(0);
        assert_eq!(status.hours_since_heartbeat(now), Some(2.0));
        assert_eq!(OnlineStatus::offline().hours_since_heartbeat(now), None);
    }

    #[test]
    fn test_extreme_heartbeat_timestamps_saturate() {
        let config = config();
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

        let ancient = OnlineStatus::online(i64::MIN);
        let hours = ancient.hours_since_heartbeat(now).unwrap();
        assert_eq!(hours, i64::MAX as f64 / MILLIS_PER_HOUR);
        assert_eq!(ancient.recency(now, &config), RecencyBand::LikelyDown);

        let future = OnlineStatus::online(i64::MAX);
        assert!(future.hours_since_heartbeat(now).unwrap() < 0.0);
        assert_eq!(future.recency(now, &config), RecencyBand::Fresh);
    }

    #[test]
    fn test_far_past_heartbeat_is_likely_down() {
        let v = Validator::new(
            "v",
            1,
            0,
            10.0,
            vec![heartbeat("ancient", 1_100, -9_300_000_000_000_000)],
        );
        let status = evaluate_online(&v, &config());
        assert_eq!(status.last_heartbeat_millis, Some(i64::MIN));

        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(status.recency(now, &config()), RecencyBand::LikelyDown);
    }
}
