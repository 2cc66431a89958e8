//! Monitor configuration
//!
//! Burn address, heartbeat floor, readiness windows and recency thresholds.
//! Every field has a default so a partial TOML file is enough.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Signaling transactions are sent to the all-zero address.
pub const DEFAULT_BURN_ADDRESS: &str = "0000000000000000000000000000000000000000";

/// Heartbeats before this height are known false positives from before the
/// upstream fix, three windows ahead of the first transition block.
pub const DEFAULT_ONLINE_FLOOR_BLOCK_HEIGHT: u64 = 3_451_680;

pub const DEFAULT_FRESH_THRESHOLD_HOURS: f64 = 3.0;
pub const DEFAULT_STALE_THRESHOLD_HOURS: f64 = 6.0;

const FIRST_WINDOW_START: u64 = 3_456_000;
const WINDOW_LENGTH: u64 = 1_440;
const WINDOW_COUNT: u64 = 6;

/// Closed block-height interval `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub start: u64,
    pub end: u64,
}

impl Window {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, block_height: u64) -> bool {
        self.start <= block_height && block_height <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_burn_address")]
    pub burn_address: String,

    #[serde(default = "default_online_floor_block_height")]
    pub online_floor_block_height: u64,

    #[serde(default = "default_windows")]
    pub windows: Vec<Window>,

    #[serde(default = "default_fresh_threshold_hours")]
    pub fresh_threshold_hours: f64,

    #[serde(default = "default_stale_threshold_hours")]
    pub stale_threshold_hours: f64,
}

fn default_burn_address() -> String {
    DEFAULT_BURN_ADDRESS.to_string()
}

fn default_online_floor_block_height() -> u64 {
    DEFAULT_ONLINE_FLOOR_BLOCK_HEIGHT
}

/// Six consecutive windows of 1440 blocks. Neighbours share their boundary
/// block.
fn default_windows() -> Vec<Window> {
    (0..WINDOW_COUNT)
        .map(|i| {
            let start = FIRST_WINDOW_START + i * WINDOW_LENGTH;
            Window::new(start, start + WINDOW_LENGTH)
        })
        .collect()
}

fn default_fresh_threshold_hours() -> f64 {
    DEFAULT_FRESH_THRESHOLD_HOURS
}

fn default_stale_threshold_hours() -> f64 {
    DEFAULT_STALE_THRESHOLD_HOURS
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            burn_address: default_burn_address(),
            online_floor_block_height: default_online_floor_block_height(),
            windows: default_windows(),
            fresh_threshold_hours: default_fresh_threshold_hours(),
            stale_threshold_hours: default_stale_threshold_hours(),
        }
    }
}

impl MonitorConfig {
    /// Load and validate configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: MonitorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.burn_address.is_empty() {
            return Err(ConfigError::Invalid("Empty burn address".to_string()));
        }

        if self.windows.is_empty() {
            return Err(ConfigError::Invalid(
                "At least one window is required".to_string(),
            ));
        }

        if let Some(w) = self.windows.iter().find(|w| w.start > w.end) {
            return Err(ConfigError::Invalid(format!(
                "Window start {} is after its end {}",
                w.start, w.end
            )));
        }

        let thresholds_ok = self.fresh_threshold_hours.is_finite()
            && self.stale_threshold_hours.is_finite()
            && self.fresh_threshold_hours > 0.0
            && self.fresh_threshold_hours <= self.stale_threshold_hours;
        if !thresholds_ok {
            return Err(ConfigError::Invalid(format!(
                "Recency thresholds must satisfy 0 < fresh <= stale (fresh {}, stale {})",
                self.fresh_threshold_hours, self.stale_threshold_hours
            )));
        }

        Ok(())
    }
}
