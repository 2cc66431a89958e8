use readiness_core::{ConfigError, MonitorConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "readiness-dashboard.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub monitor: MonitorConfig,
}

fn default_feed_url() -> String {
    "https://api.zeromox.com/api/info".to_string()
}

fn default_refresh_interval_secs() -> u64 {
    60
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            feed_url: default_feed_url(),
            refresh_interval_secs: default_refresh_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            monitor: MonitorConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = toml::from_str(contents)?;

        if config.refresh_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "refresh_interval_secs cannot be zero".to_string(),
            ));
        }
        config.monitor.validate()?;

        Ok(config)
    }
}
