//! App configuration, loaded from a TOML file in the data directory.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::{NoteworksError, NoteworksResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scheduler: SchedulerConfig,
}

impl AppConfig {
    /// Load config from a TOML file. A missing file yields defaults;
    /// a present-but-malformed file is an error (silent fallback would
    /// mask typos).
    pub fn load(path: &Path) -> NoteworksResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|e| NoteworksError::Config {
            message: format!("read {}: {e}", path.display()),
        })?;
        toml::from_str(&text).map_err(|e| NoteworksError::Config {
            message: format!("parse {}: {e}", path.display()),
        })
    }
}

/// Reminder scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Interval between due-reminder polls (seconds).
    pub poll_interval_secs: u64,
}

impl SchedulerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: constants::DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}
