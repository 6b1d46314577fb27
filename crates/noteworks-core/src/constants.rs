//! Shared defaults and well-known names.

/// Database file name inside the app data directory.
pub const DB_FILE_NAME: &str = "noteworks.db";

/// App data directory name (placed under the platform data dir).
pub const APP_DIR_NAME: &str = "noteworks";

/// Config file name inside the app data directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default interval between scheduler polls (seconds).
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
