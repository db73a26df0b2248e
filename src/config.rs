use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_BASE_URL, DEFAULT_DATABASE, DEFAULT_MAX_ATTEMPTS, DEFAULT_THROTTLE_MS,
    DEFAULT_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime settings, layered as defaults < optional TOML file <
/// `INMET_SYNC_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Provider endpoint; window requests append `/{start}/{end}/{code}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// SQLite database file.
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Fetch attempts per window before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Upper bound of the randomized pre-request delay, in milliseconds.
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_database() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE)
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_throttle_ms() -> u64 {
    DEFAULT_THROTTLE_MS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            database: default_database(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            throttle_ms: default_throttle_ms(),
        }
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        let layered = builder
            .add_source(config::Environment::with_prefix("INMET_SYNC"))
            .build()?;
        Ok(layered.try_deserialize()?)
    }
}
