//! Deployment configuration
//!
//! TTLs and timeouts are explicit, per-deployment knobs; nothing in
//! the adapters hardcodes them.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum age of a cached durable read (observed 5-30s in production)
    #[serde(default = "default_cache_ttl", with = "humantime_serde")]
    pub cache_ttl: Duration,

    /// Per-call budget for durable source I/O
    #[serde(default = "default_fetch_timeout", with = "humantime_serde")]
    pub fetch_timeout: Duration,

    /// Environment-level mode override; validated by the mode resolver
    #[serde(default)]
    pub app_mode: Option<String>,

    /// Backing file for the file durable source; memory-only when unset
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Maximum config payload size in bytes
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,

    /// Algorithm candidates considered before the hot-search merge
    #[serde(default = "default_hot_search_candidates")]
    pub hot_search_candidates: usize,

    /// Default length of the served hot-search list
    #[serde(default = "default_hot_search_limit")]
    pub hot_search_limit: usize,

    /// Default search-log lookback window in days
    #[serde(default = "default_hot_search_lookback_days")]
    pub hot_search_lookback_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: default_cache_ttl(),
            fetch_timeout: default_fetch_timeout(),
            app_mode: None,
            data_file: None,
            max_payload_bytes: default_max_payload_bytes(),
            hot_search_candidates: default_hot_search_candidates(),
            hot_search_limit: default_hot_search_limit(),
            hot_search_lookback_days: default_hot_search_lookback_days(),
        }
    }
}

impl Config {
    /// Assemble a config from process environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(mode) = std::env::var("APP_MODE") {
            if !mode.is_empty() {
                config.app_mode = Some(mode);
            }
        }
        if let Ok(path) = std::env::var("DATA_FILE") {
            if !path.is_empty() {
                config.data_file = Some(PathBuf::from(path));
            }
        }
        if let Some(secs) = env_u64("CACHE_TTL_SECS") {
            config.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(secs) = env_u64("FETCH_TIMEOUT_SECS") {
            config.fetch_timeout = Duration::from_secs(secs);
        }

        config
    }
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok()?.parse().ok()
}

fn default_cache_ttl() -> Duration {
    Duration::from_secs(5)
}

fn default_fetch_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_max_payload_bytes() -> usize {
    1024 * 1024 // 1MB
}

fn default_hot_search_candidates() -> usize {
    15
}

fn default_hot_search_limit() -> usize {
    10
}

fn default_hot_search_lookback_days() -> u32 {
    7
}
