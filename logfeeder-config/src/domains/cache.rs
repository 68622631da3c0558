//! Log entry cache fragment

use serde::{Deserialize, Serialize};

/// De-duplication cache in front of the outputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogEntryCacheConfig {
    /// Whether the cache is enabled
    pub enabled: bool,

    /// Field used as the cache key
    pub key_field: String,

    /// Maximum number of cached entries
    pub size: usize,

    /// Drop an entry identical to the previous one
    pub last_dedup_enabled: bool,

    /// Window (in milliseconds) within which duplicates are dropped
    pub dedup_interval_ms: u64,
}

impl Default for LogEntryCacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            key_field: "log_message".to_string(),
            size: 100,
            last_dedup_enabled: false,
            dedup_interval_ms: 1000,
        }
    }
}
