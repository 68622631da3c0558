//! Input simulation fragment

use serde::{Deserialize, Serialize};

/// Synthetic input generation, used for load testing the shipper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSimulateConfig {
    /// Number of simulated inputs; zero disables simulation
    pub input_number: u32,
    pub log_ids: Vec<String>,
    pub log_levels: Vec<String>,
    pub min_log_words: u32,
    pub max_log_words: u32,
    pub sleep_millis: u64,
}

impl Default for InputSimulateConfig {
    fn default() -> Self {
        Self {
            input_number: 0,
            log_ids: Vec::new(),
            log_levels: vec!["WARN".to_string()],
            min_log_words: 5,
            max_log_words: 5,
            sleep_millis: 10_000,
        }
    }
}

impl InputSimulateConfig {
    pub fn is_enabled(&self) -> bool {
        self.input_number > 0
    }
}
