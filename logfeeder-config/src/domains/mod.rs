//! Sub-configuration fragments and enumerations shared with other subsystems

pub mod cache;
pub mod mode;
pub mod output;
pub mod security;
pub mod simulate;

use std::sync::Arc;

/// Fragments resolved elsewhere and wired into [`LogFeederProps`](crate::LogFeederProps)
///
/// Each fragment is held by reference; the aggregate never looks inside.
#[derive(Debug, Clone, Default)]
pub struct SubConfigs {
    pub rollover: Arc<output::RolloverConfig>,
    pub s3_output: Arc<output::S3OutputConfig>,
    pub hdfs_output: Arc<output::HdfsOutputConfig>,
    pub security: Arc<security::LogFeederSecurityConfig>,
    pub log_entry_cache: Arc<cache::LogEntryCacheConfig>,
    pub input_simulate: Arc<simulate::InputSimulateConfig>,
}

impl SubConfigs {
    pub fn with_rollover(mut self, config: output::RolloverConfig) -> Self {
        self.rollover = Arc::new(config);
        self
    }

    pub fn with_s3_output(mut self, config: output::S3OutputConfig) -> Self {
        self.s3_output = Arc::new(config);
        self
    }

    pub fn with_hdfs_output(mut self, config: output::HdfsOutputConfig) -> Self {
        self.hdfs_output = Arc::new(config);
        self
    }

    pub fn with_security(mut self, config: security::LogFeederSecurityConfig) -> Self {
        self.security = Arc::new(config);
        self
    }

    pub fn with_log_entry_cache(mut self, config: cache::LogEntryCacheConfig) -> Self {
        self.log_entry_cache = Arc::new(config);
        self
    }

    pub fn with_input_simulate(mut self, config: simulate::InputSimulateConfig) -> Self {
        self.input_simulate = Arc::new(config);
        self
    }
}
