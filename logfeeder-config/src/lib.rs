//! Configuration resolution for the LogFeeder log shipper
//!
//! This crate turns the flat key/value pairs of `logfeeder.properties`,
//! layered under environment variable and system property overrides, into
//! one typed, read-only [`LogFeederProps`] shared by every other subsystem.

pub mod docs;
pub mod error;
pub mod loader;
pub mod properties;
pub mod props;
pub mod resolver;
pub mod settings;
pub mod source;

// Sub-configuration fragments owned by other subsystems
pub mod domains;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use props::{LogFeederProps, OverrideBuilder};
pub use resolver::SettingValue;
pub use settings::{SettingDeclaration, SettingDefault, SettingKind, DECLARATIONS, LOGFEEDER_PROPERTIES_FILE};
pub use source::{Environment, EnvironmentVariables, PropertyLayer, PropertySource};

// Re-export domain configurations
pub use domains::{
    cache::LogEntryCacheConfig,
    mode::{CloudStorageDestination, LogFeederMode},
    output::{HdfsOutputConfig, RolloverConfig, S3OutputConfig},
    security::LogFeederSecurityConfig,
    simulate::InputSimulateConfig,
    SubConfigs,
};
