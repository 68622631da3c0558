//! The resolved LogFeeder configuration
//!
//! [`LogFeederProps`] is assembled once at startup and shared read-only
//! afterwards. It has no setters; [`LogFeederProps::with_overrides`] builds
//! a separate instance for tests and administrative tooling.

use crate::domains::cache::LogEntryCacheConfig;
use crate::domains::mode::{CloudStorageDestination, LogFeederMode};
use crate::domains::output::{HdfsOutputConfig, RolloverConfig, S3OutputConfig};
use crate::domains::security::LogFeederSecurityConfig;
use crate::domains::simulate::InputSimulateConfig;
use crate::domains::SubConfigs;
use crate::error::{ConfigError, ConfigResult};
use crate::resolver::{resolve_all, split_delimited, ResolvedSettings, SettingValue};
use crate::settings::{keys, DECLARATIONS, LOGFEEDER_PROPERTIES_FILE};
use crate::source::Environment;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Fully typed LogFeeder configuration
#[derive(Debug, Clone)]
pub struct LogFeederProps {
    cluster_name: String,
    tmp_dir: String,
    log_level_filter_enabled: bool,
    solr_implicit_routing: bool,
    include_default_log_levels: Vec<String>,
    conf_dir: String,
    config_files: String,
    checkpoint_extension: String,
    checkpoint_folder: String,
    docker_container_registry_enabled: bool,
    use_local_configs: bool,
    solr_filter_storage: bool,
    zk_filter_storage: bool,
    solr_filter_monitor: bool,
    solr_filter_monitor_interval: i32,
    solr_zk_connect_string: String,
    solr_urls_str: String,
    solr_cloud_discover: bool,
    solr_metadata_collection: String,
    cloud_storage_mode: LogFeederMode,
    cloud_storage_destination: CloudStorageDestination,
    cloud_storage_upload_on_shutdown: bool,
    cloud_storage_uploader_interval_seconds: i32,
    cloud_storage_uploader_timeout_minutes: i32,
    use_cloud_hdfs_client: bool,
    custom_fs: String,
    cloud_base_path: String,
    cloud_storage_use_filters: bool,

    /// Snapshot of the located source, each key resolved through every layer
    properties: BTreeMap<String, String>,

    sub_configs: SubConfigs,
}

impl LogFeederProps {
    /// Assemble from the environment's `logfeeder.properties` source
    pub fn assemble(env: &Environment, sub_configs: SubConfigs) -> ConfigResult<Arc<Self>> {
        Self::assemble_from(env, LOGFEEDER_PROPERTIES_FILE, sub_configs)
    }

    /// Assemble from the property source with the given identifier
    ///
    /// Fails before resolving anything if the source is not present, and
    /// on the first setting that cannot be coerced to its declared kind.
    pub fn assemble_from(
        env: &Environment,
        identifier: &str,
        sub_configs: SubConfigs,
    ) -> ConfigResult<Arc<Self>> {
        let source = env
            .locate(identifier)
            .ok_or_else(|| ConfigError::MissingPropertySource {
                identifier: identifier.to_string(),
            })?;

        let settings = resolve_all(DECLARATIONS, env).inspect_err(|e| {
            log::error!("Failed to resolve LogFeeder configuration: {}", e);
        })?;

        let properties = source
            .all_keys()
            .map(|key| -> ConfigResult<(String, String)> {
                Ok((key.to_string(), env.property(key)?.unwrap_or_default()))
            })
            .collect::<ConfigResult<BTreeMap<String, String>>>()
            .inspect_err(|e| {
                log::error!("Failed to resolve LogFeeder properties snapshot: {}", e);
            })?;
        let props = Self::from_settings(settings, properties, sub_configs)?;

        log::info!(
            "Resolved LogFeeder configuration for cluster '{}' from {} ({} properties)",
            props.cluster_name,
            identifier,
            props.properties.len()
        );
        Ok(Arc::new(props))
    }

    fn from_settings(
        mut s: ResolvedSettings,
        properties: BTreeMap<String, String>,
        sub_configs: SubConfigs,
    ) -> ConfigResult<Self> {
        Ok(Self {
            cluster_name: s.take_string(keys::CLUSTER_NAME)?,
            tmp_dir: s.take_string(keys::TMP_DIR)?,
            log_level_filter_enabled: s.take_bool(keys::LOG_FILTER_ENABLE)?,
            solr_implicit_routing: s.take_bool(keys::SOLR_IMPLICIT_ROUTING)?,
            include_default_log_levels: s.take_list(keys::INCLUDE_DEFAULT_LEVEL)?,
            conf_dir: s.take_string(keys::CONFIG_DIR)?,
            config_files: s.take_string(keys::CONFIG_FILES)?,
            checkpoint_extension: s.take_string(keys::CHECKPOINT_EXTENSION)?,
            checkpoint_folder: s.take_string(keys::CHECKPOINT_FOLDER)?,
            docker_container_registry_enabled: s.take_bool(keys::DOCKER_CONTAINER_REGISTRY_ENABLED)?,
            use_local_configs: s.take_bool(keys::USE_LOCAL_CONFIGS)?,
            solr_filter_storage: s.take_bool(keys::USE_SOLR_FILTER_STORAGE)?,
            zk_filter_storage: s.take_bool(keys::USE_ZK_FILTER_STORAGE)?,
            solr_filter_monitor: s.take_bool(keys::MONITOR_SOLR_FILTER_STORAGE)?,
            solr_filter_monitor_interval: s.take_int(keys::MONITOR_SOLR_FILTER_INTERVAL)?,
            solr_zk_connect_string: s.take_string(keys::SOLR_ZK_CONNECTION_STRING)?,
            solr_urls_str: s.take_string(keys::SOLR_URLS)?,
            solr_cloud_discover: s.take_bool(keys::SOLR_CLOUD_DISCOVER)?,
            solr_metadata_collection: s.take_string(keys::SOLR_METADATA_COLLECTION)?,
            cloud_storage_mode: s.take_enum(keys::CLOUD_STORAGE_MODE)?,
            cloud_storage_destination: s.take_enum(keys::CLOUD_STORAGE_DESTINATION)?,
            cloud_storage_upload_on_shutdown: s.take_bool(keys::CLOUD_STORAGE_UPLOAD_ON_SHUTDOWN)?,
            cloud_storage_uploader_interval_seconds: s
                .take_int(keys::CLOUD_STORAGE_UPLOADER_INTERVAL_SECONDS)?,
            cloud_storage_uploader_timeout_minutes: s
                .take_int(keys::CLOUD_STORAGE_UPLOADER_TIMEOUT_MINUTES)?,
            use_cloud_hdfs_client: s.take_bool(keys::CLOUD_STORAGE_USE_HDFS_CLIENT)?,
            custom_fs: s.take_string(keys::CLOUD_STORAGE_CUSTOM_FS)?,
            cloud_base_path: s.take_string(keys::CLOUD_STORAGE_BASE_PATH)?,
            cloud_storage_use_filters: s.take_bool(keys::CLOUD_STORAGE_USE_FILTERS)?,
            properties,
            sub_configs,
        })
    }

    /// Start building a modified copy that bypasses resolution
    pub fn with_overrides(&self) -> OverrideBuilder {
        OverrideBuilder {
            props: self.clone(),
        }
    }

    /// Every declared setting with its current typed value, in key order
    pub fn resolved_settings(&self) -> Vec<(&'static str, SettingValue)> {
        use SettingValue::{Boolean, Enumeration, Integer, StringList};
        let string = |s: &String| SettingValue::String(s.clone());
        let mut values = vec![
            (keys::CLUSTER_NAME, string(&self.cluster_name)),
            (keys::TMP_DIR, string(&self.tmp_dir)),
            (keys::LOG_FILTER_ENABLE, Boolean(self.log_level_filter_enabled)),
            (keys::SOLR_IMPLICIT_ROUTING, Boolean(self.solr_implicit_routing)),
            (keys::INCLUDE_DEFAULT_LEVEL, StringList(self.include_default_log_levels.clone())),
            (keys::CONFIG_DIR, string(&self.conf_dir)),
            (keys::CONFIG_FILES, string(&self.config_files)),
            (keys::CHECKPOINT_EXTENSION, string(&self.checkpoint_extension)),
            (keys::CHECKPOINT_FOLDER, string(&self.checkpoint_folder)),
            (keys::DOCKER_CONTAINER_REGISTRY_ENABLED, Boolean(self.docker_container_registry_enabled)),
            (keys::USE_LOCAL_CONFIGS, Boolean(self.use_local_configs)),
            (keys::USE_SOLR_FILTER_STORAGE, Boolean(self.solr_filter_storage)),
            (keys::USE_ZK_FILTER_STORAGE, Boolean(self.zk_filter_storage)),
            (keys::MONITOR_SOLR_FILTER_STORAGE, Boolean(self.solr_filter_monitor)),
            (keys::MONITOR_SOLR_FILTER_INTERVAL, Integer(self.solr_filter_monitor_interval)),
            (keys::SOLR_ZK_CONNECTION_STRING, string(&self.solr_zk_connect_string)),
            (keys::SOLR_URLS, string(&self.solr_urls_str)),
            (keys::SOLR_CLOUD_DISCOVER, Boolean(self.solr_cloud_discover)),
            (keys::SOLR_METADATA_COLLECTION, string(&self.solr_metadata_collection)),
            (keys::CLOUD_STORAGE_MODE, Enumeration(self.cloud_storage_mode.as_str())),
            (keys::CLOUD_STORAGE_DESTINATION, Enumeration(self.cloud_storage_destination.as_str())),
            (keys::CLOUD_STORAGE_UPLOAD_ON_SHUTDOWN, Boolean(self.cloud_storage_upload_on_shutdown)),
            (
                keys::CLOUD_STORAGE_UPLOADER_INTERVAL_SECONDS,
                Integer(self.cloud_storage_uploader_interval_seconds),
            ),
            (
                keys::CLOUD_STORAGE_UPLOADER_TIMEOUT_MINUTES,
                Integer(self.cloud_storage_uploader_timeout_minutes),
            ),
            (keys::CLOUD_STORAGE_USE_HDFS_CLIENT, Boolean(self.use_cloud_hdfs_client)),
            (keys::CLOUD_STORAGE_CUSTOM_FS, string(&self.custom_fs)),
            (keys::CLOUD_STORAGE_BASE_PATH, string(&self.cloud_base_path)),
            (keys::CLOUD_STORAGE_USE_FILTERS, Boolean(self.cloud_storage_use_filters)),
        ];
        values.sort_by_key(|(key, _)| *key);
        values
    }

    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    pub fn tmp_dir(&self) -> &str {
        &self.tmp_dir
    }

    pub fn is_log_level_filter_enabled(&self) -> bool {
        self.log_level_filter_enabled
    }

    pub fn is_solr_implicit_routing(&self) -> bool {
        self.solr_implicit_routing
    }

    /// Default levels enabled by filtering; an unset key yields `[""]`
    pub fn include_default_log_levels(&self) -> &[String] {
        &self.include_default_log_levels
    }

    pub fn conf_dir(&self) -> &str {
        &self.conf_dir
    }

    /// Comma separated global / output config files, as configured
    pub fn config_files(&self) -> &str {
        &self.config_files
    }

    pub fn checkpoint_extension(&self) -> &str {
        &self.checkpoint_extension
    }

    pub fn checkpoint_folder(&self) -> &str {
        &self.checkpoint_folder
    }

    pub fn is_docker_container_registry_enabled(&self) -> bool {
        self.docker_container_registry_enabled
    }

    pub fn is_use_local_configs(&self) -> bool {
        self.use_local_configs
    }

    pub fn is_solr_filter_storage(&self) -> bool {
        self.solr_filter_storage
    }

    pub fn is_zk_filter_storage(&self) -> bool {
        self.zk_filter_storage
    }

    pub fn is_solr_filter_monitor(&self) -> bool {
        self.solr_filter_monitor
    }

    /// Seconds between polls of the Solr filter storage
    pub fn solr_filter_monitor_interval(&self) -> i32 {
        self.solr_filter_monitor_interval
    }

    pub fn solr_zk_connect_string(&self) -> &str {
        &self.solr_zk_connect_string
    }

    /// Solr URLs exactly as configured
    pub fn solr_urls_str(&self) -> &str {
        &self.solr_urls_str
    }

    /// Solr URLs split on commas, computed on every call
    ///
    /// A blank setting gives `None`, not `Some(vec![""])`. List settings
    /// such as [`include_default_log_levels`](Self::include_default_log_levels)
    /// behave differently on blank input; both behaviours are relied upon.
    pub fn solr_urls(&self) -> Option<Vec<String>> {
        if self.solr_urls_str.trim().is_empty() {
            return None;
        }
        Some(split_delimited(&self.solr_urls_str, ','))
    }

    pub fn is_solr_cloud_discover(&self) -> bool {
        self.solr_cloud_discover
    }

    pub fn solr_metadata_collection(&self) -> &str {
        &self.solr_metadata_collection
    }

    pub fn cloud_storage_mode(&self) -> LogFeederMode {
        self.cloud_storage_mode
    }

    pub fn cloud_storage_destination(&self) -> CloudStorageDestination {
        self.cloud_storage_destination
    }

    pub fn is_cloud_storage_upload_on_shutdown(&self) -> bool {
        self.cloud_storage_upload_on_shutdown
    }

    pub fn cloud_storage_uploader_interval_seconds(&self) -> i32 {
        self.cloud_storage_uploader_interval_seconds
    }

    pub fn cloud_storage_uploader_timeout_minutes(&self) -> i32 {
        self.cloud_storage_uploader_timeout_minutes
    }

    pub fn is_use_cloud_hdfs_client(&self) -> bool {
        self.use_cloud_hdfs_client
    }

    /// Override for `fs.defaultFS`; empty when not set
    pub fn custom_fs(&self) -> &str {
        &self.custom_fs
    }

    pub fn cloud_base_path(&self) -> &str {
        &self.cloud_base_path
    }

    pub fn is_cloud_storage_use_filters(&self) -> bool {
        self.cloud_storage_use_filters
    }

    /// Raw snapshot of every key in the located properties source
    pub fn raw_properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn rollover_config(&self) -> &Arc<RolloverConfig> {
        &self.sub_configs.rollover
    }

    pub fn s3_output_config(&self) -> &Arc<S3OutputConfig> {
        &self.sub_configs.s3_output
    }

    pub fn hdfs_output_config(&self) -> &Arc<HdfsOutputConfig> {
        &self.sub_configs.hdfs_output
    }

    pub fn security_config(&self) -> &Arc<LogFeederSecurityConfig> {
        &self.sub_configs.security
    }

    pub fn log_entry_cache_config(&self) -> &Arc<LogEntryCacheConfig> {
        &self.sub_configs.log_entry_cache
    }

    pub fn input_simulate_config(&self) -> &Arc<InputSimulateConfig> {
        &self.sub_configs.input_simulate
    }
}

/// Builds a modified copy of a [`LogFeederProps`]
///
/// Values given here are stored as-is: no defaults, no coercion, no
/// lower-casing. The original instance is left untouched.
#[derive(Debug, Clone)]
pub struct OverrideBuilder {
    props: LogFeederProps,
}

impl OverrideBuilder {
    pub fn cluster_name(mut self, value: impl Into<String>) -> Self {
        self.props.cluster_name = value.into();
        self
    }

    pub fn conf_dir(mut self, value: impl Into<String>) -> Self {
        self.props.conf_dir = value.into();
        self
    }

    pub fn config_files(mut self, value: impl Into<String>) -> Self {
        self.props.config_files = value.into();
        self
    }

    pub fn checkpoint_extension(mut self, value: impl Into<String>) -> Self {
        self.props.checkpoint_extension = value.into();
        self
    }

    pub fn checkpoint_folder(mut self, value: impl Into<String>) -> Self {
        self.props.checkpoint_folder = value.into();
        self
    }

    pub fn solr_implicit_routing(mut self, value: bool) -> Self {
        self.props.solr_implicit_routing = value;
        self
    }

    pub fn docker_container_registry_enabled(mut self, value: bool) -> Self {
        self.props.docker_container_registry_enabled = value;
        self
    }

    pub fn use_local_configs(mut self, value: bool) -> Self {
        self.props.use_local_configs = value;
        self
    }

    pub fn solr_filter_storage(mut self, value: bool) -> Self {
        self.props.solr_filter_storage = value;
        self
    }

    pub fn zk_filter_storage(mut self, value: bool) -> Self {
        self.props.zk_filter_storage = value;
        self
    }

    pub fn solr_filter_monitor(mut self, value: bool) -> Self {
        self.props.solr_filter_monitor = value;
        self
    }

    pub fn solr_filter_monitor_interval(mut self, value: i32) -> Self {
        self.props.solr_filter_monitor_interval = value;
        self
    }

    pub fn solr_zk_connect_string(mut self, value: impl Into<String>) -> Self {
        self.props.solr_zk_connect_string = value.into();
        self
    }

    pub fn solr_urls_str(mut self, value: impl Into<String>) -> Self {
        self.props.solr_urls_str = value.into();
        self
    }

    pub fn solr_cloud_discover(mut self, value: bool) -> Self {
        self.props.solr_cloud_discover = value;
        self
    }

    pub fn solr_metadata_collection(mut self, value: impl Into<String>) -> Self {
        self.props.solr_metadata_collection = value.into();
        self
    }

    pub fn cloud_storage_mode(mut self, value: LogFeederMode) -> Self {
        self.props.cloud_storage_mode = value;
        self
    }

    pub fn cloud_storage_destination(mut self, value: CloudStorageDestination) -> Self {
        self.props.cloud_storage_destination = value;
        self
    }

    pub fn cloud_storage_upload_on_shutdown(mut self, value: bool) -> Self {
        self.props.cloud_storage_upload_on_shutdown = value;
        self
    }

    pub fn cloud_storage_uploader_interval_seconds(mut self, value: i32) -> Self {
        self.props.cloud_storage_uploader_interval_seconds = value;
        self
    }

    pub fn cloud_storage_uploader_timeout_minutes(mut self, value: i32) -> Self {
        self.props.cloud_storage_uploader_timeout_minutes = value;
        self
    }

    pub fn use_cloud_hdfs_client(mut self, value: bool) -> Self {
        self.props.use_cloud_hdfs_client = value;
        self
    }

    pub fn custom_fs(mut self, value: impl Into<String>) -> Self {
        self.props.custom_fs = value.into();
        self
    }

    pub fn cloud_base_path(mut self, value: impl Into<String>) -> Self {
        self.props.cloud_base_path = value.into();
        self
    }

    pub fn cloud_storage_use_filters(mut self, value: bool) -> Self {
        self.props.cloud_storage_use_filters = value;
        self
    }

    pub fn sub_configs(mut self, value: SubConfigs) -> Self {
        self.props.sub_configs = value;
        self
    }

    pub fn build(self) -> Arc<LogFeederProps> {
        Arc::new(self.props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::PropertySource;

    fn assemble_with(entries: &[(&str, &str)]) -> ConfigResult<Arc<LogFeederProps>> {
        let env = Environment::new().with_source(PropertySource::new(
            LOGFEEDER_PROPERTIES_FILE,
            entries.iter().copied(),
        ));
        LogFeederProps::assemble(&env, SubConfigs::default())
    }

    #[test]
    fn test_defaults_from_empty_source() {
        let props = assemble_with(&[]).unwrap();
        assert_eq!(props.cluster_name(), "");
        assert_eq!(props.tmp_dir(), std::env::temp_dir().display().to_string());
        assert!(!props.is_log_level_filter_enabled());
        assert_eq!(props.include_default_log_levels(), &[String::new()]);
        assert_eq!(props.conf_dir(), "/usr/lib/ambari-logsearch-logfeeder/conf");
        assert_eq!(props.checkpoint_extension(), ".cp");
        assert!(props.is_solr_filter_monitor());
        assert_eq!(props.solr_filter_monitor_interval(), 30);
        assert_eq!(props.solr_metadata_collection(), "logsearch_metadata");
        assert_eq!(props.cloud_storage_mode(), LogFeederMode::Default);
        assert_eq!(props.cloud_storage_destination(), CloudStorageDestination::None);
        assert_eq!(props.cloud_storage_uploader_interval_seconds(), 60);
        assert_eq!(props.cloud_storage_uploader_timeout_minutes(), 60);
        assert!(props.is_use_cloud_hdfs_client());
        assert_eq!(props.cloud_base_path(), "/apps/logsearch");
        assert!(props.raw_properties().is_empty());
    }

    #[test]
    fn test_solr_urls_blank_is_none() {
        let props = assemble_with(&[(keys::SOLR_URLS, "   ")]).unwrap();
        assert_eq!(props.solr_urls(), None);

        let props = assemble_with(&[]).unwrap();
        assert_eq!(props.solr_urls(), None);
    }

    #[test]
    fn test_solr_urls_split() {
        let props = assemble_with(&[(keys::SOLR_URLS, "https://a:8983/solr,https://b:8983")]).unwrap();
        assert_eq!(
            props.solr_urls(),
            Some(vec!["https://a:8983/solr".to_string(), "https://b:8983".to_string()])
        );
    }

    #[test]
    fn test_overrides_leave_original_untouched() {
        let props = assemble_with(&[(keys::CLUSTER_NAME, "cl1")]).unwrap();
        let overridden = props
            .with_overrides()
            .cluster_name("OTHER")
            .cloud_storage_mode(LogFeederMode::Hybrid)
            .solr_urls_str("http://x:8983")
            .build();

        assert_eq!(props.cluster_name(), "cl1");
        assert_eq!(overridden.cluster_name(), "OTHER");
        assert_eq!(overridden.cloud_storage_mode(), LogFeederMode::Hybrid);
        assert_eq!(overridden.solr_urls(), Some(vec!["http://x:8983".to_string()]));
    }

    #[test]
    fn test_resolved_settings_covers_every_declaration() {
        let props = assemble_with(&[]).unwrap();
        let settings = props.resolved_settings();
        assert_eq!(settings.len(), DECLARATIONS.len());
        for decl in DECLARATIONS {
            assert!(settings.iter().any(|(k, _)| *k == decl.key), "{}", decl.key);
        }
    }
}
