//! Setting declarations: the schema of `logfeeder.properties`
//!
//! Every recognised key is listed once in [`DECLARATIONS`] with its kind,
//! its default and the metadata used to generate property documentation.
//! Keys and defaults must stay compatible with existing deployments.

/// Well-known name of the mandatory properties source
pub const LOGFEEDER_PROPERTIES_FILE: &str = "logfeeder.properties";

/// Property keys
pub mod keys {
    pub const CLUSTER_NAME: &str = "cluster.name";
    pub const TMP_DIR: &str = "logfeeder.tmp.dir";
    pub const LOG_FILTER_ENABLE: &str = "logfeeder.log.filter.enable";
    pub const SOLR_IMPLICIT_ROUTING: &str = "logfeeder.solr.implicit.routing";
    pub const INCLUDE_DEFAULT_LEVEL: &str = "logfeeder.include.default.level";
    pub const CONFIG_DIR: &str = "logfeeder.config.dir";
    pub const CONFIG_FILES: &str = "logfeeder.config.files";
    pub const CHECKPOINT_EXTENSION: &str = "logfeeder.checkpoint.extension";
    pub const CHECKPOINT_FOLDER: &str = "logfeeder.checkpoint.folder";
    pub const DOCKER_CONTAINER_REGISTRY_ENABLED: &str = "logfeeder.docker.registry.enabled";
    pub const USE_LOCAL_CONFIGS: &str = "logfeeder.configs.local.enabled";
    pub const USE_SOLR_FILTER_STORAGE: &str = "logfeeder.configs.filter.solr.enabled";
    pub const USE_ZK_FILTER_STORAGE: &str = "logfeeder.configs.filter.zk.enabled";
    pub const MONITOR_SOLR_FILTER_STORAGE: &str = "logfeeder.configs.filter.solr.monitor.enabled";
    pub const MONITOR_SOLR_FILTER_INTERVAL: &str = "logfeeder.configs.filter.solr.monitor.interval";
    pub const SOLR_ZK_CONNECTION_STRING: &str = "logfeeder.solr.zk_connect_string";
    pub const SOLR_URLS: &str = "logfeeder.solr.urls";
    pub const SOLR_CLOUD_DISCOVER: &str = "logfeeder.solr.cloud.client.discover";
    pub const SOLR_METADATA_COLLECTION: &str = "logfeeder.solr.metadata.collection";
    pub const CLOUD_STORAGE_MODE: &str = "logfeeder.cloud.storage.mode";
    pub const CLOUD_STORAGE_DESTINATION: &str = "logfeeder.cloud.storage.destination";
    pub const CLOUD_STORAGE_UPLOAD_ON_SHUTDOWN: &str = "logfeeder.cloud.storage.upload.on.shutdown";
    pub const CLOUD_STORAGE_UPLOADER_INTERVAL_SECONDS: &str =
        "logfeeder.cloud.storage.uploader.interval.seconds";
    pub const CLOUD_STORAGE_UPLOADER_TIMEOUT_MINUTES: &str =
        "logfeeder.cloud.storage.uploader.timeout.minutes";
    pub const CLOUD_STORAGE_USE_HDFS_CLIENT: &str = "logfeeder.cloud.storage.use.hdfs.client";
    pub const CLOUD_STORAGE_CUSTOM_FS: &str = "logfeeder.cloud.storage.custom.fs";
    pub const CLOUD_STORAGE_BASE_PATH: &str = "logfeeder.cloud.storage.base.path";
    pub const CLOUD_STORAGE_USE_FILTERS: &str = "logfeeder.cloud.storage.use.filters";
}

pub const DEFAULT_CONFIG_DIR: &str = "/usr/lib/ambari-logsearch-logfeeder/conf";
pub const DEFAULT_CHECKPOINT_FOLDER: &str = "/usr/lib/ambari-logsearch-logfeeder/conf/checkpoints";
pub const DEFAULT_CHECKPOINT_EXTENSION: &str = ".cp";

/// Target type of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    String,
    /// String lower-cased before storage, for identifiers compared
    /// case-insensitively downstream
    LowercaseString,
    Boolean,
    Integer,
    /// One of the listed names, matched case-sensitively after trimming
    Enumeration(&'static [&'static str]),
    /// Comma separated, order and duplicates preserved
    StringList,
}

/// Value used when a key is absent from every layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingDefault {
    /// No default; the kind's empty value is used
    Undefined,
    Value(&'static str),
    /// The platform temporary directory
    SystemTempDir,
}

impl SettingDefault {
    /// Raw string substituted for an absent key
    pub fn raw(&self) -> Option<String> {
        match self {
            SettingDefault::Undefined => None,
            SettingDefault::Value(value) => Some((*value).to_string()),
            SettingDefault::SystemTempDir => Some(std::env::temp_dir().display().to_string()),
        }
    }

    /// Default as shown in generated documentation
    pub fn documented(&self) -> Option<String> {
        match self {
            SettingDefault::Undefined | SettingDefault::Value("") => None,
            SettingDefault::Value(value) => Some((*value).to_string()),
            SettingDefault::SystemTempDir => Some("system temp directory".to_string()),
        }
    }
}

/// Schema entry for one configuration key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingDeclaration {
    pub key: &'static str,
    pub kind: SettingKind,
    pub default: SettingDefault,
    pub description: &'static str,
    pub examples: &'static [&'static str],
    /// Files the key is expected in
    pub sources: &'static [&'static str],
}

const PROPERTIES_SOURCES: &[&str] = &[LOGFEEDER_PROPERTIES_FILE];

const fn declare(
    key: &'static str,
    kind: SettingKind,
    default: SettingDefault,
    description: &'static str,
    examples: &'static [&'static str],
) -> SettingDeclaration {
    SettingDeclaration {
        key,
        kind,
        default,
        description,
        examples,
        sources: PROPERTIES_SOURCES,
    }
}

use self::keys::*;
use SettingDefault::{SystemTempDir, Undefined, Value};

/// Every declared setting
pub static DECLARATIONS: &[SettingDeclaration] = &[
    declare(
        CLUSTER_NAME,
        SettingKind::LowercaseString,
        Undefined,
        "The name of the cluster the Log Feeder program runs in.",
        &["cl1"],
    ),
    declare(
        TMP_DIR,
        SettingKind::String,
        SystemTempDir,
        "The tmp dir used for creating temporary files.",
        &["/tmp/"],
    ),
    declare(
        LOG_FILTER_ENABLE,
        SettingKind::Boolean,
        Value("false"),
        "Enables the filtering of the log entries by log level filters.",
        &["true"],
    ),
    declare(
        SOLR_IMPLICIT_ROUTING,
        SettingKind::Boolean,
        Value("false"),
        "Use implicit routing for Solr Collections.",
        &["true"],
    ),
    declare(
        INCLUDE_DEFAULT_LEVEL,
        SettingKind::StringList,
        Value(""),
        "Comma separated list of the default log levels to be enabled by the filtering.",
        &["FATAL,ERROR,WARN"],
    ),
    declare(
        CONFIG_DIR,
        SettingKind::String,
        Value(DEFAULT_CONFIG_DIR),
        "The directory where shipper configuration files are looked for.",
        &[DEFAULT_CONFIG_DIR],
    ),
    declare(
        CONFIG_FILES,
        SettingKind::String,
        Value(""),
        "Comma separated list of the config files containing global / output configurations.",
        &["global.json,output.json", "/usr/lib/ambari-logsearch-logfeeder/conf/global.config.json"],
    ),
    declare(
        CHECKPOINT_EXTENSION,
        SettingKind::String,
        Value(DEFAULT_CHECKPOINT_EXTENSION),
        "The extension used for checkpoint files.",
        &["ckp"],
    ),
    declare(
        CHECKPOINT_FOLDER,
        SettingKind::String,
        Value(DEFAULT_CHECKPOINT_FOLDER),
        "The folder where checkpoint files are stored.",
        &[DEFAULT_CHECKPOINT_FOLDER],
    ),
    declare(
        DOCKER_CONTAINER_REGISTRY_ENABLED,
        SettingKind::Boolean,
        Value("false"),
        "Enable to monitor docker containers and store their metadata in an in-memory registry.",
        &["true"],
    ),
    declare(
        USE_LOCAL_CONFIGS,
        SettingKind::Boolean,
        Value("false"),
        "Monitor local input.config-*.json files (do not upload them to zookeeper or solr)",
        &["true"],
    ),
    declare(
        USE_SOLR_FILTER_STORAGE,
        SettingKind::Boolean,
        Value("false"),
        "Use solr as a log level filter storage",
        &["true"],
    ),
    declare(
        USE_ZK_FILTER_STORAGE,
        SettingKind::Boolean,
        Value("false"),
        "Use zk as a log level filter storage (works only with local config)",
        &["true"],
    ),
    declare(
        MONITOR_SOLR_FILTER_STORAGE,
        SettingKind::Boolean,
        Value("true"),
        "Monitor log level filters (in solr) periodically - used for checking updates.",
        &["false"],
    ),
    declare(
        MONITOR_SOLR_FILTER_INTERVAL,
        SettingKind::Integer,
        Value("30"),
        "Time interval (in seconds) between monitoring input config filter definitions from Solr.",
        &["60"],
    ),
    declare(
        SOLR_ZK_CONNECTION_STRING,
        SettingKind::String,
        Value(""),
        "Zookeeper connection string for Solr.",
        &["localhost1:2181,localhost2:2181/mysolr_znode"],
    ),
    declare(
        SOLR_URLS,
        SettingKind::String,
        Value(""),
        "Comma separated solr urls (with protocol and port), override logfeeder.solr.zk_connect_string config",
        &["https://localhost1:8983/solr,https://localhost2:8983"],
    ),
    declare(
        SOLR_CLOUD_DISCOVER,
        SettingKind::Boolean,
        Value("false"),
        "On startup, with a Solr Cloud client, the Solr nodes will be discovered, then LBHttpClient will be built from that.",
        &["true"],
    ),
    declare(
        SOLR_METADATA_COLLECTION,
        SettingKind::String,
        Value("logsearch_metadata"),
        "Metadata collection name that could contain log level filters or input configurations.",
        &["logsearch_metadata"],
    ),
    declare(
        CLOUD_STORAGE_MODE,
        SettingKind::Enumeration(crate::domains::mode::LogFeederMode::NAMES),
        Value("default"),
        "Option to support sending logs to cloud storage. You can choose between supporting only cloud storage, non-cloud storage or both",
        &["default", "cloud", "hybrid"],
    ),
    declare(
        CLOUD_STORAGE_DESTINATION,
        SettingKind::Enumeration(crate::domains::mode::CloudStorageDestination::NAMES),
        Value("none"),
        "Type of storage that is the destination for cloud output logs.",
        &["hdfs", "s3"],
    ),
    declare(
        CLOUD_STORAGE_UPLOAD_ON_SHUTDOWN,
        SettingKind::Boolean,
        Value("false"),
        "Try to upload archived files on shutdown",
        &["true"],
    ),
    declare(
        CLOUD_STORAGE_UPLOADER_INTERVAL_SECONDS,
        SettingKind::Integer,
        Value("60"),
        "Second interval, that is used to check against there are any files to upload to cloud storage or not.",
        &["10"],
    ),
    declare(
        CLOUD_STORAGE_UPLOADER_TIMEOUT_MINUTES,
        SettingKind::Integer,
        Value("60"),
        "Timeout value for uploading task to cloud storage in minutes.",
        &["10"],
    ),
    declare(
        CLOUD_STORAGE_USE_HDFS_CLIENT,
        SettingKind::Boolean,
        Value("true"),
        "Use hdfs client with cloud connectors instead of the core clients for shipping data to cloud storage",
        &["true"],
    ),
    declare(
        CLOUD_STORAGE_CUSTOM_FS,
        SettingKind::String,
        Value(""),
        "If it is not empty, override fs.defaultFS for HDFS client. Can be useful to write data to a different bucket (from other services) if the bucket address is read from core-site.xml",
        &["s3a://anotherbucket"],
    ),
    declare(
        CLOUD_STORAGE_BASE_PATH,
        SettingKind::String,
        Value("/apps/logsearch"),
        "Base path prefix for storing logs (cloud storage / hdfs), could be an absolute path or URI. (if URI used, that will override the default.FS with HDFS client)",
        &["/user/logsearch/mypath", "s3a:///user/logsearch"],
    ),
    declare(
        CLOUD_STORAGE_USE_FILTERS,
        SettingKind::Boolean,
        Value("false"),
        "Use filters for inputs (with filters the output format will be JSON)",
        &["true"],
    ),
];

/// Look up the declaration of a key
pub fn declaration(key: &str) -> Option<&'static SettingDeclaration> {
    DECLARATIONS.iter().find(|d| d.key == key)
}
