//! Output sub-configuration fragments
//!
//! These are resolved by their owning subsystems and handed to
//! [`LogFeederProps`](crate::LogFeederProps) as opaque references.

use serde::{Deserialize, Serialize};

/// Rollover policy for archived log files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolloverConfig {
    /// Directory where rolled-over files are archived
    pub archive_base_dir: String,

    /// Roll over after this many minutes
    pub threshold_time_mins: u32,

    /// Roll over once the file reaches this size (in `threshold_size_unit`)
    pub threshold_size: u32,

    /// Unit of `threshold_size`, e.g. `MB`
    pub threshold_size_unit: String,

    /// Number of archived files kept
    pub max_backup_files: u32,

    /// Roll over on shutdown
    pub on_shutdown: bool,

    /// Roll over on startup
    pub on_startup: bool,
}

/// Credentials and location of the S3 output
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct S3OutputConfig {
    pub endpoint: Option<String>,
    pub region: Option<String>,
    pub bucket_name: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

/// Location and identity of the HDFS output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HdfsOutputConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    /// Octal permission string applied to written files
    pub file_permissions: String,
    pub kerberos_enabled: bool,
    pub kerberos_principal: Option<String>,
    pub kerberos_keytab: Option<String>,
}

impl Default for RolloverConfig {
    fn default() -> Self {
        Self {
            archive_base_dir: std::env::temp_dir().display().to_string(),
            threshold_time_mins: 60,
            threshold_size: 80,
            threshold_size_unit: "MB".to_string(),
            max_backup_files: 10,
            on_shutdown: true,
            on_startup: true,
        }
    }
}

impl Default for HdfsOutputConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 8020,
            user: String::new(),
            file_permissions: "640".to_string(),
            kerberos_enabled: false,
            kerberos_principal: None,
            kerberos_keytab: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_fragment_uses_defaults() {
        let json = r#"{ "host": "namenode", "kerberos_enabled": true }"#;
        let hdfs: HdfsOutputConfig = serde_json::from_str(json).unwrap();
        assert_eq!(hdfs.host, "namenode");
        assert_eq!(hdfs.port, 8020);
        assert!(hdfs.kerberos_enabled);
        assert_eq!(hdfs.file_permissions, "640");
    }
}
