//! Cloud storage enumerations

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where shipped logs go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFeederMode {
    /// Non-cloud outputs only
    #[default]
    Default,
    /// Cloud storage only
    Cloud,
    /// Both cloud storage and the regular outputs
    Hybrid,
}

/// Backend used for cloud output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CloudStorageDestination {
    #[default]
    None,
    Hdfs,
    S3,
}

impl LogFeederMode {
    /// Accepted property values, matched case-sensitively
    pub const NAMES: &'static [&'static str] = &["default", "cloud", "hybrid"];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFeederMode::Default => "default",
            LogFeederMode::Cloud => "cloud",
            LogFeederMode::Hybrid => "hybrid",
        }
    }

    /// True when logs are shipped to cloud storage at all
    pub fn uses_cloud_storage(&self) -> bool {
        matches!(self, LogFeederMode::Cloud | LogFeederMode::Hybrid)
    }
}

impl CloudStorageDestination {
    /// Accepted property values, matched case-sensitively
    pub const NAMES: &'static [&'static str] = &["none", "hdfs", "s3"];

    pub fn as_str(&self) -> &'static str {
        match self {
            CloudStorageDestination::None => "none",
            CloudStorageDestination::Hdfs => "hdfs",
            CloudStorageDestination::S3 => "s3",
        }
    }
}

impl FromStr for LogFeederMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(LogFeederMode::Default),
            "cloud" => Ok(LogFeederMode::Cloud),
            "hybrid" => Ok(LogFeederMode::Hybrid),
            _ => Err(format!("Invalid cloud storage mode: {}", s)),
        }
    }
}

impl FromStr for CloudStorageDestination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(CloudStorageDestination::None),
            "hdfs" => Ok(CloudStorageDestination::Hdfs),
            "s3" => Ok(CloudStorageDestination::S3),
            _ => Err(format!("Invalid cloud storage destination: {}", s)),
        }
    }
}

impl fmt::Display for LogFeederMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CloudStorageDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
