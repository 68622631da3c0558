//! Security fragment

use serde::{Deserialize, Serialize};

/// Key/trust store and Kerberos settings of the shipper
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogFeederSecurityConfig {
    pub key_store_location: Option<String>,
    pub key_store_type: Option<String>,
    pub trust_store_location: Option<String>,
    pub trust_store_type: Option<String>,
    /// Hadoop credential store holding the store passwords
    pub credential_store_provider_path: Option<String>,
    pub solr_jaas_file: Option<String>,
    pub solr_kerberos_enabled: bool,
}
