//! Locating `logfeeder.properties` and building the layered environment

use crate::domains::SubConfigs;
use crate::error::{ConfigError, ConfigResult};
use crate::props::LogFeederProps;
use crate::settings::LOGFEEDER_PROPERTIES_FILE;
use crate::source::{Environment, EnvironmentVariables, PropertySource};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Directories searched for `logfeeder.properties`, first match wins
pub const DEFAULT_SEARCH_PATH: &[&str] = &["conf", ".", "/usr/lib/ambari-logsearch-logfeeder/conf"];

/// Configuration loader with environment variable support
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Directories searched in order
    search_path: Vec<PathBuf>,
    /// Highest-priority overrides, e.g. `-Dkey=value` arguments
    system_properties: BTreeMap<String, String>,
    environment_variables: EnvironmentVariables,
}

impl ConfigLoader {
    /// Create a loader with the default search path reading the process environment
    pub fn new() -> Self {
        Self {
            search_path: DEFAULT_SEARCH_PATH.iter().map(PathBuf::from).collect(),
            system_properties: BTreeMap::new(),
            environment_variables: EnvironmentVariables::from_process(),
        }
    }

    /// Replace the search path
    pub fn with_search_path<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_path = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Add a system property override
    pub fn with_system_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.system_properties.insert(key.into(), value.into());
        self
    }

    /// Add a `key=value` system property override
    pub fn with_system_property_arg(self, arg: &str) -> ConfigResult<Self> {
        let (key, value) = parse_system_property(arg)?;
        Ok(self.with_system_property(key, value))
    }

    /// Replace the environment variable layer
    pub fn with_environment_variables(mut self, vars: EnvironmentVariables) -> Self {
        self.environment_variables = vars;
        self
    }

    /// First `logfeeder.properties` found on the search path
    pub fn locate_file(&self) -> Option<PathBuf> {
        self.search_path
            .iter()
            .map(|dir| dir.join(LOGFEEDER_PROPERTIES_FILE))
            .find(|path| path.is_file())
    }

    /// Build the environment: system properties, environment variables,
    /// then the properties file if one was found
    pub fn load_environment(&self) -> ConfigResult<Environment> {
        let env = Environment::new()
            .with_system_properties(self.system_properties.clone())
            .with_environment_variables(self.environment_variables.clone());

        match self.locate_file() {
            Some(path) => {
                log::debug!("Loading {} from {}", LOGFEEDER_PROPERTIES_FILE, path.display());
                Ok(env.with_source(read_source(&path)?))
            }
            None => {
                log::warn!(
                    "{} not found in search path {:?}",
                    LOGFEEDER_PROPERTIES_FILE,
                    self.search_path
                );
                Ok(env)
            }
        }
    }

    /// Load the environment and assemble the configuration from it
    pub fn load(&self, sub_configs: SubConfigs) -> ConfigResult<Arc<LogFeederProps>> {
        let env = self.load_environment()?;
        LogFeederProps::assemble(&env, sub_configs)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a properties file as the `logfeeder.properties` source
///
/// Content that is not valid UTF-8 is read as ISO-8859-1, the classic
/// encoding of properties files, so any byte sequence is accepted.
pub fn read_source(path: impl AsRef<Path>) -> ConfigResult<PropertySource> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ConfigError::FileRead {
        path: path.display().to_string(),
        source,
    })?;
    let content = decode_properties(bytes);
    PropertySource::parse(LOGFEEDER_PROPERTIES_FILE, &content).inspect_err(|e| {
        log::error!("Failed to parse {}: {}", path.display(), e);
    })
}

fn decode_properties(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => {
            log::debug!("Properties file is not UTF-8, decoding as ISO-8859-1");
            e.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

/// Split a `key=value` override; the value may be empty
pub fn parse_system_property(arg: &str) -> ConfigResult<(String, String)> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(ConfigError::InvalidOverride(format!(
            "expected key=value, got '{}'",
            arg
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_system_property() {
        assert_eq!(
            parse_system_property("cluster.name=cl1").unwrap(),
            ("cluster.name".to_string(), "cl1".to_string())
        );
        assert_eq!(
            parse_system_property("logfeeder.solr.urls=").unwrap(),
            ("logfeeder.solr.urls".to_string(), String::new())
        );
        assert_eq!(parse_system_property("a=b=c").unwrap().1, "b=c");
        assert!(parse_system_property("novalue").is_err());
        assert!(parse_system_property("=x").is_err());
    }

    #[test]
    fn test_missing_file_yields_environment_without_source() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::new()
            .with_search_path([dir.path()])
            .with_environment_variables(EnvironmentVariables::from_map(Vec::<(String, String)>::new()));

        assert!(loader.locate_file().is_none());
        let env = loader.load_environment().unwrap();
        assert!(env.locate(LOGFEEDER_PROPERTIES_FILE).is_none());
    }

    #[test]
    fn test_first_directory_on_search_path_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(second.path().join(LOGFEEDER_PROPERTIES_FILE), "cluster.name=second\n").unwrap();
        std::fs::write(first.path().join(LOGFEEDER_PROPERTIES_FILE), "cluster.name=first\n").unwrap();

        let loader = ConfigLoader::new().with_search_path([first.path(), second.path()]);
        assert_eq!(
            loader.locate_file().unwrap(),
            first.path().join(LOGFEEDER_PROPERTIES_FILE)
        );
    }

    #[test]
    fn test_latin1_file_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(LOGFEEDER_PROPERTIES_FILE),
            b"# Configur\xe9 par l'op\xe9rateur\ncluster.name=cl1\nlogfeeder.config.files=caf\xe9.json\n",
        )
        .unwrap();

        let props = ConfigLoader::new()
            .with_search_path([dir.path()])
            .with_environment_variables(EnvironmentVariables::from_map(Vec::<(String, String)>::new()))
            .load(SubConfigs::default())
            .unwrap();
        assert_eq!(props.cluster_name(), "cl1");
        assert_eq!(props.config_files(), "caf\u{e9}.json");
    }

    #[test]
    fn test_utf8_file_is_read_as_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOGFEEDER_PROPERTIES_FILE);
        std::fs::write(&path, "logfeeder.config.files=caf\u{e9}.json\n").unwrap();

        let source = read_source(&path).unwrap();
        assert_eq!(source.get("logfeeder.config.files"), Some("caf\u{e9}.json"));
    }

    #[test]
    fn test_read_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.properties");

        let err = read_source(&path).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
        assert!(err.to_string().contains("absent.properties"), "{err}");
    }
}
