//! Typed field resolution
//!
//! One routine turns a [`SettingDeclaration`] plus an [`Environment`] into a
//! [`SettingValue`]: look the key up through every layer, fall back to the
//! declared default, expand `${...}` placeholders, then coerce to the
//! declared kind.

use crate::error::{ConfigError, ConfigResult};
use crate::settings::{SettingDeclaration, SettingKind};
use crate::source::Environment;
use std::collections::BTreeMap;
use std::fmt;

/// A coerced setting value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    String(String),
    Boolean(bool),
    Integer(i32),
    /// One of the declared enumeration names
    Enumeration(&'static str),
    StringList(Vec<String>),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::String(s) => f.write_str(s),
            SettingValue::Boolean(b) => write!(f, "{}", b),
            SettingValue::Integer(i) => write!(f, "{}", i),
            SettingValue::Enumeration(name) => f.write_str(name),
            SettingValue::StringList(items) => f.write_str(&items.join(",")),
        }
    }
}

/// Resolve one declared setting against the environment
pub fn resolve(decl: &SettingDeclaration, env: &Environment) -> ConfigResult<SettingValue> {
    let raw = match env.property(decl.key)? {
        Some(value) => Some(value),
        None => {
            log::debug!("Setting '{}' not set, using default", decl.key);
            decl.default
                .raw()
                .map(|default| env.expand_value(decl.key, &default))
                .transpose()?
        }
    };
    coerce(decl, raw.as_deref())
}

/// Coerce a raw string (or its absence) into the declared kind
pub fn coerce(decl: &SettingDeclaration, raw: Option<&str>) -> ConfigResult<SettingValue> {
    let key = decl.key;
    match decl.kind {
        SettingKind::String => Ok(SettingValue::String(raw.unwrap_or_default().to_string())),
        SettingKind::LowercaseString => Ok(SettingValue::String(
            raw.unwrap_or_default().to_lowercase(),
        )),
        SettingKind::Boolean => match raw {
            None => Ok(SettingValue::Boolean(false)),
            Some(value) => parse_bool(value)
                .map(SettingValue::Boolean)
                .ok_or_else(|| ConfigError::resolution(key, value, "expected 'true' or 'false'")),
        },
        SettingKind::Integer => match raw {
            None => Ok(SettingValue::Integer(0)),
            Some(value) => value.trim().parse::<i32>().map(SettingValue::Integer).map_err(|e| {
                ConfigError::resolution(key, value, format!("expected a decimal integer: {}", e))
            }),
        },
        SettingKind::Enumeration(names) => {
            let value = raw.unwrap_or_default();
            validate_enum_choice(key, value, names).map(SettingValue::Enumeration)
        }
        SettingKind::StringList => Ok(SettingValue::StringList(split_delimited(
            raw.unwrap_or_default(),
            ',',
        ))),
    }
}

/// Resolve every declaration, stopping at the first failure
pub fn resolve_all<'a, I>(declarations: I, env: &Environment) -> ConfigResult<ResolvedSettings>
where
    I: IntoIterator<Item = &'a SettingDeclaration>,
{
    let mut values = BTreeMap::new();
    for decl in declarations {
        values.insert(decl.key, resolve(decl, env)?);
    }
    Ok(ResolvedSettings { values })
}

fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Case-sensitive match of the trimmed value against the declared names
fn validate_enum_choice(
    key: &str,
    value: &str,
    names: &'static [&'static str],
) -> ConfigResult<&'static str> {
    let choice = value.trim();
    names.iter().copied().find(|name| *name == choice).ok_or_else(|| {
        ConfigError::resolution(
            key,
            value,
            format!("valid choices: {}", names.join(", ")),
        )
    })
}

/// Split on a delimiter the way list settings always have been split:
/// input without the delimiter is returned whole (so `""` gives `[""]`),
/// inner empty segments are kept and trailing empty segments are dropped.
pub fn split_delimited(input: &str, delimiter: char) -> Vec<String> {
    if !input.contains(delimiter) {
        return vec![input.to_string()];
    }
    let mut parts: Vec<String> = input.split(delimiter).map(str::to_string).collect();
    while parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    parts
}

/// Values of every resolved setting, keyed by property name
#[derive(Debug, Clone, Default)]
pub struct ResolvedSettings {
    values: BTreeMap<&'static str, SettingValue>,
}

impl ResolvedSettings {
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &SettingValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    /// Take a string setting out of the set
    pub fn take_string(&mut self, key: &str) -> ConfigResult<String> {
        match self.values.remove(key) {
            Some(SettingValue::String(s)) => Ok(s),
            other => Err(mismatch(key, "string", other)),
        }
    }

    pub fn take_bool(&mut self, key: &str) -> ConfigResult<bool> {
        match self.values.remove(key) {
            Some(SettingValue::Boolean(b)) => Ok(b),
            other => Err(mismatch(key, "boolean", other)),
        }
    }

    pub fn take_int(&mut self, key: &str) -> ConfigResult<i32> {
        match self.values.remove(key) {
            Some(SettingValue::Integer(i)) => Ok(i),
            other => Err(mismatch(key, "integer", other)),
        }
    }

    pub fn take_list(&mut self, key: &str) -> ConfigResult<Vec<String>> {
        match self.values.remove(key) {
            Some(SettingValue::StringList(items)) => Ok(items),
            other => Err(mismatch(key, "list", other)),
        }
    }

    /// Take an enumeration setting and convert it to its Rust type
    pub fn take_enum<T>(&mut self, key: &str) -> ConfigResult<T>
    where
        T: std::str::FromStr<Err = String>,
    {
        match self.values.remove(key) {
            Some(SettingValue::Enumeration(name)) => name
                .parse()
                .map_err(|e: String| ConfigError::resolution(key, name, e)),
            other => Err(mismatch(key, "enumeration", other)),
        }
    }
}

fn mismatch(key: &str, expected: &str, found: Option<SettingValue>) -> ConfigError {
    let value = found.as_ref().map(ToString::to_string).unwrap_or_default();
    let reason = match found {
        Some(_) => format!("declared kind does not produce a {}", expected),
        None => "setting is not declared".to_string(),
    };
    ConfigError::resolution(key, &value, reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{declaration, keys, SettingDefault};
    use crate::source::PropertySource;

    fn env_with(entries: &[(&str, &str)]) -> Environment {
        Environment::new().with_source(PropertySource::new(
            "logfeeder.properties",
            entries.iter().copied(),
        ))
    }

    fn resolve_key(key: &str, entries: &[(&str, &str)]) -> ConfigResult<SettingValue> {
        resolve(declaration(key).unwrap(), &env_with(entries))
    }

    #[test]
    fn test_cluster_name_is_lowercased() {
        let value = resolve_key(keys::CLUSTER_NAME, &[(keys::CLUSTER_NAME, "CL1")]).unwrap();
        assert_eq!(value, SettingValue::String("cl1".to_string()));
    }

    #[test]
    fn test_boolean_is_case_insensitive() {
        for raw in ["true", "TRUE", "True", " true "] {
            let value = resolve_key(keys::LOG_FILTER_ENABLE, &[(keys::LOG_FILTER_ENABLE, raw)]).unwrap();
            assert_eq!(value, SettingValue::Boolean(true), "{raw}");
        }
        let value = resolve_key(keys::LOG_FILTER_ENABLE, &[(keys::LOG_FILTER_ENABLE, "FaLsE")]).unwrap();
        assert_eq!(value, SettingValue::Boolean(false));
    }

    #[test]
    fn test_malformed_boolean_is_error() {
        let err = resolve_key(keys::LOG_FILTER_ENABLE, &[(keys::LOG_FILTER_ENABLE, "yes")]).unwrap_err();
        assert_eq!(err.setting_key(), Some(keys::LOG_FILTER_ENABLE));
    }

    #[test]
    fn test_integer_parsing() {
        let value = resolve_key(
            keys::MONITOR_SOLR_FILTER_INTERVAL,
            &[(keys::MONITOR_SOLR_FILTER_INTERVAL, "120")],
        )
        .unwrap();
        assert_eq!(value, SettingValue::Integer(120));

        let err = resolve_key(
            keys::MONITOR_SOLR_FILTER_INTERVAL,
            &[(keys::MONITOR_SOLR_FILTER_INTERVAL, "ten")],
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Resolution { .. }));
    }

    #[test]
    fn test_enumeration_exact_match() {
        let value = resolve_key(keys::CLOUD_STORAGE_MODE, &[(keys::CLOUD_STORAGE_MODE, "cloud")]).unwrap();
        assert_eq!(value, SettingValue::Enumeration("cloud"));

        assert!(resolve_key(keys::CLOUD_STORAGE_MODE, &[(keys::CLOUD_STORAGE_MODE, "bogus")]).is_err());
        assert!(resolve_key(keys::CLOUD_STORAGE_MODE, &[(keys::CLOUD_STORAGE_MODE, "Cloud")]).is_err());

        let value = resolve_key(keys::CLOUD_STORAGE_MODE, &[]).unwrap();
        assert_eq!(value, SettingValue::Enumeration("default"));
    }

    #[test]
    fn test_enumeration_ignores_surrounding_whitespace() {
        for raw in ["cloud ", " cloud", "\tcloud \t"] {
            let value = resolve_key(keys::CLOUD_STORAGE_MODE, &[(keys::CLOUD_STORAGE_MODE, raw)]).unwrap();
            assert_eq!(value, SettingValue::Enumeration("cloud"), "{raw:?}");
        }
        let value = resolve_key(
            keys::CLOUD_STORAGE_DESTINATION,
            &[(keys::CLOUD_STORAGE_DESTINATION, "hdfs  ")],
        )
        .unwrap();
        assert_eq!(value, SettingValue::Enumeration("hdfs"));

        assert!(resolve_key(keys::CLOUD_STORAGE_MODE, &[(keys::CLOUD_STORAGE_MODE, " Cloud ")]).is_err());
    }

    #[test]
    fn test_placeholders_expand_before_coercion() {
        let value = resolve_key(
            keys::CHECKPOINT_FOLDER,
            &[
                (keys::CONFIG_DIR, "/etc/lf"),
                (keys::CHECKPOINT_FOLDER, "${logfeeder.config.dir}/checkpoints"),
            ],
        )
        .unwrap();
        assert_eq!(value, SettingValue::String("/etc/lf/checkpoints".to_string()));

        let value = resolve_key(
            keys::CLOUD_STORAGE_UPLOADER_INTERVAL_SECONDS,
            &[
                ("upload.every", "90"),
                (keys::CLOUD_STORAGE_UPLOADER_INTERVAL_SECONDS, "${upload.every}"),
            ],
        )
        .unwrap();
        assert_eq!(value, SettingValue::Integer(90));

        let value = resolve_key(
            keys::CLOUD_STORAGE_MODE,
            &[(keys::CLOUD_STORAGE_MODE, "${deployment.mode:hybrid}")],
        )
        .unwrap();
        assert_eq!(value, SettingValue::Enumeration("hybrid"));

        let err = resolve_key(keys::CLUSTER_NAME, &[(keys::CLUSTER_NAME, "${cluster.id}")]).unwrap_err();
        assert_eq!(err.setting_key(), Some(keys::CLUSTER_NAME));
    }

    #[test]
    fn test_list_preserves_order_and_duplicates() {
        let value = resolve_key(
            keys::INCLUDE_DEFAULT_LEVEL,
            &[(keys::INCLUDE_DEFAULT_LEVEL, "FATAL,ERROR,WARN,ERROR")],
        )
        .unwrap();
        assert_eq!(
            value,
            SettingValue::StringList(vec![
                "FATAL".to_string(),
                "ERROR".to_string(),
                "WARN".to_string(),
                "ERROR".to_string()
            ])
        );
    }

    #[test]
    fn test_absent_list_is_single_empty_string() {
        let value = resolve_key(keys::INCLUDE_DEFAULT_LEVEL, &[]).unwrap();
        assert_eq!(value, SettingValue::StringList(vec![String::new()]));
    }

    #[test]
    fn test_split_delimited_edges() {
        assert_eq!(split_delimited("", ','), vec![""]);
        assert_eq!(split_delimited("a", ','), vec!["a"]);
        assert_eq!(split_delimited("a,,b", ','), vec!["a", "", "b"]);
        assert_eq!(split_delimited("a,b,,", ','), vec!["a", "b"]);
        assert_eq!(split_delimited(",a", ','), vec!["", "a"]);
        assert!(split_delimited(",", ',').is_empty());
    }

    #[test]
    fn test_undefined_defaults_use_empty_values() {
        let decl = SettingDeclaration {
            key: "test.int",
            kind: SettingKind::Integer,
            default: SettingDefault::Undefined,
            description: "",
            examples: &[],
            sources: &[],
        };
        assert_eq!(coerce(&decl, None).unwrap(), SettingValue::Integer(0));

        let value = resolve_key(keys::CLUSTER_NAME, &[]).unwrap();
        assert_eq!(value, SettingValue::String(String::new()));
    }

    #[test]
    fn test_take_typed_values() {
        let env = env_with(&[(keys::CLOUD_STORAGE_DESTINATION, "s3")]);
        let mut settings = resolve_all(crate::settings::DECLARATIONS, &env).unwrap();

        let destination: crate::domains::mode::CloudStorageDestination =
            settings.take_enum(keys::CLOUD_STORAGE_DESTINATION).unwrap();
        assert_eq!(destination, crate::domains::mode::CloudStorageDestination::S3);

        assert!(settings.take_bool(keys::CONFIG_DIR).is_err());
        assert!(settings.take_string("no.such.key").is_err());
    }
}
