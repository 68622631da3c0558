//! Layered property sources
//!
//! An [`Environment`] is an ordered list of lookup layers. `value_of`
//! consults them first to last, so earlier layers override later ones.
//! The standard order built by the loader is system properties, then
//! process environment variables, then property files.
//!
//! Values may refer to other keys with `${key}` or `${key:default}`;
//! [`Environment::property`] expands those through the same layers.

use crate::error::{ConfigError, ConfigResult};
use crate::properties::parse_properties;
use std::collections::{BTreeMap, HashMap};

/// A named set of properties read from one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySource {
    name: String,
    entries: Vec<(String, String)>,
}

impl PropertySource {
    /// Create a source from entries; a repeated key keeps its first
    /// position and takes the last value.
    pub fn new<I, K, V>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut source = Self {
            name: name.into(),
            entries: Vec::new(),
        };
        for (key, value) in entries {
            source.insert(key.into(), value.into());
        }
        source
    }

    /// Parse a source from properties text
    pub fn parse(name: impl Into<String>, content: &str) -> ConfigResult<Self> {
        Ok(Self::new(name, parse_properties(content)?))
    }

    /// Identifier of this source
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every key defined by this source, in declaration order
    pub fn all_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Value as declared in this source, ignoring other layers
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set or replace a key
    pub fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Process environment variables, looked up with relaxed names
#[derive(Debug, Clone, Default)]
pub struct EnvironmentVariables {
    /// Fixed variables; `None` reads the live process environment
    fixed: Option<HashMap<String, String>>,
}

impl EnvironmentVariables {
    /// Read from the live process environment
    pub fn from_process() -> Self {
        Self { fixed: None }
    }

    /// Use a fixed set of variables instead of the process environment
    pub fn from_map<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fixed: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Look up a property key, trying the exact name, then `.`/`-`
    /// replaced by `_`, then the upper-cased form.
    pub fn get(&self, key: &str) -> Option<String> {
        candidate_names(key)
            .into_iter()
            .find_map(|name| self.lookup(&name))
    }

    fn lookup(&self, name: &str) -> Option<String> {
        match &self.fixed {
            Some(vars) => vars.get(name).cloned(),
            None => std::env::var(name).ok(),
        }
    }
}

fn candidate_names(key: &str) -> Vec<String> {
    let underscored = key.replace(['.', '-'], "_");
    let upper = underscored.to_uppercase();
    let mut names = vec![key.to_string()];
    for name in [underscored, upper] {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// One lookup layer of an [`Environment`]
#[derive(Debug, Clone)]
pub enum PropertyLayer {
    /// Explicit overrides, e.g. `-Dkey=value` arguments
    SystemProperties(BTreeMap<String, String>),
    /// Process environment variables
    EnvironmentVariables(EnvironmentVariables),
    /// A properties file
    File(PropertySource),
}

impl PropertyLayer {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            PropertyLayer::SystemProperties(props) => props.get(key).cloned(),
            PropertyLayer::EnvironmentVariables(vars) => vars.get(key),
            PropertyLayer::File(source) => source.get(key).map(str::to_string),
        }
    }
}

/// Ordered set of property layers
#[derive(Debug, Clone, Default)]
pub struct Environment {
    layers: Vec<PropertyLayer>,
}

impl Environment {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer with lower priority than the existing ones
    pub fn with_layer(mut self, layer: PropertyLayer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Append system properties
    pub fn with_system_properties(self, props: BTreeMap<String, String>) -> Self {
        self.with_layer(PropertyLayer::SystemProperties(props))
    }

    /// Append environment variables
    pub fn with_environment_variables(self, vars: EnvironmentVariables) -> Self {
        self.with_layer(PropertyLayer::EnvironmentVariables(vars))
    }

    /// Append a properties file source
    pub fn with_source(self, source: PropertySource) -> Self {
        self.with_layer(PropertyLayer::File(source))
    }

    /// Find the property file source with the given identifier
    pub fn locate(&self, identifier: &str) -> Option<&PropertySource> {
        self.layers.iter().find_map(|layer| match layer {
            PropertyLayer::File(source) if source.name() == identifier => Some(source),
            _ => None,
        })
    }

    /// Resolve a key through every layer in priority order
    pub fn value_of(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.get(key))
    }

    /// Resolve a key and expand the placeholders in its value
    pub fn property(&self, key: &str) -> ConfigResult<Option<String>> {
        match self.value_of(key) {
            Some(raw) => self.expand_value(key, &raw).map(Some),
            None => Ok(None),
        }
    }

    /// Expand `${key}` and `${key:default}` placeholders in the value of `owner`
    ///
    /// A placeholder with no value and no default, or one that leads back
    /// to a key already being expanded, fails with a resolution error.
    pub fn expand_value(&self, owner: &str, text: &str) -> ConfigResult<String> {
        let mut visiting = vec![owner.to_string()];
        self.expand(text, &mut visiting)
            .map_err(|reason| ConfigError::resolution(owner, text, reason))
    }

    pub fn layers(&self) -> &[PropertyLayer] {
        &self.layers
    }

    fn expand(&self, text: &str, visiting: &mut Vec<String>) -> Result<String, String> {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find(PLACEHOLDER_PREFIX) {
            out.push_str(&rest[..start]);
            let body = &rest[start + PLACEHOLDER_PREFIX.len()..];
            let Some(end) = placeholder_end(body) else {
                // Unterminated, kept as literal text
                out.push_str(&rest[start..]);
                return Ok(out);
            };
            let placeholder = self.expand(&body[..end], visiting)?;
            out.push_str(&self.substitute(&placeholder, visiting)?);
            rest = &body[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }

    fn substitute(&self, placeholder: &str, visiting: &mut Vec<String>) -> Result<String, String> {
        let (key, default) = match self.value_of(placeholder) {
            Some(_) => (placeholder, None),
            None => match placeholder.split_once(VALUE_SEPARATOR) {
                Some((key, default)) => (key, Some(default)),
                None => (placeholder, None),
            },
        };

        if visiting.iter().any(|k| k == key) {
            return Err(format!("circular placeholder reference '${{{}}}'", key));
        }
        match self.value_of(key) {
            Some(value) => {
                visiting.push(key.to_string());
                let expanded = self.expand(&value, visiting);
                visiting.pop();
                expanded
            }
            None => default
                .map(str::to_string)
                .ok_or_else(|| format!("could not resolve placeholder '${{{}}}'", key)),
        }
    }
}

const PLACEHOLDER_PREFIX: &str = "${";
const VALUE_SEPARATOR: char = ':';

/// Byte offset of the `}` closing a placeholder body, honoring nested `${...}`
fn placeholder_end(body: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut chars = body.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '$' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                depth += 1;
            }
            '}' if depth == 0 => return Some(i),
            '}' => depth -= 1,
            _ => {}
        }
    }
    None
}
