//! Property documentation generated from the setting declarations

use crate::error::ConfigResult;
use crate::settings::{SettingDeclaration, SettingKind, DECLARATIONS};
use serde::Serialize;

/// Documentation entry for one property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescription {
    pub name: String,
    pub description: String,
    pub examples: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    pub sources: Vec<String>,
}

impl From<&SettingDeclaration> for PropertyDescription {
    fn from(decl: &SettingDeclaration) -> Self {
        Self {
            name: decl.key.to_string(),
            description: decl.description.to_string(),
            examples: decl.examples.iter().map(|e| e.to_string()).collect(),
            default_value: decl.default.documented(),
            sources: decl.sources.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Descriptions of every declared property, sorted by name
pub fn property_descriptions() -> Vec<PropertyDescription> {
    let mut descriptions: Vec<PropertyDescription> =
        DECLARATIONS.iter().map(PropertyDescription::from).collect();
    descriptions.sort_by(|a, b| a.name.cmp(&b.name));
    descriptions
}

/// Render the descriptions as pretty-printed JSON
pub fn to_json() -> ConfigResult<String> {
    Ok(serde_json::to_string_pretty(&property_descriptions())?)
}

/// Render the descriptions as a Markdown table
pub fn to_markdown() -> String {
    let mut out = String::from("| Name | Type | Description | Default | Examples |\n");
    out.push_str("|---|---|---|---|---|\n");
    for decl in sorted_declarations() {
        let doc = PropertyDescription::from(decl);
        out.push_str(&format!(
            "| `{}` | {} | {} | {} | {} |\n",
            doc.name,
            kind_label(decl.kind),
            escape_cell(&doc.description),
            doc.default_value
                .map(|d| format!("`{}`", d))
                .unwrap_or_else(|| "-".to_string()),
            doc.examples
                .iter()
                .map(|e| format!("`{}`", escape_cell(e)))
                .collect::<Vec<_>>()
                .join("<br/>"),
        ));
    }
    out
}

fn sorted_declarations() -> Vec<&'static SettingDeclaration> {
    let mut decls: Vec<_> = DECLARATIONS.iter().collect();
    decls.sort_by_key(|d| d.key);
    decls
}

fn kind_label(kind: SettingKind) -> String {
    match kind {
        SettingKind::String | SettingKind::LowercaseString => "string".to_string(),
        SettingKind::Boolean => "boolean".to_string(),
        SettingKind::Integer => "integer".to_string(),
        SettingKind::Enumeration(names) => format!("one of {}", names.join(" / ")),
        SettingKind::StringList => "list".to_string(),
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{declaration, keys};

    #[test]
    fn test_descriptions_sorted_and_complete() {
        let docs = property_descriptions();
        assert_eq!(docs.len(), DECLARATIONS.len());
        assert!(docs.windows(2).all(|w| w[0].name <= w[1].name));
    }

    #[test]
    fn test_json_uses_camel_case_and_skips_missing_defaults() {
        let json: serde_json::Value = serde_json::from_str(&to_json().unwrap()).unwrap();
        let entries = json.as_array().unwrap();

        let cluster = entries
            .iter()
            .find(|e| e["name"] == keys::CLUSTER_NAME)
            .unwrap();
        assert!(cluster.get("defaultValue").is_none());
        assert_eq!(cluster["examples"][0], "cl1");

        let mode = entries
            .iter()
            .find(|e| e["name"] == keys::CLOUD_STORAGE_MODE)
            .unwrap();
        assert_eq!(mode["defaultValue"], "default");
        assert_eq!(mode["sources"][0], "logfeeder.properties");
    }

    #[test]
    fn test_json_entry_fields() {
        let description = PropertyDescription::from(declaration(keys::CLOUD_STORAGE_MODE).unwrap());
        let json = serde_json::to_value(&description).unwrap();

        let mut fields: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        fields.sort_unstable();
        assert_eq!(fields, vec!["defaultValue", "description", "examples", "name", "sources"]);
    }

    #[test]
    fn test_markdown_has_row_per_property() {
        let md = to_markdown();
        assert_eq!(md.lines().count(), DECLARATIONS.len() + 2);
        assert!(md.contains("| `logfeeder.cloud.storage.mode` | one of default / cloud / hybrid |"));
    }
}
