//! Schema parsing and property extraction for JSON Schema documents.

use schemars::{JsonSchema, schema_for};
use serde_json::Value;

use super::generator::DocsError;

/// Metadata of a single property in a JSON Schema.
#[derive(Debug, Clone)]
pub struct PropertyInfo {
    /// Property name as defined in the schema.
    pub name: String,
    /// JSON Schema type, e.g. "string" or "string | null".
    pub type_name: String,
    /// Doc-comment description carried by the schema.
    pub description: String,
    /// Rendered default value, or "-" when none is declared.
    pub default_value: String,
}

/// Renders the JSON Schema of `T` as a plain value tree.
///
/// # Errors
/// Returns [`DocsError::SchemaConversion`] if the schema does not
/// serialize; `target` names the surface being documented in that case.
pub fn schema_value<T: JsonSchema>(target: &str) -> Result<Value, DocsError> {
    serde_json::to_value(schema_for!(T)).map_err(|err| DocsError::SchemaConversion {
        target: target.to_string(),
        details: err.to_string(),
    })
}

/// Extracts property metadata from a JSON Schema document.
///
/// Returns an empty vector when the schema declares no properties or is
/// not an object schema at all.
pub fn extract_property_info(schema: &Value) -> Vec<PropertyInfo> {
    schema
        .get("properties")
        .and_then(Value::as_object)
        .map(build_properties)
        .unwrap_or_default()
}

fn build_properties(properties: &serde_json::Map<String, Value>) -> Vec<PropertyInfo> {
    properties
        .iter()
        .map(|(name, property)| PropertyInfo {
            name: name.clone(),
            type_name: type_name(property),
            description: description(property),
            default_value: default_value(property),
        })
        .collect()
}

fn type_name(property: &Value) -> String {
    match property.get("type") {
        Some(Value::String(single)) => single.clone(),
        Some(Value::Array(variants)) => variants
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" | "),
        _ => "unknown".to_string(),
    }
}

fn description(property: &Value) -> String {
    property
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or("No description provided")
        .to_string()
}

fn default_value(property: &Value) -> String {
    property
        .get("default")
        .map(|default| match default {
            Value::String(text) => format!("\"{text}\""),
            other => other.to_string(),
        })
        .unwrap_or_else(|| "-".to_string())
}
