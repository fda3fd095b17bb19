use super::generator::DocsError;
use super::schema::{PropertyInfo, extract_property_info, schema_value};
use crate::charm::FortuneParams;
use crate::config::CharmConfig;

const TABLE_HEADER: &str =
    "| Property | Type | Description | Default |\n|----------|------|-------------|---------|";

/// Generates a markdown table documenting schema properties.
///
/// Returns an empty string when there is nothing to document, so callers
/// can append unconditionally.
pub fn generate_property_table(properties: &[PropertyInfo]) -> String {
    if properties.is_empty() {
        return String::new();
    }

    let rows = properties
        .iter()
        .map(|prop| {
            format!(
                "| `{}` | `{}` | {} | `{}` |",
                prop.name, prop.type_name, prop.description, prop.default_value
            )
        })
        .collect::<Vec<String>>()
        .join("\n");

    format!("{TABLE_HEADER}\n{rows}\n")
}

/// Renders the configuration reference page.
///
/// # Errors
/// Returns [`DocsError::SchemaConversion`] if the config schema does not
/// serialize.
pub fn config_page() -> Result<String, DocsError> {
    let schema = schema_value::<CharmConfig>("configuration options")?;
    let properties = extract_property_info(&schema);

    let mut content = String::from("# Configuration Options\n\n");
    content.push_str(
        "Options the charm declares in `config.yaml`. The host applies the \
         declared defaults before the snapshot reaches the charm, so every \
         option listed here is present on each event.\n\n",
    );
    content.push_str(&generate_property_table(&properties));

    Ok(content)
}

/// Renders the actions reference page.
///
/// # Errors
/// Returns [`DocsError::SchemaConversion`] if a parameter schema does not
/// serialize.
pub fn actions_page() -> Result<String, DocsError> {
    let schema = schema_value::<FortuneParams>("test-fortune parameters")?;
    let fortune_params = extract_property_info(&schema);

    let mut content = String::from("# Actions\n\n");

    content.push_str("## debug\n\n");
    content.push_str(
        "Captures the unit's shell history and returns it under the \
         `buginfo` result key. Takes no parameters.\n\n",
    );

    content.push_str("## test-fortune\n\n");
    content.push_str("Demonstrates parameter handling and failure reporting.\n\n");
    content.push_str(&generate_property_table(&fortune_params));

    Ok(content)
}
