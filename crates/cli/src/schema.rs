//! TOML schema files declaring parameter types.
//!
//! ```toml
//! [[param]]
//! name = "my_long"
//! type = "int64"
//! description = "number of sweeps"
//! default = 100
//! ```

use std::path::Path;

use serde::Deserialize;
use simparams_core::{ParamError, ParamType, Params};

#[derive(Debug, Deserialize)]
pub(crate) struct Schema {
    #[serde(default, rename = "param")]
    pub params: Vec<SchemaEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SchemaEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    #[serde(default)]
    pub description: String,
    /// Written in TOML's own syntax; converted to parameter source text.
    pub default: Option<toml::Value>,
}

pub(crate) fn load_schema(path: &Path) -> Result<Schema, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("error reading schema '{}': {}", path.display(), e))?;
    parse_schema(&text).map_err(|e| format!("error parsing schema '{}': {}", path.display(), e))
}

pub(crate) fn parse_schema(text: &str) -> Result<Schema, String> {
    let schema: Schema = toml::from_str(text).map_err(|e| e.to_string())?;
    for entry in &schema.params {
        if let Some(default) = &entry.default {
            default_text(default)
                .ok_or_else(|| format!("unsupported default for '{}'", entry.name))?;
        }
    }
    Ok(schema)
}

/// Define every schema entry, returning the definitions that failed.
pub(crate) fn apply(schema: &Schema, params: &mut Params) -> Vec<ParamError> {
    let mut errors = Vec::new();
    for entry in &schema.params {
        let default = entry.default.as_ref().and_then(default_text);
        let status = params.define_type(
            &entry.name,
            entry.param_type,
            &entry.description,
            default.as_deref(),
        );
        if let Some(err) = status.error() {
            errors.push(err.clone());
        }
    }
    errors
}

/// Render a TOML default as parameter source text. Arrays become
/// comma-separated lists; tables and datetimes are not supported.
fn default_text(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Array(items) => {
            let parts: Option<Vec<String>> = items.iter().map(default_text).collect();
            parts.map(|p| p.join(","))
        }
        toml::Value::Datetime(_) | toml::Value::Table(_) => None,
    }
}
