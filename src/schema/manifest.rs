use super::{VariableDefinition, VariableSchema};
use crate::error::SchemaError;
use serde::{Deserialize, Serialize};

/// The `config.json` shipped inside a plugin package.
///
/// Only the variable list matters to this crate; `baseUrl` is kept so the file
/// can be rewritten without losing it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginSchemaFile {
    #[serde(rename = "baseUrl", default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub var: Option<Vec<VariableDefinition>>,
}

impl PluginSchemaFile {
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(json).map_err(|e| SchemaError::JsonParseError(e.to_string()))
    }

    /// Checks the variable list. A file without `var` yields an empty schema.
    pub fn into_schema(self) -> Result<VariableSchema, SchemaError> {
        VariableSchema::new(self.var.unwrap_or_default())
    }
}
