use super::option::VarOption;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// The closed set of variable types a plugin may declare.
///
/// The serialized names are the ones plugin authors write in `config.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VarType {
    #[serde(rename = "int", alias = "integer")]
    Integer,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "boolean", alias = "bool")]
    Boolean,
    /// Exactly one of the declared options.
    #[serde(rename = "options")]
    SingleOption,
    /// Any subset of the declared options.
    #[serde(rename = "checkbox")]
    MultiOption,
    /// Free-form list of strings.
    #[serde(rename = "list")]
    List,
}

impl VarType {
    pub fn is_numeric(self) -> bool {
        matches!(self, VarType::Integer | VarType::Float)
    }

    pub fn has_options(self) -> bool {
        matches!(self, VarType::SingleOption | VarType::MultiOption)
    }

    /// The name used for this type in plugin schema files.
    pub fn wire_name(self) -> &'static str {
        match self {
            VarType::Integer => "int",
            VarType::Float => "float",
            VarType::Boolean => "boolean",
            VarType::SingleOption => "options",
            VarType::MultiOption => "checkbox",
            VarType::List => "list",
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Declares one configurable field of a plugin.
///
/// A definition is *required* exactly when it carries no default. A JSON
/// `null` default deserializes to `None` and therefore also counts as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDefinition {
    pub key: String,
    #[serde(rename = "type")]
    pub var_type: VarType,
    #[serde(default)]
    pub name: String,
    #[serde(
        default,
        rename = "descripts",
        alias = "description",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(
        default,
        deserialize_with = "lenient_bound",
        skip_serializing_if = "Option::is_none"
    )]
    pub min: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_bound",
        skip_serializing_if = "Option::is_none"
    )]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<VarOption>>,
}

impl VariableDefinition {
    /// Creates a required definition with no bounds or options.
    pub fn new(key: impl Into<String>, var_type: VarType) -> Self {
        let key = key.into();
        Self {
            name: key.clone(),
            key,
            var_type,
            description: None,
            default: None,
            min: None,
            max: None,
            options: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = (!default.is_null()).then_some(default);
        self
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_bounds(self, min: f64, max: f64) -> Self {
        self.with_min(min).with_max(max)
    }

    pub fn with_options<I, O>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<VarOption>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Whether the user must supply a value for this variable.
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// The declared options, in declaration order. Empty for non-option types.
    pub fn options(&self) -> &[VarOption] {
        self.options.as_deref().unwrap_or_default()
    }

    pub fn option_values(&self) -> impl Iterator<Item = &str> {
        self.options().iter().map(|o| o.value.as_str())
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.option_values().any(|v| v == value)
    }
}

// Authors sometimes quote bounds (`"min": "1"`). Anything that is not a
// finite number is dropped rather than failing the whole schema.
fn lenient_bound<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let bound = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(bound.filter(|b| b.is_finite()))
}
