use serde::{Deserialize, Serialize};

/// One selectable entry of an `options` or `checkbox` variable.
///
/// Plugin authors may write either a bare string (`"high"`), in which case the
/// label and value are the same, or an object `{ "name": ..., "variable": ... }`.
/// `{ "label": ..., "value": ... }` is accepted as well. Serialization always
/// uses the object form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "OptionRepr")]
pub struct VarOption {
    #[serde(rename = "name")]
    pub label: String,
    #[serde(rename = "variable")]
    pub value: String,
}

impl VarOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl From<&str> for VarOption {
    fn from(value: &str) -> Self {
        Self::new(value, value)
    }
}

impl From<String> for VarOption {
    fn from(value: String) -> Self {
        Self {
            label: value.clone(),
            value,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OptionRepr {
    Plain(String),
    Item {
        #[serde(alias = "label")]
        name: String,
        #[serde(alias = "value")]
        variable: String,
    },
}

impl From<OptionRepr> for VarOption {
    fn from(repr: OptionRepr) -> Self {
        match repr {
            OptionRepr::Plain(value) => value.into(),
            OptionRepr::Item { name, variable } => Self::new(name, variable),
        }
    }
}
