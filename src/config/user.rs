use crate::checkbox;
use crate::schema::{VarType, VariableDefinition};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Generates the map surface shared by both configuration shapes.
macro_rules! define_config_map {
    ( $( $(#[$meta:meta])* $name:ident ),* $(,)? ) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(AHashMap<String, Value>);

            impl $name {
                pub fn new() -> Self {
                    Self::default()
                }

                pub fn get(&self, key: &str) -> Option<&Value> {
                    self.0.get(key)
                }

                pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
                    self.0.insert(key.into(), value)
                }

                pub fn remove(&mut self, key: &str) -> Option<Value> {
                    self.0.remove(key)
                }

                pub fn contains_key(&self, key: &str) -> bool {
                    self.0.contains_key(key)
                }

                pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
                    self.0.iter()
                }

                pub fn keys(&self) -> impl Iterator<Item = &String> {
                    self.0.keys()
                }

                pub fn len(&self) -> usize {
                    self.0.len()
                }

                pub fn is_empty(&self) -> bool {
                    self.0.is_empty()
                }

                /// Keys of required definitions that have no value in this configuration.
                pub fn missing_required(&self, definitions: &[VariableDefinition]) -> Vec<String> {
                    definitions
                        .iter()
                        .filter(|def| def.is_required() && !self.contains_key(&def.key))
                        .map(|def| def.key.clone())
                        .collect()
                }

                pub fn into_inner(self) -> AHashMap<String, Value> {
                    self.0
                }
            }

            impl From<AHashMap<String, Value>> for $name {
                fn from(map: AHashMap<String, Value>) -> Self {
                    Self(map)
                }
            }

            impl<K: Into<String>> FromIterator<(K, Value)> for $name {
                fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
                    Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
                }
            }

            impl IntoIterator for $name {
                type Item = (String, Value);
                type IntoIter = std::collections::hash_map::IntoIter<String, Value>;

                fn into_iter(self) -> Self::IntoIter {
                    self.0.into_iter()
                }
            }
        )*
    };
}

define_config_map! {
    /// Field values as persisted by the host: checkbox fields are complete
    /// `option -> bool` maps.
    UserConfiguration,
    /// Field values as shown on the editing surface: checkbox fields are
    /// arrays of selected option values. Never persisted directly.
    EditableConfiguration,
}

impl UserConfiguration {
    /// Parses a persisted JSON object. `null` yields an empty configuration.
    pub fn from_json_value(value: Value) -> Result<Self, serde_json::Error> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value)
    }
}

impl EditableConfiguration {
    /// Loads a persisted configuration into the editing surface.
    ///
    /// Only current definitions are carried over. Each field takes its
    /// persisted value, else its default, else stays absent; checkbox fields
    /// are always present as a (possibly empty) selection.
    pub fn from_persisted(persisted: &UserConfiguration, definitions: &[VariableDefinition]) -> Self {
        let mut editable = Self::new();
        for def in definitions {
            let value = persisted.get(&def.key);
            match def.var_type {
                VarType::MultiOption => {
                    let selected = checkbox::to_editable(value, def);
                    editable.insert(def.key.clone(), selection_json(selected));
                }
                _ => {
                    if let Some(value) = value.or(def.default.as_ref()) {
                        editable.insert(def.key.clone(), value.clone());
                    }
                }
            }
        }
        editable
    }

    /// Expands the form back into the persisted shape.
    ///
    /// Checkbox fields become complete maps over the definition's options;
    /// every other value, including keys with no definition, is kept as is.
    pub fn into_backend(self, definitions: &[VariableDefinition]) -> UserConfiguration {
        self.into_iter()
            .map(|(key, value)| {
                let value = match definitions.iter().find(|d| d.key == key) {
                    Some(def) if def.var_type == VarType::MultiOption => {
                        let selected = checkbox::to_editable(Some(&value), def);
                        checkbox::to_backend_json(&selected, def)
                    }
                    _ => value,
                };
                (key, value)
            })
            .collect()
    }
}

pub(crate) fn selection_json(selected: Vec<String>) -> Value {
    Value::Array(selected.into_iter().map(Value::String).collect())
}
