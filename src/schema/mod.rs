pub mod definition;
pub mod manifest;
pub mod option;

pub use definition::*;
pub use manifest::*;
pub use option::*;

use crate::error::SchemaError;
use crate::validator;
use ahash::AHashSet;

/// A checked, ordered list of variable definitions for one plugin.
///
/// Construction rejects only schemas the engine could not reason about:
/// duplicate keys and duplicate option values within one variable. Authoring
/// mistakes that leave each field checkable (inverted bounds, bounds or
/// options on the wrong type, stale defaults) are reported by [`lint`] and
/// logged, but the schema still loads.
///
/// [`lint`]: VariableSchema::lint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableSchema {
    definitions: Vec<VariableDefinition>,
}

impl VariableSchema {
    pub fn new(definitions: Vec<VariableDefinition>) -> Result<Self, SchemaError> {
        let mut keys = AHashSet::new();
        for def in &definitions {
            if !keys.insert(def.key.as_str()) {
                return Err(SchemaError::DuplicateKey(def.key.clone()));
            }
            check_options_unique(def)?;
        }

        let schema = Self { definitions };
        for issue in schema.lint() {
            log::warn!("{}", issue);
        }
        Ok(schema)
    }

    /// Non-fatal problems with the declared definitions, in declaration order.
    pub fn lint(&self) -> Vec<SchemaError> {
        self.definitions.iter().filter_map(lint_definition).collect()
    }

    /// Parses a JSON array of definitions.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let definitions: Vec<VariableDefinition> =
            serde_json::from_str(json).map_err(|e| SchemaError::JsonParseError(e.to_string()))?;
        Self::new(definitions)
    }

    pub fn definitions(&self) -> &[VariableDefinition] {
        &self.definitions
    }

    pub fn into_definitions(self) -> Vec<VariableDefinition> {
        self.definitions
    }

    pub fn get(&self, key: &str) -> Option<&VariableDefinition> {
        self.definitions.iter().find(|d| d.key == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VariableDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl AsRef<[VariableDefinition]> for VariableSchema {
    fn as_ref(&self) -> &[VariableDefinition] {
        &self.definitions
    }
}

impl<'a> IntoIterator for &'a VariableSchema {
    type Item = &'a VariableDefinition;
    type IntoIter = std::slice::Iter<'a, VariableDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.iter()
    }
}

fn check_options_unique(def: &VariableDefinition) -> Result<(), SchemaError> {
    let mut seen = AHashSet::new();
    for value in def.option_values() {
        if !seen.insert(value) {
            return Err(SchemaError::DuplicateOption {
                key: def.key.clone(),
                value: value.to_string(),
            });
        }
    }
    Ok(())
}

fn lint_definition(def: &VariableDefinition) -> Option<SchemaError> {
    let key = || def.key.clone();
    if (def.min.is_some() || def.max.is_some()) && !def.var_type.is_numeric() {
        return Some(SchemaError::UnexpectedBounds { key: key() });
    }
    if let (Some(min), Some(max)) = (def.min, def.max) {
        if min > max {
            return Some(SchemaError::InvertedBounds { key: key(), min, max });
        }
    }
    if !def.options().is_empty() && !def.var_type.has_options() {
        return Some(SchemaError::UnexpectedOptions { key: key() });
    }
    let default = def.default.as_ref()?;
    validator::validate(default, def)
        .err()
        .map(|reason| SchemaError::InvalidDefault { key: key(), reason })
}
