//! Normalization of `checkbox` (multi-option) values.
//!
//! A checkbox value travels in two shapes: the editing surface works with the
//! list of selected option values, while persisted configurations always hold
//! a complete `option -> bool` map with one entry per declared option. Both
//! shapes are accepted on read; this module is the only place that knows
//! about the duality.

use crate::error::FieldError;
use crate::schema::VariableDefinition;
use ahash::AHashMap;
use serde_json::{Map, Value};

/// Backend shape of a checkbox value: one entry per declared option.
pub type CheckboxMap = AHashMap<String, bool>;

/// Converts any accepted wire shape into the list of selected option values.
///
/// * a sequence is filtered down to declared values, keeping its order;
/// * a map yields the declared values (in declaration order) mapped to `true`;
/// * a bare string is treated as a one-element sequence;
/// * when `raw` is absent the definition's default goes through the same rules.
///
/// Anything else, including a missing default, yields an empty selection.
pub fn to_editable(raw: Option<&Value>, def: &VariableDefinition) -> Vec<String> {
    let Some(value) = raw.or(def.default.as_ref()) else {
        return Vec::new();
    };

    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .filter(|v| def.has_option(v))
            .map(str::to_string)
            .collect(),
        Value::Object(flags) => def
            .option_values()
            .filter(|v| matches!(flags.get(*v), Some(Value::Bool(true))))
            .map(str::to_string)
            .collect(),
        Value::String(single) if def.has_option(single) => vec![single.clone()],
        _ => Vec::new(),
    }
}

/// Expands a selection into the complete backend map.
///
/// Every declared option gets an entry, `true` when selected, so a persisted
/// value never depends on the definition to reconstruct unselected options.
pub fn to_backend<S: AsRef<str>>(selected: &[S], def: &VariableDefinition) -> CheckboxMap {
    def.option_values()
        .map(|option| {
            let on = selected.iter().any(|s| s.as_ref() == option);
            (option.to_string(), on)
        })
        .collect()
}

/// Same as [`to_backend`], as a JSON object in option declaration order.
pub fn to_backend_json<S: AsRef<str>>(selected: &[S], def: &VariableDefinition) -> Value {
    let object: Map<String, Value> = def
        .option_values()
        .map(|option| {
            let on = selected.iter().any(|s| s.as_ref() == option);
            (option.to_string(), Value::Bool(on))
        })
        .collect();
    Value::Object(object)
}

/// Strictly decodes a persisted checkbox value into its selected values.
///
/// Used by validation: a sequence must contain only strings and a map must
/// contain only booleans. Option membership is not checked here.
pub(crate) fn decode_selection(value: &Value) -> Result<Vec<String>, FieldError> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or(FieldError::NonStringItem { index })
            })
            .collect(),
        Value::Object(flags) => {
            let mut selected = Vec::new();
            for (option, flag) in flags {
                match flag {
                    Value::Bool(true) => selected.push(option.clone()),
                    Value::Bool(false) => {}
                    _ => {
                        return Err(FieldError::NonBooleanFlag {
                            option: option.clone(),
                        });
                    }
                }
            }
            Ok(selected)
        }
        _ => Err(FieldError::NotAList),
    }
}

/// Lenient truthiness used when handing values to a running plugin.
///
/// Numbers count only by their integer value, so `0.5` is false.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64().is_some_and(|i| i != 0),
        Value::String(s) => s == "true" || s == "1",
        _ => false,
    }
}
