use super::UserConfiguration;
use crate::checkbox;
use crate::schema::{VarType, VariableDefinition};
use serde_json::{Map, Value};

/// Builds the configuration a plugin script receives when it runs.
///
/// Every declared variable is present: the user's value wins over the
/// default, and the result is coerced to the declared type so the script
/// never sees a missing variable or a value of the wrong kind. Keys the schema
/// does not know are passed through untouched.
pub fn effective_configuration(
    definitions: &[VariableDefinition],
    user_config: &UserConfiguration,
) -> UserConfiguration {
    let mut merged = UserConfiguration::new();
    for def in definitions {
        let value = user_config.get(&def.key).or(def.default.as_ref());
        merged.insert(def.key.clone(), coerce(def, value));
    }

    for (key, value) in user_config.iter() {
        if !merged.contains_key(key) {
            merged.insert(key.clone(), value.clone());
        }
    }

    merged
}

fn coerce(def: &VariableDefinition, value: Option<&Value>) -> Value {
    match def.var_type {
        VarType::MultiOption => coerce_checkbox(def, value),
        VarType::Integer => Value::from(match value {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse::<i64>().unwrap_or(0),
            Some(Value::Bool(b)) => i64::from(*b),
            _ => 0,
        }),
        VarType::Float => {
            let f = match value {
                Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
                Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
                Some(Value::Bool(b)) => f64::from(u8::from(*b)),
                _ => 0.0,
            };
            Value::from(if f.is_finite() { f } else { 0.0 })
        }
        VarType::Boolean => Value::Bool(value.is_some_and(checkbox::is_truthy)),
        VarType::SingleOption => value.cloned().unwrap_or_else(|| Value::String(String::new())),
        VarType::List => value.cloned().unwrap_or_else(|| Value::Array(Vec::new())),
    }
}

/// Complete map over the declared options; the input may be a map, a list of
/// selected values or a single selected value.
fn coerce_checkbox(def: &VariableDefinition, value: Option<&Value>) -> Value {
    let mut flags: Map<String, Value> = def
        .option_values()
        .map(|option| (option.to_string(), Value::Bool(false)))
        .collect();

    let mut select = |option: &str, on: bool| {
        if let Some(slot) = flags.get_mut(option) {
            *slot = Value::Bool(on);
        }
    };

    match value {
        Some(Value::Object(map)) => {
            for (option, flag) in map {
                select(option.as_str(), checkbox::is_truthy(flag));
            }
        }
        Some(Value::Array(items)) => {
            for option in items.iter().filter_map(Value::as_str) {
                select(option, true);
            }
        }
        Some(Value::String(option)) => select(option.as_str(), true),
        _ => {}
    }

    Value::Object(flags)
}
