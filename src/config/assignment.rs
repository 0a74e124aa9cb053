use super::UserConfiguration;
use crate::error::AssignmentError;
use crate::schema::{VarType, VariableDefinition};
use serde_json::Value;

/// Parses a `key=value` argument into a JSON value typed by the key's definition.
///
/// * `int` / `float` must parse as numbers;
/// * `boolean` accepts `true/false/1/0/yes/no/y/n/on/off`;
/// * `list` accepts a JSON value or a comma separated list;
/// * `checkbox` accepts JSON, otherwise the text is a single selected option;
/// * `options` takes the text verbatim.
pub fn parse_assignment(
    definitions: &[VariableDefinition],
    argument: &str,
) -> Result<(String, Value), AssignmentError> {
    let (key, raw) = argument
        .split_once('=')
        .ok_or_else(|| AssignmentError::MissingSeparator(argument.to_string()))?;
    let key = key.trim();
    let def = definitions
        .iter()
        .find(|d| d.key == key)
        .ok_or_else(|| AssignmentError::UnknownKey(key.to_string()))?;

    let invalid = |expected: &'static str| AssignmentError::InvalidValue {
        key: key.to_string(),
        expected,
        found: raw.to_string(),
    };

    let value = match def.var_type {
        VarType::Integer => raw
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| invalid("an integer"))?,
        VarType::Float => raw
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| invalid("a number"))?,
        VarType::Boolean => parse_bool(raw)
            .map(Value::Bool)
            .ok_or_else(|| invalid("a boolean (true/false/1/0)"))?,
        // Only a JSON array is taken as JSON; `5` or `true` is a one-item list.
        VarType::List => match serde_json::from_str(raw) {
            Ok(items @ Value::Array(_)) => items,
            _ => Value::Array(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| Value::String(s.to_string()))
                    .collect(),
            ),
        },
        VarType::MultiOption => {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
        }
        VarType::SingleOption => Value::String(raw.to_string()),
    };

    Ok((key.to_string(), value))
}

/// Applies several assignments in order; later ones overwrite earlier ones.
pub fn apply_assignments<S: AsRef<str>>(
    definitions: &[VariableDefinition],
    config: &mut UserConfiguration,
    arguments: &[S],
) -> Result<(), AssignmentError> {
    for argument in arguments {
        let (key, value) = parse_assignment(definitions, argument.as_ref())?;
        config.insert(key, value);
    }
    Ok(())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "on" => Some(true),
        "false" | "0" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}
