use crate::checkbox;
use crate::error::FieldError;
use crate::schema::VarType;
use itertools::Itertools;
use serde_json::Value;
use std::fmt;

/// A persisted value decoded against the type of its variable definition.
///
/// There is one variant per [`VarType`]. `MultiOption` always holds the
/// selected option values, whichever wire shape it was decoded from.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    SingleOption(String),
    MultiOption(Vec<String>),
    List(Vec<String>),
}

impl RawValue {
    /// Decodes a JSON value into the shape required by `var_type`.
    ///
    /// Only the shape is checked here: bounds and option membership are the
    /// validator's business.
    pub fn decode(value: &Value, var_type: VarType) -> Result<Self, FieldError> {
        match var_type {
            VarType::Integer => as_integer(value).map(RawValue::Integer),
            VarType::Float => value
                .as_f64()
                .map(RawValue::Float)
                .ok_or(FieldError::NotANumber),
            VarType::Boolean => value
                .as_bool()
                .map(RawValue::Boolean)
                .ok_or(FieldError::NotABoolean),
            VarType::SingleOption => value
                .as_str()
                .map(|s| RawValue::SingleOption(s.to_string()))
                .ok_or(FieldError::NotAString),
            VarType::MultiOption => checkbox::decode_selection(value).map(RawValue::MultiOption),
            VarType::List => string_list(value).map(RawValue::List),
        }
    }

    /// The numeric value, for bound checks.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Integer(n) => Some(*n as f64),
            RawValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// The value in editable shape (`MultiOption` as an array of selected values).
    pub fn to_editable_json(&self) -> Value {
        match self {
            RawValue::Integer(n) => Value::from(*n),
            RawValue::Float(n) => Value::from(*n),
            RawValue::Boolean(b) => Value::Bool(*b),
            RawValue::SingleOption(s) => Value::String(s.clone()),
            RawValue::MultiOption(items) | RawValue::List(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Integer(n) => write!(f, "{}", n),
            RawValue::Float(n) => write!(f, "{}", n),
            RawValue::Boolean(b) => write!(f, "{}", b),
            RawValue::SingleOption(s) => write!(f, "{}", s),
            RawValue::MultiOption(items) | RawValue::List(items) => {
                write!(f, "[{}]", items.iter().join(", "))
            }
        }
    }
}

/// JSON has a single number type, so `3.0` is an integer as long as it has no
/// fractional part and fits in an `i64`.
fn as_integer(value: &Value) -> Result<i64, FieldError> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
        _ => Err(FieldError::NotAnInteger),
    }
}

fn string_list(value: &Value) -> Result<Vec<String>, FieldError> {
    let items = value.as_array().ok_or(FieldError::NotAList)?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_str()
                .map(str::to_string)
                .ok_or(FieldError::NonStringItem { index })
        })
        .collect()
}
