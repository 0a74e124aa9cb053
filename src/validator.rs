//! Per-field validation of persisted values.
//!
//! Validation of one field never looks at any other field, has no side effects
//! and never panics, so it may be called from any thread.

use crate::error::FieldError;
use crate::schema::{VarType, VariableDefinition};
use crate::value::RawValue;
use serde_json::Value;

/// A definition is required exactly when it has no default.
pub fn is_required(def: &VariableDefinition) -> bool {
    def.is_required()
}

/// Validates `value` against `def`, returning the decoded value on success.
///
/// Numeric bounds are inclusive. For option types every selected value must be
/// declared; a single unknown value rejects the whole field.
pub fn validate(value: &Value, def: &VariableDefinition) -> Result<RawValue, FieldError> {
    let raw = RawValue::decode(value, def.var_type)?;

    match def.var_type {
        VarType::Integer | VarType::Float => {
            if let Some(n) = raw.as_f64() {
                check_bounds(n, def)?;
            }
        }
        VarType::SingleOption => {
            if let RawValue::SingleOption(selected) = &raw {
                check_option(selected, def)?;
            }
        }
        VarType::MultiOption => {
            if let RawValue::MultiOption(selected) = &raw {
                for value in selected {
                    check_option(value, def)?;
                }
            }
        }
        VarType::Boolean | VarType::List => {}
    }

    Ok(raw)
}

fn check_bounds(n: f64, def: &VariableDefinition) -> Result<(), FieldError> {
    if let Some(min) = def.min {
        if n < min {
            return Err(FieldError::BelowMinimum { min });
        }
    }
    if let Some(max) = def.max {
        if n > max {
            return Err(FieldError::AboveMaximum { max });
        }
    }
    Ok(())
}

fn check_option(value: &str, def: &VariableDefinition) -> Result<(), FieldError> {
    if def.has_option(value) {
        Ok(())
    } else {
        Err(FieldError::UnknownOption {
            value: value.to_string(),
        })
    }
}
