//! Best-effort reconstruction of a stale run configuration.
//!
//! Repair never fails, but it does not promise a complete configuration
//! either: a required field whose saved value is unusable stays absent.
//! Callers must check [`RepairOutcome::unresolved`] (or run
//! [`EditableConfiguration::missing_required`]) before treating the result as
//! runnable.

use crate::checkbox;
use crate::config::user::selection_json;
use crate::config::{EditableConfiguration, RunConfiguration, UserConfiguration};
use crate::schema::{VarType, VariableDefinition};
use crate::validator;
use serde_json::Value;

/// What repair did to each current definition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepairOutcome {
    /// The repaired configuration, in editable shape.
    pub configuration: EditableConfiguration,
    /// Keys whose saved value was valid and kept.
    pub kept: Vec<String>,
    /// Keys that fell back to their default.
    pub defaulted: Vec<String>,
    /// Keys left absent: no usable saved value and no usable default.
    pub unresolved: Vec<String>,
}

/// Builds an editable configuration from `run`, field by field: the saved
/// value if it still validates, else the default if it is still usable, else
/// nothing.
pub fn repair(run: &RunConfiguration, definitions: &[VariableDefinition]) -> EditableConfiguration {
    repair_user_config(&run.user_config, definitions).configuration
}

/// Same as [`repair`], reporting the decision taken for every field.
pub fn repair_user_config(
    user_config: &UserConfiguration,
    definitions: &[VariableDefinition],
) -> RepairOutcome {
    let mut outcome = RepairOutcome::default();

    for def in definitions {
        let saved = user_config
            .get(&def.key)
            .and_then(|value| editable_value(value, def));

        let value = if let Some(value) = saved {
            outcome.kept.push(def.key.clone());
            value
        } else if let Some(default) = def.default.as_ref().and_then(|d| usable_default(d, def)) {
            log::debug!("Falling back to default for '{}'", def.key);
            outcome.defaulted.push(def.key.clone());
            default
        } else {
            outcome.unresolved.push(def.key.clone());
            continue;
        };

        outcome.configuration.insert(def.key.clone(), value);
    }

    outcome
}

/// The value in editable shape, if it validates against `def`.
fn editable_value(value: &Value, def: &VariableDefinition) -> Option<Value> {
    let raw = validator::validate(value, def).ok()?;
    Some(match def.var_type {
        // Keeps the declaration order of the options.
        VarType::MultiOption => selection_json(checkbox::to_editable(Some(value), def)),
        _ => raw.to_editable_json(),
    })
}

/// Defaults may name options the plugin has since removed. A checkbox default
/// drops those values; any other default must still validate.
fn usable_default(default: &Value, def: &VariableDefinition) -> Option<Value> {
    match def.var_type {
        VarType::MultiOption => Some(selection_json(checkbox::to_editable(Some(default), def))),
        _ => {
            let value = editable_value(default, def);
            if value.is_none() {
                log::warn!("Ignoring invalid default of '{}'", def.key);
            }
            value
        }
    }
}
