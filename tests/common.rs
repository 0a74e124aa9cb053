//! Common test utilities for building plugin schemas and saved configurations.
use kabe_vars::prelude::*;
use serde_json::{Value, json};

pub const PLUGIN_ID: &str = "konachan";

/// The schema of a typical image board plugin, as written in its `config.json`.
pub const PLUGIN_CONFIG_JSON: &str = r#"{
    "baseUrl": "https://konachan.net",
    "var": [
        {"key": "count", "type": "int", "name": "Pages", "min": 1, "max": 100},
        {"key": "ratio", "type": "float", "name": "Min ratio", "default": 1.0, "min": 0.5, "max": 4.0},
        {"key": "safe", "type": "boolean", "name": "Safe only", "default": true},
        {
            "key": "quality", "type": "options", "name": "Quality", "default": "high",
            "options": [{"name": "High", "variable": "high"}, {"name": "Low", "variable": "low"}]
        },
        {
            "key": "tags", "type": "checkbox", "name": "Tags", "descripts": "Tags to collect",
            "options": ["landscape", "portrait", "city"], "default": ["landscape"]
        },
        {"key": "extra", "type": "list", "name": "Extra tags", "default": []}
    ]
}"#;

/// Definitions matching [`PLUGIN_CONFIG_JSON`], built in code.
#[allow(dead_code)]
pub fn plugin_definitions() -> Vec<VariableDefinition> {
    vec![
        VariableDefinition::new("count", VarType::Integer)
            .with_name("Pages")
            .with_bounds(1.0, 100.0),
        VariableDefinition::new("ratio", VarType::Float)
            .with_name("Min ratio")
            .with_bounds(0.5, 4.0)
            .with_default(json!(1.0)),
        VariableDefinition::new("safe", VarType::Boolean)
            .with_name("Safe only")
            .with_default(json!(true)),
        VariableDefinition::new("quality", VarType::SingleOption)
            .with_name("Quality")
            .with_options([VarOption::new("High", "high"), VarOption::new("Low", "low")])
            .with_default(json!("high")),
        VariableDefinition::new("tags", VarType::MultiOption)
            .with_name("Tags")
            .with_description("Tags to collect")
            .with_options(["landscape", "portrait", "city"])
            .with_default(json!(["landscape"])),
        VariableDefinition::new("extra", VarType::List)
            .with_name("Extra tags")
            .with_default(json!([])),
    ]
}

/// A saved configuration that is valid against [`plugin_definitions`].
#[allow(dead_code)]
pub fn valid_user_config() -> UserConfiguration {
    config([
        ("count", json!(10)),
        ("ratio", json!(1.5)),
        ("safe", json!(false)),
        ("quality", json!("low")),
        ("tags", json!({"landscape": true, "portrait": false, "city": true})),
        ("extra", json!(["night"])),
    ])
}

/// Builds a configuration from literal pairs.
#[allow(dead_code)]
pub fn config<const N: usize>(pairs: [(&str, Value); N]) -> UserConfiguration {
    pairs.into_iter().collect()
}

#[allow(dead_code)]
pub fn run_config(id: &str, plugin_id: &str, user_config: UserConfiguration) -> RunConfiguration {
    RunConfiguration::new(id, format!("Run {}", id), plugin_id).with_user_config(user_config)
}

/// A checker with the sample plugin installed.
#[allow(dead_code)]
pub fn checker() -> CompatibilityChecker {
    CompatibilityChecker::new().with_plugin(PLUGIN_ID, plugin_definitions())
}

/// The one-variable schema used by the scenario tests: an `int` named `count`
/// bounded to `1..=100`, with no default.
#[allow(dead_code)]
pub fn count_definition() -> Vec<VariableDefinition> {
    vec![VariableDefinition::new("count", VarType::Integer).with_bounds(1.0, 100.0)]
}
