use serde::Serialize;
use thiserror::Error;

/// Reasons a single persisted value is rejected by its variable definition.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldError {
    #[error("not an integer")]
    NotAnInteger,

    #[error("not a number")]
    NotANumber,

    #[error("below minimum {min}")]
    BelowMinimum { min: f64 },

    #[error("above maximum {max}")]
    AboveMaximum { max: f64 },

    #[error("not a boolean")]
    NotABoolean,

    #[error("not a string")]
    NotAString,

    #[error("'{value}' is not one of the declared options")]
    UnknownOption { value: String },

    #[error("not a list")]
    NotAList,

    #[error("list item {index} is not a string")]
    NonStringItem { index: usize },

    #[error("option '{option}' is not mapped to a boolean")]
    NonBooleanFlag { option: String },
}

/// Problems found in a variable schema.
///
/// Duplicate keys and duplicate option values stop a schema from loading;
/// the other variants are only reported by
/// [`VariableSchema::lint`](crate::schema::VariableSchema::lint).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Failed to parse plugin schema JSON: {0}")]
    JsonParseError(String),

    #[error("Variable key '{0}' is declared more than once")]
    DuplicateKey(String),

    #[error("Variable '{key}' declares option value '{value}' more than once")]
    DuplicateOption { key: String, value: String },

    #[error("Variable '{key}' has min {min} greater than max {max}")]
    InvertedBounds { key: String, min: f64, max: f64 },

    #[error("Variable '{key}' declares min/max but is not a numeric type")]
    UnexpectedBounds { key: String },

    #[error("Variable '{key}' declares options but is not an option type")]
    UnexpectedOptions { key: String },

    #[error("Default of variable '{key}' is invalid: {reason}")]
    InvalidDefault { key: String, reason: FieldError },
}

/// Errors reported by a [`PluginCatalog`](crate::catalog::PluginCatalog) implementation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Plugin '{0}' is not installed")]
    PluginNotFound(String),

    #[error("Variable definitions of plugin '{plugin_id}' could not be read: {message}")]
    Unreadable { plugin_id: String, message: String },
}

/// Errors reported by a [`ConfigurationStore`](crate::catalog::ConfigurationStore) implementation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Could not access '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Malformed JSON in '{path}': {message}")]
    Json { path: String, message: String },

    #[error("Run configuration '{0}' not found")]
    RunConfigurationNotFound(String),
}

/// Errors produced when parsing a `key=value` assignment from the command line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssignmentError {
    #[error("Expected 'key=value', got '{0}'")]
    MissingSeparator(String),

    #[error("Plugin declares no variable named '{0}'")]
    UnknownKey(String),

    #[error("Variable '{key}' expects {expected}, but got '{found}'")]
    InvalidValue {
        key: String,
        expected: &'static str,
        found: String,
    },
}
