use crate::error::FieldError;
use serde::Serialize;
use std::fmt;

/// Why a run configuration failed the plugin existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VersionIssue {
    /// The plugin is not installed, or its definitions could not be read.
    PluginNotFound,
}

impl fmt::Display for VersionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionIssue::PluginNotFound => write!(f, "plugin not found"),
        }
    }
}

/// A persisted field that blocks running the configuration as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ContentError {
    FieldInvalid { key: String, reason: FieldError },
    MissingRequiredField { key: String },
}

impl ContentError {
    pub fn key(&self) -> &str {
        match self {
            ContentError::FieldInvalid { key, .. } | ContentError::MissingRequiredField { key } => {
                key
            }
        }
    }
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::FieldInvalid { key, reason } => {
                write!(f, "invalid field {}: {}", key, reason)
            }
            ContentError::MissingRequiredField { key } => {
                write!(f, "missing required field: {}", key)
            }
        }
    }
}

/// Informational findings that do not block running the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CompatibilityWarning {
    /// The saved configuration holds a field the plugin no longer declares.
    FieldRemoved { key: String },
}

impl CompatibilityWarning {
    pub fn key(&self) -> &str {
        match self {
            CompatibilityWarning::FieldRemoved { key } => key,
        }
    }
}

impl fmt::Display for CompatibilityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompatibilityWarning::FieldRemoved { key } => write!(f, "field removed: {}", key),
        }
    }
}

/// Verdict on whether a saved run configuration can be used as-is.
///
/// Error and warning order carries no meaning; the checker sorts them by key
/// only so that output is stable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityResult {
    pub version_compatible: bool,
    pub content_compatible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_reason: Option<VersionIssue>,
    pub content_errors: Vec<ContentError>,
    pub warnings: Vec<CompatibilityWarning>,
}

impl CompatibilityResult {
    pub fn plugin_missing() -> Self {
        Self {
            version_compatible: false,
            content_compatible: false,
            version_reason: Some(VersionIssue::PluginNotFound),
            content_errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn from_content(
        content_errors: Vec<ContentError>,
        warnings: Vec<CompatibilityWarning>,
    ) -> Self {
        Self {
            version_compatible: true,
            content_compatible: content_errors.is_empty(),
            version_reason: None,
            content_errors,
            warnings,
        }
    }

    /// Whether the configuration can be run with one click.
    pub fn is_runnable(&self) -> bool {
        self.version_compatible && self.content_compatible
    }
}

impl fmt::Display for CompatibilityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(reason) = &self.version_reason {
            return write!(f, "incompatible: {}", reason);
        }
        if self.content_compatible {
            write!(f, "compatible")?;
        } else {
            write!(f, "incompatible: {} field error(s)", self.content_errors.len())?;
        }
        if !self.warnings.is_empty() {
            write!(f, " ({} warning(s))", self.warnings.len())?;
        }
        Ok(())
    }
}
