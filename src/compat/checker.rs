use super::result::{CompatibilityResult, CompatibilityWarning, ContentError};
use crate::catalog::PluginCatalog;
use crate::config::{RunConfiguration, UserConfiguration};
use crate::schema::VariableDefinition;
use crate::validator;
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use rayon::prelude::*;

/// Checks a saved run configuration against the installed plugins.
///
/// `definitions` is `None` when the host could not obtain the plugin's
/// definitions; that is treated exactly like an uninstalled plugin.
pub fn check<S: AsRef<str>>(
    run: &RunConfiguration,
    installed_plugin_ids: &[S],
    definitions: Option<&[VariableDefinition]>,
) -> CompatibilityResult {
    let installed = installed_plugin_ids
        .iter()
        .any(|id| id.as_ref() == run.plugin_id);
    match definitions {
        Some(definitions) if installed => check_content(&run.user_config, definitions),
        _ => CompatibilityResult::plugin_missing(),
    }
}

/// Content phase of [`check`], for a plugin known to be installed.
///
/// Fields the schema no longer declares produce warnings. Fields failing
/// validation, and required fields without a value, produce errors. An empty
/// schema accepts any configuration.
pub fn check_content(
    user_config: &UserConfiguration,
    definitions: &[VariableDefinition],
) -> CompatibilityResult {
    if definitions.is_empty() {
        return CompatibilityResult::from_content(Vec::new(), Vec::new());
    }

    let by_key: AHashMap<&str, &VariableDefinition> =
        definitions.iter().map(|d| (d.key.as_str(), d)).collect();

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for (key, value) in user_config.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
        match by_key.get(key.as_str()) {
            None => warnings.push(CompatibilityWarning::FieldRemoved { key: key.clone() }),
            Some(def) => {
                if let Err(reason) = validator::validate(value, def) {
                    errors.push(ContentError::FieldInvalid {
                        key: key.clone(),
                        reason,
                    });
                }
            }
        }
    }

    errors.extend(
        user_config
            .missing_required(definitions)
            .into_iter()
            .map(|key| ContentError::MissingRequiredField { key }),
    );

    CompatibilityResult::from_content(errors, warnings)
}

/// A snapshot of installed plugins and their definitions.
///
/// All I/O happens while building the snapshot; checks against it are pure
/// and may run from any thread. Rebuild it when the installed plugin set
/// changes.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityChecker {
    installed: AHashSet<String>,
    definitions: AHashMap<String, Vec<VariableDefinition>>,
}

impl CompatibilityChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an installed plugin and its current definitions.
    pub fn with_plugin(
        mut self,
        plugin_id: impl Into<String>,
        definitions: Vec<VariableDefinition>,
    ) -> Self {
        let plugin_id = plugin_id.into();
        self.installed.insert(plugin_id.clone());
        self.definitions.insert(plugin_id, definitions);
        self
    }

    /// Loads every installed plugin's definitions from `catalog`.
    ///
    /// A plugin whose definitions cannot be read stays listed as installed
    /// but without definitions, so its configurations report a missing plugin.
    pub fn from_catalog(catalog: &(impl PluginCatalog + ?Sized)) -> Self {
        let mut checker = Self::new();
        for plugin_id in catalog.installed_plugin_ids() {
            match catalog.variable_definitions(&plugin_id) {
                Ok(definitions) => {
                    checker.definitions.insert(plugin_id.clone(), definitions);
                }
                Err(e) => log::warn!("Treating plugin '{}' as missing: {}", plugin_id, e),
            }
            checker.installed.insert(plugin_id);
        }
        log::info!(
            "Loaded definitions for {} of {} installed plugins",
            checker.definitions.len(),
            checker.installed.len()
        );
        checker
    }

    pub fn is_installed(&self, plugin_id: &str) -> bool {
        self.installed.contains(plugin_id)
    }

    pub fn definitions(&self, plugin_id: &str) -> Option<&[VariableDefinition]> {
        self.definitions.get(plugin_id).map(Vec::as_slice)
    }

    pub fn installed_plugin_ids(&self) -> impl Iterator<Item = &str> {
        self.installed.iter().map(String::as_str)
    }

    pub fn check(&self, run: &RunConfiguration) -> CompatibilityResult {
        if !self.is_installed(&run.plugin_id) {
            log::debug!(
                "Run configuration '{}' references uninstalled plugin '{}'",
                run.id,
                run.plugin_id
            );
            return CompatibilityResult::plugin_missing();
        }
        match self.definitions(&run.plugin_id) {
            Some(definitions) => check_content(&run.user_config, definitions),
            None => CompatibilityResult::plugin_missing(),
        }
    }

    /// Checks many configurations in parallel, preserving input order.
    pub fn check_all(&self, runs: &[RunConfiguration]) -> Vec<CompatibilityResult> {
        runs.par_iter().map(|run| self.check(run)).collect()
    }
}
