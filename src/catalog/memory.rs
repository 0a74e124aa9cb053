use super::{ConfigurationStore, PluginCatalog};
use crate::config::{RunConfiguration, UserConfiguration};
use crate::error::{CatalogError, StoreError};
use crate::schema::VariableDefinition;
use ahash::AHashMap;
use std::sync::{PoisonError, RwLock};

/// A fixed set of plugins held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    plugins: AHashMap<String, Result<Vec<VariableDefinition>, String>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plugin(
        mut self,
        plugin_id: impl Into<String>,
        definitions: Vec<VariableDefinition>,
    ) -> Self {
        self.plugins.insert(plugin_id.into(), Ok(definitions));
        self
    }

    /// Registers an installed plugin whose definitions cannot be read.
    pub fn with_unreadable_plugin(
        mut self,
        plugin_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.plugins.insert(plugin_id.into(), Err(message.into()));
        self
    }
}

impl PluginCatalog for MemoryCatalog {
    fn installed_plugin_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.plugins.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn variable_definitions(
        &self,
        plugin_id: &str,
    ) -> Result<Vec<VariableDefinition>, CatalogError> {
        match self.plugins.get(plugin_id) {
            Some(Ok(definitions)) => Ok(definitions.clone()),
            Some(Err(message)) => Err(CatalogError::Unreadable {
                plugin_id: plugin_id.to_string(),
                message: message.clone(),
            }),
            None => Err(CatalogError::PluginNotFound(plugin_id.to_string())),
        }
    }
}

/// Configuration store backed by in-memory maps.
#[derive(Debug, Default)]
pub struct MemoryStore {
    persisted: RwLock<AHashMap<String, UserConfiguration>>,
    runs: RwLock<Vec<RunConfiguration>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_run_configuration(self, run: RunConfiguration) -> Self {
        self.add_run_configuration(run);
        self
    }

    /// Adds `run`, replacing any configuration with the same id.
    pub fn add_run_configuration(&self, run: RunConfiguration) {
        let mut runs = self.runs.write().unwrap_or_else(PoisonError::into_inner);
        runs.retain(|existing| existing.id != run.id);
        runs.push(run);
    }
}

impl ConfigurationStore for MemoryStore {
    fn persisted_configuration(&self, plugin_id: &str) -> Result<UserConfiguration, StoreError> {
        Ok(self
            .persisted
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(plugin_id)
            .cloned()
            .unwrap_or_default())
    }

    fn save_persisted_configuration(
        &self,
        plugin_id: &str,
        config: &UserConfiguration,
    ) -> Result<(), StoreError> {
        self.persisted
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(plugin_id.to_string(), config.clone());
        Ok(())
    }

    fn run_configurations(&self) -> Result<Vec<RunConfiguration>, StoreError> {
        Ok(self
            .runs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}
