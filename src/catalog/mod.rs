//! Seams to the host application.
//!
//! The engine never performs I/O itself. A host implements these traits over
//! whatever storage it uses, loads what it needs, and hands plain values to
//! the engine. Two implementations ship with the crate: an in-memory one for
//! tests and embedding, and a JSON-on-disk one used by the command-line tool.

pub mod fs;
pub mod memory;

pub use fs::*;
pub use memory::*;

use crate::config::{EditableConfiguration, RunConfiguration, UserConfiguration};
use crate::error::{CatalogError, StoreError};
use crate::schema::VariableDefinition;

/// Source of installed plugins and their variable definitions.
pub trait PluginCatalog: Send + Sync {
    fn installed_plugin_ids(&self) -> Vec<String>;

    /// The plugin's current definitions. Hosts should return
    /// [`CatalogError::PluginNotFound`] for plugins that are not installed.
    fn variable_definitions(&self, plugin_id: &str)
    -> Result<Vec<VariableDefinition>, CatalogError>;
}

/// Key-value persistence for user configurations and run configurations.
pub trait ConfigurationStore: Send + Sync {
    /// The saved configuration of a plugin; empty when nothing was saved.
    fn persisted_configuration(&self, plugin_id: &str) -> Result<UserConfiguration, StoreError>;

    fn save_persisted_configuration(
        &self,
        plugin_id: &str,
        config: &UserConfiguration,
    ) -> Result<(), StoreError>;

    fn run_configurations(&self) -> Result<Vec<RunConfiguration>, StoreError>;

    fn run_configuration(&self, run_id: &str) -> Result<RunConfiguration, StoreError> {
        self.run_configurations()?
            .into_iter()
            .find(|run| run.id == run_id)
            .ok_or_else(|| StoreError::RunConfigurationNotFound(run_id.to_string()))
    }

    /// Saves an edited form, expanding checkbox selections into complete maps first.
    fn save_editable(
        &self,
        plugin_id: &str,
        editable: EditableConfiguration,
        definitions: &[VariableDefinition],
    ) -> Result<UserConfiguration, StoreError> {
        let backend = editable.into_backend(definitions);
        self.save_persisted_configuration(plugin_id, &backend)?;
        Ok(backend)
    }
}
