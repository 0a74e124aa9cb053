use super::{ConfigurationStore, PluginCatalog};
use crate::config::{RunConfiguration, UserConfiguration};
use crate::error::{CatalogError, StoreError};
use crate::schema::{PluginSchemaFile, VariableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const SCHEMA_FILE: &str = "config.json";
const RUN_CONFIGS_FILE: &str = "run_configs.json";
const PLUGIN_CONFIGS_DIR: &str = "plugin_configs";

/// Plugins unpacked under one directory, one sub-directory per plugin id,
/// each holding a `config.json` with the plugin's `var` list.
#[derive(Debug, Clone)]
pub struct PluginDirectory {
    root: PathBuf,
}

impl PluginDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn schema_path(&self, plugin_id: &str) -> PathBuf {
        self.root.join(file_safe(plugin_id)).join(SCHEMA_FILE)
    }
}

impl PluginCatalog for PluginDirectory {
    fn installed_plugin_ids(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Could not list plugins in '{}': {}", self.root.display(), e);
                return Vec::new();
            }
        };

        let mut ids: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.path().join(SCHEMA_FILE).is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            // Lookups go through `file_safe`, which would never reach these.
            .filter(|name| file_safe(name) == *name)
            .collect();
        ids.sort();
        ids
    }

    fn variable_definitions(
        &self,
        plugin_id: &str,
    ) -> Result<Vec<VariableDefinition>, CatalogError> {
        let path = self.schema_path(plugin_id);
        let json = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CatalogError::PluginNotFound(plugin_id.to_string()),
            _ => CatalogError::Unreadable {
                plugin_id: plugin_id.to_string(),
                message: e.to_string(),
            },
        })?;

        let schema = PluginSchemaFile::from_json(&json)
            .and_then(PluginSchemaFile::into_schema)
            .map_err(|e| CatalogError::Unreadable {
                plugin_id: plugin_id.to_string(),
                message: e.to_string(),
            })?;
        log::info!(
            "Loaded {} variable definitions for plugin '{}'",
            schema.len(),
            plugin_id
        );
        Ok(schema.into_definitions())
    }
}

/// Configuration store keeping JSON files under one root directory:
/// `plugin_configs/<plugin_id>.json` and `run_configs.json`.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Adds `run`, replacing any configuration with the same id.
    pub fn add_run_configuration(&self, run: RunConfiguration) -> Result<(), StoreError> {
        let mut runs = self.run_configurations()?;
        runs.retain(|existing| existing.id != run.id);
        runs.push(run);
        write_json(&self.root.join(RUN_CONFIGS_FILE), &runs)
    }

    pub fn delete_run_configuration(&self, run_id: &str) -> Result<(), StoreError> {
        let mut runs = self.run_configurations()?;
        let before = runs.len();
        runs.retain(|existing| existing.id != run_id);
        if runs.len() == before {
            return Err(StoreError::RunConfigurationNotFound(run_id.to_string()));
        }
        write_json(&self.root.join(RUN_CONFIGS_FILE), &runs)
    }

    fn plugin_config_path(&self, plugin_id: &str) -> PathBuf {
        self.root
            .join(PLUGIN_CONFIGS_DIR)
            .join(format!("{}.json", file_safe(plugin_id)))
    }
}

impl ConfigurationStore for JsonStore {
    fn persisted_configuration(&self, plugin_id: &str) -> Result<UserConfiguration, StoreError> {
        Ok(read_json(&self.plugin_config_path(plugin_id))?.unwrap_or_default())
    }

    fn save_persisted_configuration(
        &self,
        plugin_id: &str,
        config: &UserConfiguration,
    ) -> Result<(), StoreError> {
        write_json(&self.plugin_config_path(plugin_id), config)
    }

    fn run_configurations(&self) -> Result<Vec<RunConfiguration>, StoreError> {
        Ok(read_json(&self.root.join(RUN_CONFIGS_FILE))?.unwrap_or_default())
    }
}

/// Reads a JSON file; a missing file is `Ok(None)`.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error(path, e)),
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| StoreError::Json {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|e| StoreError::Json {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    fs::write(path, json).map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, e: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

// Plugin ids come from package metadata; keep them inside the root.
fn file_safe(plugin_id: &str) -> String {
    plugin_id
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c => c,
        })
        .collect::<String>()
        .replace("..", "_")
}
