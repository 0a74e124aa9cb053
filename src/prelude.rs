//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions of the
//! crate. Import it to get the whole check / repair / save workflow without
//! naming each module.
//!
//! # Example
//!
//! ```rust,no_run
//! use kabe_vars::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let catalog = PluginDirectory::new("path/to/plugins");
//! let store = JsonStore::new("path/to/store");
//!
//! let checker = CompatibilityChecker::from_catalog(&catalog);
//! let cache = CompatibilityCache::new();
//! for run in store.run_configurations()? {
//!     println!("{}: {}", run.name, cache.get(&run, &checker));
//! }
//! # Ok(())
//! # }
//! ```

// Schema and values
pub use crate::schema::{PluginSchemaFile, VarOption, VarType, VariableDefinition, VariableSchema};
pub use crate::value::RawValue;

// Engine
pub use crate::checkbox::{CheckboxMap, to_backend, to_editable};
pub use crate::compat::{
    CompatibilityCache, CompatibilityChecker, CompatibilityResult, CompatibilityWarning,
    ContentError, VersionIssue, check, check_content,
};
pub use crate::repair::{RepairOutcome, repair, repair_user_config};
pub use crate::validator::{is_required, validate};

// Configurations
pub use crate::config::{
    EditableConfiguration, RunConfiguration, UserConfiguration, apply_assignments,
    effective_configuration, parse_assignment,
};

// Host seams
pub use crate::catalog::{
    ConfigurationStore, JsonStore, MemoryCatalog, MemoryStore, PluginCatalog, PluginDirectory,
};

// Error types
pub use crate::error::{AssignmentError, CatalogError, FieldError, SchemaError, StoreError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
