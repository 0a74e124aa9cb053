//! # kabe-vars - Plugin Variable Validation and Compatibility Engine
//!
//! Wallpaper collection plugins declare the variables they accept (their
//! *schema*); users save values for them, either as the plugin's persisted
//! configuration or as named run configurations. Plugins get updated, and the
//! saved values drift out of date. This crate decides what is still usable.
//!
//! ## Core Workflow
//!
//! 1.  **Load definitions**: Parse each plugin's `config.json` into a [`schema::VariableSchema`],
//!     or implement [`catalog::PluginCatalog`] over your own storage.
//! 2.  **Check**: Build a [`compat::CompatibilityChecker`] snapshot and check every saved
//!     [`config::RunConfiguration`]. Results distinguish a missing plugin from invalid fields,
//!     and report removed fields as warnings only. Wrap it in a [`compat::CompatibilityCache`]
//!     when the same configurations are checked repeatedly.
//! 3.  **Repair**: For configurations that fail, [`repair::repair`] keeps every value that still
//!     validates and falls back to defaults for the rest, producing an editable form.
//! 4.  **Save**: Turn the edited form back into the persisted shape with
//!     [`config::EditableConfiguration::into_backend`]. Checkbox fields are always written as a
//!     complete `option -> bool` map.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kabe_vars::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let schema = VariableSchema::from_json(
//!         r#"[
//!             {"key": "count", "type": "int", "name": "Pages", "min": 1, "max": 100},
//!             {"key": "tags", "type": "checkbox", "name": "Tags", "options": ["cat", "dog"]}
//!         ]"#,
//!     )?;
//!
//!     let saved: UserConfiguration = [("tags", json!({"cat": true, "dog": false}))]
//!         .into_iter()
//!         .collect();
//!     let run = RunConfiguration::new("daily", "Daily cats", "konachan").with_user_config(saved);
//!
//!     let checker = CompatibilityChecker::new()
//!         .with_plugin("konachan", schema.definitions().to_vec());
//!     let result = checker.check(&run);
//!
//!     if !result.is_runnable() {
//!         for error in &result.content_errors {
//!             println!("-> {}", error); // missing required field: count
//!         }
//!         let mut form = repair(&run, schema.definitions());
//!         form.insert("count", json!(5));
//!         let persisted = form.into_backend(schema.definitions());
//!         println!("{}", serde_json::to_string(&persisted)?);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod checkbox;
pub mod compat;
pub mod config;
pub mod error;
pub mod prelude;
pub mod repair;
pub mod schema;
pub mod validator;
pub mod value;
