//! Integration tests for kabe-vars
//!
//! End-to-end tests over plugin directories and JSON stores on disk: check
//! every saved run configuration, repair the broken ones and save them back.
//!
mod common;
use common::*;
use kabe_vars::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn install_plugin(plugins: &Path, plugin_id: &str, config_json: &str) {
    let dir = plugins.join(plugin_id);
    fs::create_dir_all(&dir).expect("Failed to create plugin directory");
    fs::write(dir.join("config.json"), config_json).expect("Failed to write plugin config");
}

/// A plugin directory holding the sample plugin plus one with a corrupt schema.
fn setup() -> (TempDir, PluginDirectory, JsonStore) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let plugins = temp.path().join("plugins");
    install_plugin(&plugins, PLUGIN_ID, PLUGIN_CONFIG_JSON);
    install_plugin(&plugins, "broken", r#"{"var": [{"key": "x", "type": "date"}]}"#);
    fs::create_dir_all(plugins.join("not-a-plugin")).expect("Failed to create directory");

    let catalog = PluginDirectory::new(&plugins);
    let store = JsonStore::new(temp.path().join("store"));
    (temp, catalog, store)
}

#[cfg(test)]
mod catalog_tests {
    use super::*;

    #[test]
    fn test_plugin_directory_lists_and_loads() {
        let (_temp, catalog, _store) = setup();

        assert_eq!(catalog.installed_plugin_ids(), ["broken", PLUGIN_ID]);
        let definitions = catalog
            .variable_definitions(PLUGIN_ID)
            .expect("Failed to load definitions");
        assert_eq!(definitions, plugin_definitions());
    }

    #[test]
    fn test_plugin_directory_errors() {
        let (_temp, catalog, _store) = setup();

        assert_eq!(
            catalog.variable_definitions("absent"),
            Err(CatalogError::PluginNotFound("absent".to_string()))
        );
        assert!(matches!(
            catalog.variable_definitions("broken"),
            Err(CatalogError::Unreadable { ref plugin_id, .. }) if plugin_id == "broken"
        ));
    }

    #[test]
    fn test_duplicate_keys_make_schema_unreadable() {
        let (temp, catalog, _store) = setup();
        install_plugin(
            &temp.path().join("plugins"),
            "twice",
            r#"{"var": [{"key": "n", "type": "int"}, {"key": "n", "type": "bool"}]}"#,
        );

        let err = catalog.variable_definitions("twice").unwrap_err();
        assert!(err.to_string().contains("'n' is declared more than once"));
    }

    #[test]
    fn test_schema_mistakes_still_load() {
        let (temp, catalog, _store) = setup();
        install_plugin(
            &temp.path().join("plugins"),
            "sloppy",
            r#"{"var": [
                {"key": "n", "type": "int", "min": 5, "max": 1},
                {"key": "sort", "type": "list", "min": "1"},
                {"key": "limit", "type": "int", "min": "1", "max": "50", "default": 99}
            ]}"#,
        );

        let definitions = catalog
            .variable_definitions("sloppy")
            .expect("Failed to load definitions");
        assert_eq!(definitions.len(), 3);
        assert_eq!((definitions[2].min, definitions[2].max), (Some(1.0), Some(50.0)));
    }

    #[test]
    fn test_unreachable_directory_names_are_not_listed() {
        let (temp, catalog, _store) = setup();
        let plugins = temp.path().join("plugins");
        install_plugin(&plugins, "a..b", PLUGIN_CONFIG_JSON);
        install_plugin(&plugins, "c:d", PLUGIN_CONFIG_JSON);

        assert_eq!(catalog.installed_plugin_ids(), ["broken", PLUGIN_ID]);
    }
}

#[cfg(test)]
mod store_tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        let (_temp, _catalog, store) = setup();

        assert!(store.run_configurations().expect("Failed to list").is_empty());
        assert!(store
            .persisted_configuration(PLUGIN_ID)
            .expect("Failed to read")
            .is_empty());
        assert_eq!(
            store.run_configuration("nope"),
            Err(StoreError::RunConfigurationNotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_run_configurations_are_replaced_by_id() {
        let (_temp, _catalog, store) = setup();

        store
            .add_run_configuration(run_config("r1", PLUGIN_ID, config([])))
            .expect("Failed to add");
        store
            .add_run_configuration(run_config("r1", PLUGIN_ID, valid_user_config()))
            .expect("Failed to replace");
        store
            .add_run_configuration(run_config("r2", "broken", config([])))
            .expect("Failed to add");

        let runs = store.run_configurations().expect("Failed to list");
        assert_eq!(runs.len(), 2);
        let r1 = store.run_configuration("r1").expect("Failed to find r1");
        assert_eq!(r1.user_config, valid_user_config());

        store.delete_run_configuration("r2").expect("Failed to delete");
        assert!(store.delete_run_configuration("r2").is_err());
        assert_eq!(store.run_configurations().expect("Failed to list").len(), 1);
    }

    #[test]
    fn test_malformed_store_file_is_reported() {
        let (temp, _catalog, store) = setup();
        let root = temp.path().join("store");
        fs::create_dir_all(&root).expect("Failed to create store");
        fs::write(root.join("run_configs.json"), "{").expect("Failed to write");

        assert!(matches!(
            store.run_configurations(),
            Err(StoreError::Json { .. })
        ));
    }

    #[test]
    fn test_memory_store_saves_editable_forms() {
        let store = MemoryStore::new()
            .with_run_configuration(run_config("r", PLUGIN_ID, valid_user_config()));
        let form: EditableConfiguration = [("tags", json!(["city"])), ("count", json!(7))]
            .into_iter()
            .collect();

        store
            .save_editable(PLUGIN_ID, form, &plugin_definitions())
            .expect("Failed to save");

        let saved = store.persisted_configuration(PLUGIN_ID).expect("Failed to read");
        assert_eq!(
            saved.get("tags"),
            Some(&json!({"landscape": false, "portrait": false, "city": true}))
        );
        assert_eq!(store.run_configurations().expect("Failed to list").len(), 1);
    }
}

#[cfg(test)]
mod workflow_tests {
    use super::*;

    #[test]
    fn test_check_repair_save_workflow() {
        let (_temp, catalog, store) = setup();
        let runs = [
            run_config("ok", PLUGIN_ID, valid_user_config()),
            run_config(
                "stale",
                PLUGIN_ID,
                config([
                    ("count", json!(250)),
                    ("tags", json!({"landscape": true, "animals": true})),
                    ("legacy", json!(true)),
                ]),
            ),
            run_config("orphan", "uninstalled", valid_user_config()),
            run_config("corrupt", "broken", config([])),
        ];
        for run in &runs {
            store
                .add_run_configuration(run.clone())
                .expect("Failed to add run configuration");
        }

        let checker = CompatibilityChecker::from_catalog(&catalog);
        let cache = CompatibilityCache::new();
        let saved_runs = store.run_configurations().expect("Failed to list");
        let results = cache.get_all(&saved_runs, &checker);

        let by_id = |id: &str| {
            let index = saved_runs.iter().position(|r| r.id == id).expect("run exists");
            &results[index]
        };
        assert!(by_id("ok").is_runnable());
        assert!(!by_id("orphan").version_compatible);
        assert!(!by_id("corrupt").version_compatible);

        let stale = by_id("stale");
        assert!(stale.version_compatible && !stale.content_compatible);
        let error_keys: Vec<_> = stale.content_errors.iter().map(ContentError::key).collect();
        assert_eq!(error_keys, ["count", "tags"]);
        assert_eq!(
            stale.warnings,
            [CompatibilityWarning::FieldRemoved {
                key: "legacy".to_string()
            }]
        );

        // The bounded count has no default, so repair leaves it for the user.
        let stale_run = store.run_configuration("stale").expect("Failed to find run");
        let definitions = checker.definitions(PLUGIN_ID).expect("definitions loaded");
        let outcome = repair_user_config(&stale_run.user_config, definitions);
        assert_eq!(outcome.unresolved, ["count"]);

        let mut form = outcome.configuration;
        form.insert("count", json!(25));
        assert!(form.missing_required(definitions).is_empty());

        let persisted = store
            .save_editable(PLUGIN_ID, form, definitions)
            .expect("Failed to save");
        let reloaded = store
            .persisted_configuration(PLUGIN_ID)
            .expect("Failed to reload");
        assert_eq!(reloaded, persisted);
        assert_eq!(
            reloaded.get("tags"),
            Some(&json!({"landscape": true, "portrait": false, "city": false}))
        );

        let repaired_run = RunConfiguration {
            user_config: reloaded,
            ..stale_run
        };
        cache.invalidate("stale");
        assert!(cache.get(&repaired_run, &checker).is_runnable());
    }

    #[test]
    fn test_persisted_file_holds_complete_checkbox_map() {
        let (temp, _catalog, store) = setup();
        let form: EditableConfiguration = [("tags", json!(["portrait"]))].into_iter().collect();

        store
            .save_editable(PLUGIN_ID, form, &plugin_definitions())
            .expect("Failed to save");

        let path = temp
            .path()
            .join("store")
            .join("plugin_configs")
            .join(format!("{}.json", PLUGIN_ID));
        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).expect("Failed to read file"))
                .expect("Failed to parse file");
        assert_eq!(
            raw,
            json!({"tags": {"landscape": false, "portrait": true, "city": false}})
        );
    }

    #[test]
    fn test_effective_configuration_from_store() {
        let (_temp, catalog, store) = setup();
        store
            .save_persisted_configuration(PLUGIN_ID, &config([("count", json!(3))]))
            .expect("Failed to save");

        let definitions = catalog
            .variable_definitions(PLUGIN_ID)
            .expect("Failed to load definitions");
        let mut user = store
            .persisted_configuration(PLUGIN_ID)
            .expect("Failed to read");
        apply_assignments(&definitions, &mut user, &["quality=low"])
            .expect("Failed to apply assignments");

        let effective = effective_configuration(&definitions, &user);
        assert_eq!(effective.get("count"), Some(&json!(3)));
        assert_eq!(effective.get("quality"), Some(&json!("low")));
        assert_eq!(effective.len(), definitions.len());
    }

    #[test]
    fn test_stale_schema_default_keeps_plugin_usable() {
        let (temp, catalog, _store) = setup();
        install_plugin(
            &temp.path().join("plugins"),
            "p",
            r#"{"var": [
                {"key": "count", "type": "int", "min": 1, "max": 10, "default": 5},
                {"key": "tags", "type": "checkbox",
                 "options": [{"name": "A", "variable": "a"}, {"name": "B", "variable": "b"}],
                 "default": ["a", "gone"]}
            ]}"#,
        );

        let checker = CompatibilityChecker::from_catalog(&catalog);
        let run = run_config("r", "p", config([("count", json!(3))]));
        let result = checker.check(&run);
        assert!(result.version_compatible, "{:?}", result.version_reason);
        assert!(result.is_runnable(), "{:?}", result.content_errors);

        let definitions = checker.definitions("p").expect("definitions loaded");
        let repaired = repair(&run, definitions);
        assert_eq!(repaired.get("count"), Some(&json!(3)));
        assert_eq!(repaired.get("tags"), Some(&json!(["a"])));

        let effective = effective_configuration(definitions, &run.user_config);
        assert_eq!(effective.get("tags"), Some(&json!({"a": true, "b": false})));
    }
}
