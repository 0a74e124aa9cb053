use clap::{Parser, Subcommand};
use kabe_vars::prelude::*;
use std::time::Instant;

/// Validate, repair and inspect saved plugin configurations
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding one sub-directory (with a config.json) per installed plugin
    #[arg(short, long, default_value = "plugins")]
    plugins: String,

    /// Directory holding run_configs.json and plugin_configs/
    #[arg(short, long, default_value = "store")]
    store: String,

    /// Print machine-readable JSON instead of a summary
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check every saved run configuration against the installed plugins
    Check,
    /// Repair one run configuration and print the resulting form
    Repair {
        run_id: String,
        /// Save the repaired values as the plugin's persisted configuration
        #[arg(long)]
        save: bool,
    },
    /// Print the configuration a plugin would receive when run
    Effective {
        plugin_id: String,
        /// Overrides in key=value form
        assignments: Vec<String>,
    },
    /// List a plugin's variables
    Schema { plugin_id: String },
}

fn main() {
    let cli = Cli::parse();
    let catalog = PluginDirectory::new(&cli.plugins);
    let store = JsonStore::new(&cli.store);

    match &cli.command {
        Command::Check => run_check(&catalog, &store, cli.json),
        Command::Repair { run_id, save } => run_repair(&catalog, &store, run_id, *save, cli.json),
        Command::Effective {
            plugin_id,
            assignments,
        } => run_effective(&catalog, &store, plugin_id, assignments),
        Command::Schema { plugin_id } => run_schema(&catalog, plugin_id, cli.json),
    }
}

fn run_check(catalog: &PluginDirectory, store: &JsonStore, json: bool) {
    let start = Instant::now();
    let runs = store
        .run_configurations()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load run configurations: {}", e)));

    let checker = CompatibilityChecker::from_catalog(catalog);
    let cache = CompatibilityCache::new();
    let results = cache.get_all(&runs, &checker);

    if json {
        let report: Vec<_> = runs
            .iter()
            .zip(&results)
            .map(|(run, result)| serde_json::json!({ "id": run.id, "name": run.name, "result": result }))
            .collect();
        print_json(&report);
        return;
    }

    println!("\nChecked {} run configuration(s)", runs.len());
    for (run, result) in runs.iter().zip(&results) {
        println!("  -> {} [{}] ({}): {}", run.name, run.id, run.plugin_id, result);
        for error in &result.content_errors {
            println!("       error: {}", error);
        }
        for warning in &result.warnings {
            println!("       warning: {}", warning);
        }
    }

    let runnable = results.iter().filter(|r| r.is_runnable()).count();
    println!("\n--- Summary ---");
    println!("Runnable:         {}", runnable);
    println!("Need attention:   {}", results.len() - runnable);
    println!("Elapsed:          {:?}", start.elapsed());
    println!();
}

fn run_repair(
    catalog: &PluginDirectory,
    store: &JsonStore,
    run_id: &str,
    save: bool,
    json: bool,
) {
    let run = store
        .run_configuration(run_id)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let definitions = catalog
        .variable_definitions(&run.plugin_id)
        .unwrap_or_else(|e| exit_with_error(&format!("Cannot repair '{}': {}", run_id, e)));

    let outcome = repair_user_config(&run.user_config, &definitions);

    if json {
        print_json(&outcome.configuration);
    } else {
        println!("\nRepaired '{}' for plugin '{}'", run.name, run.plugin_id);
        println!("  -> Kept:       {}", outcome.kept.join(", "));
        println!("  -> Defaulted:  {}", outcome.defaulted.join(", "));
        if outcome.unresolved.is_empty() {
            println!("  -> All required fields are set");
        } else {
            println!("  -> Still missing: {}", outcome.unresolved.join(", "));
        }
        print_json(&outcome.configuration);
    }

    if save {
        let still_missing = outcome.configuration.missing_required(&definitions);
        if !still_missing.is_empty() {
            exit_with_error(&format!(
                "Not saving: required fields without a value: {}",
                still_missing.join(", ")
            ));
        }
        store
            .save_editable(&run.plugin_id, outcome.configuration, &definitions)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to save configuration: {}", e)));
        println!("Saved persisted configuration for '{}'", run.plugin_id);
    }
}

fn run_effective(
    catalog: &PluginDirectory,
    store: &JsonStore,
    plugin_id: &str,
    assignments: &[String],
) {
    let definitions = catalog
        .variable_definitions(plugin_id)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let mut config = store
        .persisted_configuration(plugin_id)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    apply_assignments(&definitions, &mut config, assignments)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    print_json(&effective_configuration(&definitions, &config));
}

fn run_schema(catalog: &PluginDirectory, plugin_id: &str, json: bool) {
    let definitions = catalog
        .variable_definitions(plugin_id)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    if json {
        print_json(&definitions);
        return;
    }

    println!("\nPlugin '{}' declares {} variable(s)", plugin_id, definitions.len());
    for def in &definitions {
        let requirement = if def.is_required() {
            "required".to_string()
        } else {
            format!("default {}", def.default.as_ref().map_or_else(String::new, |d| d.to_string()))
        };
        println!("  -> {} ({}): {}", def.key, def.var_type, requirement);
        if def.var_type.has_options() {
            println!("       options: {}", def.option_values().collect::<Vec<_>>().join(", "));
        }
        if def.min.is_some() || def.max.is_some() {
            println!(
                "       range: {} ..= {}",
                def.min.map_or("-".to_string(), |m| m.to_string()),
                def.max.map_or("-".to_string(), |m| m.to_string())
            );
        }
    }

    let lints = VariableSchema::new(definitions)
        .map(|schema| schema.lint())
        .unwrap_or_default();
    for issue in &lints {
        println!("  warning: {}", issue);
    }
    println!();
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => exit_with_error(&format!("Failed to serialize output: {}", e)),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
