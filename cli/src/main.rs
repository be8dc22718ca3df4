use std::fs;
use std::process::ExitCode;

use command_tree_core::{ArgumentValues, FlagKind, FlagValues, Registry, RegistryConfig};

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Path of a JSON [`RegistryConfig`] overriding the built-in settings.
const CONFIG_ENV: &str = "REACTOR_CONFIG";
/// When set, render events are echoed as `event: <name>` lines.
const EVENTS_ENV: &str = "REACTOR_EVENTS";

fn main() -> ExitCode {
    let mut registry = match build_registry() {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    command_tree_matcher::run_env(&mut registry)
}

fn load_config() -> Result<RegistryConfig, String> {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return Ok(RegistryConfig {
            version: format!("v{PACKAGE_VERSION}"),
            description: "Reactor is a command-line tool to generate React projects.".to_string(),
            ..RegistryConfig::new("reactor")
        });
    };

    let raw = fs::read_to_string(&path).map_err(|e| format!("Failed to read {path}: {e}"))?;
    serde_json::from_str(&raw).map_err(|e| format!("Failed to parse {path}: {e}"))
}

fn build_registry() -> Result<Registry, String> {
    let mut registry = Registry::from_config(load_config()?).map_err(|e| e.to_string())?;

    if std::env::var_os(EVENTS_ENV).is_some() {
        registry.on_event(|event| println!("event: {}", event.as_str()));
    }

    registry
        .root()
        .add_argument("category", "category of the information to look for", "")
        .and_then(|root| root.add_flag("verbose,V", "display log information", FlagKind::Bool))
        .map_err(|e| e.to_string())?
        .set_action(print_category);

    registry
        .register("create")
        .set_description(
            "This command creates a component of a given type and outputs component files in the project directory.",
        )
        .set_short_description("creates a component")
        .add_argument("name", "name of the component to create", "")
        .and_then(|create| create.add_argument("version", "version of the component", "1.0.0"))
        .and_then(|create| {
            create.add_argument("files...", "files to remove once component is created", "")
        })
        .and_then(|create| {
            create.add_flag(
                "dir,d",
                "output directory for the component files",
                FlagKind::String(None),
            )
        })
        .and_then(|create| {
            create.add_flag(
                "type,t",
                "type of the component to create",
                FlagKind::String(Some("simple_type".to_string())),
            )
        })
        .and_then(|create| {
            create.add_flag(
                "timeout",
                "timeout in seconds for component creation",
                FlagKind::Int(Some(60)),
            )
        })
        .and_then(|create| {
            create.add_flag("no-clean", "avoid cleanup of the component directory", FlagKind::Bool)
        })
        .map_err(|e| e.to_string())?
        .set_action(print_create);

    registry
        .register("serve")
        .set_description("This command starts the development server.")
        .set_short_description("starts the development server")
        .add_flag("port,p", "port the server listens on", FlagKind::Int(Some(3000)))
        .and_then(|serve| {
            serve.add_flag(
                "host",
                "address the server binds to",
                FlagKind::String(Some("localhost".to_string())),
            )
        })
        .map_err(|e| e.to_string())?
        .set_action(|_, flags| {
            let host = flags.get("host").and_then(|f| f.as_str().ok()).unwrap_or_default();
            let port = flags.get("port").and_then(|f| f.as_int().ok()).unwrap_or_default();
            println!("serving on {host}:{port}");
        });

    registry
        .register("schema")
        .set_description("This command prints the registered commands as JSON.")
        .set_short_description("prints the command schema");
    let snapshot = registry.schema().to_json().map_err(|e| e.to_string())?;
    registry.register("schema").set_action(move |_, _| println!("{snapshot}"));

    Ok(registry)
}

fn print_category(args: &ArgumentValues, flags: &FlagValues) {
    let category = args.value("category").unwrap_or_default();
    let verbose = flags.get("verbose").and_then(|f| f.as_bool().ok()).unwrap_or_default();
    println!("category: {category}");
    println!("verbose: {verbose}");
}

fn print_create(args: &ArgumentValues, flags: &FlagValues) {
    for (name, value) in args.iter() {
        println!("arg {name}: {}", value.value);
    }
    for (name, value) in flags.iter() {
        println!("flag {name}: {}", value.value);
    }
}
