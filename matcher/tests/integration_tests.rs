use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;

use command_tree_core::{
    FlagKind, InvocationError, MatchError, Outcome, Registry, ResolveError, Value,
};
use command_tree_matcher::GetoptMatcher;

/// What the last action saw: argument values and flag values.
#[derive(Debug, Default, Clone, PartialEq)]
struct Seen {
    command: String,
    arguments: Vec<(String, String)>,
    flags: Vec<(String, Value)>,
}

type Log = Rc<RefCell<Vec<Seen>>>;

/// The `reactor` application used across these tests.
fn reactor(log: &Log) -> Registry {
    let mut registry = Registry::new("reactor").unwrap();
    registry
        .set_version("v1.0.0")
        .set_description("Reactor is a command-line tool to generate React projects.");

    let sink = Rc::clone(log);
    registry
        .root()
        .add_argument("category", "category of the information to look for", "")
        .unwrap()
        .add_flag("verbose,V", "display log information", FlagKind::Bool)
        .unwrap()
        .set_action(move |args, flags| {
            sink.borrow_mut().push(seen("", args, flags));
        });

    let sink = Rc::clone(log);
    registry
        .register("create")
        .set_short_description("creates a component")
        .add_argument("name", "name of the component to create", "")
        .unwrap()
        .add_argument("version", "version of the component", "1.0.0")
        .unwrap()
        .add_argument("files...", "files to remove once component is created", "")
        .unwrap()
        .add_flag("dir,d", "output directory for the component files", FlagKind::String(None))
        .unwrap()
        .add_flag("type,t", "type of the component", FlagKind::String(Some("simple".into())))
        .unwrap()
        .add_flag("timeout", "operation timeout in seconds", FlagKind::Int(Some(60)))
        .unwrap()
        .add_flag("no-clean", "avoid cleanup of the component directory", FlagKind::Bool)
        .unwrap()
        .set_action(move |args, flags| {
            sink.borrow_mut().push(seen("create", args, flags));
        });

    registry
}

fn seen(
    command: &str,
    args: &command_tree_core::ArgumentValues,
    flags: &command_tree_core::FlagValues,
) -> Seen {
    Seen {
        command: command.to_string(),
        arguments: args
            .iter()
            .map(|(name, value)| (name.to_string(), value.value.clone()))
            .collect(),
        flags: flags
            .iter()
            .map(|(name, value)| (name.to_string(), value.value.clone()))
            .collect(),
    }
}

fn parse(registry: &mut Registry, tokens: &[&str]) -> (Result<Outcome, InvocationError>, String) {
    let mut out = Vec::new();
    let result = registry.parse(&GetoptMatcher, tokens, &mut out);
    (result, String::from_utf8(out).unwrap())
}

fn flag<'a>(seen: &'a Seen, name: &str) -> &'a Value {
    &seen.flags.iter().find(|(n, _)| n == name).unwrap().1
}

fn argument<'a>(seen: &'a Seen, name: &str) -> &'a str {
    &seen.arguments.iter().find(|(n, _)| n == name).unwrap().1
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

#[test]
fn root_action_receives_category_and_default_verbose() {
    let log = Log::default();
    let mut registry = reactor(&log);

    let (result, _) = parse(&mut registry, &["service"]);
    assert_eq!(result.unwrap(), Outcome::Executed(String::new()));

    let seen = &log.borrow()[0];
    assert_eq!(argument(seen, "category"), "service");
    assert_eq!(flag(seen, "verbose"), &Value::Bool(false));
}

#[test]
fn root_action_receives_short_bool_flag() {
    let log = Log::default();
    let mut registry = reactor(&log);

    let (result, _) = parse(&mut registry, &["-V", "service"]);
    assert!(result.is_ok());
    assert_eq!(flag(&log.borrow()[0], "verbose"), &Value::Bool(true));
}

#[test]
fn create_applies_defaults() {
    let log = Log::default();
    let mut registry = reactor(&log);

    let (result, _) = parse(&mut registry, &["create", "my-service", "-d", "./out"]);
    assert_eq!(result.unwrap(), Outcome::Executed("create".into()));

    let seen = &log.borrow()[0];
    assert_eq!(seen.command, "create");
    assert_eq!(argument(seen, "name"), "my-service");
    assert_eq!(argument(seen, "version"), "1.0.0");
    assert_eq!(argument(seen, "files"), "");
    assert_eq!(flag(seen, "dir"), &Value::String("./out".into()));
    assert_eq!(flag(seen, "type"), &Value::String("simple".into()));
    assert_eq!(flag(seen, "timeout"), &Value::Int(60));
    assert_eq!(flag(seen, "clean"), &Value::Bool(true));
    assert_eq!(flag(seen, "help"), &Value::Bool(false));
}

#[test]
fn create_collects_variadic_files_and_inverted_flag() {
    let log = Log::default();
    let mut registry = reactor(&log);

    let (result, _) = parse(
        &mut registry,
        &[
            "create", "svc", "2.0.0", "a.txt", "b.txt", "--dir=./out", "--timeout", "5", "--no-clean",
        ],
    );
    assert!(result.is_ok());

    let seen = &log.borrow()[0];
    assert_eq!(argument(seen, "version"), "2.0.0");
    assert_eq!(argument(seen, "files"), "a.txt,b.txt");
    assert_eq!(flag(seen, "timeout"), &Value::Int(5));
    assert_eq!(flag(seen, "clean"), &Value::Bool(false));
}

#[test]
fn inverted_flag_with_inline_value() {
    let log = Log::default();
    let mut registry = reactor(&log);

    parse(&mut registry, &["create", "svc", "-d", "x", "--no-clean=true"]).0.unwrap();
    parse(&mut registry, &["create", "svc", "-d", "x", "--no-clean=false"]).0.unwrap();

    let log = log.borrow();
    assert_eq!(flag(&log[0], "clean"), &Value::Bool(false));
    assert_eq!(flag(&log[1], "clean"), &Value::Bool(true));
}

#[test]
fn arguments_and_flags_keep_declaration_order() {
    let log = Log::default();
    let mut registry = reactor(&log);

    parse(&mut registry, &["create", "svc", "-d", "./out"]).0.unwrap();

    let seen = &log.borrow()[0];
    let arguments: Vec<_> = seen.arguments.iter().map(|(n, _)| n.as_str()).collect();
    let flags: Vec<_> = seen.flags.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(arguments, ["name", "version", "files"]);
    assert_eq!(flags, ["help", "dir", "type", "timeout", "clean"]);
}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

#[test]
fn missing_required_flag_names_the_flag() {
    let log = Log::default();
    let mut registry = reactor(&log);

    let (result, _) = parse(&mut registry, &["create", "my-service"]);
    let err = result.unwrap_err();
    assert!(matches!(
        &err,
        InvocationError::Resolve(ResolveError::MissingFlag(name)) if name == "dir"
    ));
    assert_eq!(err.to_string(), "value of the --dir flag can not be empty");
    assert!(log.borrow().is_empty());
}

#[test]
fn missing_argument_is_reported_before_flags() {
    let log = Log::default();
    let mut registry = reactor(&log);

    let (result, _) = parse(&mut registry, &["create"]);
    assert_eq!(
        result.unwrap_err().to_string(),
        "value of the name argument can not be empty"
    );
}

#[test]
fn non_integer_value_is_rejected() {
    let log = Log::default();
    let mut registry = reactor(&log);

    let (result, _) = parse(&mut registry, &["create", "svc", "-d", "x", "--timeout", "soon"]);
    assert_eq!(
        result.unwrap_err().to_string(),
        "value of the --timeout flag must be an integer"
    );
    assert!(log.borrow().is_empty());
}

#[test]
fn unknown_flag_is_reported_with_dashes() {
    let log = Log::default();
    let mut registry = reactor(&log);

    let (result, _) = parse(&mut registry, &["create", "svc", "--force"]);
    assert_eq!(result.unwrap_err().to_string(), "--force is not a valid flag");

    let (result, _) = parse(&mut registry, &["-x"]);
    assert_eq!(result.unwrap_err().to_string(), "-x is not a valid flag");
}

#[test]
fn unsupported_flag_syntax_is_reported() {
    let log = Log::default();
    let mut registry = reactor(&log);

    let (result, _) = parse(&mut registry, &["---verbose"]);
    assert!(matches!(
        result.unwrap_err(),
        InvocationError::Match(MatchError::UnsupportedFlag(raw)) if raw == "---verbose"
    ));
}

#[test]
fn unknown_command_without_root_arguments() {
    let mut registry = Registry::new("tool").unwrap();
    registry.register("build").set_action(|_, _| {});

    let (result, _) = parse(&mut registry, &["deploy"]);
    assert_eq!(result.unwrap_err().to_string(), "deploy is not a valid command");
}

#[test]
fn sub_command_without_action_fails() {
    let mut registry = Registry::new("tool").unwrap();
    registry.register("build");

    let (result, _) = parse(&mut registry, &["build"]);
    assert_eq!(
        result.unwrap_err().to_string(),
        "action function for the build command is not registered"
    );
}

// ---------------------------------------------------------------------------
// Help, version and events
// ---------------------------------------------------------------------------

#[test]
fn help_flag_renders_usage_without_action() {
    let log = Log::default();
    let mut registry = reactor(&log);

    let (result, out) = parse(&mut registry, &["--help"]);
    assert_eq!(result.unwrap(), Outcome::Help(String::new()));
    assert!(out.contains("Usage:\n   reactor <category> {flags}\n"));
    assert!(out.contains("Commands:\n   create"));

    let (result, out) = parse(&mut registry, &["create", "-h"]);
    assert_eq!(result.unwrap(), Outcome::Help("create".into()));
    assert!(out.contains("   reactor create <name> [version] [files] {flags}\n"));
    assert!(out.contains("{variadic}"));

    assert!(log.borrow().is_empty());
}

#[test]
fn help_flag_wins_over_missing_values() {
    let log = Log::default();
    let mut registry = reactor(&log);

    let (result, _) = parse(&mut registry, &["create", "--help"]);
    assert_eq!(result.unwrap(), Outcome::Help("create".into()));
}

#[test]
fn help_command_renders_root_usage() {
    let log = Log::default();
    let mut registry = reactor(&log);

    let (result, out) = parse(&mut registry, &["help"]);
    assert_eq!(result.unwrap(), Outcome::Help(String::new()));
    assert!(out.starts_with("Reactor is a command-line tool to generate React projects.\n"));
}

#[test]
fn version_flag_and_command_render_banner() {
    let log = Log::default();
    let mut registry = reactor(&log);

    for tokens in [&["-v"][..], &["--version"], &["version"]] {
        let (result, out) = parse(&mut registry, tokens);
        assert_eq!(result.unwrap(), Outcome::Version);
        assert_eq!(out, "Version: v1.0.0\n");
    }
    assert!(log.borrow().is_empty());
}

#[test]
fn listener_sees_each_render_once() {
    let log = Log::default();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let mut registry = reactor(&log);
    registry.on_event(move |event| sink.borrow_mut().push(event.as_str()));

    parse(&mut registry, &["--help"]).0.unwrap();
    parse(&mut registry, &["-v"]).0.unwrap();
    parse(&mut registry, &["service"]).0.unwrap();

    assert_eq!(*events.borrow(), vec!["help", "version"]);
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[test]
fn registration_is_idempotent() {
    let log = Log::default();
    let mut registry = reactor(&log);
    let before = registry.schema();

    registry
        .register("create")
        .add_argument("name", "renamed", "")
        .unwrap()
        .add_flag("dir,d", "renamed", FlagKind::String(None))
        .unwrap();

    assert_eq!(registry.schema(), before);
}

#[test]
fn run_reports_errors_on_output() {
    let log = Log::default();
    let mut registry = reactor(&log);
    let mut out = Vec::new();

    let code = registry.run(&GetoptMatcher, &["create", "svc"], &mut out);
    assert_eq!(code, ExitCode::FAILURE);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Error: value of the --dir flag can not be empty.\n"
    );

    let mut out = Vec::new();
    let code = registry.run(&GetoptMatcher, &["service"], &mut out);
    assert_eq!(code, ExitCode::SUCCESS);
}
