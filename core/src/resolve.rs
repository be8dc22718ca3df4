//! Resolution engine: turns a [`MatchResult`] into validated values and
//! dispatches to help, version or the command's action.
//!
//! Validation walks arguments, then flags, in declaration order and stops at
//! the first failing field, so a user only ever sees one error per
//! invocation.

use std::io::Write;

use tracing::debug;

use crate::builtin::{HELP_COMMAND, HELP_FLAG, ROOT_COMMAND, VERSION_COMMAND, VERSION_FLAG};
use crate::error::{InvocationError, MatchError, ResolveError};
use crate::matching::Slot;
use crate::{
    ArgumentValue, ArgumentValues, Command, DataType, Flag, FlagValue, FlagValues, MatchResult,
    Registry, Value,
};

/// Terminal outcome of a successful invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Usage of the named command was rendered.
    Help(String),
    /// The version banner was rendered.
    Version,
    /// The named command's action ran.
    Executed(String),
    /// The root command was selected but has no action.
    Unimplemented,
}

impl Registry {
    /// Resolves a tokenizer result and runs the terminal step.
    ///
    /// # Errors
    ///
    /// Returns the tokenizer error unchanged, a [`ResolveError`] for the
    /// first invalid field, [`InvocationError::MissingAction`] for a
    /// non-root command without action, or an I/O error from rendering.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_tree_core::{FlagKind, MatchResult, Outcome, Registry, Slot};
    ///
    /// let mut registry = Registry::new("reactor")?;
    /// registry
    ///     .register("create")
    ///     .add_argument("name", "name of the component", "")?
    ///     .add_flag("timeout", "timeout in seconds", FlagKind::Int(Some(60)))?
    ///     .set_action(|args, flags| {
    ///         assert_eq!(args.value("name"), Some("my-service"));
    ///         assert_eq!(flags.get("timeout").unwrap().as_int(), Ok(60));
    ///     });
    ///
    /// let matched = MatchResult::new("create").with_argument("name", Slot::new("my-service", ""));
    /// let outcome = registry.resolve(Ok(matched), &mut Vec::new()).unwrap();
    /// assert_eq!(outcome, Outcome::Executed("create".into()));
    /// # Ok::<(), command_tree_core::ConfigError>(())
    /// ```
    pub fn resolve(
        &mut self,
        matched: Result<MatchResult, MatchError>,
        out: &mut dyn Write,
    ) -> Result<Outcome, InvocationError> {
        let matched = matched?;
        let index = self
            .position(&matched.command)
            .ok_or_else(|| MatchError::UnknownCommand(matched.command.clone()))?;
        debug!(command = %matched.command, "Resolving command");

        if matched.command == HELP_COMMAND {
            self.print_usage(ROOT_COMMAND, out)?;
            return Ok(Outcome::Help(ROOT_COMMAND.to_string()));
        }

        let command = self.command_at(index);
        if switch_is_set(command, &matched, HELP_FLAG) {
            let name = command.name().to_string();
            self.print_usage(&name, out)?;
            return Ok(Outcome::Help(name));
        }

        if matched.command == VERSION_COMMAND
            || (command.is_root() && switch_is_set(command, &matched, VERSION_FLAG))
        {
            self.print_version(out)?;
            return Ok(Outcome::Version);
        }

        if !command.has_action() {
            if command.is_root() {
                debug!("Root command has no action");
                return Ok(Outcome::Unimplemented);
            }
            return Err(InvocationError::MissingAction(command.name().to_string()));
        }

        let arguments = resolve_arguments(command, &matched)?;
        let flags = resolve_flags(command, &matched)?;

        let command = self.command_at_mut(index);
        let name = command.name().to_string();
        if let Some(action) = command.action_mut() {
            debug!(command = %name, "Invoking action");
            action(&arguments, &flags);
        }
        Ok(Outcome::Executed(name))
    }
}

/// Resolved string of a field: the user value if non-empty, else the
/// default the tokenizer reported, else the schema default.
fn resolved<'a>(slot: Option<&'a Slot>, schema_default: &'a str) -> &'a str {
    match slot {
        Some(slot) => slot.resolved(),
        None => schema_default,
    }
}

fn switch_is_set(command: &Command, matched: &MatchResult, name: &str) -> bool {
    command
        .flag(name)
        .is_some_and(|flag| resolved(matched.flags.get(name), &flag.default_value) == "true")
}

fn resolve_arguments(
    command: &Command,
    matched: &MatchResult,
) -> Result<ArgumentValues, ResolveError> {
    let mut values = ArgumentValues::new();
    for argument in command.arguments() {
        let value = resolved(matched.arguments.get(&argument.name), &argument.default_value);
        if argument.required && value.is_empty() {
            debug!(command = %command.name(), argument = %argument.name, "Missing required argument");
            return Err(ResolveError::MissingArgument(argument.name.clone()));
        }

        values.insert(
            argument.name.clone(),
            ArgumentValue {
                argument: argument.clone(),
                value: value.to_string(),
            },
        );
    }
    Ok(values)
}

fn resolve_flags(command: &Command, matched: &MatchResult) -> Result<FlagValues, ResolveError> {
    let mut values = FlagValues::new();
    for flag in command.flags() {
        let value = resolved(matched.flags.get(&flag.name), &flag.default_value);
        if flag.required && value.is_empty() {
            debug!(command = %command.name(), flag = %flag.name, "Missing required flag");
            return Err(ResolveError::MissingFlag(flag.name.clone()));
        }

        values.insert(
            flag.name.clone(),
            FlagValue {
                flag: flag.clone(),
                value: coerce(flag, value)?,
            },
        );
    }
    Ok(values)
}

fn coerce(flag: &Flag, value: &str) -> Result<Value, ResolveError> {
    match flag.data_type {
        DataType::Bool => Ok(Value::Bool(value == "true")),
        DataType::Int => value
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| ResolveError::NotAnInteger(flag.name.clone())),
        DataType::String => Ok(Value::String(value.to_string())),
    }
}
