//! Command entity and its registration rules.

use std::fmt;

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::types::{FlagNames, parse_argument_name, strip_whitespace};
use crate::{Argument, ArgumentValues, CommandSchema, DataType, DefaultValue, Flag, FlagKind, FlagValues};

/// Host callback invoked with the resolved values of a command.
pub type Action = Box<dyn FnMut(&ArgumentValues, &FlagValues)>;

/// A named command with its positional arguments, flags and action.
///
/// Commands are created through [`Registry::register`](crate::Registry::register)
/// and configured with chained calls.
///
/// # Examples
///
/// ```
/// use command_tree_core::{FlagKind, Registry};
///
/// let mut registry = Registry::new("reactor").unwrap();
/// registry
///     .register("create")
///     .set_short_description("creates a component")
///     .add_argument("name", "name of the component to create", "")?
///     .add_flag("dir,d", "output directory", FlagKind::String(None))?
///     .set_action(|args, flags| {
///         println!("{:?} {:?}", args.value("name"), flags.value("dir"));
///     });
///
/// let create = registry.command("create").unwrap();
/// assert_eq!(create.arguments().len(), 1);
/// assert!(create.has_action());
/// # Ok::<(), command_tree_core::ConfigError>(())
/// ```
pub struct Command {
    name: String,
    description: String,
    short_description: String,
    is_root: bool,
    arguments: Vec<Argument>,
    flags: Vec<Flag>,
    action: Option<Action>,
}

impl Command {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            short_description: String::new(),
            is_root: name.is_empty(),
            arguments: Vec::new(),
            flags: Vec::new(),
            action: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Description shown in the root command's `Commands:` section.
    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    /// Arguments in declaration order.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Flags in declaration order, built-in flags included.
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|arg| arg.name == name)
    }

    pub fn flag(&self, name: &str) -> Option<&Flag> {
        self.flags.iter().find(|flag| flag.name == name)
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    pub fn set_description(&mut self, description: &str) -> &mut Self {
        self.description = description.trim().to_string();
        self
    }

    pub fn set_short_description(&mut self, short_description: &str) -> &mut Self {
        self.short_description = short_description.trim().to_string();
        self
    }

    /// Registers a positional argument.
    ///
    /// An empty `default_value` makes the argument required. A name ending
    /// in `...` declares a variadic argument, which must be the last one.
    /// Registering an existing name is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MultipleVariadic`] or
    /// [`ConfigError::ArgumentAfterVariadic`] when a variadic argument is
    /// already declared, and [`ConfigError::EmptyArgumentName`] for an empty
    /// name.
    pub fn add_argument(
        &mut self,
        name: &str,
        description: &str,
        default_value: &str,
    ) -> Result<&mut Self> {
        let (key, variadic) = parse_argument_name(name);
        if self.argument(&key).is_some() {
            debug!(command = %self.name, argument = %key, "Argument already registered");
            return Ok(self);
        }

        if let Some(existing) = self.arguments.iter().find(|arg| arg.variadic) {
            let argument = key;
            let variadic_name = existing.name.clone();
            return Err(if variadic {
                ConfigError::MultipleVariadic {
                    argument,
                    variadic: variadic_name,
                }
            } else {
                ConfigError::ArgumentAfterVariadic {
                    argument,
                    variadic: variadic_name,
                }
            });
        }

        let argument = Argument::new(name, description, default_value).map_err(|err| match err {
            ConfigError::EmptyArgumentName { .. } => ConfigError::EmptyArgumentName {
                command: self.name.clone(),
            },
            other => other,
        })?;
        self.arguments.push(argument);
        Ok(self)
    }

    /// Registers a flag from `"long,short"` names and a typed kind.
    ///
    /// Registering an existing long name is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShortName`] or
    /// [`ConfigError::DuplicateShortName`] for a bad short alias and
    /// [`ConfigError::EmptyFlagName`] for an empty long name.
    pub fn add_flag(&mut self, names: &str, description: &str, kind: FlagKind) -> Result<&mut Self> {
        let parsed = self.parse_flag_names(names)?;
        let (key, _) = parsed.key(matches!(kind, FlagKind::Bool));
        if self.flag(&key).is_some() {
            debug!(command = %self.name, flag = %key, "Flag already registered");
            return Ok(self);
        }

        if let Some(short) = &parsed.short {
            if let Some(existing) = self.flag_by_short(short) {
                return Err(ConfigError::DuplicateShortName {
                    flag: key,
                    short: short.clone(),
                    existing: existing.name.clone(),
                });
            }
        }

        let flag = Flag::new(names, description, kind)?;
        self.flags.push(flag);
        Ok(self)
    }

    /// Registers a flag from an untyped default, validating it against
    /// `data_type` before anything is stored.
    ///
    /// # Errors
    ///
    /// Everything [`add_flag`](Self::add_flag) reports, plus
    /// [`ConfigError::DefaultTypeMismatch`] and [`ConfigError::TrueBoolDefault`].
    ///
    /// # Examples
    ///
    /// ```
    /// use command_tree_core::{ConfigError, DataType, DefaultValue, Registry};
    ///
    /// let mut registry = Registry::new("reactor").unwrap();
    /// let err = registry
    ///     .register("create")
    ///     .add_flag_with("dir,d", "directory", DataType::String, DefaultValue::Int(21))
    ///     .err();
    /// assert!(matches!(err, Some(ConfigError::DefaultTypeMismatch { .. })));
    /// ```
    pub fn add_flag_with(
        &mut self,
        names: &str,
        description: &str,
        data_type: DataType,
        default: DefaultValue,
    ) -> Result<&mut Self> {
        let parsed = self.parse_flag_names(names)?;
        let (key, _) = parsed.key(data_type == DataType::Bool);
        if self.flag(&key).is_some() {
            debug!(command = %self.name, flag = %key, "Flag already registered");
            return Ok(self);
        }

        let kind = FlagKind::from_parts(&parsed.long, data_type, default)?;
        self.add_flag(names, description, kind)
    }

    /// Installs the action unless one is already installed.
    pub fn set_action<F>(&mut self, action: F) -> &mut Self
    where
        F: FnMut(&ArgumentValues, &FlagValues) + 'static,
    {
        if self.action.is_none() {
            self.action = Some(Box::new(action));
        } else {
            debug!(command = %self.name, "Action already registered");
        }
        self
    }

    /// Serializable shape of this command.
    pub fn schema(&self) -> CommandSchema {
        CommandSchema {
            name: self.name.clone(),
            description: self.description.clone(),
            short_description: self.short_description.clone(),
            is_root: self.is_root,
            arguments: self.arguments.clone(),
            flags: self.flags.clone(),
        }
    }

    /// Adds a built-in boolean switch. The short alias is dropped when a
    /// user flag already owns it.
    pub(crate) fn add_switch(&mut self, name: &str, short_name: &str, description: &str) {
        if self.flag(name).is_some() {
            return;
        }
        let short = match self.flag_by_short(short_name) {
            Some(owner) => {
                debug!(command = %self.name, flag = name, owner = %owner.name, "Built-in short name taken");
                None
            }
            None => Some(short_name),
        };
        self.flags.push(Flag::switch(name, short, description));
    }

    pub(crate) fn action_mut(&mut self) -> Option<&mut Action> {
        self.action.as_mut()
    }

    fn flag_by_short(&self, short: &str) -> Option<&Flag> {
        self.flags
            .iter()
            .find(|flag| flag.short_name.as_deref() == Some(short))
    }

    fn parse_flag_names(&self, names: &str) -> Result<FlagNames> {
        FlagNames::parse(names).map_err(|err| match err {
            ConfigError::EmptyFlagName { .. } => ConfigError::EmptyFlagName {
                command: self.name.clone(),
            },
            other => other,
        })
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("short_description", &self.short_description)
            .field("is_root", &self.is_root)
            .field("arguments", &self.arguments)
            .field("flags", &self.flags)
            .field("action", &self.action.is_some())
            .finish()
    }
}

/// Normalizes a command name the way registration stores it.
pub(crate) fn normalize_name(name: &str) -> String {
    strip_whitespace(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_argument_is_idempotent() {
        let mut command = Command::new("create");
        command
            .add_argument("name", "first description", "")
            .unwrap()
            .add_argument("name", "second description", "fallback")
            .unwrap();

        assert_eq!(command.arguments().len(), 1);
        let name = command.argument("name").unwrap();
        assert_eq!(name.description, "first description");
        assert!(name.required);
    }

    #[test]
    fn test_variadic_must_be_last() {
        let mut command = Command::new("create");
        command.add_argument("files...", "files", "").unwrap();

        let err = command.add_argument("extra", "", "").unwrap_err();
        assert_eq!(
            err,
            ConfigError::ArgumentAfterVariadic {
                argument: "extra".into(),
                variadic: "files".into()
            }
        );

        let err = command.add_argument("more...", "", "").unwrap_err();
        assert!(matches!(err, ConfigError::MultipleVariadic { .. }));
        assert_eq!(command.arguments().len(), 1);
    }

    #[test]
    fn test_add_flag_is_idempotent() {
        let mut command = Command::new("create");
        command
            .add_flag("timeout", "operation timeout", FlagKind::Int(Some(60)))
            .unwrap()
            .add_flag("timeout", "other", FlagKind::String(None))
            .unwrap();

        assert_eq!(command.flags().len(), 1);
        let timeout = command.flag("timeout").unwrap();
        assert_eq!(timeout.description, "operation timeout");
        assert_eq!(timeout.default_value, "60");
    }

    #[test]
    fn test_duplicate_short_name_rejected() {
        let mut command = Command::new("create");
        command.add_flag("dir,d", "", FlagKind::String(None)).unwrap();

        let err = command.add_flag("debug,d", "", FlagKind::Bool).unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateShortName {
                flag: "debug".into(),
                short: "d".into(),
                existing: "dir".into()
            }
        );
    }

    #[test]
    fn test_empty_flag_name_reports_command() {
        let mut command = Command::new("serve");
        let err = command.add_flag(" ,x", "", FlagKind::Bool).unwrap_err();
        assert_eq!(
            err,
            ConfigError::EmptyFlagName {
                command: "serve".into()
            }
        );
    }

    #[test]
    fn test_existing_flag_skips_default_check() {
        let mut command = Command::new("create");
        command.add_flag("dir,d", "", FlagKind::String(None)).unwrap();

        let result = command.add_flag_with("dir", "", DataType::String, DefaultValue::Int(21));
        assert!(result.is_ok());
    }

    #[test]
    fn test_true_bool_default_rejected_at_registration() {
        let mut command = Command::new("create");
        let err = command
            .add_flag_with("clean", "", DataType::Bool, DefaultValue::Bool(true))
            .unwrap_err();

        assert_eq!(err, ConfigError::TrueBoolDefault { flag: "clean".into() });
        assert!(command.flag("clean").is_none());

        command
            .add_flag_with("no-clean", "", DataType::Bool, DefaultValue::None)
            .unwrap();
        assert_eq!(command.flag("clean").unwrap().default_value, "true");
    }

    #[test]
    fn test_set_action_keeps_first() {
        use std::cell::Cell;
        use std::rc::Rc;

        let hits = Rc::new(Cell::new(0));
        let first = Rc::clone(&hits);
        let mut command = Command::new("serve");
        command
            .set_action(move |_, _| first.set(first.get() + 1))
            .set_action(|_, _| panic!("second action must not be installed"));

        let action = command.action_mut().unwrap();
        action(&ArgumentValues::new(), &FlagValues::new());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_switch_drops_taken_short_name() {
        let mut command = Command::new("create");
        command.add_flag("host,h", "", FlagKind::String(None)).unwrap();
        command.add_switch("help", "h", "displays usage");

        let help = command.flag("help").unwrap();
        assert_eq!(help.short_name, None);
    }
}
