//! The command registry: owner of the command tree and entry point of an
//! invocation.

use std::fmt;
use std::io::Write;
use std::process::ExitCode;

use tracing::debug;

use crate::builtin::{self, HELP_COMMAND, ROOT_COMMAND, SwitchTexts, VERSION_COMMAND};
use crate::command::normalize_name;
use crate::error::{ConfigError, InvocationError, Result};
use crate::{Command, Event, Outcome, RegistryConfig, RegistrySchema, Tokenizer};

/// Host callback notified after help or version output is rendered.
pub type Listener = Box<dyn FnMut(Event)>;

/// Ordered collection of commands plus application metadata.
///
/// The root command (empty name) and the `version` and `help` commands are
/// registered on construction. Registration must complete before the first
/// call to [`parse`](Self::parse) or [`run`](Self::run); a registry is not
/// meant to be shared across threads.
///
/// # Examples
///
/// ```
/// use command_tree_core::{FlagKind, Registry};
///
/// let mut registry = Registry::new("reactor")?;
/// registry.set_version("v1.0.0");
/// registry
///     .root()
///     .add_argument("category", "category of the information to look for", "")?
///     .add_flag("verbose,V", "display log information", FlagKind::Bool)?;
///
/// let names: Vec<&str> = registry.commands().map(|c| c.name()).collect();
/// assert_eq!(names, vec!["", "version", "help"]);
///
/// let root = registry.command("").unwrap();
/// let flags: Vec<&str> = root.flags().iter().map(|f| f.name.as_str()).collect();
/// assert_eq!(flags, vec!["version", "help", "verbose"]);
/// # Ok::<(), command_tree_core::ConfigError>(())
/// ```
pub struct Registry {
    executable: String,
    version: String,
    description: String,
    commands: Vec<Command>,
    listener: Option<Listener>,
    switches: SwitchTexts,
    column_width: usize,
}

impl Registry {
    /// Creates a registry with default built-in texts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyExecutable`] when `executable` is blank.
    pub fn new(executable: &str) -> Result<Self> {
        Self::from_config(RegistryConfig::new(executable))
    }

    /// Creates a registry from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyExecutable`] when the configured
    /// executable is blank.
    pub fn from_config(config: RegistryConfig) -> Result<Self> {
        let executable = validate_executable(&config.executable)?;

        let mut registry = Self {
            executable,
            version: config.version.trim().to_string(),
            description: config.description.trim().to_string(),
            commands: Vec::new(),
            listener: None,
            switches: SwitchTexts {
                help: config.help_flag_description,
                version: config.version_flag_description,
            },
            column_width: config.column_width,
        };

        registry.register(ROOT_COMMAND);
        registry
            .register(VERSION_COMMAND)
            .set_description(&config.version_command.description)
            .set_short_description(&config.version_command.short_description);
        registry
            .register(HELP_COMMAND)
            .set_description(&config.help_command.description)
            .set_short_description(&config.help_command.short_description);

        Ok(registry)
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn column_width(&self) -> usize {
        self.column_width
    }

    /// Replaces the executable name shown in usage output.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyExecutable`] when `name` is blank; the
    /// current name is kept.
    pub fn set_executable_name(&mut self, name: &str) -> Result<&mut Self> {
        self.executable = validate_executable(name)?;
        Ok(self)
    }

    pub fn set_version(&mut self, version: &str) -> &mut Self {
        self.version = version.trim().to_string();
        self
    }

    pub fn set_description(&mut self, description: &str) -> &mut Self {
        self.description = description.trim().to_string();
        self
    }

    /// Installs the listener notified with [`Event::Help`] or
    /// [`Event::Version`] after the matching output is rendered.
    pub fn on_event<F>(&mut self, listener: F) -> &mut Self
    where
        F: FnMut(Event) + 'static,
    {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Registers a command, or returns the existing one, and attaches the
    /// built-in flags. An empty name selects the root command.
    pub fn register(&mut self, name: &str) -> &mut Command {
        let name = normalize_name(name);
        let index = match self.position(&name) {
            Some(index) => index,
            None => {
                debug!(command = %name, "Registering command");
                self.commands.push(Command::new(&name));
                self.commands.len() - 1
            }
        };

        let command = &mut self.commands[index];
        builtin::inject_flags(command, &self.switches);
        command
    }

    /// The root command.
    pub fn root(&mut self) -> &mut Command {
        self.register(ROOT_COMMAND)
    }

    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|command| command.name() == name)
    }

    /// All commands in registration order, root first.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    /// Non-root commands in registration order.
    pub fn sub_commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter().filter(|command| !command.is_root())
    }

    /// Serializable snapshot handed to a [`Tokenizer`].
    pub fn schema(&self) -> RegistrySchema {
        RegistrySchema {
            executable: self.executable.clone(),
            version: self.version.clone(),
            description: self.description.clone(),
            commands: self.commands.iter().map(Command::schema).collect(),
        }
    }

    /// Tokenizes `tokens` and resolves the match.
    ///
    /// Usage and version text is written to `out`.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvocationError`] encountered; the selected
    /// action is not invoked in that case.
    pub fn parse<T, S>(
        &mut self,
        tokenizer: &T,
        tokens: &[S],
        out: &mut dyn Write,
    ) -> std::result::Result<Outcome, InvocationError>
    where
        T: Tokenizer + ?Sized,
        S: AsRef<str>,
    {
        let tokens: Vec<String> = tokens.iter().map(|t| t.as_ref().to_string()).collect();
        let matched = tokenizer.tokenize(&self.schema(), &tokens);
        self.resolve(matched, out)
    }

    /// Like [`parse`](Self::parse), but reports any error as an
    /// `Error: <message>.` line on `out` instead of returning it.
    pub fn run<T, S>(&mut self, tokenizer: &T, tokens: &[S], out: &mut dyn Write) -> ExitCode
    where
        T: Tokenizer + ?Sized,
        S: AsRef<str>,
    {
        match self.parse(tokenizer, tokens, out) {
            Ok(outcome) => {
                debug!(?outcome, "Invocation finished");
                ExitCode::SUCCESS
            }
            Err(err) => {
                debug!(error = %err, "Invocation failed");
                let _ = writeln!(out, "Error: {err}.");
                ExitCode::FAILURE
            }
        }
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.commands.iter().position(|command| command.name() == name)
    }

    pub(crate) fn command_at(&self, index: usize) -> &Command {
        &self.commands[index]
    }

    pub(crate) fn command_at_mut(&mut self, index: usize) -> &mut Command {
        &mut self.commands[index]
    }

    pub(crate) fn notify(&mut self, event: Event) {
        if let Some(listener) = self.listener.as_mut() {
            debug!(event = event.as_str(), "Notifying listener");
            listener(event);
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("executable", &self.executable)
            .field("version", &self.version)
            .field("description", &self.description)
            .field("commands", &self.commands)
            .field("listener", &self.listener.is_some())
            .field("column_width", &self.column_width)
            .finish()
    }
}

fn validate_executable(name: &str) -> Result<String> {
    let name = normalize_name(name);
    if name.is_empty() {
        return Err(ConfigError::EmptyExecutable);
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use crate::builtin::{HELP_FLAG, VERSION_FLAG};
    use crate::{CommandTexts, FlagKind};

    use super::*;

    #[test]
    fn test_empty_executable_rejected() {
        assert_eq!(Registry::new("  ").unwrap_err(), ConfigError::EmptyExecutable);

        let mut registry = Registry::new("reactor").unwrap();
        assert!(registry.set_executable_name("").is_err());
        assert_eq!(registry.executable(), "reactor");
    }

    #[test]
    fn test_builtin_commands_registered_on_construction() {
        let registry = Registry::new("reactor").unwrap();

        let root = registry.command("").unwrap();
        assert!(root.is_root());
        assert!(root.flag(VERSION_FLAG).is_some());
        assert!(root.flag(HELP_FLAG).is_some());

        let help = registry.command("help").unwrap();
        assert!(!help.is_root());
        assert!(help.flag(VERSION_FLAG).is_none());
        assert_eq!(help.short_description(), "displays usage information");
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = Registry::new("reactor").unwrap();
        registry.register("serve").set_description("first");
        registry.register(" serve ");

        assert_eq!(registry.sub_commands().count(), 3);
        let serve = registry.command("serve").unwrap();
        assert_eq!(serve.description(), "first");
        assert_eq!(serve.flags().len(), 1);
    }

    #[test]
    fn test_builtin_texts_come_from_config() {
        let config = RegistryConfig {
            help_command: CommandTexts {
                description: "Shows help.".into(),
                short_description: "shows help".into(),
            },
            help_flag_description: "prints help".into(),
            ..RegistryConfig::new("reactor")
        };
        let mut registry = Registry::from_config(config).unwrap();

        let help = registry.command("help").unwrap();
        assert_eq!(help.short_description(), "shows help");
        let flag = registry.register("serve").flag(HELP_FLAG).unwrap();
        assert_eq!(flag.description, "prints help");
    }

    #[test]
    fn test_user_flags_follow_builtin_flags() {
        let mut registry = Registry::new("reactor").unwrap();
        registry
            .register("build")
            .add_flag("dir,d", "output directory", FlagKind::String(None))
            .unwrap();

        let build = registry.command("build").unwrap();
        let names: Vec<&str> = build.flags().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["help", "dir"]);
    }

    #[test]
    fn test_metadata_is_trimmed() {
        let mut registry = Registry::new("reactor").unwrap();
        registry.set_version("  v1.0.0 ").set_description(" A tool. ");

        assert_eq!(registry.version(), "v1.0.0");
        assert_eq!(registry.description(), "A tool.");
    }
}
