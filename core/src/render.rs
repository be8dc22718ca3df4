//! Usage and version rendering.
//!
//! Output layout is fixed:
//!
//! ```text
//! <description>
//!
//! Usage:
//!    <exe> <required> [optional] {flags}
//!    <exe> <command> {flags}
//!
//! Commands:
//!    <name padded to column>      <short description>
//!
//! Arguments:
//!    <name padded to column>      <description> (default: x) {variadic}
//!
//! Flags:
//!    -s, --<long padded>          <description> (default: x)
//! ```
//!
//! The `<command>` line and the `Commands:` section only appear for the root
//! command when sub-commands exist. Empty sections are omitted.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::{Argument, Flag, Registry};

/// Event delivered to the registry listener after rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    Help,
    Version,
}

impl Event {
    /// Symbolic event name: `"help"` or `"version"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Event::Help => "help",
            Event::Version => "version",
        }
    }
}

impl Registry {
    /// Version banner: `Version: <version>`.
    pub fn version_banner(&self) -> String {
        format!("Version: {}\n", self.version())
    }

    /// Usage text of the named command, or `None` if it is not registered.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_tree_core::Registry;
    ///
    /// let mut registry = Registry::new("reactor").unwrap();
    /// registry.set_description("Reactor generates React projects.");
    /// registry.root().add_argument("category", "category to look for", "").unwrap();
    ///
    /// let usage = registry.usage("").unwrap();
    /// assert!(usage.starts_with("Reactor generates React projects.\n\nUsage:\n"));
    /// assert!(usage.contains("   reactor <category> {flags}\n"));
    /// assert!(usage.contains("   reactor <command> {flags}\n"));
    /// ```
    pub fn usage(&self, name: &str) -> Option<String> {
        let command = self.command(name)?;
        let width = self.column_width();
        let mut text = String::new();

        let description = if command.is_root() {
            self.description()
        } else {
            command.description()
        };
        if !description.is_empty() {
            let _ = writeln!(text, "{description}\n");
        }

        let _ = writeln!(text, "Usage:");
        let mut line = format!("   {}", self.executable());
        if !command.is_root() {
            line.push(' ');
            line.push_str(command.name());
        }
        for argument in command.arguments() {
            line.push(' ');
            line.push_str(&placeholder(argument));
        }
        let _ = writeln!(text, "{line} {{flags}}");

        let mut sub_commands: Vec<_> = self.sub_commands().collect();
        if command.is_root() && !sub_commands.is_empty() {
            let _ = writeln!(text, "   {} <command> {{flags}}", self.executable());

            sub_commands.sort_by(|a, b| a.name().cmp(b.name()));
            let _ = writeln!(text, "\nCommands:");
            for sub in sub_commands {
                let _ = writeln!(text, "   {:<width$}{}", sub.name(), sub.short_description());
            }
        }

        if !command.arguments().is_empty() {
            let _ = writeln!(text, "\nArguments:");
            for argument in command.arguments() {
                let _ = writeln!(text, "   {}", argument_line(argument, width));
            }
        }

        if !command.flags().is_empty() {
            let _ = writeln!(text, "\nFlags:");
            for flag in command.flags() {
                let _ = writeln!(text, "   {}", flag_line(flag, width));
            }
        }

        Some(text)
    }

    /// Writes the usage of the named command and notifies the listener.
    ///
    /// Unknown names render nothing and notify nobody.
    pub fn print_usage(&mut self, name: &str, out: &mut dyn Write) -> io::Result<()> {
        let Some(text) = self.usage(name) else {
            return Ok(());
        };
        out.write_all(text.as_bytes())?;
        out.flush()?;
        self.notify(Event::Help);
        Ok(())
    }

    /// Writes the version banner and notifies the listener.
    pub fn print_version(&mut self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(self.version_banner().as_bytes())?;
        out.flush()?;
        self.notify(Event::Version);
        Ok(())
    }
}

fn placeholder(argument: &Argument) -> String {
    if argument.required {
        format!("<{}>", argument.name)
    } else {
        format!("[{}]", argument.name)
    }
}

fn argument_line(argument: &Argument, width: usize) -> String {
    let mut line = format!("{:<width$}{}", argument.name, argument.description);
    if !argument.default_value.is_empty() {
        let _ = write!(line, " (default: {})", argument.default_value);
    }
    if argument.variadic {
        line.push_str(" {variadic}");
    }
    line
}

fn flag_line(flag: &Flag, width: usize) -> String {
    let mut line = match &flag.short_name {
        Some(short) => format!(
            "-{short}, --{:<pad$}",
            flag.display_name(),
            pad = width.saturating_sub(6)
        ),
        None => format!("--{:<pad$}", flag.display_name(), pad = width.saturating_sub(2)),
    };
    line.push_str(&flag.description);
    let default = flag.display_default();
    if !default.is_empty() {
        let _ = write!(line, " (default: {default})");
    }
    line
}
