//! Serializable snapshot of a registry's command tree.
//!
//! A [`RegistrySchema`] is what a [`Tokenizer`](crate::Tokenizer) scans
//! tokens against. It carries every name, alias, data kind, default and
//! variadic marker but none of the host callbacks, so it can also be
//! exported as JSON for documentation or completion tooling.

use serde::{Deserialize, Serialize};

use crate::{Argument, Flag};

/// Shape of a whole registry.
///
/// # Examples
///
/// ```
/// use command_tree_core::Registry;
///
/// let mut registry = Registry::new("reactor").unwrap();
/// registry.register("serve").set_short_description("starts a development server");
///
/// let schema = registry.schema();
/// assert!(schema.root().is_some());
/// assert!(schema.command("serve").is_some());
///
/// let json = schema.to_json().unwrap();
/// assert!(json.contains("\"serve\""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySchema {
    pub executable: String,
    pub version: String,
    pub description: String,
    /// Commands in registration order, root first.
    pub commands: Vec<CommandSchema>,
}

impl RegistrySchema {
    pub fn command(&self, name: &str) -> Option<&CommandSchema> {
        self.commands.iter().find(|command| command.name == name)
    }

    pub fn root(&self) -> Option<&CommandSchema> {
        self.commands.iter().find(|command| command.is_root)
    }

    /// Non-root commands in registration order.
    pub fn sub_commands(&self) -> impl Iterator<Item = &CommandSchema> {
        self.commands.iter().filter(|command| !command.is_root)
    }

    /// Pretty-printed JSON representation.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Shape of a single command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSchema {
    pub name: String,
    pub description: String,
    pub short_description: String,
    pub is_root: bool,
    pub arguments: Vec<Argument>,
    pub flags: Vec<Flag>,
}

impl CommandSchema {
    pub fn flag(&self, name: &str) -> Option<&Flag> {
        self.flags.iter().find(|flag| flag.name == name)
    }

    pub fn flag_by_short(&self, short: &str) -> Option<&Flag> {
        self.flags
            .iter()
            .find(|flag| flag.short_name.as_deref() == Some(short))
    }
}

#[cfg(test)]
mod tests {
    use crate::{FlagKind, Registry};

    use super::*;

    #[test]
    fn test_schema_round_trips_through_json() {
        let mut registry = Registry::new("reactor").unwrap();
        registry
            .register("create")
            .add_argument("files...", "files", "")
            .unwrap()
            .add_flag("no-clean", "avoid cleanup", FlagKind::Bool)
            .unwrap();

        let schema = registry.schema();
        let parsed: RegistrySchema = serde_json::from_str(&schema.to_json().unwrap()).unwrap();
        assert_eq!(parsed, schema);

        let create = parsed.command("create").unwrap();
        assert!(create.arguments[0].variadic);
        assert!(create.flag("clean").unwrap().inverted);
    }

    #[test]
    fn test_sub_commands_exclude_root() {
        let schema = Registry::new("reactor").unwrap().schema();
        let names: Vec<&str> = schema
            .sub_commands()
            .map(|command| command.name.as_str())
            .collect();
        assert_eq!(names, vec!["version", "help"]);
    }
}
