//! Registry configuration.
//!
//! Everything a host may want to tune without touching the command tree:
//! identity of the application, texts of the built-in commands and flags,
//! and the column width used by the usage renderer.
//!
//! # Example JSON
//!
//! ```json
//! {
//!   "executable": "reactor",
//!   "version": "v1.0.0",
//!   "description": "Reactor is a command-line tool to generate React projects.",
//!   "help_command": { "short_description": "shows help" },
//!   "column_width": 24
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::builtin::{
    HELP_COMMAND_DESCRIPTION, HELP_COMMAND_SHORT_DESCRIPTION, HELP_FLAG_DESCRIPTION,
    VERSION_COMMAND_DESCRIPTION, VERSION_COMMAND_SHORT_DESCRIPTION, VERSION_FLAG_DESCRIPTION,
};

/// Default width of the name column in usage output.
pub const DEFAULT_COLUMN_WIDTH: usize = 30;

/// Descriptions of a built-in command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandTexts {
    pub description: String,
    pub short_description: String,
}

/// Settings used to construct a [`Registry`](crate::Registry).
///
/// Missing fields fall back to [`RegistryConfig::default`].
///
/// # Examples
///
/// ```
/// use command_tree_core::RegistryConfig;
///
/// let config: RegistryConfig = serde_json::from_str(r#"{
///     "executable": "reactor",
///     "version": "v1.0.0",
///     "column_width": 24
/// }"#).unwrap();
///
/// assert_eq!(config.executable, "reactor");
/// assert_eq!(config.column_width, 24);
/// assert_eq!(config.help_command.short_description, "displays usage information");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Executable name shown in `Usage:` lines; must be non-empty.
    pub executable: String,
    pub version: String,
    /// Description shown in the root usage.
    pub description: String,
    pub help_command: CommandTexts,
    pub version_command: CommandTexts,
    pub help_flag_description: String,
    pub version_flag_description: String,
    /// Width of the name column in usage output.
    pub column_width: usize,
}

impl RegistryConfig {
    /// Default configuration for `executable`.
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            ..Self::default()
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            executable: String::new(),
            version: String::new(),
            description: String::new(),
            help_command: CommandTexts {
                description: HELP_COMMAND_DESCRIPTION.to_string(),
                short_description: HELP_COMMAND_SHORT_DESCRIPTION.to_string(),
            },
            version_command: CommandTexts {
                description: VERSION_COMMAND_DESCRIPTION.to_string(),
                short_description: VERSION_COMMAND_SHORT_DESCRIPTION.to_string(),
            },
            help_flag_description: HELP_FLAG_DESCRIPTION.to_string(),
            version_flag_description: VERSION_FLAG_DESCRIPTION.to_string(),
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}
