//! Built-in `help`/`version` commands and `--help`/`--version` flags.

use crate::Command;

/// Name of the root command.
pub const ROOT_COMMAND: &str = "";
/// Sub-command that renders the root usage.
pub const HELP_COMMAND: &str = "help";
/// Sub-command that renders the version banner.
pub const VERSION_COMMAND: &str = "version";
/// Flag injected into every command.
pub const HELP_FLAG: &str = "help";
pub const HELP_FLAG_SHORT: &str = "h";
/// Flag injected into the root command.
pub const VERSION_FLAG: &str = "version";
pub const VERSION_FLAG_SHORT: &str = "v";

pub(crate) const HELP_COMMAND_DESCRIPTION: &str =
    "This command displays the usage information of this CLI application.";
pub(crate) const HELP_COMMAND_SHORT_DESCRIPTION: &str = "displays usage information";
pub(crate) const VERSION_COMMAND_DESCRIPTION: &str =
    "This command displays the version number of this CLI application.";
pub(crate) const VERSION_COMMAND_SHORT_DESCRIPTION: &str = "displays version number";
pub(crate) const HELP_FLAG_DESCRIPTION: &str =
    "displays usage information of the application or a command";
pub(crate) const VERSION_FLAG_DESCRIPTION: &str = "displays version number";

/// Descriptions of the built-in flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SwitchTexts {
    pub help: String,
    pub version: String,
}

/// Attaches the built-in flags: `--version` first on root, `--help` last.
pub(crate) fn inject_flags(command: &mut Command, texts: &SwitchTexts) {
    if command.is_root() {
        command.add_switch(VERSION_FLAG, VERSION_FLAG_SHORT, &texts.version);
    }
    command.add_switch(HELP_FLAG, HELP_FLAG_SHORT, &texts.help);
}
