//! Contract between the resolution engine and a tokenizer.
//!
//! The engine never looks at raw tokens. A [`Tokenizer`] scans them against
//! a [`RegistrySchema`] and reports which command was selected and the
//! literal, unconverted string found for every declared argument and flag.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{MatchError, RegistrySchema};

/// User value and default reported for one argument or flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Value given on the command line; empty when absent.
    pub value: String,
    pub default: String,
}

impl Slot {
    pub fn new(value: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            default: default.into(),
        }
    }

    /// User value if non-empty, otherwise the default.
    pub fn resolved(&self) -> &str {
        if self.value.is_empty() {
            &self.default
        } else {
            &self.value
        }
    }
}

/// Structured result of scanning one token stream.
///
/// # Examples
///
/// ```
/// use command_tree_core::{MatchResult, Slot};
///
/// let matched = MatchResult::new("create")
///     .with_argument("name", Slot::new("my-service", ""))
///     .with_flag("timeout", Slot::new("", "60"));
///
/// assert_eq!(matched.flags["timeout"].resolved(), "60");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Selected command name; empty for the root command.
    pub command: String,
    pub arguments: HashMap<String, Slot>,
    /// Booleans use the literal strings `"true"` and `"false"`.
    pub flags: HashMap<String, Slot>,
    /// Positional tokens no argument consumed.
    pub unmatched: Vec<String>,
}

impl MatchResult {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Default::default()
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, slot: Slot) -> Self {
        self.arguments.insert(name.into(), slot);
        self
    }

    pub fn with_flag(mut self, name: impl Into<String>, slot: Slot) -> Self {
        self.flags.insert(name.into(), slot);
        self
    }
}

/// Scans raw tokens against a registry schema.
///
/// The crate `command-tree-matcher` provides a getopt-style implementation.
pub trait Tokenizer {
    /// Selects a command and collects argument and flag strings.
    ///
    /// # Errors
    ///
    /// Returns a [`MatchError`] for unknown commands, unknown flags and
    /// unsupported flag syntax.
    fn tokenize(&self, schema: &RegistrySchema, tokens: &[String]) -> Result<MatchResult, MatchError>;
}

impl<F> Tokenizer for F
where
    F: Fn(&RegistrySchema, &[String]) -> Result<MatchResult, MatchError>,
{
    fn tokenize(&self, schema: &RegistrySchema, tokens: &[String]) -> Result<MatchResult, MatchError> {
        self(schema, tokens)
    }
}
