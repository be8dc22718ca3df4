//! Schema entity definitions: positional arguments and flags.
//!
//! These types describe the *shape* of a command and are shared with the
//! [`Tokenizer`](crate::Tokenizer) through [`RegistrySchema`](crate::RegistrySchema),
//! so they derive [`serde`] traits and carry no behavior beyond their
//! registration rules.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Name suffix that marks a positional argument as variadic.
pub const VARIADIC_SUFFIX: &str = "...";

/// Long-name prefix that marks a boolean flag as inverted.
pub const INVERTED_PREFIX: &str = "no-";

/// Data type of a flag value.
///
/// # Examples
///
/// ```
/// use command_tree_core::DataType;
///
/// assert_eq!(DataType::Int.to_string(), "int");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Switch without a value token; resolves to `true` or `false`.
    Bool,
    /// Base-10 signed integer.
    Int,
    /// Free-form string.
    String,
}

impl DataType {
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Bool => "bool",
            DataType::Int => "int",
            DataType::String => "string",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loosely-typed default value, checked against a [`DataType`] at
/// registration time by [`FlagKind::from_parts`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultValue {
    /// No default; non-boolean flags become required.
    #[default]
    None,
    Bool(bool),
    Int(i64),
    String(String),
}

/// Typed flag declaration.
///
/// Pairs the data type with a default of the matching type, so a
/// default/type mismatch cannot be expressed.
///
/// # Examples
///
/// ```
/// use command_tree_core::{DataType, DefaultValue, FlagKind};
///
/// let kind = FlagKind::from_parts("timeout", DataType::Int, DefaultValue::Int(60)).unwrap();
/// assert_eq!(kind, FlagKind::Int(Some(60)));
///
/// let err = FlagKind::from_parts("dir", DataType::String, DefaultValue::Int(21));
/// assert!(err.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagKind {
    /// Boolean switch, implicitly `false`.
    Bool,
    /// Integer flag; `None` makes it required.
    Int(Option<i64>),
    /// String flag; `None` or a blank default makes it required.
    String(Option<String>),
}

impl FlagKind {
    /// Builds a kind from a data type and an untyped default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DefaultTypeMismatch`] when `default` does not
    /// hold a value of `data_type`, and [`ConfigError::TrueBoolDefault`] for
    /// a boolean defaulting to `true`.
    pub fn from_parts(flag: &str, data_type: DataType, default: DefaultValue) -> Result<Self> {
        let mismatch = || ConfigError::DefaultTypeMismatch {
            flag: flag.to_string(),
            expected: data_type,
        };

        match (data_type, default) {
            (DataType::Bool, DefaultValue::None | DefaultValue::Bool(false)) => Ok(FlagKind::Bool),
            (DataType::Bool, DefaultValue::Bool(true)) => Err(ConfigError::TrueBoolDefault {
                flag: flag.to_string(),
            }),
            (DataType::Int, DefaultValue::None) => Ok(FlagKind::Int(None)),
            (DataType::Int, DefaultValue::Int(value)) => Ok(FlagKind::Int(Some(value))),
            (DataType::String, DefaultValue::None) => Ok(FlagKind::String(None)),
            (DataType::String, DefaultValue::String(value)) => Ok(FlagKind::String(Some(value))),
            _ => Err(mismatch()),
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            FlagKind::Bool => DataType::Bool,
            FlagKind::Int(_) => DataType::Int,
            FlagKind::String(_) => DataType::String,
        }
    }
}

/// Positional argument of a command.
///
/// # Examples
///
/// ```
/// use command_tree_core::Argument;
///
/// let name = Argument::new("name", "name of the component", "").unwrap();
/// assert!(name.required);
///
/// let files = Argument::new("files...", "files to remove", "").unwrap();
/// assert_eq!(files.name, "files");
/// assert!(files.variadic);
/// assert!(!files.required);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    pub description: String,
    /// Empty means the argument has no default.
    pub default_value: String,
    /// `default_value` is empty and the argument is not variadic.
    pub required: bool,
    /// Absorbs all remaining positional tokens as a `,`-delimited list.
    pub variadic: bool,
}

impl Argument {
    /// Creates an argument; a trailing `...` on `name` marks it variadic.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyArgumentName`] when the name is empty
    /// after whitespace and suffix removal.
    pub fn new(name: &str, description: &str, default_value: &str) -> Result<Self> {
        let (name, variadic) = parse_argument_name(name);
        if name.is_empty() {
            return Err(ConfigError::EmptyArgumentName {
                command: String::new(),
            });
        }

        Ok(Self {
            name,
            description: description.trim().to_string(),
            default_value: default_value.to_string(),
            required: default_value.is_empty() && !variadic,
            variadic,
        })
    }
}

/// Returns the normalized argument name and whether it is variadic.
pub(crate) fn parse_argument_name(name: &str) -> (String, bool) {
    let name = strip_whitespace(name);
    match name.strip_suffix(VARIADIC_SUFFIX) {
        Some(stripped) => (stripped.to_string(), true),
        None => (name, false),
    }
}

/// Flag of a command.
///
/// # Examples
///
/// ```
/// use command_tree_core::{DataType, Flag, FlagKind};
///
/// let dir = Flag::new("dir, d", "output directory", FlagKind::String(None)).unwrap();
/// assert_eq!(dir.name, "dir");
/// assert_eq!(dir.short_name.as_deref(), Some("d"));
/// assert!(dir.required);
///
/// let clean = Flag::new("no-clean", "avoid cleanup", FlagKind::Bool).unwrap();
/// assert_eq!(clean.name, "clean");
/// assert_eq!(clean.display_name(), "no-clean");
/// assert_eq!(clean.default_value, "true");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    /// Long name without dashes; also the key in resolved values.
    pub name: String,
    /// Single-character alias without the dash.
    pub short_name: Option<String>,
    pub description: String,
    pub data_type: DataType,
    /// Default as seen by the tokenizer. Booleans use `"true"`/`"false"`.
    pub default_value: String,
    pub required: bool,
    /// Declared as `no-<name>`: defaults to `true`, the switch sets `false`.
    pub inverted: bool,
}

impl Flag {
    /// Creates a flag from `"long,short"` names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyFlagName`] for an empty long name and
    /// [`ConfigError::InvalidShortName`] when the short alias is not a single
    /// character.
    pub fn new(names: &str, description: &str, kind: FlagKind) -> Result<Self> {
        let names = FlagNames::parse(names)?;
        let is_bool = matches!(kind, FlagKind::Bool);
        let (name, inverted) = names.key(is_bool);
        let data_type = kind.data_type();

        let (default_value, required) = match kind {
            FlagKind::Bool if inverted => ("true".to_string(), false),
            FlagKind::Bool => ("false".to_string(), false),
            FlagKind::Int(Some(value)) => (value.to_string(), false),
            FlagKind::Int(None) => (String::new(), true),
            FlagKind::String(Some(value)) if !value.trim().is_empty() => (value, false),
            FlagKind::String(_) => (String::new(), true),
        };

        Ok(Self {
            name,
            short_name: names.short,
            description: description.trim().to_string(),
            data_type,
            default_value,
            required,
            inverted,
        })
    }

    /// Boolean flag built without name validation, used for built-in switches.
    pub(crate) fn switch(name: &str, short_name: Option<&str>, description: &str) -> Self {
        Self {
            name: name.to_string(),
            short_name: short_name.map(String::from),
            description: description.trim().to_string(),
            data_type: DataType::Bool,
            default_value: "false".to_string(),
            required: false,
            inverted: false,
        }
    }

    pub fn is_bool(&self) -> bool {
        self.data_type == DataType::Bool
    }

    /// Long name as typed on the command line.
    pub fn display_name(&self) -> Cow<'_, str> {
        if self.inverted {
            Cow::Owned(format!("{INVERTED_PREFIX}{}", self.name))
        } else {
            Cow::Borrowed(&self.name)
        }
    }

    /// Default as shown in usage output: the state of the switch as typed.
    pub fn display_default(&self) -> &str {
        if self.inverted { "false" } else { &self.default_value }
    }
}

/// Long and short names split out of a `"long,short"` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FlagNames {
    pub long: String,
    pub short: Option<String>,
}

impl FlagNames {
    pub fn parse(names: &str) -> Result<Self> {
        let names = strip_whitespace(names);
        let mut parts = names.split(',');
        let long = parts.next().unwrap_or_default().to_string();
        let short = parts.next().filter(|s| !s.is_empty()).map(String::from);

        if long.is_empty() {
            return Err(ConfigError::EmptyFlagName {
                command: String::new(),
            });
        }
        if let Some(short) = &short {
            if short.chars().count() != 1 {
                return Err(ConfigError::InvalidShortName {
                    flag: long,
                    short: short.clone(),
                });
            }
        }

        Ok(Self { long, short })
    }

    /// Key the flag is stored under, and whether it is inverted.
    pub fn key(&self, is_bool: bool) -> (String, bool) {
        match self.long.strip_prefix(INVERTED_PREFIX) {
            Some(stripped) if is_bool && !stripped.is_empty() => (stripped.to_string(), true),
            _ => (self.long.clone(), false),
        }
    }
}

pub(crate) fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}
