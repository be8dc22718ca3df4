//! Resolved values handed to command actions.

use std::fmt;

use serde::Serialize;

use crate::error::ValueTypeError;
use crate::{Argument, DataType, Flag};

/// Type-coerced flag value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    String(String),
}

impl Value {
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Bool(_) => DataType::Bool,
            Value::Int(_) => DataType::Int,
            Value::String(_) => DataType::String,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::String(value) => f.write_str(value),
        }
    }
}

/// Argument metadata together with its resolved value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgumentValue {
    pub argument: Argument,
    pub value: String,
}

impl ArgumentValue {
    /// Splits a variadic value into its items. Non-variadic values yield
    /// themselves; empty values yield nothing.
    pub fn items(&self) -> Vec<&str> {
        if self.value.is_empty() {
            Vec::new()
        } else if self.argument.variadic {
            self.value.split(',').collect()
        } else {
            vec![self.value.as_str()]
        }
    }
}

/// Flag metadata together with its coerced value.
///
/// # Examples
///
/// ```
/// use command_tree_core::{Flag, FlagKind, FlagValue, Value};
///
/// let flag = Flag::new("timeout", "", FlagKind::Int(Some(60))).unwrap();
/// let value = FlagValue { flag, value: Value::Int(60) };
/// assert_eq!(value.as_int(), Ok(60));
/// assert!(value.as_bool().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagValue {
    pub flag: Flag,
    pub value: Value,
}

impl FlagValue {
    pub fn as_bool(&self) -> Result<bool, ValueTypeError> {
        match self.value {
            Value::Bool(value) => Ok(value),
            _ => Err(self.type_error(DataType::Bool)),
        }
    }

    pub fn as_int(&self) -> Result<i64, ValueTypeError> {
        match self.value {
            Value::Int(value) => Ok(value),
            _ => Err(self.type_error(DataType::Int)),
        }
    }

    pub fn as_str(&self) -> Result<&str, ValueTypeError> {
        match &self.value {
            Value::String(value) => Ok(value),
            _ => Err(self.type_error(DataType::String)),
        }
    }

    fn type_error(&self, expected: DataType) -> ValueTypeError {
        ValueTypeError {
            flag: self.flag.name.clone(),
            expected,
        }
    }
}

/// Insertion-ordered mapping from field name to resolved value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Values<V> {
    entries: Vec<(String, V)>,
}

/// Resolved arguments keyed by argument name.
pub type ArgumentValues = Values<ArgumentValue>;

/// Resolved flags keyed by long flag name.
pub type FlagValues = Values<FlagValue>;

impl<V> Values<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts or replaces the value stored under `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: V) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }
}

impl<V> Default for Values<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgumentValues {
    /// Resolved string value of an argument.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(|arg| arg.value.as_str())
    }
}

impl FlagValues {
    /// Coerced value of a flag.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).map(|flag| &flag.value)
    }
}
