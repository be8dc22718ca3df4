//! Error taxonomy for registration and invocation.
//!
//! Registration mistakes are host programming errors and surface as
//! [`ConfigError`] from the registering call. Everything that can go wrong
//! while resolving a single invocation is collected in [`InvocationError`],
//! whose `Display` impl yields the message shown to the user.

use thiserror::Error;

use crate::DataType;

/// Schema registration errors.
///
/// Returned immediately by the call that attempted the invalid registration;
/// never deferred to resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Executable name is empty or whitespace-only.
    #[error("executable name must be a non-empty string")]
    EmptyExecutable,
    /// Argument name is empty after whitespace removal.
    #[error("argument name of the {command} command can not be empty")]
    EmptyArgumentName { command: String },
    /// Flag long name is empty after whitespace removal.
    #[error("flag name of the {command} command can not be empty")]
    EmptyFlagName { command: String },
    /// Short alias is not exactly one character.
    #[error("short name -{short} of the --{flag} flag must be a single character")]
    InvalidShortName { flag: String, short: String },
    /// Short alias is already taken by another flag of the same command.
    #[error("short name -{short} of the --{flag} flag is already used by the --{existing} flag")]
    DuplicateShortName {
        flag: String,
        short: String,
        existing: String,
    },
    /// Default value does not match the declared data type.
    #[error("value of the --{flag} flag must be {} or nil", article(.expected))]
    DefaultTypeMismatch { flag: String, expected: DataType },
    /// Boolean flags always default to `false`.
    #[error("boolean flag --{flag} can not default to true, declare --no-{flag} instead")]
    TrueBoolDefault { flag: String },
    /// A second variadic argument was declared.
    #[error("argument {argument} can not be variadic, {variadic} is already variadic")]
    MultipleVariadic { argument: String, variadic: String },
    /// An argument was declared after the variadic one.
    #[error("argument {argument} can not follow the variadic argument {variadic}")]
    ArgumentAfterVariadic { argument: String, variadic: String },
}

fn dashes(short: &bool) -> &'static str {
    if *short { "-" } else { "--" }
}

fn article(data_type: &DataType) -> &'static str {
    match data_type {
        DataType::Bool => "a bool",
        DataType::Int => "an int",
        DataType::String => "a string",
    }
}

/// Errors reported by a [`Tokenizer`](crate::Tokenizer) while scanning tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The selected command is not registered.
    #[error("{0} is not a valid command")]
    UnknownCommand(String),
    /// A flag name is not declared on the selected command.
    #[error("{}{name} is not a valid flag", dashes(.short))]
    UnknownFlag { name: String, short: bool },
    /// A token looks like a flag but uses unsupported syntax (e.g. `---x`, `-abc`).
    #[error("{0} is not a supported flag")]
    UnsupportedFlag(String),
}

/// Validation failures found while resolving matched values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A required argument has neither a user value nor a default.
    #[error("value of the {0} argument can not be empty")]
    MissingArgument(String),
    /// A required flag has neither a user value nor a default.
    #[error("value of the --{0} flag can not be empty")]
    MissingFlag(String),
    /// An integer flag received a value that is not base-10 parsable.
    #[error("value of the --{0} flag must be an integer")]
    NotAnInteger(String),
}

/// Any failure that terminates an invocation.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error(transparent)]
    Match(#[from] MatchError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// A non-root command was selected but has no action registered.
    #[error("action function for the {0} command is not registered")]
    MissingAction(String),
    /// Writing usage or version output failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Requested a flag value as a type it was not declared with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{flag} flag can not be converted to {expected}")]
pub struct ValueTypeError {
    pub flag: String,
    pub expected: DataType,
}

/// Convenience alias for registration results.
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
