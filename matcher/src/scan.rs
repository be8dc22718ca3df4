//! Getopt-style scanning of a token stream against a registry schema.

use std::iter::Peekable;
use std::slice::Iter;

use command_tree_core::{
    CommandSchema, Flag, INVERTED_PREFIX, MatchError, MatchResult, RegistrySchema, Slot, Tokenizer,
};
use tracing::debug;

use crate::token::{Token, classify};

/// Default [`Tokenizer`] implementation.
///
/// - The first token selects a sub-command when it names a registered
///   non-root command; otherwise the root command is selected. A leading
///   non-flag token is an unknown command when root declares no arguments.
/// - Flags: `--long`, `--long=value`, `--long value`, `-s`, `-s=value`,
///   `-s value`. Boolean flags never consume the next token. Inverted
///   booleans are switched off with `--no-<name>`.
/// - `--` ends flag scanning. Positionals bind to arguments in declaration
///   order; a variadic argument takes the rest joined by `,`.
/// - The last occurrence of a repeated flag wins.
///
/// # Examples
///
/// ```
/// use command_tree_core::{FlagKind, Registry, Tokenizer};
/// use command_tree_matcher::GetoptMatcher;
///
/// let mut registry = Registry::new("reactor").unwrap();
/// registry
///     .register("create")
///     .add_argument("name", "name of the component", "").unwrap()
///     .add_flag("dir,d", "output directory", FlagKind::String(None)).unwrap();
///
/// let tokens: Vec<String> = ["create", "my-service", "-d", "./out"]
///     .iter()
///     .map(|t| t.to_string())
///     .collect();
/// let matched = GetoptMatcher.tokenize(&registry.schema(), &tokens).unwrap();
///
/// assert_eq!(matched.command, "create");
/// assert_eq!(matched.arguments["name"].value, "my-service");
/// assert_eq!(matched.flags["dir"].value, "./out");
/// assert_eq!(matched.flags["help"].value, "");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetoptMatcher;

type Tokens<'t> = Peekable<Iter<'t, String>>;

impl Tokenizer for GetoptMatcher {
    fn tokenize(&self, schema: &RegistrySchema, tokens: &[String]) -> Result<MatchResult, MatchError> {
        let (command, rest) = select_command(schema, tokens)?;
        debug!(command = %command.name, tokens = rest.len(), "Selected command");

        let mut result = MatchResult::new(command.name.clone());
        for argument in &command.arguments {
            result
                .arguments
                .insert(argument.name.clone(), Slot::new("", argument.default_value.clone()));
        }
        for flag in &command.flags {
            result
                .flags
                .insert(flag.name.clone(), Slot::new("", flag.default_value.clone()));
        }

        let mut positionals: Vec<&str> = Vec::new();
        let mut tokens = rest.iter().peekable();
        let mut flags_ended = false;

        while let Some(raw) = tokens.next() {
            if flags_ended {
                positionals.push(raw);
                continue;
            }

            let (flag, inline) = match classify(raw) {
                Token::Terminator => {
                    flags_ended = true;
                    continue;
                }
                Token::Positional(value) => {
                    positionals.push(value);
                    continue;
                }
                Token::Unsupported(raw) => return Err(MatchError::UnsupportedFlag(raw.to_string())),
                Token::Long { name, value } => {
                    let flag = find_long(command, name).ok_or_else(|| MatchError::UnknownFlag {
                        name: name.to_string(),
                        short: false,
                    })?;
                    (flag, value)
                }
                Token::Short { name, value } => {
                    let flag = command
                        .flag_by_short(name)
                        .ok_or_else(|| MatchError::UnknownFlag {
                            name: name.to_string(),
                            short: true,
                        })?;
                    (flag, value)
                }
            };

            let value = flag_value(flag, inline, &mut tokens);
            if let Some(slot) = result.flags.get_mut(&flag.name) {
                slot.value = value;
            }
        }

        bind_positionals(command, positionals, &mut result);
        Ok(result)
    }
}

fn select_command<'s, 't>(
    schema: &'s RegistrySchema,
    tokens: &'t [String],
) -> Result<(&'s CommandSchema, &'t [String]), MatchError> {
    let first = tokens.first();
    let root = schema
        .root()
        .ok_or_else(|| MatchError::UnknownCommand(first.cloned().unwrap_or_default()))?;

    let Some(first) = first else {
        return Ok((root, tokens));
    };
    if !matches!(classify(first), Token::Positional(_)) {
        return Ok((root, tokens));
    }

    if let Some(command) = schema.command(first).filter(|command| !command.is_root) {
        return Ok((command, &tokens[1..]));
    }
    if root.arguments.is_empty() {
        return Err(MatchError::UnknownCommand(first.clone()));
    }
    Ok((root, tokens))
}

/// Looks up a long name. Inverted flags only answer to `no-<name>`.
fn find_long<'s>(command: &'s CommandSchema, name: &str) -> Option<&'s Flag> {
    if let Some(flag) = command.flag(name).filter(|flag| !flag.inverted) {
        return Some(flag);
    }
    let stripped = name.strip_prefix(INVERTED_PREFIX)?;
    command.flag(stripped).filter(|flag| flag.inverted)
}

fn flag_value(flag: &Flag, inline: Option<&str>, tokens: &mut Tokens<'_>) -> String {
    // Inline values on an inverted switch state the switch as typed.
    match inline {
        Some("true") if flag.inverted => return "false".to_string(),
        Some(_) if flag.inverted => return "true".to_string(),
        Some(value) => return value.to_string(),
        None => {}
    }
    if flag.is_bool() {
        let value = if flag.inverted { "false" } else { "true" };
        return value.to_string();
    }

    match tokens.peek() {
        Some(next) if matches!(classify(next), Token::Positional(_)) => {
            tokens.next().cloned().unwrap_or_default()
        }
        _ => String::new(),
    }
}

fn bind_positionals(command: &CommandSchema, positionals: Vec<&str>, result: &mut MatchResult) {
    let mut values = positionals.into_iter();

    for argument in &command.arguments {
        let value = if argument.variadic {
            values.by_ref().collect::<Vec<_>>().join(",")
        } else {
            match values.next() {
                Some(value) => value.to_string(),
                None => break,
            }
        };

        if let Some(slot) = result.arguments.get_mut(&argument.name) {
            slot.value = value;
        }
    }

    result.unmatched.extend(values.map(String::from));
    if !result.unmatched.is_empty() {
        debug!(unmatched = ?result.unmatched, "Ignoring surplus positional tokens");
    }
}
