//! Classification of a single raw token.

use std::sync::LazyLock;

use regex::Regex;

static LONG_FLAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^--([^-=][^=]*)(?:=(.*))?$").expect("static regex must compile"));
static SHORT_FLAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^-([^-=])(?:=(.*))?$").expect("static regex must compile"));

/// Role of a raw token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// `--name` or `--name=value`.
    Long { name: &'a str, value: Option<&'a str> },
    /// `-n` or `-n=value`.
    Short { name: &'a str, value: Option<&'a str> },
    /// `--`: every following token is positional.
    Terminator,
    Positional(&'a str),
    /// Starts with a dash but matches no supported form (`---x`, `-abc`).
    Unsupported(&'a str),
}

pub(crate) fn classify(raw: &str) -> Token<'_> {
    if raw == "--" {
        return Token::Terminator;
    }
    if raw == "-" || !raw.starts_with('-') {
        return Token::Positional(raw);
    }

    if let Some(caps) = LONG_FLAG_RE.captures(raw) {
        return Token::Long {
            name: caps.get(1).map_or("", |m| m.as_str()),
            value: caps.get(2).map(|m| m.as_str()),
        };
    }
    if let Some(caps) = SHORT_FLAG_RE.captures(raw) {
        return Token::Short {
            name: caps.get(1).map_or("", |m| m.as_str()),
            value: caps.get(2).map(|m| m.as_str()),
        };
    }

    Token::Unsupported(raw)
}
