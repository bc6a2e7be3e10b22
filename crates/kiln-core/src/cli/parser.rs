//! Schema-driven argument parsing for registered commands
//!
//! Turns the tokens following a command name into a [`ParsedInvocation`]:
//! - short and long aliases resolve to the same option key
//! - `--key=value`, `--key value`, `-kvalue` and clustered short flags (`-fm`)
//! - flags without a value are `true`; `--no-<long>` forces a negatable option `false`
//! - `--` ends option parsing
//! - unknown options are kept verbatim for commands that allow them
//!
//! Parsing is a pure transformation; it never prints or exits.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use super::registry::{CommandSpec, OptionKind, OptionSpec};

/// A parsed option value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Str(String),
}

impl OptionValue {
    /// Truthiness: `Bool(b)` is `b`, any string is true
    pub fn is_set(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Str(_) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Bool(_) => None,
        }
    }
}

/// Result of parsing one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedInvocation {
    /// Registered command name, absent when no command was given
    pub command: Option<String>,
    pub positionals: Vec<String>,
    pub options: BTreeMap<String, OptionValue>,
    /// Unrecognised option tokens, passed through verbatim
    pub unknown: Vec<String>,
    /// Every token after the command name, untouched
    pub raw: Vec<String>,
    /// Non-fatal notices (e.g. ignored extra arguments)
    pub warnings: Vec<String>,
    /// `-h` / `--help` was given
    #[serde(skip)]
    pub help_requested: bool,
}

impl ParsedInvocation {
    /// Whether a flag-like option is set and truthy
    pub fn flag(&self, key: &str) -> bool {
        self.options.get(key).is_some_and(OptionValue::is_set)
    }

    /// String value of an option, if it was given one
    pub fn value(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(OptionValue::as_str)
    }

    /// Positional argument by index
    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positionals.get(index).map(String::as_str)
    }
}

/// Usage errors reported to the caller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Missing required argument <{name}>.")]
    MissingArgument { name: String },

    #[error("Unknown option {option}.")]
    UnknownOption { option: String },

    #[error(
        "Missing required argument for option {flags}{}",
        .got.as_ref().map(|g| format!(", got {}", g)).unwrap_or_default()
    )]
    OptionMissingArgument { flags: String, got: Option<String> },

    #[error("Required option '{flags}' not specified")]
    MissingRequiredOption { flags: String },
}

impl ParseError {
    pub fn missing_argument(name: impl Into<String>) -> Self {
        Self::MissingArgument { name: name.into() }
    }

    pub fn unknown_option(option: impl Into<String>) -> Self {
        Self::UnknownOption {
            option: option.into(),
        }
    }
}

/// Parse `tokens` (everything after the command name) against `spec`
pub fn parse(spec: &CommandSpec, tokens: &[String]) -> Result<ParsedInvocation, ParseError> {
    let mut inv = ParsedInvocation {
        command: Some(spec.name.to_string()),
        raw: tokens.to_vec(),
        ..Default::default()
    };

    let mut only_positionals = false;
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];

        if only_positionals || token == "-" || !token.starts_with('-') {
            inv.positionals.push(token.clone());
            i += 1;
            continue;
        }

        if token == "--" {
            only_positionals = true;
            i += 1;
            continue;
        }

        if token == "-h" || token == "--help" {
            inv.help_requested = true;
            i += 1;
            continue;
        }

        i = if let Some(body) = token.strip_prefix("--") {
            parse_long(spec, tokens, i, body, &mut inv)?
        } else {
            parse_short_cluster(spec, tokens, i, &mut inv)?
        };
    }

    if inv.help_requested {
        return Ok(inv);
    }

    for opt in spec.options.iter().filter(|opt| opt.required) {
        if !inv.options.contains_key(opt.key) {
            return Err(ParseError::MissingRequiredOption { flags: opt.flags() });
        }
    }

    for (index, positional) in spec.positionals.iter().enumerate() {
        if positional.required && inv.positionals.len() <= index {
            return Err(ParseError::missing_argument(positional.name));
        }
    }

    if !spec.is_variadic() && inv.positionals.len() > spec.positionals.len() {
        let notice = match spec.extra_arguments_notice {
            Some(notice) => notice.to_string(),
            None => format!(
                "'{}' accepts {} argument(s); ignoring: {}",
                spec.name,
                spec.positionals.len(),
                inv.positionals[spec.positionals.len()..].join(" ")
            ),
        };
        tracing::debug!("Extra positional arguments for {}", spec.name);
        inv.warnings.push(notice);
    }

    Ok(inv)
}

/// Handle `--name`, `--name=value` and `--no-name`; returns the next index
fn parse_long(
    spec: &CommandSpec,
    tokens: &[String],
    i: usize,
    body: &str,
    inv: &mut ParsedInvocation,
) -> Result<usize, ParseError> {
    let (name, inline) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };

    if let Some(opt) = spec.find_long(name) {
        return take_value(opt, inline, tokens, i, inv);
    }

    if let Some(opt) = name
        .strip_prefix("no-")
        .and_then(|stripped| spec.find_long(stripped))
        .filter(|opt| opt.negatable && inline.is_none())
    {
        inv.options
            .insert(opt.key.to_string(), OptionValue::Bool(false));
        return Ok(i + 1);
    }

    pass_through_unknown(spec, tokens[i].clone(), tokens, i, inline.is_none(), inv)
}

/// Handle `-f`, `-fm`, `-pvalue`, `-p value`; returns the next index
fn parse_short_cluster(
    spec: &CommandSpec,
    tokens: &[String],
    i: usize,
    inv: &mut ParsedInvocation,
) -> Result<usize, ParseError> {
    let token = &tokens[i];
    let chars: Vec<char> = token[1..].chars().collect();

    for (idx, &c) in chars.iter().enumerate() {
        if let Some(opt) = spec.find_short(c) {
            if opt.takes_value() {
                let rest: String = chars[idx + 1..].iter().collect();
                let rest = rest.strip_prefix('=').unwrap_or(&rest);
                let inline = (!rest.is_empty()).then_some(rest);
                return take_value(opt, inline, tokens, i, inv);
            }
            inv.options
                .insert(opt.key.to_string(), OptionValue::Bool(true));
        } else if let Some(opt) = spec.find_negated_short(c) {
            inv.options
                .insert(opt.key.to_string(), OptionValue::Bool(false));
        } else {
            // Letters before `c` are already applied; only the rest is unknown.
            // A single unknown short option may carry a value like `--key value`
            let rest: String = chars[idx..].iter().collect();
            let single = chars.len() - idx == 1;
            return pass_through_unknown(spec, format!("-{}", rest), tokens, i, single, inv);
        }
    }

    Ok(i + 1)
}

/// Store the value for `opt`; returns the next index
fn take_value(
    opt: &OptionSpec,
    inline: Option<&str>,
    tokens: &[String],
    i: usize,
    inv: &mut ParsedInvocation,
) -> Result<usize, ParseError> {
    let key = opt.key.to_string();
    let next = tokens.get(i + 1).filter(|t| !t.starts_with('-') || *t == "-");

    match opt.kind {
        OptionKind::Flag => {
            let value = inline.map_or(true, |v| v != "false");
            inv.options.insert(key, OptionValue::Bool(value));
            Ok(i + 1)
        }
        OptionKind::Value { .. } => {
            if let Some(value) = inline {
                inv.options.insert(key, OptionValue::Str(value.to_string()));
                return Ok(i + 1);
            }
            match next {
                Some(value) => {
                    inv.options.insert(key, OptionValue::Str(value.clone()));
                    Ok(i + 2)
                }
                None => Err(ParseError::OptionMissingArgument {
                    flags: opt.flags(),
                    got: tokens.get(i + 1).cloned(),
                }),
            }
        }
        OptionKind::OptionalValue { .. } => {
            if let Some(value) = inline {
                inv.options.insert(key, OptionValue::Str(value.to_string()));
                return Ok(i + 1);
            }
            match next {
                Some(value) => {
                    inv.options.insert(key, OptionValue::Str(value.clone()));
                    Ok(i + 2)
                }
                None => {
                    inv.options.insert(key, OptionValue::Bool(true));
                    Ok(i + 1)
                }
            }
        }
    }
}

/// Keep an unknown option when the command allows it, else reject it
fn pass_through_unknown(
    spec: &CommandSpec,
    option: String,
    tokens: &[String],
    i: usize,
    may_take_value: bool,
    inv: &mut ParsedInvocation,
) -> Result<usize, ParseError> {
    if !spec.allow_unknown_options {
        let name = option.split_once('=').map_or(option.as_str(), |(name, _)| name);
        return Err(ParseError::unknown_option(name));
    }

    inv.unknown.push(option);
    match tokens.get(i + 1) {
        Some(value) if may_take_value && !value.starts_with('-') => {
            inv.unknown.push(value.clone());
            Ok(i + 2)
        }
        _ => Ok(i + 1),
    }
}
