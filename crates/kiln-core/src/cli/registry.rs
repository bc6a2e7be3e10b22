//! Command descriptors and the immutable command table

use std::fmt::Write as _;

use thiserror::Error;

/// The operation a command dispatches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Add,
    Invoke,
    Inspect,
    Serve,
    Build,
    Ui,
    Init,
    Config,
    Outdated,
    Upgrade,
    Migrate,
    Info,
}

/// How an option consumes its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Presence implies `true`
    Flag,
    /// A value is required (`--preset <presetName>`)
    Value { placeholder: &'static str },
    /// A value may follow; presence alone implies `true` (`--git [message]`)
    OptionalValue { placeholder: &'static str },
}

/// Declared option of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    /// Canonical key the parsed value is stored under
    pub key: &'static str,
    pub short: Option<char>,
    pub long: &'static str,
    pub kind: OptionKind,
    /// Accepts `--no-<long>` to force the option false
    pub negatable: bool,
    /// Short alias for the negated form (`-n` for `--no-git`)
    pub negated_short: Option<char>,
    pub required: bool,
    pub help: &'static str,
}

impl OptionSpec {
    pub const fn flag(
        key: &'static str,
        short: Option<char>,
        long: &'static str,
        help: &'static str,
    ) -> Self {
        Self {
            key,
            short,
            long,
            kind: OptionKind::Flag,
            negatable: false,
            negated_short: None,
            required: false,
            help,
        }
    }

    pub const fn value(
        key: &'static str,
        short: Option<char>,
        long: &'static str,
        placeholder: &'static str,
        help: &'static str,
    ) -> Self {
        Self {
            kind: OptionKind::Value { placeholder },
            ..Self::flag(key, short, long, help)
        }
    }

    pub const fn optional_value(
        key: &'static str,
        short: Option<char>,
        long: &'static str,
        placeholder: &'static str,
        help: &'static str,
    ) -> Self {
        Self {
            kind: OptionKind::OptionalValue { placeholder },
            ..Self::flag(key, short, long, help)
        }
    }

    /// Allow `--no-<long>`, optionally with a short alias
    pub const fn negatable(self, negated_short: Option<char>) -> Self {
        Self {
            negatable: true,
            negated_short,
            ..self
        }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    /// Whether this option takes a value token
    pub fn takes_value(&self) -> bool {
        !matches!(self.kind, OptionKind::Flag)
    }

    /// Usage form, e.g. `-p, --preset <presetName>`
    pub fn flags(&self) -> String {
        let mut out = String::new();
        if let Some(short) = self.short {
            let _ = write!(out, "-{}, ", short);
        }
        let _ = write!(out, "--{}", self.long);
        match self.kind {
            OptionKind::Flag => {}
            OptionKind::Value { placeholder } => {
                let _ = write!(out, " <{}>", placeholder);
            }
            OptionKind::OptionalValue { placeholder } => {
                let _ = write!(out, " [{}]", placeholder);
            }
        }
        out
    }

    /// Usage form of the negated variant, e.g. `-n, --no-git`
    pub fn negated_flags(&self) -> Option<String> {
        if !self.negatable {
            return None;
        }
        Some(match self.negated_short {
            Some(short) => format!("-{}, --no-{}", short, self.long),
            None => format!("--no-{}", self.long),
        })
    }
}

/// Declared positional argument of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionalSpec {
    pub name: &'static str,
    pub required: bool,
    /// Collects every remaining positional
    pub variadic: bool,
}

impl PositionalSpec {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            variadic: false,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            variadic: false,
        }
    }

    pub const fn variadic(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            variadic: true,
        }
    }

    /// Usage form: `<name>`, `[name]` or `[name...]`
    pub fn usage(&self) -> String {
        match (self.required, self.variadic) {
            (true, true) => format!("<{}...>", self.name),
            (true, false) => format!("<{}>", self.name),
            (false, true) => format!("[{}...]", self.name),
            (false, false) => format!("[{}]", self.name),
        }
    }
}

/// Descriptor of a registered command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub positionals: &'static [PositionalSpec],
    pub options: &'static [OptionSpec],
    pub operation: Operation,
    /// Unrecognised options are passed through instead of rejected
    pub allow_unknown_options: bool,
    /// Printed when more positionals are given than declared
    pub extra_arguments_notice: Option<&'static str>,
}

impl CommandSpec {
    pub const fn new(name: &'static str, description: &'static str, operation: Operation) -> Self {
        Self {
            name,
            description,
            positionals: &[],
            options: &[],
            operation,
            allow_unknown_options: false,
            extra_arguments_notice: None,
        }
    }

    pub const fn positionals(self, positionals: &'static [PositionalSpec]) -> Self {
        Self {
            positionals,
            ..self
        }
    }

    pub const fn options(self, options: &'static [OptionSpec]) -> Self {
        Self { options, ..self }
    }

    pub const fn allow_unknown_options(self) -> Self {
        Self {
            allow_unknown_options: true,
            ..self
        }
    }

    pub const fn extra_arguments_notice(self, notice: &'static str) -> Self {
        Self {
            extra_arguments_notice: Some(notice),
            ..self
        }
    }

    /// Find an option by long name
    pub fn find_long(&self, long: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|opt| opt.long == long)
    }

    /// Find an option by short alias
    pub fn find_short(&self, short: char) -> Option<&OptionSpec> {
        self.options.iter().find(|opt| opt.short == Some(short))
    }

    /// Find a negatable option by the short alias of its negated form
    pub fn find_negated_short(&self, short: char) -> Option<&OptionSpec> {
        self.options
            .iter()
            .find(|opt| opt.negatable && opt.negated_short == Some(short))
    }

    /// Whether the last positional swallows the rest
    pub fn is_variadic(&self) -> bool {
        self.positionals.last().is_some_and(|p| p.variadic)
    }

    /// One-line usage, e.g. `create [options] <app-name>`
    pub fn usage_line(&self) -> String {
        let mut line = self.name.to_string();
        if !self.options.is_empty() {
            line.push_str(" [options]");
        }
        for positional in self.positionals {
            line.push(' ');
            line.push_str(&positional.usage());
        }
        line
    }

    /// Detailed help for `<program> <command> --help`
    pub fn help_text(&self, program: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Usage: {} {}", program, self.usage_line());
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.description);

        let mut rows: Vec<(String, &str)> = Vec::new();
        for opt in self.options {
            rows.push((opt.flags(), opt.help));
            if let Some(negated) = opt.negated_flags() {
                rows.push((negated, ""));
            }
        }
        rows.push(("-h, --help".to_string(), "output usage information"));

        let width = rows.iter().map(|(flags, _)| flags.len()).max().unwrap_or(0);
        let _ = writeln!(out);
        let _ = writeln!(out, "Options:");
        for (flags, help) in rows {
            let _ = writeln!(out, "  {:width$}  {}", flags, help, width = width);
        }
        out
    }
}

/// Registry errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Command '{name}' is already registered")]
    DuplicateCommand { name: String },
}

/// Ordered, immutable table of command descriptors
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from specs, in order
    pub fn from_specs<I>(specs: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = CommandSpec>,
    {
        let mut registry = Self::new();
        for spec in specs {
            registry.register(spec)?;
        }
        Ok(registry)
    }

    /// The built-in command table
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_specs(super::BUILTIN_COMMANDS.iter().cloned())
    }

    /// Add a command, rejecting reused names
    pub fn register(&mut self, spec: CommandSpec) -> Result<(), RegistryError> {
        if self.commands.iter().any(|c| c.name == spec.name) {
            return Err(RegistryError::DuplicateCommand {
                name: spec.name.to_string(),
            });
        }
        tracing::trace!("Registered command: {}", spec.name);
        self.commands.push(spec);
        Ok(())
    }

    /// Exact-match lookup
    pub fn dispatch(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|c| c.name)
    }

    /// Command list for the top-level usage screen
    pub fn help_text(&self, program: &str) -> String {
        let rows: Vec<(String, &str)> = self
            .commands
            .iter()
            .map(|c| (c.usage_line(), c.description))
            .collect();
        let width = rows.iter().map(|(usage, _)| usage.len()).max().unwrap_or(0);

        let mut out = String::new();
        let _ = writeln!(out, "Usage: {} <command> [options]", program);
        let _ = writeln!(out);
        let _ = writeln!(out, "Commands:");
        for (usage, description) in rows {
            let _ = writeln!(out, "  {:width$}  {}", usage, description, width = width);
        }
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Run {} <command> --help for detailed usage of given command.",
            program
        );
        out
    }
}
