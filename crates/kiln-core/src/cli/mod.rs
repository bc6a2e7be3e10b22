//! Command routing: registry lookup, argument parsing and suggestions

mod commands;
pub mod parser;
pub mod registry;
pub mod suggest;

pub use commands::BUILTIN_COMMANDS;
pub use parser::{parse, OptionValue, ParseError, ParsedInvocation};
pub use registry::{
    CommandRegistry, CommandSpec, Operation, OptionKind, OptionSpec, PositionalSpec,
    RegistryError,
};
pub use suggest::suggest_command;

/// Where an invocation was routed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'r> {
    /// No command token at all
    Empty,
    /// The command token matched nothing
    Unknown {
        command: String,
        suggestion: Option<&'static str>,
    },
    /// A registered command with its parsed arguments
    Matched {
        spec: &'r CommandSpec,
        invocation: ParsedInvocation,
    },
}

/// Route `tokens` (everything after the program name) through `registry`
pub fn route<'r>(registry: &'r CommandRegistry, tokens: &[String]) -> Result<Route<'r>, ParseError> {
    let Some((command, rest)) = tokens.split_first() else {
        return Ok(Route::Empty);
    };

    match registry.dispatch(command) {
        Some(spec) => {
            let invocation = parse(spec, rest)?;
            tracing::debug!(
                "Routed '{}' with {} positional(s), {} option(s)",
                spec.name,
                invocation.positionals.len(),
                invocation.options.len()
            );
            Ok(Route::Matched { spec, invocation })
        }
        None => {
            let suggestion = suggest_command(command, registry.names());
            tracing::debug!("Unknown command '{}', suggestion: {:?}", command, suggestion);
            Ok(Route::Unknown {
                command: command.clone(),
                suggestion,
            })
        }
    }
}
