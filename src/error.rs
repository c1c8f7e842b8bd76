use std::path::PathBuf;

use thiserror::Error;

/// Abstracts the types of errors that can occur when reading a configuration or a word list
/// and building an automaton from it. All of them are caused by the input, none of them
/// indicates a bug.
///
/// Apart from [`ConfigError::MissingStateName`], every error aborts the construction of the
/// automaton it belongs to. A missing state name only drops the offending declaration, the
/// automaton keeps a record of it, see [`crate::automaton::Automaton::skipped`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    /// The configuration or word list could not be opened.
    #[error("provided file does not exist: `{}` ({reason})", .path.display())]
    ConfigNotFound { path: PathBuf, reason: String },
    /// The source was opened but reading from it failed.
    #[error("could not read `{}`: {reason}", .path.display())]
    Io { path: PathBuf, reason: String },
    /// More than one state carries the `S` marker.
    #[error("initial state should be unique, issue at `{line}`")]
    DuplicateInitialState { line: String },
    /// A state declaration does not contain a name.
    #[error("state must have a name, issue at `{line}`")]
    MissingStateName { line: String },
    /// Two state declarations share a name.
    #[error("state `{name}` is declared more than once, issue at `{line}`")]
    DuplicateStateName { name: String, line: String },
    /// No state carries the `F` marker.
    #[error("at least one final state required")]
    NoFinalState,
    /// No state carries the `S` marker.
    #[error("exactly one initial state required, found none")]
    NoStartState,
    /// The symbol of a transition is not a single character.
    #[error("the symbol `{symbol}` should be a single character, issue at `{line}`")]
    InvalidSymbolLength { symbol: String, line: String },
    /// A transition does not consist of exactly three fields.
    #[error("a transition needs the form `from, symbol, to`, issue at `{line}`")]
    MalformedTransition { line: String },
    /// The symbol of a transition was not declared in the alphabet.
    #[error("symbol `{symbol}` does not occur in the alphabet, issue at `{line}`")]
    UnknownSymbol { symbol: char, line: String },
    /// A transition mentions a state that was never declared.
    #[error("state `{name}` is undefined, issue at `{line}`")]
    UndefinedState { name: String, line: String },
    /// A deterministic automaton has more than one transition for a state and symbol.
    #[error("state `{state}` has more than one transition on symbol `{symbol}`")]
    NonDeterministicTransition { state: String, symbol: char },
}

impl ConfigError {
    /// Returns the configuration line that caused the error, if the error can be attributed
    /// to a single line.
    pub fn line(&self) -> Option<&str> {
        match self {
            ConfigError::DuplicateInitialState { line }
            | ConfigError::MissingStateName { line }
            | ConfigError::DuplicateStateName { line, .. }
            | ConfigError::InvalidSymbolLength { line, .. }
            | ConfigError::MalformedTransition { line }
            | ConfigError::UnknownSymbol { line, .. }
            | ConfigError::UndefinedState { line, .. } => Some(line),
            ConfigError::ConfigNotFound { .. }
            | ConfigError::Io { .. }
            | ConfigError::NoFinalState
            | ConfigError::NoStartState
            | ConfigError::NonDeterministicTransition { .. } => None,
        }
    }

    pub(crate) fn not_found(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        ConfigError::ConfigNotFound {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}
