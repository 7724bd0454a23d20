//! Error types for the interpreter, the parser, and REPL configuration.

use thiserror::Error;

/// A parse failure: an unexpected token encountered while building a
/// [`crate::term::Term`] from source text.
///
/// Carries the offending token's coordinates plus the set of domains that
/// would have been accepted there, matching the reference implementation's
/// `(row, column): expected 'a, b', got 'c'` message shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("({line}, {column}): expected {expected}, got '{found}'")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub expected: String,
    pub found: String,
}

impl ParseError {
    pub fn new(line: usize, column: usize, expected: &[&str], found: impl Into<String>) -> Self {
        ParseError { line, column, expected: expected.join(", "), found: found.into() }
    }
}

/// Top-level error returned by [`crate::Interpreter::run`].
#[derive(Debug, Error)]
pub enum InterpError {
    /// The command text did not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors raised while loading the REPL's configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file '{path}': {source}")]
    Io { path: String, #[source] source: std::io::Error },

    #[error("could not parse config file '{path}' as TOML: {source}")]
    Toml { path: String, #[source] source: toml::de::Error },

    #[error("config file '{path}' is missing table '[{table}]'")]
    MissingTable { path: String, table: &'static str },

    #[error("config file '{path}' is missing key '{table}.{key}'")]
    MissingKey { path: String, table: &'static str, key: &'static str },
}
