//! Error types for reading JONC text.

use thiserror::Error;

/// Errors produced while parsing JONC text into a `Value` tree.
///
/// Marshalling never uses this type — tree-to-native conversion reports
/// failure as `None`, not as an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input ended in the middle of a construct.
    /// Includes the 1-based line number where the end was reached.
    #[error("unexpected end of input at line {line}: {message}")]
    UnexpectedEnd { line: usize, message: String },

    /// A character that cannot appear at this point in the grammar.
    /// Includes the 1-based line number where it was found.
    #[error("syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },
}

impl ParseError {
    /// The 1-based line the error was detected on.
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnexpectedEnd { line, .. } | ParseError::Syntax { line, .. } => *line,
        }
    }
}

/// Convenience alias used throughout jonc-core.
pub type Result<T> = std::result::Result<T, ParseError>;
