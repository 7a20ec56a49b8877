//! Error types for the mimetype crate.

use std::io;
use thiserror::Error;

/// The main error type for the mimetype crate.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The media type has no `/` before its parameter list.
    #[error("unable to find a sub type in {0:?}")]
    MissingSubType(String),

    /// Primary type is empty or contains non-token characters.
    #[error("primary type {0:?} is invalid")]
    InvalidPrimaryType(String),

    /// Sub type is empty or contains non-token characters.
    #[error("sub type {0:?} is invalid")]
    InvalidSubType(String),

    /// A parameter name is not followed by `=`.
    #[error("couldn't find the '=' that separates parameter {0:?} from its value")]
    MissingSeparator(String),

    /// A parameter has `=` but nothing after it.
    #[error("couldn't find a value for parameter named {0:?}")]
    MissingValue(String),

    /// A quoted string is opened at the given index and never closed.
    #[error("unterminated quoted value starting at index {0}")]
    UnterminatedQuote(usize),

    /// A parameter value starts with a character that is neither a quote nor a token character.
    #[error("unexpected character {found:?} at index {index}")]
    UnexpectedCharacter { index: usize, found: char },

    /// Input continues after the last parameter.
    #[error("more characters than expected at index {0}")]
    TrailingCharacters(usize),

    /// A token was requested from an exhausted tokenizer.
    #[error("no more tokens")]
    Exhausted,

    /// A type map line could not be parsed.
    #[error("type map line {line}: {source}")]
    Entry {
        line: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Reports whether this error is a grammar violation rather than an I/O failure.
    pub fn is_syntax(&self) -> bool {
        match self {
            Error::Io(_) => false,
            Error::Entry { source, .. } => source.is_syntax(),
            _ => true,
        }
    }

    pub(crate) fn at_line(self, line: usize) -> Self {
        Error::Entry {
            line,
            source: Box::new(self),
        }
    }
}

/// Specialized Result type for mimetype operations.
pub type Result<T> = std::result::Result<T, Error>;
