//! Error types for TOML parsing and serialization.
//!
//! Every failure is reported as an [`Error`]. Parser errors carry a
//! [`Position`] (byte offset plus 1-based line and column) pointing at the
//! offending input, so callers can build user-facing diagnostics.
//!
//! ## Error Categories
//!
//! - **Syntax**: malformed token, unclosed string, missing `=` or `]`, bad escape
//! - **Invalid value**: well-formed token that is not a valid value (`12.3.4`, `True`)
//! - **Duplicate key**: a key path lands on an occupied slot or a non-table value
//! - **Missing key**: raised by required-key lookups on an already parsed tree
//!
//! The parser never recovers: the first error aborts the whole parse and no
//! partial tree is returned.
//!
//! ## Examples
//!
//! ```rust
//! use serde_toml_lite::{parse, ErrorKind};
//!
//! let err = parse("a = 1\na = 2").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::DuplicateKey);
//! assert_eq!(err.position().map(|p| p.line), Some(2));
//! ```

use std::fmt;
use thiserror::Error;

/// Location of an error in the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Byte offset from the start of the buffer.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, column {} (byte {})",
            self.line, self.column, self.offset
        )
    }
}

/// The category of an [`Error`], independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    InvalidValue,
    DuplicateKey,
    MissingKey,
    Encoding,
    Io,
    Custom,
}

/// Represents all possible errors raised while parsing or serializing TOML.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed input: unexpected character, unterminated string, bad escape.
    #[error("Syntax error at {position}: {msg}")]
    Syntax { position: Position, msg: String },

    /// A well-formed token that cannot be interpreted as the expected type.
    #[error("{}", fmt_invalid_value(.position, .msg))]
    InvalidValue {
        position: Option<Position>,
        msg: String,
    },

    /// A key path resolved to an occupied slot, or descended through a non-table.
    #[error("Duplicate key `{key}` at {position}")]
    DuplicateKey { position: Position, key: String },

    /// A required key is absent from a table.
    #[error("Missing key: {0}")]
    MissingKey(String),

    /// Input bytes could not be decoded to UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

fn fmt_invalid_value(position: &Option<Position>, msg: &str) -> String {
    match position {
        Some(position) => format!("Invalid value at {}: {}", position, msg),
        None => format!("Invalid value: {}", msg),
    }
}

impl Error {
    /// Creates a syntax error at the given position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_toml_lite::{Error, Position};
    ///
    /// let pos = Position { offset: 4, line: 1, column: 5 };
    /// let err = Error::syntax(pos, "expected `=`");
    /// assert!(err.to_string().contains("line 1, column 5"));
    /// ```
    pub fn syntax(position: Position, msg: &str) -> Self {
        Error::Syntax {
            position,
            msg: msg.to_string(),
        }
    }

    /// Creates an invalid-value error tied to a source position.
    pub fn invalid_value_at(position: Position, msg: &str) -> Self {
        Error::InvalidValue {
            position: Some(position),
            msg: msg.to_string(),
        }
    }

    /// Creates an invalid-value error with no source position, as raised by
    /// the serde and JSON bridges.
    pub fn invalid_value(msg: &str) -> Self {
        Error::InvalidValue {
            position: None,
            msg: msg.to_string(),
        }
    }

    /// Creates a duplicate-key error for `key` at `position`.
    pub fn duplicate_key(position: Position, key: &str) -> Self {
        Error::DuplicateKey {
            position,
            key: key.to_string(),
        }
    }

    /// Creates a missing-key error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_toml_lite::Error;
    ///
    /// let err = Error::missing_key("server.port");
    /// assert_eq!(err.to_string(), "Missing key: server.port");
    /// ```
    pub fn missing_key(key: &str) -> Self {
        Error::MissingKey(key.to_string())
    }

    pub fn encoding(msg: &str) -> Self {
        Error::Encoding(msg.to_string())
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Syntax { .. } => ErrorKind::Syntax,
            Error::InvalidValue { .. } => ErrorKind::InvalidValue,
            Error::DuplicateKey { .. } => ErrorKind::DuplicateKey,
            Error::MissingKey(_) => ErrorKind::MissingKey,
            Error::Encoding(_) => ErrorKind::Encoding,
            Error::Io(_) => ErrorKind::Io,
            Error::Custom(_) => ErrorKind::Custom,
        }
    }

    /// Returns the source position, when the error came from the parser.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Syntax { position, .. } | Error::DuplicateKey { position, .. } => {
                Some(*position)
            }
            Error::InvalidValue { position, .. } => *position,
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    fn invalid_type(unexp: serde::de::Unexpected<'_>, exp: &dyn serde::de::Expected) -> Self {
        Error::InvalidValue {
            position: None,
            msg: format!("invalid type: {}, expected {}", unexp, exp),
        }
    }

    fn invalid_value(unexp: serde::de::Unexpected<'_>, exp: &dyn serde::de::Expected) -> Self {
        Error::InvalidValue {
            position: None,
            msg: format!("invalid value: {}, expected {}", unexp, exp),
        }
    }

    fn missing_field(field: &'static str) -> Self {
        Error::MissingKey(field.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
