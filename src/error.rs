//! Error types for TOML parsing, stringifying and Serde conversion.
//!
//! ## Error Categories
//!
//! - **Parse Errors**: grammar violations, reported with a 1-based line and column
//! - **Custom Errors**: failures raised by Serde while converting to or from Rust types
//! - **Unsupported Types**: Rust values that have no TOML representation
//! - **I/O Errors**: reader/writer failures
//!
//! ## Examples
//!
//! ```rust
//! use serde_toml_lite::{parse, Error};
//!
//! let err = parse("key = \"unterminated").unwrap_err();
//! match err {
//!     Error::Parse { line, .. } => assert_eq!(line, 1),
//!     _ => unreachable!(),
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while parsing, stringifying
/// or converting TOML data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Grammar violation or trailing input, positioned at the point the
    /// parser stopped.
    #[error("Parse error on line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// Rust value with no TOML representation
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a positioned parse error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_toml_lite::Error;
    ///
    /// let err = Error::parse(3, 7, "Array is not closed");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Parse error on line 3, column 7: Array is not closed"
    /// );
    /// ```
    pub fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            column,
            message: message.into(),
        }
    }

    /// Creates an unsupported type error for values that cannot be represented in TOML.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the `(line, column)` of a parse error.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::Parse { line, column, .. } => Some((*line, *column)),
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
}

pub type Result<T> = std::result::Result<T, Error>;

/// A committed production found malformed input.
///
/// Raised inside the grammar layer and carried unchanged through every
/// combinator; only the driver turns it into a positioned [`Error::Parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub(crate) struct Structural(pub(crate) String);

impl Structural {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Structural(msg.into())
    }
}
