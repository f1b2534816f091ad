use std::fmt::Display;
use std::str::Utf8Error;

use serde::ser;

/// Errors that can occur while building query values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The top-level input is a bare scalar (or another shape that has no
    /// key/value structure), so there is nothing to turn into query pairs.
    #[error("unsupported kind input: {0}")]
    UnsupportedKind(&'static str),

    /// A pre-encoded query string contains a `%` that is not followed by
    /// two hex digits.
    #[error("invalid URL escape {escape:?} at position {position}")]
    InvalidEscape { position: usize, escape: String },

    /// A pre-encoded query string uses `;` as a pair separator.
    #[error("invalid semicolon separator in query")]
    SemicolonSeparator,

    /// A percent-decoded key or value is not valid UTF-8.
    #[error(transparent)]
    Utf8(#[from] Utf8Error),

    /// Records or maps are nested deeper than `Config::max_depth`.
    #[error("maximum nesting depth of {0} exceeded")]
    MaxDepthExceeded(usize),

    /// Raised by a `Serialize` implementation.
    #[error("{0}")]
    Custom(String),
}

impl ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: Display,
    {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
