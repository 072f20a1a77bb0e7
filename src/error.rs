//! Library error types.
//!
use std::fmt;
use std::str::Utf8Error;

/// A jxon `Result`, normally returning a jxon [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A jxon error. Encompasses any issue that can happen while encoding a
/// [`Value`](crate::Value) tree or decoding one back out of bytes.
#[derive(Clone, Debug)]
pub enum Error {
    /// The buffer ran out of bytes partway through decoding a value.
    UnexpectedEnd {
        /// What step of decoding we were on when it failed.
        step: &'static str,
        /// How many bytes were needed.
        needed: usize,
        /// How many bytes were actually available.
        available: usize,
    },
    /// A reserved/illegal head byte, a negative length, a value head where a
    /// key was expected, a truncated key-table index, or a non-canonical
    /// (not-narrowest) encoding of an integer, length, or float.
    Malformed(String),
    /// String bytes were not valid UTF-8.
    InvalidUtf8(Utf8Error),
    /// The encoder or decoder hit a BigInt or BigFloat, which this
    /// implementation does not support.
    Unsupported(&'static str),
    /// The value passed to the encoder was outside the jxon value model
    /// (e.g. a non-string object key).
    TypeError(String),
    /// Nesting depth exceeded the configured limit.
    DepthExceeded {
        /// The configured limit that was exceeded.
        limit: usize,
    },
    /// The same key appeared twice within one object.
    DuplicateKey(String),
    /// The JSON fallback parser (only available with the `json-fallback`
    /// feature) failed to parse the input either.
    #[cfg(feature = "json-fallback")]
    JsonFallback(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnexpectedEnd {
                step,
                needed,
                available,
            } => write!(
                f,
                "unexpected end of data during [{}]: needed {} bytes, {} available",
                step, needed, available
            ),
            Error::Malformed(msg) => write!(f, "malformed jxon data: {}", msg),
            Error::InvalidUtf8(err) => write!(f, "string was not valid UTF-8: {}", err),
            Error::Unsupported(what) => write!(f, "{} is not supported by this decoder", what),
            Error::TypeError(msg) => write!(f, "value outside the jxon data model: {}", msg),
            Error::DepthExceeded { limit } => {
                write!(f, "nesting depth exceeded the limit of {}", limit)
            }
            Error::DuplicateKey(key) => write!(f, "duplicate object key: {:?}", key),
            #[cfg(feature = "json-fallback")]
            Error::JsonFallback(_) => write!(f, "data was neither valid jxon nor valid JSON"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidUtf8(err) => Some(err),
            #[cfg(feature = "json-fallback")]
            Error::JsonFallback(err) => Some(err),
            _ => None,
        }
    }
}

impl From<Utf8Error> for Error {
    fn from(e: Utf8Error) -> Self {
        Error::InvalidUtf8(e)
    }
}

#[cfg(feature = "json-fallback")]
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::JsonFallback(e)
    }
}
