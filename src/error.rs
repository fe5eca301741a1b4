
//! Error type definitions.

use std::borrow::Cow;
use std::io::ErrorKind;
use std::fmt;
use std::io::Error as IoError;


/// A result that may contain an error.
pub type Result<T> = std::result::Result<T, Error>;

/// A result that, if ok, contains nothing, and otherwise contains an error.
pub type UnitResult = Result<()>;


/// An error that may happen while compressing a byte stream
/// or while decompressing an envelope.
#[derive(Debug)]
pub enum Error {

    /// The envelope declares properties that this implementation
    /// does not support, such as an excessively deep prefix tree.
    NotSupported(Cow<'static, str>),

    /// The envelope bytes are corrupt, truncated, or internally
    /// inconsistent. Decompression never recovers partial output.
    Invalid(Cow<'static, str>),

    /// The underlying byte source or sink failed.
    /// Surfaced to the caller unmodified.
    Io(IoError),
}

impl Error {

    /// Create an error of the variant `Invalid`.
    pub(crate) fn invalid(message: impl Into<Cow<'static, str>>) -> Self {
        Error::Invalid(message.into())
    }

    /// Create an error of the variant `NotSupported`.
    pub(crate) fn unsupported(message: impl Into<Cow<'static, str>>) -> Self {
        Error::NotSupported(message.into())
    }
}

/// Enable using the `?` operator on `io::Result`.
/// Running out of bytes mid-read means the envelope lies about its contents.
impl From<IoError> for Error {
    fn from(error: IoError) -> Self {
        if error.kind() == ErrorKind::UnexpectedEof {
            Error::invalid("reference to missing bytes")
        }
        else {
            Error::Io(error)
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotSupported(message) => write!(formatter, "not supported: {}", message),
            Error::Invalid(message) => write!(formatter, "invalid envelope: {}", message),
            Error::Io(error) => write!(formatter, "io error: {}", error),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(error) => Some(error),
            _ => None,
        }
    }
}
