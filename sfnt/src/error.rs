//! Errors for the entry points that touch `std::io`

use std::fmt::Display;

use crate::read::ReadError;

/// An error that occurs when reading or writing a font through `std::io`.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The data could not be parsed.
    Read(ReadError),
    /// The underlying reader or writer failed.
    Io(std::io::Error),
}

impl From<ReadError> for Error {
    fn from(src: ReadError) -> Error {
        Error::Read(src)
    }
}

impl From<std::io::Error> for Error {
    fn from(src: std::io::Error) -> Error {
        Error::Io(src)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Read(e) => e.fmt(f),
            Error::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Read(e) => Some(e),
            Error::Io(e) => Some(e),
        }
    }
}
