//! Error type shared by the trees.

use std::collections::TryReserveError;
use std::error;
use std::fmt;
use std::result;

/// Convenience `Error` enum for `bit_tries`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Memory for a new block of nodes could not be reserved.
    OutOfMemory(TryReserveError),
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Error {
        Error::OutOfMemory(err)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::OutOfMemory(ref error) => Some(error),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::OutOfMemory(ref error) => write!(f, "out of memory: {}", error),
        }
    }
}

/// Convenience `Result` type for `bit_tries`.
pub type Result<T> = result::Result<T, Error>;
