//! Error types for the high-level reader.

use std::fmt;

use rustycdf_format::error::FormatError;

/// Errors that can occur when using the high-level reader.
#[derive(Debug)]
pub enum Error {
    /// I/O error from the filesystem.
    Io(std::io::Error),
    /// Low-level format parsing error.
    Format(FormatError),
    /// A variable lookup by name matched no entry.
    VariableNotFound(String),
    /// A typed read was requested for a BYTE or CHAR variable.
    NotNumeric(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Format(e) => write!(f, "NetCDF format error: {e}"),
            Error::VariableNotFound(name) => write!(f, "variable not found: {name}"),
            Error::NotNumeric(name) => {
                write!(f, "variable has no numeric interpretation: {name}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Format(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FormatError> for Error {
    fn from(e: FormatError) -> Self {
        Error::Format(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
