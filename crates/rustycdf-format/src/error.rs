//! Error types for NetCDF classic format parsing.

use std::fmt;

/// Errors that can occur when parsing NetCDF classic binary structures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The input does not follow the NetCDF v3.x layout. Carries a short
    /// human-readable reason ("should start with CDF", "unknown version",
    /// framing-tag mismatches, oversized 64-bit offsets).
    NotNetCdf(String),
    /// A type code outside 1..=6 was found in an attribute or variable.
    InvalidType(u32),
    /// A read would pass the end of the byte image.
    Truncated {
        /// Number of bytes the read needed.
        expected: usize,
        /// Number of bytes actually available.
        available: usize,
    },
    /// The parser was invoked with no data at all.
    EmptyInput,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::NotNetCdf(reason) => {
                write!(f, "Not a valid NetCDF v3.x file: {reason}")
            }
            FormatError::InvalidType(code) => {
                write!(f, "invalid type code: {code} (must be 1..=6)")
            }
            FormatError::Truncated {
                expected,
                available,
            } => {
                write!(f, "truncated input: need {expected} bytes, have {available}")
            }
            FormatError::EmptyInput => {
                write!(f, "empty input")
            }
        }
    }
}

impl std::error::Error for FormatError {}
