//! NetCDF classic magic bytes and version detection.

use crate::cursor::ByteCursor;
use crate::error::FormatError;

/// The 3-byte magic at the start of every NetCDF classic file.
pub const MAGIC: [u8; 3] = *b"CDF";

/// Version byte for the classic format (32-bit variable offsets).
pub const VERSION_CLASSIC: u8 = 1;

/// Version byte for the 64-bit offset format.
pub const VERSION_64BIT_OFFSET: u8 = 2;

/// Validate the magic and read the version byte.
///
/// The original consumer family accepts a version byte of 0 (only values
/// above 2 are rejected); that behaviour is preserved here.
pub fn read_magic(cursor: &mut ByteCursor<'_>) -> Result<u8, FormatError> {
    let magic = cursor.read_chars(3)?;
    if magic.as_bytes() != MAGIC {
        return Err(FormatError::NotNetCdf("should start with CDF".into()));
    }
    let version = cursor.read_u8()?;
    if version > VERSION_64BIT_OFFSET {
        return Err(FormatError::NotNetCdf("unknown version".into()));
    }
    Ok(version)
}

/// Human-readable label for a version byte.
pub fn version_label(version: u8) -> &'static str {
    if version == VERSION_CLASSIC {
        "classic format"
    } else {
        "64-bit offset format"
    }
}
