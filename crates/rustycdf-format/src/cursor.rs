//! Big-endian byte cursor over an immutable byte image.
//!
//! All NetCDF classic integers and floats are big-endian on the wire, so
//! every multi-byte read goes through `byteorder::BigEndian`. The cursor is
//! two machine words (slice + offset) and `Clone`, so each data extraction
//! can run on its own cursor while the byte image stays shared read-only.

use byteorder::{BigEndian, ByteOrder};

use crate::error::FormatError;

/// Random-access big-endian reader over `&[u8]`.
///
/// Every typed read advances the offset by the read width and fails with
/// [`FormatError::Truncated`] rather than reading past the end.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> ByteCursor<'a> {
        ByteCursor { data, offset: 0 }
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Seek to an absolute byte offset.
    ///
    /// Seeking past the end is allowed; the next read reports `Truncated`.
    pub fn seek(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// Skip `n` bytes forward.
    pub fn skip(&mut self, n: usize) {
        self.offset += n;
    }

    /// Number of bytes between the current offset and the end of the image.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Skip forward to the next 4-byte boundary.
    ///
    /// Variable-length sections (names, attribute payloads) are padded with
    /// zero bytes to a 4-byte boundary on write. The pad bytes are skipped,
    /// not validated, for compatibility with sloppy producers.
    pub fn align4(&mut self) {
        let rem = self.offset % 4;
        if rem != 0 {
            self.offset += 4 - rem;
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], FormatError> {
        let end = self.offset.checked_add(n).ok_or(FormatError::Truncated {
            expected: usize::MAX,
            available: self.data.len(),
        })?;
        if end > self.data.len() {
            return Err(FormatError::Truncated {
                expected: end,
                available: self.data.len(),
            });
        }
        let slice = &self.data[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    /// Read one unsigned byte.
    pub fn read_u8(&mut self) -> Result<u8, FormatError> {
        Ok(self.take(1)?[0])
    }

    /// Read a big-endian u32.
    pub fn read_u32(&mut self) -> Result<u32, FormatError> {
        Ok(BigEndian::read_u32(self.take(4)?))
    }

    /// Read a big-endian i16.
    pub fn read_i16(&mut self) -> Result<i16, FormatError> {
        Ok(BigEndian::read_i16(self.take(2)?))
    }

    /// Read a big-endian i32.
    pub fn read_i32(&mut self) -> Result<i32, FormatError> {
        Ok(BigEndian::read_i32(self.take(4)?))
    }

    /// Read a big-endian IEEE-754 f32.
    pub fn read_f32(&mut self) -> Result<f32, FormatError> {
        Ok(BigEndian::read_f32(self.take(4)?))
    }

    /// Read a big-endian IEEE-754 f64.
    pub fn read_f64(&mut self) -> Result<f64, FormatError> {
        Ok(BigEndian::read_f64(self.take(8)?))
    }

    /// Read `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], FormatError> {
        self.take(n)
    }

    /// Read `n` bytes as an ASCII character run.
    ///
    /// Names and CHAR data are raw byte strings; non-ASCII bytes are
    /// carried through lossily rather than rejected.
    pub fn read_chars(&mut self, n: usize) -> Result<String, FormatError> {
        let bytes = self.take(n)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}
