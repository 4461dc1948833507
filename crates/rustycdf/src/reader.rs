//! Reading API: the `File` handle over a NetCDF classic byte image.
//!
//! When the `mmap` feature is enabled (default), [`File::open`] uses
//! memory-mapped I/O for zero-copy access. [`File::open_buffered`] provides
//! the read-into-`Vec<u8>` fallback and [`File::from_bytes`] works on
//! in-memory images (tests, network payloads, etc.).

use std::fmt;
use std::fmt::Write as _;

use rustycdf_format::data_read;
use rustycdf_format::header::{Attribute, Dimension, Header, RecordDimension, Variable};
use rustycdf_format::value::Value;

use crate::error::Error;

/// Longest variable preview rendered by [`File::dump`].
const PREVIEW_CHARS: usize = 50;

// ---------------------------------------------------------------------------
// FileData — internal storage for either owned bytes or an mmap
// ---------------------------------------------------------------------------

/// Internal storage: either an owned `Vec<u8>` or a memory-mapped region.
enum FileData {
    Owned(Vec<u8>),
    #[cfg(feature = "mmap")]
    Mmap {
        _file: std::fs::File,
        map: memmap2::Mmap,
    },
}

impl FileData {
    fn as_bytes(&self) -> &[u8] {
        match self {
            FileData::Owned(v) => v,
            #[cfg(feature = "mmap")]
            FileData::Mmap { map, .. } => map,
        }
    }
}

// ---------------------------------------------------------------------------
// File
// ---------------------------------------------------------------------------

/// An open NetCDF classic file.
///
/// The header is parsed once at construction and is immutable afterwards.
/// Variable data is decoded on demand; each extraction runs on its own
/// cursor over the shared read-only byte image, so `&File` methods can be
/// called from multiple threads without coordination.
pub struct File {
    data: FileData,
    header: Header,
}

impl File {
    /// Open a NetCDF file from a filesystem path.
    ///
    /// With the `mmap` feature (default) the file is memory-mapped so the
    /// OS page cache serves reads without copies.
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Error> {
        #[cfg(feature = "mmap")]
        {
            let file = std::fs::File::open(path)?;
            // SAFETY: read-only mapping; the caller is responsible for not
            // modifying the file from another process while it is mapped.
            let map = unsafe { memmap2::Mmap::map(&file)? };
            Self::with_data(FileData::Mmap { _file: file, map })
        }
        #[cfg(not(feature = "mmap"))]
        {
            Self::open_buffered(path)
        }
    }

    /// Open a NetCDF file by reading it entirely into memory.
    pub fn open_buffered<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Error> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(bytes)
    }

    /// Open a NetCDF file from an in-memory byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, Error> {
        Self::with_data(FileData::Owned(data))
    }

    fn with_data(data: FileData) -> Result<Self, Error> {
        let header = Header::parse(data.as_bytes())?;
        Ok(Self { data, header })
    }

    /// The parsed header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// "classic format" for version 1, "64-bit offset format" for version 2.
    pub fn version_label(&self) -> &'static str {
        self.header.version_label()
    }

    /// Dimensions in declaration order.
    pub fn dimensions(&self) -> &[Dimension] {
        &self.header.dimensions
    }

    /// Global attributes in declaration order.
    pub fn global_attributes(&self) -> &[Attribute] {
        &self.header.global_attributes
    }

    /// Variables in declaration order.
    pub fn variables(&self) -> &[Variable] {
        &self.header.variables
    }

    /// The record (unlimited) dimension bookkeeping.
    pub fn record_dimension(&self) -> &RecordDimension {
        &self.header.record_dimension
    }

    /// Value of the first global attribute with this name, if any.
    ///
    /// Lookup is a case-sensitive linear scan in header order; a missing
    /// attribute is not an error.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.header.attribute(name)
    }

    /// True when a global attribute with this name exists.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// True when a variable with this name exists.
    pub fn has_variable(&self, name: &str) -> bool {
        self.header.variable(name).is_some()
    }

    /// The first variable with this name, if any.
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.header.variable(name)
    }

    /// Decode the named variable's data.
    ///
    /// Non-record variables yield one [`Value`] per element; record
    /// variables yield one `Value` per record.
    pub fn read_variable(&self, name: &str) -> Result<Vec<Value>, Error> {
        let var = self
            .header
            .variable(name)
            .ok_or_else(|| Error::VariableNotFound(name.to_string()))?;
        self.read(var)
    }

    /// Decode an already-resolved variable's data.
    pub fn read(&self, var: &Variable) -> Result<Vec<Value>, Error> {
        Ok(data_read::read_variable(
            self.data.as_bytes(),
            &self.header,
            var,
        )?)
    }

    /// Decode the named variable and concatenate its elements into one
    /// string. Meaningful for CHAR variables; other types are rendered
    /// through their display form.
    pub fn read_variable_as_text(&self, name: &str) -> Result<String, Error> {
        let values = self.read_variable(name)?;
        let mut out = String::new();
        for value in &values {
            match value {
                Value::Text(s) => out.push_str(s),
                other => {
                    let _ = write!(out, "{other}");
                }
            }
        }
        Ok(out)
    }

    /// Decode the named variable as one flat `f64` vector, widening any
    /// numeric element type.
    pub fn read_variable_as_f64(&self, name: &str) -> Result<Vec<f64>, Error> {
        let values = self.read_variable(name)?;
        let mut out = Vec::new();
        for value in &values {
            if !value.extend_f64(&mut out) {
                return Err(Error::NotNumeric(name.to_string()));
            }
        }
        Ok(out)
    }

    /// Decode the named variable as one flat `i32` vector, truncating
    /// floating-point elements.
    pub fn read_variable_as_i32(&self, name: &str) -> Result<Vec<i32>, Error> {
        let values = self.read_variable(name)?;
        let mut out = Vec::new();
        for value in &values {
            if !value.extend_i32(&mut out) {
                return Err(Error::NotNumeric(name.to_string()));
            }
        }
        Ok(out)
    }

    /// The raw file bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }

    /// True when the file is backed by memory-mapped I/O.
    pub fn is_mmap(&self) -> bool {
        match &self.data {
            FileData::Owned(_) => false,
            #[cfg(feature = "mmap")]
            FileData::Mmap { .. } => true,
        }
    }

    /// Render a textual listing: dimensions, global attributes, and a
    /// truncated preview of each variable's decoded data.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "NetCDF {}", self.version_label());

        let _ = writeln!(out, "DIMENSIONS");
        for (i, dim) in self.header.dimensions.iter().enumerate() {
            if self.header.record_dimension.id == Some(i) {
                let _ = writeln!(
                    out,
                    "  {} = UNLIMITED ({} currently)",
                    dim.name, self.header.record_dimension.length
                );
            } else {
                let _ = writeln!(out, "  {} = {}", dim.name, dim.size);
            }
        }

        let _ = writeln!(out, "GLOBAL ATTRIBUTES");
        for attr in &self.header.global_attributes {
            let _ = writeln!(out, "  {} = {}", attr.name, attr.value);
        }

        let _ = writeln!(out, "VARIABLES");
        for var in &self.header.variables {
            match self.read(var) {
                Ok(values) => {
                    let mut rendered = String::new();
                    for (i, v) in values.iter().enumerate() {
                        if i > 0 {
                            rendered.push_str(", ");
                        }
                        let _ = write!(rendered, "{v}");
                        if rendered.len() > PREVIEW_CHARS {
                            break;
                        }
                    }
                    if rendered.len() > PREVIEW_CHARS {
                        // Cut on a char boundary at or after the limit.
                        let cut = rendered
                            .char_indices()
                            .map(|(i, _)| i)
                            .find(|i| *i >= PREVIEW_CHARS)
                            .unwrap_or(rendered.len());
                        rendered.truncate(cut);
                        rendered.push_str("...");
                    }
                    let _ = writeln!(
                        out,
                        "  {} ({}): {} ({} values)",
                        var.name,
                        var.ty,
                        rendered,
                        values.len()
                    );
                }
                Err(e) => {
                    let _ = writeln!(out, "  {} ({}): <unreadable: {e}>", var.name, var.ty);
                }
            }
        }
        out
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File")
            .field("size", &self.data.as_bytes().len())
            .field("version", &self.header.version)
            .field("variables", &self.header.variables.len())
            .field("mmap", &self.is_mmap())
            .finish()
    }
}
