//! NetCDF classic header parsing.
//!
//! The header is three tagged lists (dimensions, global attributes,
//! variables) behind the magic, the version byte, and the record count.
//! All three lists share the same framing: a u32 tag, a u32 element count,
//! then the elements. A `(0, 0)` pair encodes an absent list in the same
//! 8 bytes as a present-but-empty one.

use crate::cursor::ByteCursor;
use crate::error::FormatError;
use crate::magic::{self, VERSION_64BIT_OFFSET};
use crate::nc_type::NcType;
use crate::value::{read_value, Value};

/// List tag for the dimensions section.
pub const NC_DIMENSION: u32 = 10;
/// List tag for the variables section.
pub const NC_VARIABLE: u32 = 11;
/// List tag for an attributes section (global or per-variable).
pub const NC_ATTRIBUTE: u32 = 12;
/// Declared size of the unlimited dimension.
pub const NC_UNLIMITED: u32 = 0;
/// Tag value of an absent list.
pub const ZERO: u32 = 0;
/// Variable size sentinel for values larger than the 32-bit size field.
/// Recognised verbatim; the true size is never reconstructed.
pub const STREAMING: u32 = 0xFFFF_FFFF;

/// A named dimension. `size == 0` marks the record (unlimited) dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    /// Dimension name.
    pub name: String,
    /// Declared size; 0 for the record dimension.
    pub size: u32,
}

/// A named, typed attribute with its decoded payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Attribute name.
    pub name: String,
    /// Payload type.
    pub ty: NcType,
    /// Decoded payload: a string for CHAR, a scalar or run otherwise.
    pub value: Value,
}

/// A variable described by the header. Data is decoded separately on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Variable name.
    pub name: String,
    /// Indices into the dimension table, outermost first.
    pub dimension_ids: Vec<usize>,
    /// Per-variable attributes.
    pub attributes: Vec<Attribute>,
    /// Element type.
    pub ty: NcType,
    /// Wire size of one record's worth of this variable, including the
    /// internal pad to a 4-byte boundary. May be the [`STREAMING`] sentinel.
    pub size_bytes: u32,
    /// Absolute byte offset of this variable's first byte.
    pub offset: u32,
    /// True iff the outermost dimension is the record dimension.
    pub is_record: bool,
}

impl Variable {
    /// First attribute with the given name, byte-equal and case-sensitive.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.value)
    }
}

/// The record (unlimited) dimension, if the file declares one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDimension {
    /// Number of records present in the file.
    pub length: u32,
    /// Index of the unlimited dimension in the dimension table.
    pub id: Option<usize>,
    /// Name of the unlimited dimension.
    pub name: Option<String>,
    /// Byte stride between successive records: the sum of `size_bytes`
    /// over all record variables. Absent when there are none.
    pub record_step: Option<u64>,
}

/// A fully parsed NetCDF classic header. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// Format version byte (1 = classic, 2 = 64-bit offset).
    pub version: u8,
    /// Record dimension bookkeeping.
    pub record_dimension: RecordDimension,
    /// Dimensions in declaration order.
    pub dimensions: Vec<Dimension>,
    /// Global attributes in declaration order.
    pub global_attributes: Vec<Attribute>,
    /// Variables in declaration order.
    pub variables: Vec<Variable>,
}

impl Header {
    /// Parse the header from the start of a NetCDF byte image.
    pub fn parse(data: &[u8]) -> Result<Header, FormatError> {
        if data.is_empty() {
            return Err(FormatError::EmptyInput);
        }
        let mut cursor = ByteCursor::new(data);
        let version = magic::read_magic(&mut cursor)?;

        let record_length = cursor.read_u32()?;
        let dimensions = parse_dimensions(&mut cursor)?;

        // The first zero-sized dimension is the unlimited one.
        let record_id = dimensions.iter().position(|d| d.size == NC_UNLIMITED);
        let record_name = record_id.map(|id| dimensions[id].name.clone());

        let global_attributes = parse_attribute_list(&mut cursor)?;
        let (variables, record_step) = parse_variables(&mut cursor, version, record_id)?;

        Ok(Header {
            version,
            record_dimension: RecordDimension {
                length: record_length,
                id: record_id,
                name: record_name,
                record_step,
            },
            dimensions,
            global_attributes,
            variables,
        })
    }

    /// Human-readable label for the format version.
    pub fn version_label(&self) -> &'static str {
        magic::version_label(self.version)
    }

    /// First global attribute with the given name.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.global_attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.value)
    }

    /// First variable with the given name.
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }
}

/// Read a tagged-list header and return the element count.
///
/// `(0, 0)` is an absent list; a zero tag with a non-zero count, or a
/// non-zero tag other than `expected`, is ill-formed.
fn list_len(
    cursor: &mut ByteCursor<'_>,
    expected: u32,
    what: &str,
) -> Result<usize, FormatError> {
    let tag = cursor.read_u32()?;
    let count = cursor.read_u32()?;
    if tag == ZERO {
        if count != ZERO {
            return Err(FormatError::NotNetCdf(format!(
                "wrong empty tag for list of {what}"
            )));
        }
        return Ok(0);
    }
    if tag != expected {
        return Err(FormatError::NotNetCdf(format!(
            "wrong tag for list of {what}"
        )));
    }
    Ok(count as usize)
}

/// Clamp an untrusted element count before pre-allocating. Every list
/// element occupies at least 8 bytes on the wire, so anything beyond
/// `remaining / 8` cannot be backed by real data.
fn element_capacity(count: usize, cursor: &ByteCursor<'_>) -> usize {
    count.min(cursor.remaining() / 8)
}

/// Read a name: u32 length, that many ASCII bytes, pad to 4.
fn parse_name(cursor: &mut ByteCursor<'_>) -> Result<String, FormatError> {
    let len = cursor.read_u32()? as usize;
    let name = cursor.read_chars(len)?;
    cursor.align4();
    Ok(name)
}

fn parse_dimensions(cursor: &mut ByteCursor<'_>) -> Result<Vec<Dimension>, FormatError> {
    let count = list_len(cursor, NC_DIMENSION, "dimensions")?;
    let mut dims = Vec::with_capacity(element_capacity(count, cursor));
    for _ in 0..count {
        let name = parse_name(cursor)?;
        let size = cursor.read_u32()?;
        dims.push(Dimension { name, size });
    }
    Ok(dims)
}

fn parse_attribute_list(cursor: &mut ByteCursor<'_>) -> Result<Vec<Attribute>, FormatError> {
    let count = list_len(cursor, NC_ATTRIBUTE, "attributes")?;
    let mut attrs = Vec::with_capacity(element_capacity(count, cursor));
    for _ in 0..count {
        let name = parse_name(cursor)?;
        let ty = NcType::from_code(cursor.read_u32()?)?;
        let nelems = cursor.read_u32()? as usize;
        let value = read_value(cursor, ty, nelems)?;
        cursor.align4();
        attrs.push(Attribute { name, ty, value });
    }
    Ok(attrs)
}

fn parse_variables(
    cursor: &mut ByteCursor<'_>,
    version: u8,
    record_id: Option<usize>,
) -> Result<(Vec<Variable>, Option<u64>), FormatError> {
    let count = list_len(cursor, NC_VARIABLE, "variables")?;
    let mut vars = Vec::with_capacity(element_capacity(count, cursor));
    let mut record_step: Option<u64> = None;

    for _ in 0..count {
        let name = parse_name(cursor)?;

        let rank = cursor.read_u32()? as usize;
        let mut dimension_ids = Vec::with_capacity(rank.min(cursor.remaining() / 4));
        for _ in 0..rank {
            dimension_ids.push(cursor.read_u32()? as usize);
        }

        let attributes = parse_attribute_list(cursor)?;
        let ty = NcType::from_code(cursor.read_u32()?)?;
        let size_bytes = cursor.read_u32()?;

        let offset = if version == VERSION_64BIT_OFFSET {
            let high = cursor.read_u32()?;
            if high != 0 {
                return Err(FormatError::NotNetCdf(
                    "offsets larger than 4GB not supported".into(),
                ));
            }
            cursor.read_u32()?
        } else {
            cursor.read_u32()?
        };

        let is_record = record_id.is_some() && dimension_ids.first() == record_id.as_ref();
        if is_record {
            record_step = Some(record_step.unwrap_or(0) + u64::from(size_bytes));
        }

        vars.push(Variable {
            name,
            dimension_ids,
            attributes,
            ty,
            size_bytes,
            offset,
            is_record,
        });
    }

    Ok((vars, record_step))
}
