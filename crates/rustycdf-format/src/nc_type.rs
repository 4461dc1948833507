//! NetCDF primitive type codes.

use std::fmt;

use crate::error::FormatError;

/// The six NetCDF classic primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NcType {
    /// NC_BYTE: raw 8-bit bytes.
    Byte,
    /// NC_CHAR: ASCII character data.
    Char,
    /// NC_SHORT: signed 16-bit integer.
    Short,
    /// NC_INT: signed 32-bit integer.
    Int,
    /// NC_FLOAT: IEEE-754 32-bit float.
    Float,
    /// NC_DOUBLE: IEEE-754 64-bit float.
    Double,
}

impl NcType {
    /// Convert a wire type code to an `NcType`.
    ///
    /// Codes outside 1..=6 fail with [`FormatError::InvalidType`]. Both the
    /// attribute and the variable parse paths validate through here.
    pub fn from_code(code: u32) -> Result<NcType, FormatError> {
        match code {
            1 => Ok(NcType::Byte),
            2 => Ok(NcType::Char),
            3 => Ok(NcType::Short),
            4 => Ok(NcType::Int),
            5 => Ok(NcType::Float),
            6 => Ok(NcType::Double),
            other => Err(FormatError::InvalidType(other)),
        }
    }

    /// The wire type code.
    pub fn code(self) -> u32 {
        match self {
            NcType::Byte => 1,
            NcType::Char => 2,
            NcType::Short => 3,
            NcType::Int => 4,
            NcType::Float => 5,
            NcType::Double => 6,
        }
    }

    /// Size in bytes of one element of this type.
    pub fn size_bytes(self) -> u32 {
        match self {
            NcType::Byte | NcType::Char => 1,
            NcType::Short => 2,
            NcType::Int | NcType::Float => 4,
            NcType::Double => 8,
        }
    }

    /// Look up a type by its symbolic name (the inverse of [`NcType::name`]).
    pub fn from_name(name: &str) -> Option<NcType> {
        match name {
            "byte" => Some(NcType::Byte),
            "char" => Some(NcType::Char),
            "short" => Some(NcType::Short),
            "int" => Some(NcType::Int),
            "float" => Some(NcType::Float),
            "double" => Some(NcType::Double),
            _ => None,
        }
    }

    /// Lower-case symbolic name.
    pub fn name(self) -> &'static str {
        match self {
            NcType::Byte => "byte",
            NcType::Char => "char",
            NcType::Short => "short",
            NcType::Int => "int",
            NcType::Float => "float",
            NcType::Double => "double",
        }
    }
}

impl fmt::Display for NcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
