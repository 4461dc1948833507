//! Decoded NetCDF values and the typed element reader.

use std::fmt;

use crate::cursor::ByteCursor;
use crate::error::FormatError;
use crate::nc_type::NcType;

/// A decoded attribute payload or variable element.
///
/// Numeric types collapse to the scalar variant when a single element is
/// read; runs of more than one element use the array variant. BYTE data is
/// always a byte sequence and CHAR data always a string.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// NC_BYTE payload.
    Bytes(Vec<u8>),
    /// NC_CHAR payload, after trailing-NUL trim.
    Text(String),
    I16(i16),
    I16Array(Vec<i16>),
    I32(i32),
    I32Array(Vec<i32>),
    F32(f32),
    F32Array(Vec<f32>),
    F64(f64),
    F64Array(Vec<f64>),
}

impl Value {
    /// Borrow the decoded string of a CHAR value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Number of elements carried by this value.
    pub fn len(&self) -> usize {
        match self {
            Value::Bytes(b) => b.len(),
            Value::Text(s) => s.len(),
            Value::I16Array(v) => v.len(),
            Value::I32Array(v) => v.len(),
            Value::F32Array(v) => v.len(),
            Value::F64Array(v) => v.len(),
            _ => 1,
        }
    }

    /// True when the value carries no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append this value's elements to `out` as `f64`, widening integers
    /// and floats. Returns `false` for BYTE and CHAR values, which have no
    /// numeric interpretation.
    pub fn extend_f64(&self, out: &mut Vec<f64>) -> bool {
        match self {
            Value::I16(v) => out.push(f64::from(*v)),
            Value::I32(v) => out.push(f64::from(*v)),
            Value::F32(v) => out.push(f64::from(*v)),
            Value::F64(v) => out.push(*v),
            Value::I16Array(v) => out.extend(v.iter().map(|x| f64::from(*x))),
            Value::I32Array(v) => out.extend(v.iter().map(|x| f64::from(*x))),
            Value::F32Array(v) => out.extend(v.iter().map(|x| f64::from(*x))),
            Value::F64Array(v) => out.extend_from_slice(v),
            Value::Bytes(_) | Value::Text(_) => return false,
        }
        true
    }

    /// Append this value's elements to `out` as `i32`, truncating floats.
    /// Returns `false` for BYTE and CHAR values.
    pub fn extend_i32(&self, out: &mut Vec<i32>) -> bool {
        match self {
            Value::I16(v) => out.push(i32::from(*v)),
            Value::I32(v) => out.push(*v),
            Value::F32(v) => out.push(*v as i32),
            Value::F64(v) => out.push(*v as i32),
            Value::I16Array(v) => out.extend(v.iter().map(|x| i32::from(*x))),
            Value::I32Array(v) => out.extend_from_slice(v),
            Value::F32Array(v) => out.extend(v.iter().map(|x| *x as i32)),
            Value::F64Array(v) => out.extend(v.iter().map(|x| *x as i32)),
            Value::Bytes(_) | Value::Text(_) => return false,
        }
        true
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, vals: &[T]) -> fmt::Result {
            for (i, v) in vals.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{v}")?;
            }
            Ok(())
        }
        match self {
            Value::Bytes(b) => join(f, b),
            Value::Text(s) => f.write_str(s),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::I16Array(v) => join(f, v),
            Value::I32Array(v) => join(f, v),
            Value::F32Array(v) => join(f, v),
            Value::F64Array(v) => join(f, v),
        }
    }
}

/// Read `count` elements of type `ty` from the cursor.
///
/// CHAR reads `count` characters as one string and strips exactly one
/// trailing NUL if present; earlier NULs are kept verbatim. Numeric types
/// collapse to a scalar when `count == 1`.
pub fn read_value(
    cursor: &mut ByteCursor<'_>,
    ty: NcType,
    count: usize,
) -> Result<Value, FormatError> {
    match ty {
        NcType::Byte => Ok(Value::Bytes(cursor.read_bytes(count)?.to_vec())),
        NcType::Char => {
            let mut s = cursor.read_chars(count)?;
            if s.ends_with('\0') {
                s.pop();
            }
            Ok(Value::Text(s))
        }
        NcType::Short => {
            if count == 1 {
                return Ok(Value::I16(cursor.read_i16()?));
            }
            let mut vals = Vec::with_capacity(count.min(cursor.remaining() / 2));
            for _ in 0..count {
                vals.push(cursor.read_i16()?);
            }
            Ok(Value::I16Array(vals))
        }
        NcType::Int => {
            if count == 1 {
                return Ok(Value::I32(cursor.read_i32()?));
            }
            let mut vals = Vec::with_capacity(count.min(cursor.remaining() / 4));
            for _ in 0..count {
                vals.push(cursor.read_i32()?);
            }
            Ok(Value::I32Array(vals))
        }
        NcType::Float => {
            if count == 1 {
                return Ok(Value::F32(cursor.read_f32()?));
            }
            let mut vals = Vec::with_capacity(count.min(cursor.remaining() / 4));
            for _ in 0..count {
                vals.push(cursor.read_f32()?);
            }
            Ok(Value::F32Array(vals))
        }
        NcType::Double => {
            if count == 1 {
                return Ok(Value::F64(cursor.read_f64()?));
            }
            let mut vals = Vec::with_capacity(count.min(cursor.remaining() / 8));
            for _ in 0..count {
                vals.push(cursor.read_f64()?);
            }
            Ok(Value::F64Array(vals))
        }
    }
}
