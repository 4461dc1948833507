//! Variable data extraction.
//!
//! Non-record variables are contiguous runs starting at their header
//! offset. Record variables are interleaved: record *i* of a variable
//! lives at `offset + i * record_step`, where the step is the total byte
//! width of one record summed over every record variable. After reading
//! this variable's slice of a record the cursor must therefore jump by
//! the full step, not by this variable's own size.
//!
//! Each extraction runs on its own cursor over the shared byte image, so
//! concurrent reads never race on a shared offset.

use crate::cursor::ByteCursor;
use crate::error::FormatError;
use crate::header::{Header, Variable};
use crate::value::{read_value, Value};

/// Decode the full contents of `var` from the byte image.
///
/// Non-record variables yield one [`Value`] per element. Record variables
/// yield one `Value` per record, each carrying that record's elements.
/// Callers reshape using the dimension table if they need the array form.
pub fn read_variable(
    data: &[u8],
    header: &Header,
    var: &Variable,
) -> Result<Vec<Value>, FormatError> {
    if var.is_record {
        read_record(data, header, var)
    } else {
        read_non_record(data, var)
    }
}

fn read_non_record(data: &[u8], var: &Variable) -> Result<Vec<Value>, FormatError> {
    let mut cursor = ByteCursor::new(data);
    cursor.seek(var.offset as usize);

    let count = (var.size_bytes / var.ty.size_bytes()) as usize;
    let mut out = Vec::with_capacity(count.min(cursor.remaining()));
    for _ in 0..count {
        out.push(read_value(&mut cursor, var.ty, 1)?);
    }
    Ok(out)
}

fn read_record(data: &[u8], header: &Header, var: &Variable) -> Result<Vec<Value>, FormatError> {
    let record = &header.record_dimension;
    let step = record.record_step.unwrap_or(u64::from(var.size_bytes)) as usize;
    let width = if var.size_bytes > 0 {
        (var.size_bytes / var.ty.size_bytes()) as usize
    } else {
        1
    };

    let mut cursor = ByteCursor::new(data);
    let length = record.length as usize;
    let mut out = Vec::with_capacity(length.min(data.len() / step.max(1)));
    for i in 0..length {
        cursor.seek(var.offset as usize + i * step);
        out.push(read_value(&mut cursor, var.ty, width)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{NC_DIMENSION, NC_VARIABLE};
    use crate::nc_type::NcType;

    fn push_u32(buf: &mut Vec<u8>, val: u32) {
        buf.extend_from_slice(&val.to_be_bytes());
    }

    fn push_name(buf: &mut Vec<u8>, name: &str) {
        push_u32(buf, name.len() as u32);
        buf.extend_from_slice(name.as_bytes());
        while buf.len() % 4 != 0 {
            buf.push(0);
        }
    }

    fn push_variable(
        buf: &mut Vec<u8>,
        name: &str,
        dim_ids: &[u32],
        type_code: u32,
        size_bytes: u32,
        offset: u32,
    ) {
        push_name(buf, name);
        push_u32(buf, dim_ids.len() as u32);
        for id in dim_ids {
            push_u32(buf, *id);
        }
        push_u32(buf, 0); // attributes: absent
        push_u32(buf, 0);
        push_u32(buf, type_code);
        push_u32(buf, size_bytes);
        push_u32(buf, offset);
    }

    /// Dimension "x" size 3, SHORT variable "v", data [1, 2, 3] at offset 80.
    fn fixed_file() -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"CDF\x01");
        push_u32(&mut buf, 0);
        push_u32(&mut buf, NC_DIMENSION);
        push_u32(&mut buf, 1);
        push_name(&mut buf, "x");
        push_u32(&mut buf, 3);
        push_u32(&mut buf, 0);
        push_u32(&mut buf, 0);
        push_u32(&mut buf, NC_VARIABLE);
        push_u32(&mut buf, 1);
        push_variable(&mut buf, "v", &[0], 3, 6, 80);
        buf.resize(80, 0);
        buf.extend_from_slice(&[0x00, 0x01, 0x00, 0x02, 0x00, 0x03]);
        buf
    }

    #[test]
    fn fixed_variable_values() {
        let data = fixed_file();
        let header = Header::parse(&data).unwrap();
        let var = header.variable("v").unwrap();
        let values = read_variable(&data, &header, var).unwrap();
        assert_eq!(values, vec![Value::I16(1), Value::I16(2), Value::I16(3)]);
    }

    #[test]
    fn fixed_variable_is_idempotent() {
        let data = fixed_file();
        let header = Header::parse(&data).unwrap();
        let var = header.variable("v").unwrap();
        let first = read_variable(&data, &header, var).unwrap();
        let second = read_variable(&data, &header, var).unwrap();
        assert_eq!(first, second);
    }

    /// Record dim "t" (2 records) and "x" size 2; record variables
    /// "a" SHORT [t, x] and "b" FLOAT [t], interleaved with step 8.
    fn record_file(numrecs: u32) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"CDF\x01");
        push_u32(&mut buf, numrecs);
        push_u32(&mut buf, NC_DIMENSION);
        push_u32(&mut buf, 2);
        push_name(&mut buf, "t");
        push_u32(&mut buf, 0);
        push_name(&mut buf, "x");
        push_u32(&mut buf, 2);
        push_u32(&mut buf, 0);
        push_u32(&mut buf, 0);
        push_u32(&mut buf, NC_VARIABLE);
        push_u32(&mut buf, 2);
        push_variable(&mut buf, "a", &[0, 1], 3, 4, 140);
        push_variable(&mut buf, "b", &[0], 5, 4, 144);
        buf.resize(140, 0);
        // record 0: a = [10, 11], b = 0.5
        buf.extend_from_slice(&10i16.to_be_bytes());
        buf.extend_from_slice(&11i16.to_be_bytes());
        buf.extend_from_slice(&0.5f32.to_be_bytes());
        // record 1: a = [20, 21], b = 1.5
        buf.extend_from_slice(&20i16.to_be_bytes());
        buf.extend_from_slice(&21i16.to_be_bytes());
        buf.extend_from_slice(&1.5f32.to_be_bytes());
        buf
    }

    #[test]
    fn record_variables_step_over_each_other() {
        let data = record_file(2);
        let header = Header::parse(&data).unwrap();
        assert_eq!(header.record_dimension.record_step, Some(8));

        let a = header.variable("a").unwrap();
        let values = read_variable(&data, &header, a).unwrap();
        assert_eq!(
            values,
            vec![
                Value::I16Array(vec![10, 11]),
                Value::I16Array(vec![20, 21]),
            ]
        );

        let b = header.variable("b").unwrap();
        let values = read_variable(&data, &header, b).unwrap();
        assert_eq!(values, vec![Value::F32(0.5), Value::F32(1.5)]);
    }

    #[test]
    fn zero_records_yield_empty() {
        let data = record_file(0);
        let header = Header::parse(&data).unwrap();
        let a = header.variable("a").unwrap();
        assert_eq!(read_variable(&data, &header, a).unwrap(), vec![]);
    }

    #[test]
    fn char_variable_reads_per_element() {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"CDF\x01");
        push_u32(&mut buf, 0);
        push_u32(&mut buf, NC_DIMENSION);
        push_u32(&mut buf, 1);
        push_name(&mut buf, "len");
        push_u32(&mut buf, 3);
        push_u32(&mut buf, 0);
        push_u32(&mut buf, 0);
        push_u32(&mut buf, NC_VARIABLE);
        push_u32(&mut buf, 1);
        push_variable(&mut buf, "label", &[0], 2, 3, 88);
        buf.resize(88, 0);
        buf.extend_from_slice(b"hi\0");

        let header = Header::parse(&buf).unwrap();
        let var = header.variable("label").unwrap();
        assert_eq!(var.ty, NcType::Char);
        let values = read_variable(&buf, &header, var).unwrap();
        // Per-element decode: the final NUL element trims to an empty
        // string; concatenation back into "hi" is the caller's concern.
        assert_eq!(
            values,
            vec![
                Value::Text("h".into()),
                Value::Text("i".into()),
                Value::Text(String::new()),
            ]
        );
    }

    #[test]
    fn truncated_data_region() {
        let mut data = fixed_file();
        data.truncate(83); // header intact, data cut mid-element
        let header = Header::parse(&data).unwrap();
        let var = header.variable("v").unwrap();
        assert!(matches!(
            read_variable(&data, &header, var),
            Err(FormatError::Truncated { .. })
        ));
    }
}
