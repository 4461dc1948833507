//! Robustness tests: parsers return errors (not panics) on malformed input.

use rustycdf_format::cursor::ByteCursor;
use rustycdf_format::data_read::read_variable;
use rustycdf_format::error::FormatError;
use rustycdf_format::header::Header;
use rustycdf_format::nc_type::NcType;
use rustycdf_format::value::read_value;

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

// ---- Truncated / empty inputs ----

#[test]
fn empty_input() {
    assert_eq!(Header::parse(&[]), Err(FormatError::EmptyInput));
}

#[test]
fn magic_only() {
    assert!(matches!(
        Header::parse(b"CDF"),
        Err(FormatError::Truncated { .. })
    ));
}

#[test]
fn truncated_after_version() {
    assert!(matches!(
        Header::parse(b"CDF\x01\x00\x00"),
        Err(FormatError::Truncated { .. })
    ));
}

#[test]
fn truncated_inside_name() {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"CDF\x01");
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 10); // NC_DIMENSION
    push_u32(&mut buf, 1);
    push_u32(&mut buf, 100); // name claims 100 bytes, none follow
    assert!(matches!(
        Header::parse(&buf),
        Err(FormatError::Truncated { .. })
    ));
}

#[test]
fn huge_name_length_does_not_panic() {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"CDF\x01");
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 10);
    push_u32(&mut buf, 1);
    push_u32(&mut buf, u32::MAX); // absurd length
    assert!(Header::parse(&buf).is_err());
}

#[test]
fn huge_attribute_count_does_not_panic() {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"CDF\x01");
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 12); // NC_ATTRIBUTE
    push_u32(&mut buf, u32::MAX); // absurd element count
    assert!(Header::parse(&buf).is_err());
}

#[test]
fn truncated_attribute_payload() {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"CDF\x01");
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 12);
    push_u32(&mut buf, 1);
    push_name(&mut buf, "a");
    push_u32(&mut buf, 6); // DOUBLE
    push_u32(&mut buf, 4); // four doubles claimed, zero bytes present
    assert!(matches!(
        Header::parse(&buf),
        Err(FormatError::Truncated { .. })
    ));
}

// ---- Framing violations ----

#[test]
fn wrong_tag_every_section() {
    // Dimensions framed with the attribute tag.
    let mut buf = Vec::new();
    buf.extend_from_slice(b"CDF\x01");
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 12);
    push_u32(&mut buf, 0);
    let err = Header::parse(&buf).unwrap_err();
    assert_eq!(
        err,
        FormatError::NotNetCdf("wrong tag for list of dimensions".into())
    );

    // Attributes framed with the dimension tag.
    let mut buf = Vec::new();
    buf.extend_from_slice(b"CDF\x01");
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 10);
    push_u32(&mut buf, 0);
    let err = Header::parse(&buf).unwrap_err();
    assert_eq!(
        err,
        FormatError::NotNetCdf("wrong tag for list of attributes".into())
    );

    // Variables framed with the dimension tag.
    let mut buf = Vec::new();
    buf.extend_from_slice(b"CDF\x01");
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 10);
    push_u32(&mut buf, 0);
    let err = Header::parse(&buf).unwrap_err();
    assert_eq!(
        err,
        FormatError::NotNetCdf("wrong tag for list of variables".into())
    );
}

#[test]
fn absent_list_with_nonzero_count() {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"CDF\x01");
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 1);
    let err = Header::parse(&buf).unwrap_err();
    assert_eq!(
        err,
        FormatError::NotNetCdf("wrong empty tag for list of dimensions".into())
    );
}

// ---- Bad versions / magic ----

#[test]
fn bad_magic_bytes() {
    for data in [&b"XDF\x01"[..], &b"CDX\x01"[..], &b"cdf\x01"[..]] {
        assert_eq!(
            Header::parse(data),
            Err(FormatError::NotNetCdf("should start with CDF".into()))
        );
    }
}

#[test]
fn bad_version_bytes() {
    for v in [3u8, 4, 0xFF] {
        let data = [b'C', b'D', b'F', v];
        assert_eq!(
            Header::parse(&data),
            Err(FormatError::NotNetCdf("unknown version".into()))
        );
    }
}

// ---- Data region violations ----

#[test]
fn variable_offset_past_end() {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"CDF\x01");
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 11);
    push_u32(&mut buf, 1);
    push_name(&mut buf, "v");
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 4); // INT
    push_u32(&mut buf, 4);
    push_u32(&mut buf, 0xFFFF); // way past the end

    let header = Header::parse(&buf).unwrap();
    let var = header.variable("v").unwrap();
    assert!(matches!(
        read_variable(&buf, &header, var),
        Err(FormatError::Truncated { .. })
    ));
}

#[test]
fn value_run_past_end() {
    let data = [0u8; 3];
    let mut c = ByteCursor::new(&data);
    assert!(matches!(
        read_value(&mut c, NcType::Int, 1),
        Err(FormatError::Truncated { .. })
    ));
}
