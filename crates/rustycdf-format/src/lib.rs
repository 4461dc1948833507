//! NetCDF classic binary format parsing.
//!
//! This crate provides low-level parsing of the NetCDF classic on-disk
//! layout: version 1 ("classic") and version 2 ("64-bit offset") files as
//! defined by the Unidata file-format specification. It decodes headers
//! (dimensions, attributes, variables) and extracts typed variable data,
//! including record variables interleaved along the unlimited dimension.
//!
//! Everything operates over an in-memory `&[u8]` image; file I/O lives in
//! the `rustycdf` crate.

pub mod cursor;
pub mod data_read;
pub mod error;
pub mod header;
pub mod magic;
pub mod nc_type;
pub mod value;
