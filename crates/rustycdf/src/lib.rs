//! High-level API for reading NetCDF classic files.
//!
//! This crate provides an ergonomic read-only interface on top of
//! `rustycdf-format`. It handles both on-disk layouts of the classic
//! family: version 1 ("classic", 32-bit variable offsets) and version 2
//! ("64-bit offset"). NetCDF-4 / HDF5 files are out of scope.
//!
//! # Reading
//!
//! ```no_run
//! use rustycdf::File;
//!
//! let file = File::open("data.nc").unwrap();
//! println!("{}", file.version_label());
//! for dim in file.dimensions() {
//!     println!("{} = {}", dim.name, dim.size);
//! }
//! let values = file.read_variable_as_f64("temperature").unwrap();
//! println!("{} samples", values.len());
//! ```

pub mod error;
pub mod reader;

pub use error::Error;
pub use reader::File;

// Re-export the format-level types that appear in the public API.
pub use rustycdf_format::error::FormatError;
pub use rustycdf_format::header::{
    Attribute, Dimension, Header, RecordDimension, Variable,
};
pub use rustycdf_format::nc_type::NcType;
pub use rustycdf_format::value::Value;
