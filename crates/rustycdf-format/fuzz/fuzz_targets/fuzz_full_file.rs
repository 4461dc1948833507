#![no_main]
use libfuzzer_sys::fuzz_target;

use rustycdf_format::data_read::read_variable;
use rustycdf_format::header::Header;

fuzz_target!(|data: &[u8]| {
    // If the header parses, every variable must decode or error cleanly.
    if let Ok(header) = Header::parse(data) {
        for var in &header.variables {
            let _ = read_variable(data, &header, var);
        }
    }
});
