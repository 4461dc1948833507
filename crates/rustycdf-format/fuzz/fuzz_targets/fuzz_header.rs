#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header parsing must error on garbage, never panic.
    let _ = rustycdf_format::header::Header::parse(data);
});
