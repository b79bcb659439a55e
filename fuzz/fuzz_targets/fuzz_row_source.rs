//! Fuzz target for JSON lines row parsing.
//!
//! Tests that the row source handles arbitrary input without panicking and
//! never yields after reporting the end of input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pd_core::JsonlSource;

fuzz_target!(|data: &[u8]| {
    let mut source = JsonlSource::new(data);
    for row in source.by_ref() {
        let _ = row;
    }
    assert!(source.next().is_none());
});
