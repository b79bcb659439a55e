//! Fuzz target for message redaction.
//!
//! `filter` must accept any message, field list, replacement and separator
//! without panicking, and a second pass over its output must change nothing
//! whenever the inputs form a valid redaction spec.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pd_redact::{filter, FieldSet, RedactionEngine, RedactionSpec};

#[derive(Arbitrary, Debug)]
struct Input {
    fields: Vec<String>,
    redaction: String,
    message: String,
    separator: char,
}

fuzz_target!(|input: Input| {
    let _ = filter(&input.fields, &input.redaction, &input.message, input.separator);

    let Ok(fields) = FieldSet::new(input.fields) else {
        return;
    };
    let Ok(spec) = RedactionSpec::new(fields, input.redaction, input.separator) else {
        return;
    };
    let engine = RedactionEngine::new(spec);
    let once = engine.filter(&input.message);
    assert_eq!(engine.filter(&once), once);
});
