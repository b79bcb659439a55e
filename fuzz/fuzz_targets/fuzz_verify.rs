//! Fuzz target for password verification.
//!
//! Arbitrary bytes as a stored hash must be rejected or checked, never
//! panic. The vault refuses costs above its ceiling, but costs just under it
//! still take seconds, so inputs with more than two cost digits are skipped.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pd_vault::SecretVault;

const MAX_COST_DIGITS: usize = 2;

fuzz_target!(|data: &[u8]| {
    let (hash, candidate) = match data.iter().position(|b| *b == 0) {
        Some(i) => (&data[..i], &data[i + 1..]),
        None => (data, &[][..]),
    };
    let Ok(hash_text) = std::str::from_utf8(hash) else {
        assert!(!SecretVault::new().verify(hash, ""));
        return;
    };
    let expensive = hash_text.split(['$', ',']).any(|part| {
        part.split_once('=').is_some_and(|(_, value)| {
            value.len() > MAX_COST_DIGITS && value.bytes().all(|b| b.is_ascii_digit())
        })
    });
    if expensive {
        return;
    }
    let candidate = String::from_utf8_lossy(candidate);
    let _ = SecretVault::new().verify(hash_text, &candidate);
});
