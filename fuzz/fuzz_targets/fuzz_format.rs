//! Fuzz target for sanitization and masking.
//!
//! Tests that the helpers never panic and never leak middle digits.

#![no_main]

use card_identifier::{check_format, format, mask, sanitize};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let digits = sanitize(data);
    assert!(digits.bytes().all(|b| b.is_ascii_digit()));
    assert_eq!(sanitize(&digits), digits, "sanitize should be idempotent");

    let defect = format::format_defect(data, &digits);
    assert_eq!(defect.is_none(), check_format(data, &digits));

    let masked = mask(&digits);
    assert_eq!(masked.len(), digits.len());
    if digits.len() > 8 {
        let middle = &masked[4..masked.len() - 4];
        assert!(middle.bytes().all(|b| b == b'*'), "middle digits leaked");
    } else {
        assert!(masked.bytes().all(|b| b == b'*'), "short input leaked");
    }
});
