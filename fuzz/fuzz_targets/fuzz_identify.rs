//! Fuzz target for card identification.
//!
//! Tests that identify() never panics and its result is self-consistent.

#![no_main]

use card_identifier::{classify, identify, sanitize, CardBrand, Outcome};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let result = identify(data);
    let digits = sanitize(data);

    assert_eq!(result.digit_count(), digits.len());
    assert_eq!(result.masked_number().len(), digits.len());

    if result.is_format_valid() {
        assert_eq!(result.brand(), classify(&digits));
    } else {
        assert_eq!(result.brand(), CardBrand::Unknown);
        assert_eq!(result.outcome(), Outcome::FormatError);
    }

    if digits.len() > 8 {
        assert!(!result.masked_number().contains(digits.as_str()));
    }
});
