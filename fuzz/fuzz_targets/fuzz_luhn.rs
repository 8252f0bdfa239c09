//! Fuzz target for the Luhn algorithm.
//!
//! Tests that luhn functions never panic and maintain invariants.

#![no_main]

use card_identifier::{luhn, luhn_check};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Clamp values to valid digit range
    let digits: Vec<u8> = data.iter().map(|&b| b % 10).collect();

    let _ = luhn::validate(&digits);

    // The string form must agree with the digit form inside 12-19 digits
    let text: String = digits.iter().map(|&d| char::from(b'0' + d)).collect();
    let by_string = luhn_check(&text);
    if (12..=19).contains(&digits.len()) {
        assert_eq!(by_string, luhn::validate(&digits), "string/digit mismatch");
    } else {
        assert!(!by_string, "out-of-range length must fail");
    }

    if !digits.is_empty() && digits.len() <= 18 {
        let check = luhn::generate_check_digit(&digits);
        assert!(check <= 9, "Check digit should be 0-9");

        let mut with_check = digits.clone();
        with_check.push(check);
        assert!(luhn::validate(&with_check), "Adding check digit should make valid");
    }
});
