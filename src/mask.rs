//! PCI-DSS compliant masking for card numbers.
//!
//! Masked numbers keep the first 4 and last 4 digits and replace everything
//! in between with [`MASK_CHAR`], preserving the total length:
//! `4111111111111111` becomes `4111********1111`.
//!
//! Numbers of 8 digits or fewer are masked completely: revealing a prefix and
//! a suffix would reveal the whole number.

/// Character that replaces hidden digits.
pub const MASK_CHAR: char = '*';

/// Digits left visible at the start of a masked number.
pub const VISIBLE_PREFIX: usize = 4;

/// Digits left visible at the end of a masked number.
pub const VISIBLE_SUFFIX: usize = 4;

/// Masks a sanitized card number for display.
///
/// The output always has the same length as the input.
///
/// # Example
///
/// ```
/// use card_identifier::mask::mask;
///
/// assert_eq!(mask("4111111111111111"), "4111********1111");
/// assert_eq!(mask("378282246310005"), "3782*******0005");
/// assert_eq!(mask("123456"), "******");
/// ```
pub fn mask(sanitized: &str) -> String {
    let len = sanitized.chars().count();

    if len <= VISIBLE_PREFIX + VISIBLE_SUFFIX {
        return std::iter::repeat(MASK_CHAR).take(len).collect();
    }

    let suffix_start = len - VISIBLE_SUFFIX;
    sanitized
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if i < VISIBLE_PREFIX || i >= suffix_start {
                c
            } else {
                MASK_CHAR
            }
        })
        .collect()
}
