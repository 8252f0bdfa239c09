//! Luhn algorithm implementation for card number validation.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) is a checksum
//! formula used to detect single-digit errors and most transpositions in card
//! numbers and other identification numbers.
//!
//! Two layers are provided: digit-slice primitives ([`validate`],
//! [`compute_checksum`], [`generate_check_digit`]) and [`luhn_check`], which
//! takes a sanitized string and fails closed on anything that is not a
//! 12-19 digit number.

use zeroize::Zeroize;

use crate::card::{MAX_CARD_DIGITS, MIN_CARD_DIGITS};

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Checks a sanitized card number string with the Luhn algorithm.
///
/// Fails closed: returns `false` if `sanitized` is empty, contains anything
/// other than ASCII digits, or has fewer than 12 or more than 19 digits.
///
/// # Example
///
/// ```
/// use card_identifier::luhn::luhn_check;
///
/// assert!(luhn_check("4111111111111111"));
/// assert!(!luhn_check("4111111111111112"));
///
/// // Too short to be a card number, even though the checksum holds
/// assert!(!luhn_check("0"));
/// ```
pub fn luhn_check(sanitized: &str) -> bool {
    let len = sanitized.len();
    if !(MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&len) {
        return false;
    }

    let mut digits = [0u8; MAX_CARD_DIGITS];
    for (slot, b) in digits.iter_mut().zip(sanitized.bytes()) {
        if !b.is_ascii_digit() {
            digits.zeroize();
            return false;
        }
        *slot = b - b'0';
    }

    let valid = validate(&digits[..len]);
    digits.zeroize();
    valid
}

/// Validates a sequence of digit values using the Luhn algorithm.
///
/// # Arguments
///
/// * `digits` - A slice of digits (0-9) representing the card number.
///
/// # Returns
///
/// `true` if the checksum is valid, `false` otherwise. An empty slice is
/// never valid.
///
/// # Example
///
/// ```
/// use card_identifier::luhn::validate;
///
/// let digits = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert!(validate(&digits));
///
/// let invalid = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2];
/// assert!(!validate(&invalid));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() {
        return false;
    }

    compute_checksum(digits) % 10 == 0
}

/// Computes the Luhn sum (not reduced modulo 10) for a sequence of digits.
///
/// Walks from the rightmost digit leftward; the rightmost digit is not
/// doubled, the next one is, and so on alternately.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    let mut sum: u32 = 0;
    let mut double = false;

    for &digit in digits.iter().rev() {
        if double {
            sum += DOUBLE_TABLE[digit as usize] as u32;
        } else {
            sum += digit as u32;
        }
        double = !double;
    }

    sum
}

/// Generates the check digit for a partial card number.
///
/// Given digits without the check digit, computes the digit that makes the
/// full number pass Luhn validation.
///
/// # Example
///
/// ```
/// use card_identifier::luhn::generate_check_digit;
///
/// let partial = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert_eq!(generate_check_digit(&partial), 1);
/// ```
#[inline]
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Every digit shifts one place left once the check digit is appended,
    // so the rightmost partial digit is the first one doubled.
    let mut sum: u32 = 0;
    let mut double = true;

    for &digit in digits.iter().rev() {
        if double {
            sum += DOUBLE_TABLE[digit as usize] as u32;
        } else {
            sum += digit as u32;
        }
        double = !double;
    }

    ((10 - (sum % 10)) % 10) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cards() {
        assert!(luhn_check("4111111111111111"));
        assert!(luhn_check("5105105105105100"));
        assert!(luhn_check("378282246310005"));
        assert!(luhn_check("6011000000000004"));
        assert!(luhn_check("30569309025904"));
        assert!(luhn_check("6062826977354406"));
    }

    #[test]
    fn test_invalid_cards() {
        assert!(!luhn_check("4111111111111112"));
        assert!(!luhn_check("5105105105105101"));
        assert!(!luhn_check("378282246310006"));
    }

    #[test]
    fn test_fails_closed_on_length() {
        assert!(!luhn_check(""));
        // 11 and 20 digits; both would otherwise sum to a multiple of 10
        assert!(!luhn_check("00000000000"));
        assert!(!luhn_check("00000000000000000000"));
        assert!(luhn_check("000000000000"));
        assert!(luhn_check("0000000000000000000"));
    }

    #[test]
    fn test_fails_closed_on_non_digits() {
        assert!(!luhn_check("4111 1111 1111 1111"));
        assert!(!luhn_check("4111-1111-1111-1111"));
        assert!(!luhn_check("411111111111111A"));
        assert!(!luhn_check("٤١١١١١١١١١١١"));
    }

    #[test]
    fn test_digit_slice_validate() {
        assert!(validate(&[4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]));
        assert!(validate(&[3, 7, 8, 2, 8, 2, 2, 4, 6, 3, 1, 0, 0, 0, 5]));
        assert!(!validate(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1, 2, 3, 4, 5, 6]));
        assert!(!validate(&[]));
    }

    #[test]
    fn test_compute_checksum() {
        // 4111111111111111: eight undoubled 1s, seven doubled 1s, doubled 4
        assert_eq!(compute_checksum(&[4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]), 30);
        assert_eq!(compute_checksum(&[9, 9]), 18);
        assert_eq!(compute_checksum(&[]), 0);
    }

    #[test]
    fn test_generate_check_digit() {
        let partial = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
        assert_eq!(generate_check_digit(&partial), 1);

        let partial = [5, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(generate_check_digit(&partial), 4);

        let partial = [3, 7, 8, 2, 8, 2, 2, 4, 6, 3, 1, 0, 0, 0];
        assert_eq!(generate_check_digit(&partial), 5);
    }

    #[test]
    fn test_double_table_values() {
        for i in 0..10 {
            let doubled = i * 2;
            let expected = if doubled > 9 { doubled - 9 } else { doubled };
            assert_eq!(DOUBLE_TABLE[i], expected as u8);
        }
    }
}
