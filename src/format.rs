//! Input sanitization and structural format checks.
//!
//! Raw card numbers arrive with formatting characters (`4111 1111 1111 1111`,
//! `4111-1111-1111-1111`). This module strips them and decides whether the
//! original text was a well-formed card number at all.
//!
//! # Example
//!
//! ```
//! use card_identifier::format::{check_format, sanitize};
//!
//! let raw = "4111-1111-1111-1111";
//! let digits = sanitize(raw);
//! assert_eq!(digits, "4111111111111111");
//! assert!(check_format(raw, &digits));
//!
//! // Letters are stripped by sanitization but still fail the format check
//! let raw = "411111111111111A";
//! assert!(!check_format(raw, &sanitize(raw)));
//! ```

use crate::card::{MAX_CARD_DIGITS, MIN_CARD_DIGITS};
use crate::error::FormatDefect;

/// Removes every character that is not an ASCII decimal digit.
///
/// Never fails; empty or whitespace-only input yields an empty string.
///
/// # Example
///
/// ```
/// use card_identifier::format::sanitize;
///
/// assert_eq!(sanitize("4111 1111 1111 1111"), "4111111111111111");
/// assert_eq!(sanitize("4111.1111/1111#1111"), "4111111111111111");
/// assert_eq!(sanitize("   "), "");
/// ```
pub fn sanitize(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Returns true if `c` may appear in a raw card number.
#[inline]
pub const fn is_allowed_char(c: char) -> bool {
    matches!(c, '0'..='9' | ' ' | '-')
}

/// Finds the first format defect in a raw card number.
///
/// `raw` is the original text and `sanitized` its digits-only form. The raw
/// text is checked first: a letter is a defect even though sanitization
/// would drop it.
///
/// # Example
///
/// ```
/// use card_identifier::format::{format_defect, sanitize};
/// use card_identifier::FormatDefect;
///
/// let raw = "4111-1111-111X";
/// assert_eq!(
///     format_defect(raw, &sanitize(raw)),
///     Some(FormatDefect::InvalidCharacter { position: 13, character: 'X' })
/// );
/// ```
pub fn format_defect(raw: &str, sanitized: &str) -> Option<FormatDefect> {
    if raw.trim().is_empty() {
        return Some(FormatDefect::Empty);
    }

    let first_invalid = raw
        .chars()
        .enumerate()
        .find(|&(_, c)| !is_allowed_char(c));

    if let Some((position, character)) = first_invalid {
        return Some(FormatDefect::InvalidCharacter {
            position,
            character,
        });
    }

    let length = sanitized.len();
    if length == 0 {
        return Some(FormatDefect::NoDigits);
    }

    if length < MIN_CARD_DIGITS {
        return Some(FormatDefect::TooShort {
            length,
            minimum: MIN_CARD_DIGITS,
        });
    }

    if length > MAX_CARD_DIGITS {
        return Some(FormatDefect::TooLong {
            length,
            maximum: MAX_CARD_DIGITS,
        });
    }

    None
}

/// Returns true if `raw` is a well-formed card number.
///
/// Both conditions must hold: `raw` contains only digits, spaces and hyphens,
/// and `sanitized` has 12 to 19 digits.
#[inline]
pub fn check_format(raw: &str, sanitized: &str) -> bool {
    format_defect(raw, sanitized).is_none()
}
