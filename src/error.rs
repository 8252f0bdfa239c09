//! Format defects for card number input.
//!
//! A malformed number is a normal identification outcome, not a fault, so
//! `FormatDefect` is carried inside [`crate::ClassificationResult`] rather
//! than returned as an `Err`. Its `Display` text explains exactly what is
//! wrong with the input.

use std::fmt;

/// Why a raw card number failed the format check.
///
/// Defects are reported in declaration order: an input with a letter and too
/// few digits reports `InvalidCharacter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatDefect {
    /// The input was empty or contained only whitespace.
    Empty,

    /// A character other than a digit, space or hyphen was found.
    InvalidCharacter {
        /// The position in the input string (0-indexed, in characters).
        position: usize,
        /// The offending character.
        character: char,
    },

    /// The input held only separators.
    NoDigits,

    /// The card number has too few digits.
    TooShort {
        /// The number of digits provided.
        length: usize,
        /// The minimum required digits (12).
        minimum: usize,
    },

    /// The card number has too many digits.
    TooLong {
        /// The number of digits provided.
        length: usize,
        /// The maximum allowed digits (19).
        maximum: usize,
    },
}

impl fmt::Display for FormatDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "card number is empty"),

            Self::InvalidCharacter {
                position,
                character,
            } => {
                write!(
                    f,
                    "invalid character '{}' at position {} (only digits, spaces, and hyphens allowed)",
                    character.escape_default(),
                    position
                )
            }

            Self::NoDigits => write!(f, "card number contains no digits"),

            Self::TooShort { length, minimum } => {
                write!(
                    f,
                    "card number too short: got {} digits, minimum is {}",
                    length, minimum
                )
            }

            Self::TooLong { length, maximum } => {
                write!(
                    f,
                    "card number too long: got {} digits, maximum is {}",
                    length, maximum
                )
            }
        }
    }
}
