//! Core card types for brand identification.
//!
//! This module provides the `CardBrand` enum for identifying card networks
//! and the `ClassificationResult` struct that carries the outcome of a single
//! identification call. No type in this module ever holds a full card number.

use std::fmt;

use crate::error::FormatDefect;

/// Supported card brands/networks.
///
/// The set is closed: the prefix rule table in [`crate::detect`] and this
/// enum are designed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardBrand {
    /// No prefix rule matched, or the input was not a well-formed number.
    #[default]
    Unknown,
    /// Visa - Prefix 4
    Visa,
    /// MasterCard - Prefix 51-55, 2221-2720
    MasterCard,
    /// American Express - Prefix 34, 37
    AmericanExpress,
    /// Diners Club - Prefix 36, 38, 300-305
    DinersClub,
    /// Discover - Prefix 6011, 622126-622925, 644-649, 65
    Discover,
    /// JCB - Prefix 3528-3589
    #[cfg_attr(feature = "serde", serde(rename = "JCB"))]
    Jcb,
    /// enRoute - Prefix 2014-2149
    EnRoute,
    /// Voyager - Prefix 8699
    Voyager,
    /// HiperCard (Brazil) - Prefix 606282, 384100, 384140, 384160
    HiperCard,
    /// Aura (Brazil) - Prefix 50
    Aura,
}

impl CardBrand {
    /// Every brand, `Unknown` first.
    pub const ALL: [CardBrand; 11] = [
        Self::Unknown,
        Self::Visa,
        Self::MasterCard,
        Self::AmericanExpress,
        Self::DinersClub,
        Self::Discover,
        Self::Jcb,
        Self::EnRoute,
        Self::Voyager,
        Self::HiperCard,
        Self::Aura,
    ];

    /// Returns a human-readable name for the card brand.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Visa => "Visa",
            Self::MasterCard => "MasterCard",
            Self::AmericanExpress => "American Express",
            Self::DinersClub => "Diners Club",
            Self::Discover => "Discover",
            Self::Jcb => "JCB",
            Self::EnRoute => "enRoute",
            Self::Voyager => "Voyager",
            Self::HiperCard => "HiperCard",
            Self::Aura => "Aura",
        }
    }

    /// Returns the stable identifier used in API payloads (`AmericanExpress`,
    /// `JCB`, ...).
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Visa => "Visa",
            Self::MasterCard => "MasterCard",
            Self::AmericanExpress => "AmericanExpress",
            Self::DinersClub => "DinersClub",
            Self::Discover => "Discover",
            Self::Jcb => "JCB",
            Self::EnRoute => "EnRoute",
            Self::Voyager => "Voyager",
            Self::HiperCard => "HiperCard",
            Self::Aura => "Aura",
        }
    }

    /// Returns true for every brand except `Unknown`.
    #[inline]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Maximum number of digits in a card number.
pub const MAX_CARD_DIGITS: usize = 19;

/// Minimum number of digits in a card number.
pub const MIN_CARD_DIGITS: usize = 12;

/// How an identification call ended.
///
/// Exactly one outcome applies to every result, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The input was not a well-formed card number; no brand was attempted.
    FormatError,
    /// Well-formed, but no prefix rule matched.
    BrandNotIdentified,
    /// A brand was identified but the Luhn checksum failed.
    LuhnFailed,
    /// A brand was identified and the Luhn checksum passed.
    Valid,
}

impl Outcome {
    /// Snake-case label, used as a structured log field.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FormatError => "format_error",
            Self::BrandNotIdentified => "brand_not_identified",
            Self::LuhnFailed => "luhn_failed",
            Self::Valid => "valid",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of identifying one card number.
///
/// Built only by [`crate::identify`]. The full number is never stored: the
/// result keeps the masked form, the digit count and the derived flags.
///
/// # Security
///
/// - `masked_number` reveals at most the first 4 and last 4 digits
/// - `Debug` and `Display` are safe to log
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct ClassificationResult {
    brand: CardBrand,
    is_luhn_valid: bool,
    is_format_valid: bool,
    masked_number: String,
    digit_count: usize,
    message: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    format_defect: Option<FormatDefect>,
}

impl ClassificationResult {
    #[inline]
    pub(crate) fn new(
        brand: CardBrand,
        is_luhn_valid: bool,
        format_defect: Option<FormatDefect>,
        masked_number: String,
        digit_count: usize,
        message: String,
    ) -> Self {
        Self {
            brand,
            is_luhn_valid,
            is_format_valid: format_defect.is_none(),
            masked_number,
            digit_count,
            message,
            format_defect,
        }
    }

    /// Returns the identified brand (`Unknown` when the format is invalid).
    #[inline]
    pub const fn brand(&self) -> CardBrand {
        self.brand
    }

    /// Returns true if the sanitized digits pass the Luhn checksum.
    ///
    /// This is computed even when the format is invalid.
    #[inline]
    pub const fn is_luhn_valid(&self) -> bool {
        self.is_luhn_valid
    }

    /// Returns true if the raw input held only digits, spaces and hyphens
    /// and 12-19 digits.
    #[inline]
    pub const fn is_format_valid(&self) -> bool {
        self.is_format_valid
    }

    /// Returns the masked number, e.g. `4111********1111`.
    #[inline]
    pub fn masked_number(&self) -> &str {
        &self.masked_number
    }

    /// Returns the number of digits left after sanitization.
    #[inline]
    pub const fn digit_count(&self) -> usize {
        self.digit_count
    }

    /// Returns the human-readable status message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns why the format was rejected, if it was.
    #[inline]
    pub const fn format_defect(&self) -> Option<FormatDefect> {
        self.format_defect
    }

    /// Derives the outcome from the flags and brand.
    pub const fn outcome(&self) -> Outcome {
        if !self.is_format_valid {
            Outcome::FormatError
        } else if !self.brand.is_known() {
            Outcome::BrandNotIdentified
        } else if !self.is_luhn_valid {
            Outcome::LuhnFailed
        } else {
            Outcome::Valid
        }
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.brand, self.masked_number)
    }
}
