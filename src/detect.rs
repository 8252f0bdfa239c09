//! Card brand detection using BIN/IIN prefix rules.
//!
//! The Bank Identification Number (BIN), also known as Issuer Identification
//! Number (IIN), is the leading digits of a card number. Brands are detected
//! by reading a fixed-width prefix as an integer and testing it against an
//! ordered table of rules. The first matching rule wins.
//!
//! # Precedence
//!
//! Several documented ranges overlap at different widths, so the table order
//! is significant and is not "longest prefix wins":
//!
//! | # | Width | Prefix | Brand |
//! |---|-------|--------|-------|
//! | 1 | 6 | 606282, 384100, 384140, 384160 | HiperCard |
//! | 2 | 6 | 622126-622925 | Discover |
//! | 3 | 1 | 4 | Visa |
//! | 4 | 2 | 34, 37 | American Express |
//! | 5 | 2 | 36, 38 | Diners Club |
//! | 6 | 3 | 300-305 | Diners Club |
//! | 7 | 4 | 3528-3589 | JCB |
//! | 8 | 4 | 2014-2149 | enRoute |
//! | 9 | 4 | 8699 | Voyager |
//! | 10 | 4 | 6011 | Discover |
//! | 11 | 2 | 51-55 | MasterCard |
//! | 12 | 2 | 50 | Aura |
//! | 13 | 2 | 65 | Discover |
//! | 14 | 4 | 2221-2720 | MasterCard |
//! | 15 | 3 | 644-649 | Discover |
//!
//! For example `384100...` is HiperCard (rule 1) while `384199...` falls
//! through to Diners Club (rule 5).

use std::fmt;

use crate::CardBrand;

/// Inputs shorter than this are never classified.
pub const MIN_CLASSIFY_DIGITS: usize = 4;

/// How a rule tests a numeric prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixMatcher {
    /// The prefix equals one of the listed values.
    OneOf(&'static [u32]),
    /// The prefix lies in the inclusive range.
    Range {
        /// Lowest matching prefix.
        low: u32,
        /// Highest matching prefix.
        high: u32,
    },
}

impl PrefixMatcher {
    /// Returns true if `prefix` satisfies this matcher.
    #[inline]
    pub fn matches(&self, prefix: u32) -> bool {
        match *self {
            Self::OneOf(values) => values.contains(&prefix),
            Self::Range { low, high } => (low..=high).contains(&prefix),
        }
    }
}

impl fmt::Display for PrefixMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneOf(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                Ok(())
            }
            Self::Range { low, high } => write!(f, "{}-{}", low, high),
        }
    }
}

/// One entry of the brand detection table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixRule {
    width: usize,
    matcher: PrefixMatcher,
    brand: CardBrand,
}

impl PrefixRule {
    const fn one_of(width: usize, values: &'static [u32], brand: CardBrand) -> Self {
        Self {
            width,
            matcher: PrefixMatcher::OneOf(values),
            brand,
        }
    }

    const fn range(width: usize, low: u32, high: u32, brand: CardBrand) -> Self {
        Self {
            width,
            matcher: PrefixMatcher::Range { low, high },
            brand,
        }
    }

    /// Number of leading digits this rule reads.
    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// The prefix test.
    #[inline]
    pub const fn matcher(&self) -> PrefixMatcher {
        self.matcher
    }

    /// The brand this rule assigns.
    #[inline]
    pub const fn brand(&self) -> CardBrand {
        self.brand
    }

    /// Returns true if the leading `width` digits of `digits` satisfy the rule.
    ///
    /// Inputs shorter than the rule's width never match.
    #[inline]
    pub fn matches(&self, digits: &str) -> bool {
        prefix_value(digits, self.width).is_some_and(|prefix| self.matcher.matches(prefix))
    }
}

/// The brand detection table, in evaluation order.
static RULES: [PrefixRule; 15] = [
    PrefixRule::one_of(6, &[606282, 384100, 384140, 384160], CardBrand::HiperCard),
    PrefixRule::range(6, 622126, 622925, CardBrand::Discover),
    PrefixRule::one_of(1, &[4], CardBrand::Visa),
    PrefixRule::one_of(2, &[34, 37], CardBrand::AmericanExpress),
    PrefixRule::one_of(2, &[36, 38], CardBrand::DinersClub),
    PrefixRule::range(3, 300, 305, CardBrand::DinersClub),
    PrefixRule::range(4, 3528, 3589, CardBrand::Jcb),
    PrefixRule::range(4, 2014, 2149, CardBrand::EnRoute),
    PrefixRule::one_of(4, &[8699], CardBrand::Voyager),
    PrefixRule::one_of(4, &[6011], CardBrand::Discover),
    PrefixRule::range(2, 51, 55, CardBrand::MasterCard),
    PrefixRule::one_of(2, &[50], CardBrand::Aura),
    PrefixRule::one_of(2, &[65], CardBrand::Discover),
    PrefixRule::range(4, 2221, 2720, CardBrand::MasterCard),
    PrefixRule::range(3, 644, 649, CardBrand::Discover),
];

/// Returns the brand detection table in evaluation order.
#[inline]
pub fn rules() -> &'static [PrefixRule] {
    &RULES
}

/// Reads the first `width` characters of `digits` as an integer.
///
/// Returns `None` if `digits` is shorter than `width` or the prefix is not
/// all ASCII digits.
fn prefix_value(digits: &str, width: usize) -> Option<u32> {
    let prefix = digits.as_bytes().get(..width)?;
    prefix.iter().try_fold(0u32, |acc, &b| {
        b.is_ascii_digit().then(|| acc * 10 + u32::from(b - b'0'))
    })
}

/// Returns the first rule matching `sanitized`, if any.
///
/// # Example
///
/// ```
/// use card_identifier::detect::matching_rule;
/// use card_identifier::CardBrand;
///
/// let rule = matching_rule("5105105105105100").unwrap();
/// assert_eq!(rule.brand(), CardBrand::MasterCard);
/// assert_eq!(rule.width(), 2);
/// ```
pub fn matching_rule(sanitized: &str) -> Option<&'static PrefixRule> {
    if sanitized.len() < MIN_CLASSIFY_DIGITS {
        return None;
    }

    RULES.iter().find(|rule| rule.matches(sanitized))
}

/// Detects the card brand of a sanitized digit string.
///
/// The caller is expected to have checked the format already. Inputs shorter
/// than 4 characters, and inputs no rule matches, are `Unknown`.
///
/// # Example
///
/// ```
/// use card_identifier::detect::classify;
/// use card_identifier::CardBrand;
///
/// assert_eq!(classify("4111111111111111"), CardBrand::Visa);
/// assert_eq!(classify("378282246310005"), CardBrand::AmericanExpress);
/// assert_eq!(classify("6062826977354406"), CardBrand::HiperCard);
/// assert_eq!(classify("411"), CardBrand::Unknown);
/// ```
#[inline]
pub fn classify(sanitized: &str) -> CardBrand {
    matching_rule(sanitized).map_or(CardBrand::Unknown, PrefixRule::brand)
}
