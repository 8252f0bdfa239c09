//! Identification orchestration for card numbers.
//!
//! [`identify`] is the single entry point the outer surfaces (HTTP, CLI,
//! batch) call. It combines sanitization, the format check, the Luhn
//! checksum, masking and brand detection into one [`ClassificationResult`].
//!
//! Malformed input is a normal result, never a panic or an `Err`.

use zeroize::Zeroizing;

use crate::card::{CardBrand, ClassificationResult};
use crate::detect::classify;
use crate::error::FormatDefect;
use crate::format::{format_defect, sanitize};
use crate::luhn::luhn_check;
use crate::mask::mask;

/// Identifies the brand of a raw card number and checks its Luhn checksum.
///
/// Steps:
/// 1. Sanitize the input (strip every non-digit)
/// 2. Check the raw format (digits, spaces and hyphens only; 12-19 digits)
/// 3. Compute the Luhn checksum and the mask, regardless of format
/// 4. Detect the brand, unless the format is invalid
///
/// The sanitized digits are zeroized before returning; the result holds
/// only the masked number.
///
/// # Example
///
/// ```
/// use card_identifier::{identify, CardBrand};
///
/// let result = identify("4111 1111 1111 1111");
/// assert_eq!(result.brand(), CardBrand::Visa);
/// assert!(result.is_luhn_valid());
/// assert_eq!(result.masked_number(), "4111********1111");
/// assert_eq!(result.digit_count(), 16);
///
/// let result = identify("411111111111111A");
/// assert!(!result.is_format_valid());
/// assert_eq!(result.brand(), CardBrand::Unknown);
/// ```
pub fn identify(raw: &str) -> ClassificationResult {
    let sanitized = Zeroizing::new(sanitize(raw));

    let defect = format_defect(raw, &sanitized);
    let is_luhn_valid = luhn_check(&sanitized);
    let masked_number = mask(&sanitized);

    // Malformed input never reaches the classifier
    let brand = match defect {
        Some(_) => CardBrand::Unknown,
        None => classify(&sanitized),
    };

    let message = compose_message(brand, is_luhn_valid, defect);
    ClassificationResult::new(
        brand,
        is_luhn_valid,
        defect,
        masked_number,
        sanitized.len(),
        message,
    )
}

/// Builds the status message for an identification outcome.
fn compose_message(brand: CardBrand, is_luhn_valid: bool, defect: Option<FormatDefect>) -> String {
    // Same precedence as ClassificationResult::outcome
    match defect {
        Some(defect) => format!("invalid card format: {}", defect),
        None if !brand.is_known() => "card brand not identified".to_string(),
        None if !is_luhn_valid => {
            format!("brand identified: {}, but the card failed Luhn validation", brand)
        }
        None => format!("valid {} card", brand),
    }
}
