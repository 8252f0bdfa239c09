//! Batch identification for many card numbers at once.
//!
//! Results come back in input order. With the `parallel` feature, large
//! batches can be spread over rayon's thread pool; identification is pure, so
//! the parallel and sequential paths return identical results.

use crate::card::{ClassificationResult, Outcome};
use crate::identify::identify;

/// Identifies a slice of card numbers sequentially.
///
/// # Example
///
/// ```
/// use card_identifier::batch::identify_all;
/// use card_identifier::CardBrand;
///
/// let cards = ["4111111111111111", "5105105105105100"];
/// let results = identify_all(&cards);
/// assert_eq!(results[0].brand(), CardBrand::Visa);
/// assert_eq!(results[1].brand(), CardBrand::MasterCard);
/// ```
#[inline]
pub fn identify_all<S: AsRef<str>>(cards: &[S]) -> Vec<ClassificationResult> {
    cards.iter().map(|c| identify(c.as_ref())).collect()
}

/// Identifies a slice of card numbers in parallel using rayon.
///
/// This is typically faster for large batches (>1000 cards) on
/// multi-core systems.
///
/// # Feature
///
/// Requires the `parallel` feature to be enabled.
#[cfg(feature = "parallel")]
#[inline]
pub fn identify_parallel<S: AsRef<str> + Sync>(cards: &[S]) -> Vec<ClassificationResult> {
    use rayon::prelude::*;
    cards.par_iter().map(|c| identify(c.as_ref())).collect()
}

/// Outcome counts for a batch of results.
///
/// Every result lands in exactly one bucket, so the four buckets always add
/// up to `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct BatchSummary {
    /// Total cards processed
    pub total: usize,
    /// Well-formed, known brand, Luhn valid
    pub valid: usize,
    /// Well-formed, known brand, Luhn invalid
    pub luhn_failed: usize,
    /// Well-formed, but no prefix rule matched
    pub brand_not_identified: usize,
    /// Malformed input
    pub format_errors: usize,
}

impl BatchSummary {
    /// Tallies the outcomes of a batch.
    pub fn from_results(results: &[ClassificationResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            summary.total += 1;
            match result.outcome() {
                Outcome::Valid => summary.valid += 1,
                Outcome::LuhnFailed => summary.luhn_failed += 1,
                Outcome::BrandNotIdentified => summary.brand_not_identified += 1,
                Outcome::FormatError => summary.format_errors += 1,
            }
            summary
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CardBrand;

    const VALID_VISA: &str = "4111111111111111";
    const VALID_MC: &str = "5500000000000004";
    const VALID_AMEX: &str = "378282246310005";
    const LUHN_FAIL: &str = "4111111111111112";
    const UNKNOWN: &str = "1234567812345670";

    #[test]
    fn test_identify_all_keeps_order() {
        let cards = vec![VALID_VISA, VALID_MC, "bad", VALID_AMEX];
        let results = identify_all(&cards);

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].brand(), CardBrand::Visa);
        assert_eq!(results[1].brand(), CardBrand::MasterCard);
        assert!(!results[2].is_format_valid());
        assert_eq!(results[3].brand(), CardBrand::AmericanExpress);
    }

    #[test]
    fn test_identify_all_accepts_owned_strings() {
        let cards: Vec<String> = vec![VALID_VISA.to_string(), "4111 1111 1111 1111".to_string()];
        let results = identify_all(&cards);
        assert_eq!(results[0], results[1]);
    }

    #[test]
    fn test_summary_counts_every_outcome() {
        let cards = [VALID_VISA, LUHN_FAIL, UNKNOWN, "bad", "", VALID_AMEX];
        let summary = BatchSummary::from_results(&identify_all(&cards));

        assert_eq!(
            summary,
            BatchSummary {
                total: 6,
                valid: 2,
                luhn_failed: 1,
                brand_not_identified: 1,
                format_errors: 2,
            }
        );
    }

    #[test]
    fn test_empty_batch() {
        let cards: Vec<&str> = vec![];
        let results = identify_all(&cards);
        assert!(results.is_empty());
        assert_eq!(BatchSummary::from_results(&results), BatchSummary::default());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let cards: Vec<String> = (0..1000)
            .map(|i| match i % 4 {
                0 => VALID_VISA.to_string(),
                1 => LUHN_FAIL.to_string(),
                2 => UNKNOWN.to_string(),
                _ => format!("bad-{}", i),
            })
            .collect();

        let parallel = identify_parallel(&cards);
        assert_eq!(parallel.len(), 1000);
        assert_eq!(parallel, identify_all(&cards));
    }
}
