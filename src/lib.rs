//! # card_identifier
//!
//! Payment card brand identification for Rust.
//!
//! ## Features
//!
//! - Brand detection from BIN prefixes (10 brands, fixed precedence)
//! - Luhn checksum verification
//! - Input sanitization and format checks
//! - PCI-DSS style masking (first 4 and last 4 digits visible)
//! - Multiple interfaces: library, CLI, REST API
//!
//! ## Quick Start
//!
//! ```rust
//! use card_identifier::{identify, CardBrand, Outcome};
//!
//! let result = identify("4111-1111-1111-1111");
//! assert_eq!(result.brand(), CardBrand::Visa);
//! assert!(result.is_luhn_valid());
//! assert_eq!(result.outcome(), Outcome::Valid);
//!
//! // Safe for logging - never exposes the full card number
//! println!("Card: {}", result.masked_number()); // "4111********1111"
//!
//! // Malformed input is a result, not an error
//! let result = identify("4111-1111-1111-111X");
//! assert!(!result.is_format_valid());
//! assert_eq!(result.brand(), CardBrand::Unknown);
//! ```
//!
//! ## Building Blocks
//!
//! ```rust
//! use card_identifier::{classify, luhn_check, mask, sanitize, CardBrand};
//!
//! let digits = sanitize("3782 822463 10005");
//! assert_eq!(digits, "378282246310005");
//! assert_eq!(classify(&digits), CardBrand::AmericanExpress);
//! assert!(luhn_check(&digits));
//! assert_eq!(mask(&digits), "3782*******0005");
//! ```
//!
//! ## Batch Processing
//!
//! ```rust
//! use card_identifier::batch::{identify_all, BatchSummary};
//!
//! let cards = ["4111111111111111", "4111111111111112", "invalid"];
//! let results = identify_all(&cards);
//! let summary = BatchSummary::from_results(&results);
//!
//! assert_eq!(summary.total, 3);
//! assert_eq!(summary.valid, 1);
//! assert_eq!(summary.luhn_failed, 1);
//! assert_eq!(summary.format_errors, 1);
//! ```
//!
//! ## Supported Card Brands
//!
//! Overlapping ranges are resolved by a fixed rule order; see [`detect`].
//!
//! | Brand | Prefix |
//! |-------|--------|
//! | HiperCard | 384100, 384140, 384160, 606282 |
//! | Diners Club | 300-305, 36, 38 |
//! | Discover | 6011, 622126-622925, 644-649, 65 |
//! | JCB | 3528-3589 |
//! | American Express | 34, 37 |
//! | Visa | 4 |
//! | MasterCard | 51-55, 2221-2720 |
//! | Aura | 50 |
//! | enRoute | 2014-2149 |
//! | Voyager | 8699 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | `Serialize`/`Deserialize` for result types |
//! | `parallel` | Rayon-based batch identification |
//! | `cli` | Command-line tool (`cardid`) |
//! | `server` | REST API with Swagger UI (`cardid-server`) |
//!
//! ## Security
//!
//! - Sanitized digits are zeroized as soon as a result is assembled
//! - Results carry the masked number only; `Debug` and `Display` are safe
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod batch;
pub mod card;
pub mod detect;
pub mod error;
pub mod format;
pub mod identify;
pub mod luhn;
pub mod mask;

#[cfg(feature = "server")]
pub mod server;

// Re-export main types at crate root
pub use card::{CardBrand, ClassificationResult, Outcome, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
pub use detect::classify;
pub use error::FormatDefect;
pub use format::{check_format, sanitize};
pub use identify::identify;
pub use luhn::luhn_check;
pub use mask::mask;
