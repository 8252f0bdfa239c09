//! CLI tool for card brand identification.
//!
//! # Usage
//!
//! ```bash
//! # Identify a card number
//! cardid identify 4111111111111111
//! cardid identify "4111 1111 1111 1111" --output json
//!
//! # Identify one number per line from a file (or stdin)
//! cardid batch --file cards.txt
//! cat cards.txt | cardid batch
//!
//! # Mask a card number
//! cardid mask 4111111111111111
//!
//! # Luhn check only
//! cardid luhn 4111111111111111
//!
//! # Show the brand and the prefix rule that matched
//! cardid classify 6062826977354406
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use card_identifier::batch::{identify_all, BatchSummary};
use card_identifier::detect::{self, PrefixRule};
use card_identifier::{
    format, identify, luhn_check, mask, sanitize, ClassificationResult, FormatDefect, Outcome,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use zeroize::Zeroizing;

#[derive(Parser)]
#[command(name = "cardid")]
#[command(
    author,
    version,
    about = "Payment card brand identification tool"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Identify the brand of a card number and check its Luhn checksum
    Identify {
        /// Card number to identify (spaces and dashes allowed)
        card_number: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Identify many card numbers, one per line
    Batch {
        /// File to read (defaults to stdin)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Mask a card number (first 4 and last 4 digits visible)
    Mask {
        /// Card number to mask
        card_number: String,
    },

    /// Check if a card passes the Luhn algorithm
    Luhn {
        /// Card number to check
        card_number: String,
    },

    /// Show the detected brand and the prefix rule that matched
    Classify {
        /// Card number to classify
        card_number: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Identify {
            card_number,
            output,
        } => cmd_identify(&card_number, output),
        Commands::Batch { file, output } => cmd_batch(file, output),
        Commands::Mask { card_number } => cmd_mask(&card_number),
        Commands::Luhn { card_number } => cmd_luhn(&card_number),
        Commands::Classify { card_number } => cmd_classify(&card_number),
    }
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_result_text(result: &ClassificationResult) {
    println!("Brand: {}", result.brand().name());
    println!("Luhn Valid: {}", if result.is_luhn_valid() { "yes" } else { "no" });
    println!("Format Valid: {}", if result.is_format_valid() { "yes" } else { "no" });
    println!("Masked: {}", result.masked_number());
    println!("Length: {} digits", result.digit_count());
    println!("Message: {}", result.message());
}

fn cmd_identify(card_number: &str, output: OutputFormat) -> ExitCode {
    let result = identify(card_number);

    let printed = match output {
        OutputFormat::Text => {
            print_result_text(&result);
            ExitCode::SUCCESS
        }
        OutputFormat::Json => print_json(&result),
    };

    if result.outcome() == Outcome::Valid {
        printed
    } else {
        ExitCode::FAILURE
    }
}

fn cmd_batch(file: Option<PathBuf>, output: OutputFormat) -> ExitCode {
    let lines = match read_lines(file) {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let cards: Vec<&str> = lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();
    let results = identify_all(&cards);
    let summary = BatchSummary::from_results(&results);

    match output {
        OutputFormat::Text => {
            for result in &results {
                println!(
                    "{:<20} {:<17} {}",
                    result.masked_number(),
                    result.brand().name(),
                    result.outcome()
                );
            }
            println!();
            println!("Total: {}", summary.total);
            println!("Valid: {}", summary.valid);
            println!("Luhn Failed: {}", summary.luhn_failed);
            println!("Brand Not Identified: {}", summary.brand_not_identified);
            println!("Format Errors: {}", summary.format_errors);
            ExitCode::SUCCESS
        }
        OutputFormat::Json => print_json(&BatchOutput {
            results: &results,
            summary,
        }),
    }
}

#[derive(Serialize)]
struct BatchOutput<'a> {
    results: &'a [ClassificationResult],
    summary: BatchSummary,
}

/// Reads every line of `file`, or of stdin when no file is given.
fn read_lines(file: Option<PathBuf>) -> io::Result<Vec<Zeroizing<String>>> {
    match file {
        Some(path) => split_lines(BufReader::new(File::open(path)?)),
        None => split_lines(io::stdin().lock()),
    }
}

/// Splits `reader` into lines without failing on invalid UTF-8.
///
/// Undecodable bytes become U+FFFD, so such a line is still identified and
/// reported as a format error instead of aborting the batch. Both the raw
/// bytes and the decoded lines are zeroized when dropped.
fn split_lines<R: BufRead>(reader: R) -> io::Result<Vec<Zeroizing<String>>> {
    reader
        .split(b'\n')
        .map(|line| {
            let mut bytes = Zeroizing::new(line?);
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            Ok(Zeroizing::new(String::from_utf8_lossy(&bytes).into_owned()))
        })
        .collect()
}

fn cmd_mask(card_number: &str) -> ExitCode {
    let digits = Zeroizing::new(sanitize(card_number));
    if digits.is_empty() {
        eprintln!("Error: No digits provided");
        return ExitCode::FAILURE;
    }

    println!("{}", mask(&digits));
    ExitCode::SUCCESS
}

fn cmd_luhn(card_number: &str) -> ExitCode {
    let digits = Zeroizing::new(sanitize(card_number));
    if luhn_check(&digits) {
        println!("Luhn check: PASS");
        ExitCode::SUCCESS
    } else {
        println!("Luhn check: FAIL");
        ExitCode::FAILURE
    }
}

fn cmd_classify(card_number: &str) -> ExitCode {
    let rules = detect::rules();
    match matched_rule(card_number) {
        Err(defect) => {
            eprintln!("Error: invalid card format: {}", defect);
            ExitCode::FAILURE
        }
        Ok(Some((position, rule))) => {
            println!("Detected Brand: {}", rule.brand().name());
            println!(
                "Matched Rule: #{} ({}-digit prefix {})",
                position,
                rule.width(),
                rule.matcher()
            );
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("Detected Brand: Unknown");
            println!("Matched Rule: none of {}", rules.len());
            ExitCode::SUCCESS
        }
    }
}

/// Finds the rule that classifies `card_number` and its 1-based position.
///
/// The classifier only runs on well-formed numbers.
fn matched_rule(card_number: &str) -> Result<Option<(usize, &'static PrefixRule)>, FormatDefect> {
    let digits = Zeroizing::new(sanitize(card_number));
    if let Some(defect) = format::format_defect(card_number, &digits) {
        return Err(defect);
    }

    Ok(detect::matching_rule(&digits).map(|rule| {
        let position = detect::rules()
            .iter()
            .position(|r| r == rule)
            .map_or(0, |i| i + 1);
        (position, rule)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_identifier::CardBrand;
    use std::io::Cursor;

    #[test]
    fn test_classify_requires_valid_format() {
        assert!(matches!(
            matched_rule("abc4111111111111111"),
            Err(FormatDefect::InvalidCharacter { position: 0, character: 'a' })
        ));
        assert!(matches!(
            matched_rule("4111"),
            Err(FormatDefect::TooShort { length: 4, .. })
        ));
    }

    #[test]
    fn test_classify_reports_rule_position() {
        let (position, rule) = matched_rule("6062 8269 7735 4406").unwrap().unwrap();
        assert_eq!(position, 1);
        assert_eq!(rule.brand(), CardBrand::HiperCard);

        let (position, rule) = matched_rule("4111-1111-1111-1111").unwrap().unwrap();
        assert_eq!(position, 3);
        assert_eq!(rule.brand(), CardBrand::Visa);

        assert!(matched_rule("1234567812345670").unwrap().is_none());
    }

    #[test]
    fn test_invalid_utf8_line_does_not_abort_batch() {
        let input = b"4111111111111111\r\n4111\xff1111\n378282246310005".to_vec();
        let lines = split_lines(Cursor::new(input)).unwrap();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].as_str(), "4111111111111111");
        assert_eq!(lines[2].as_str(), "378282246310005");

        let results = identify_all(&lines.iter().map(|l| l.as_str()).collect::<Vec<_>>());
        assert_eq!(results[0].outcome(), Outcome::Valid);
        assert_eq!(results[1].outcome(), Outcome::FormatError);
        assert_eq!(results[2].outcome(), Outcome::Valid);
    }
}
