//! Benchmarks for card_identifier performance testing.
//!
//! Run with: cargo bench

use card_identifier::{
    batch::{identify_all, BatchSummary},
    classify, identify, luhn, luhn_check, mask, sanitize,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

// Test card numbers
const VISA_16: &str = "4111111111111111";
const VISA_16_FORMATTED: &str = "4111-1111-1111-1111";
const MASTERCARD: &str = "5500000000000004";
const AMEX: &str = "378282246310005";
const HIPERCARD: &str = "6062826977354406";
const UNKNOWN: &str = "1234567812345670";

const VISA_DIGITS: [u8; 16] = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];

/// Benchmark the full identification pipeline
fn bench_identify(c: &mut Criterion) {
    let mut group = c.benchmark_group("identify");

    group.bench_function("visa_16_raw", |b| b.iter(|| identify(black_box(VISA_16))));

    group.bench_function("visa_16_formatted", |b| {
        b.iter(|| identify(black_box(VISA_16_FORMATTED)))
    });

    group.bench_function("amex_15", |b| b.iter(|| identify(black_box(AMEX))));

    // First rule in the table
    group.bench_function("hipercard", |b| b.iter(|| identify(black_box(HIPERCARD))));

    // Walks every rule before giving up
    group.bench_function("unknown", |b| b.iter(|| identify(black_box(UNKNOWN))));

    group.bench_function("malformed", |b| {
        b.iter(|| identify(black_box("4111-1111-1111-111X")))
    });

    group.finish();
}

/// Benchmark the individual building blocks
fn bench_building_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("building_blocks");

    group.bench_function("sanitize", |b| {
        b.iter(|| sanitize(black_box(VISA_16_FORMATTED)))
    });

    group.bench_function("classify_mastercard", |b| {
        b.iter(|| classify(black_box(MASTERCARD)))
    });

    group.bench_function("classify_unknown", |b| {
        b.iter(|| classify(black_box(UNKNOWN)))
    });

    group.bench_function("mask", |b| b.iter(|| mask(black_box(VISA_16))));

    group.finish();
}

/// Benchmark Luhn algorithm specifically
fn bench_luhn(c: &mut Criterion) {
    let mut group = c.benchmark_group("luhn");

    group.bench_function("luhn_check_16", |b| {
        b.iter(|| luhn_check(black_box(VISA_16)))
    });

    group.bench_function("validate_digits_16", |b| {
        b.iter(|| luhn::validate(black_box(&VISA_DIGITS)))
    });

    group.bench_function("generate_check_digit", |b| {
        b.iter(|| luhn::generate_check_digit(black_box(&VISA_DIGITS[..15])))
    });

    group.finish();
}

/// Benchmark batch identification with various sizes
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");

    for size in [10, 100, 1000, 10000].iter() {
        let cards: Vec<&str> = (0..*size)
            .map(|i| match i % 5 {
                0 => "4111111111111112", // Luhn failure
                1 => MASTERCARD,
                2 => AMEX,
                3 => UNKNOWN,
                _ => VISA_16_FORMATTED,
            })
            .collect();

        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("identify_all", size), &cards, |b, cards| {
            b.iter(|| identify_all(black_box(cards)))
        });

        let results = identify_all(&cards);
        group.bench_with_input(BenchmarkId::new("summary", size), &results, |b, results| {
            b.iter(|| BatchSummary::from_results(black_box(results)))
        });
    }

    group.finish();
}

#[cfg(feature = "parallel")]
fn bench_parallel(c: &mut Criterion) {
    use card_identifier::batch::identify_parallel;

    let mut group = c.benchmark_group("parallel");

    for size in [1000, 10000, 100000].iter() {
        let cards: Vec<String> = (0..*size).map(|_| VISA_16.to_string()).collect();

        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(
            BenchmarkId::new("identify_parallel", size),
            &cards,
            |b, cards| b.iter(|| identify_parallel(black_box(cards))),
        );
    }

    group.finish();
}

#[cfg(not(feature = "parallel"))]
fn bench_parallel(_c: &mut Criterion) {
    // Parallel benchmarks disabled - enable 'parallel' feature
}

criterion_group!(
    benches,
    bench_identify,
    bench_building_blocks,
    bench_luhn,
    bench_batch,
    bench_parallel,
);

criterion_main!(benches);
