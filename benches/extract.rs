// benches/extract.rs
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use blind_scrape::specs::company;
use blind_scrape::tier::{Extended, Simple, TierCalculator};

const PAGE: &str = include_str!("../tests/fixtures/company.html");

fn bench_extract(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    c.bench_function("company_parse", |b| {
        b.iter(|| {
            let rec = company::parse(black_box(PAGE), today).unwrap();
            black_box(rec.overall.len())
        })
    });

    let rec = company::parse(PAGE, today).unwrap();
    let extended = Extended::default();

    c.bench_function("tier_simple", |b| b.iter(|| black_box(Simple.tier(black_box(&rec)))));
    c.bench_function("tier_extended", |b| b.iter(|| black_box(extended.tier(black_box(&rec)))));
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
