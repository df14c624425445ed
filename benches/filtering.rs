//! Benchmarks for mentor directory filtering.
//!
//! Note: full benchmarks require the crate to expose library functions.
//! These mirror the directory filter's matching rules on generated records.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

struct Record {
    name: String,
    bio: String,
    tags: Vec<String>,
}

fn records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| Record {
            name: format!("Mentor {}", i),
            bio: format!("Seasoned engineer number {} who enjoys pairing", i),
            tags: vec![
                format!("topic-{}", i % 7),
                format!("language-{}", i % 3),
            ],
        })
        .collect()
}

fn matches_query(record: &Record, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    record.name.to_lowercase().contains(&query)
        || record.bio.to_lowercase().contains(&query)
        || record.tags.iter().any(|t| t.to_lowercase().contains(&query))
}

fn bench_query_filter(c: &mut Criterion) {
    let records = records(500);
    c.bench_function("query_filter_500", |b| {
        b.iter(|| {
            records
                .iter()
                .filter(|r| matches_query(r, black_box("pairing")))
                .count()
        })
    });
}

fn bench_tag_filter(c: &mut Criterion) {
    let records = records(500);
    c.bench_function("tag_filter_500", |b| {
        b.iter(|| {
            records
                .iter()
                .filter(|r| r.tags.iter().any(|t| t == black_box("topic-3")))
                .count()
        })
    });
}

fn bench_combined_filter(c: &mut Criterion) {
    let records = records(500);
    c.bench_function("combined_filter_500", |b| {
        b.iter(|| {
            records
                .iter()
                .filter(|r| {
                    matches_query(r, black_box("engineer"))
                        && r.tags.iter().any(|t| t == black_box("language-1"))
                })
                .count()
        })
    });
}

criterion_group!(
    benches,
    bench_query_filter,
    bench_tag_filter,
    bench_combined_filter
);
criterion_main!(benches);
