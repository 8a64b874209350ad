//! Pagination Engine Benchmarks
//!
//! Benchmarks for the scan loop, visibility probing, and URL pattern
//! matching.
//!
//! Run with: `cargo bench --bench pagination_ops`

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hojear::prelude::*;
use std::time::Duration;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
}

fn bench_scan_depth(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("scan_depth");

    for pages in [1u32, 4, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(pages), &pages, |bench, &pages| {
            bench.iter(|| {
                rt.block_on(async {
                    let target = MockElement::visible_after("target", (pages - 1) as usize);
                    let next = MockElement::visible("next");
                    let outcome = Paginator::new()
                        .search(&target, &next, &InstantSettle, SearchAction::Click)
                        .await
                        .unwrap();
                    black_box(outcome);
                });
            });
        });
    }

    group.finish();
}

fn bench_exhaustion(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("exhaustion");

    for pages in [4u32, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(pages), &pages, |bench, &pages| {
            bench.iter(|| {
                rt.block_on(async {
                    let target = MockElement::hidden("target");
                    let next = MockElement::visible_until("next", (pages - 1) as usize);
                    let found = Paginator::new()
                        .exists(&target, &next, &InstantSettle)
                        .await
                        .unwrap();
                    black_box(found);
                });
            });
        });
    }

    group.finish();
}

fn bench_try_visible(c: &mut Criterion) {
    let rt = runtime();
    let probe = Duration::from_millis(100);

    c.bench_function("try_visible_hit", |bench| {
        bench.iter(|| {
            rt.block_on(async {
                let element = MockElement::visible("btn");
                let visible = try_visible(&element, black_box(probe)).await.unwrap();
                black_box(visible);
            });
        });
    });
}

fn bench_url_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("url_patterns");
    let url = "https://platform.example.com/apps/42/quickstart/step-3";

    let patterns = vec![
        ("exact", UrlPattern::Exact(url.to_string())),
        ("prefix", UrlPattern::Prefix("https://platform.example.com/".to_string())),
        ("contains", UrlPattern::Contains("/quickstart/".to_string())),
        ("regex", UrlPattern::Regex(r"/apps/\d+/".to_string())),
    ];

    for (name, pattern) in patterns {
        group.bench_with_input(BenchmarkId::from_parameter(name), &pattern, |bench, pat| {
            bench.iter(|| {
                let matched = pat.matches(black_box(url));
                black_box(matched);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_scan_depth,
    bench_exhaustion,
    bench_try_visible,
    bench_url_patterns
);
criterion_main!(benches);
