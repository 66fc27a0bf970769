use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use region_locator::config::LocatorConfig;
use region_locator::geometry::Rect;
use region_locator::layout::{cluster_by_proximity, PageMetrics, TextFragment};
use region_locator::search::{score_fragments, RegionLocator};
use region_locator::terms::TermIndex;
use std::hint::black_box;

const TERMS: [&str; 4] = ["gianna", "rossi", "accepted", "prize"];

/// Generate a two-column page of `n` fragments, some mentioning the terms.
fn generate_page(n: usize) -> Vec<TextFragment> {
    let words = ["lorem", "ipsum", "dolor", "sit", "amet", "gianna", "rossi", "prize"];
    (0..n)
        .map(|i| {
            let column = i % 2;
            let row = i / 2;
            let x = if column == 0 { 40.0 } else { 320.0 };
            let y = (row % 60) as f32 * 12.0 + 40.0;
            let text = format!("{} {} {}", words[i % 8], words[(i * 3) % 8], words[(i * 5) % 8]);
            TextFragment::new(text, Rect::new(x, y, 220.0, 10.0))
        })
        .collect()
}

fn bench_clustering(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster_by_proximity");
    let index = TermIndex::new(&TERMS);
    let config = LocatorConfig::default();

    for n in [100, 500, 2000] {
        let page = generate_page(n);
        let metrics = PageMetrics::derive(&page, &config);
        let scored = score_fragments(&index, &page, config.effective_noise_threshold());
        group.bench_with_input(BenchmarkId::from_parameter(n), &scored, |b, scored| {
            b.iter(|| cluster_by_proximity(black_box(scored), &metrics.thresholds))
        });
    }
    group.finish();
}

fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");
    let locator = RegionLocator::new();

    for n in [100, 500, 2000] {
        let page = generate_page(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &page, |b, page| {
            b.iter(|| locator.locate(black_box(&TERMS), black_box(page)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_clustering, bench_locate);
criterion_main!(benches);
