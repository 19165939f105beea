//! Benchmarks for projecting and filtering large test maps.
//!
//! Run with: cargo bench --bench projection_benchmark

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use test_review::config::PanelConfig;
use test_review::model::{Item, Part, Section, TestMap};
use test_review::projection::{apply_filter, filter_test_map_by, project, ProjectOptions, ReviewFilter};
use test_review::ReviewPanel;

/// Generate a map with `parts * sections * items` items and a mix of outcomes.
fn generate_map(parts: usize, sections: usize, items: usize) -> TestMap {
    let mut position = 0;
    let parts = (0..parts)
        .map(|p| {
            let sections = (0..sections)
                .map(|s| {
                    let items = (0..items)
                        .map(|_| {
                            let item = Item::new(format!("i{position}"), position);
                            let item = match position % 5 {
                                0 => item.with_score(Some(1.0), 1.0),
                                1 => item.with_score(Some(0.0), 1.0),
                                2 => item.with_score(Some(0.5), 1.0),
                                3 => item.informational(),
                                _ => item.externally_scored(true).with_score(None, 2.0),
                            };
                            position += 1;
                            item
                        })
                        .collect();
                    // reverse section order so sorting has work to do
                    Section::new(format!("s{p}-{s}"), sections - s, items)
                })
                .collect();
            Part::new(format!("p{p}"), p, sections)
        })
        .collect();
    TestMap::new(parts)
}

fn bench_project(c: &mut Criterion) {
    let mut group = c.benchmark_group("project");
    for (parts, sections, items) in [(1, 5, 10), (4, 10, 25), (10, 20, 50)] {
        let map = generate_map(parts, sections, items);
        group.bench_with_input(
            BenchmarkId::from_parameter(map.item_count()),
            &map,
            |b, map| b.iter(|| project(black_box(map), ProjectOptions::default())),
        );
    }
    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let map = generate_map(10, 20, 50);
    let root = project(&map, ProjectOptions::default());

    let mut group = c.benchmark_group("filter");
    for filter in [ReviewFilter::All, ReviewFilter::Incorrect, ReviewFilter::Pending] {
        group.bench_with_input(BenchmarkId::new("projected", filter), &filter, |b, filter| {
            b.iter(|| apply_filter(black_box(&root.parts), *filter))
        });
        group.bench_with_input(BenchmarkId::new("raw_map", filter), &filter, |b, filter| {
            b.iter(|| filter_test_map_by(black_box(&map), *filter, true))
        });
    }
    group.finish();
}

fn bench_panel_reload(c: &mut Criterion) {
    let map = generate_map(4, 10, 25);
    let mut panel = ReviewPanel::new(PanelConfig::default());
    panel.start();
    panel.set_data(&map);

    c.bench_function("panel_set_data", |b| {
        b.iter(|| panel.set_data(black_box(&map)))
    });
    c.bench_function("panel_view", |b| b.iter(|| black_box(panel.view())));
}

criterion_group!(benches, bench_project, bench_filter, bench_panel_reload);
criterion_main!(benches);
