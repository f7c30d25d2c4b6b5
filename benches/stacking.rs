use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use serde_json::{Value, json};
use std::hint::black_box;
use timeline_stack::layout::{TimeWindow, ViewState, compute_layout};
use timeline_stack::{LayoutConfig, StackMode};

const HOUR: f64 = 3_600_000.0;

fn groups(count: usize) -> Vec<Value> {
    (0..count).map(|i| json!({ "id": i, "title": format!("Group {i}") })).collect()
}

/// Items spread over a week with a deterministic mix of lengths, so some
/// groups pile up several lanes deep.
fn items(count: usize, group_count: usize) -> Vec<Value> {
    let mut seed = 0x9e37_79b9_u64;
    (0..count)
        .map(|i| {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            let start = ((seed >> 40) % 168) as f64 * HOUR;
            let length = (1 + (seed >> 20) % 24) as f64 * HOUR;
            json!({
                "id": i,
                "group": i % group_count,
                "start_time": start,
                "end_time": start + length,
            })
        })
        .collect()
}

fn bench_layout(c: &mut Criterion) {
    let view = ViewState::new(TimeWindow::new(0.0, 192.0 * HOUR), 2400.0);
    let mut group = c.benchmark_group("layout");
    for &(item_count, group_count) in &[(100, 10), (1_000, 50), (5_000, 100)] {
        let groups = groups(group_count);
        let items = items(item_count, group_count);
        for mode in [StackMode::Stack, StackMode::NoStack] {
            let config = LayoutConfig {
                stack_mode: mode,
                ..LayoutConfig::default()
            };
            let id = format!("{mode:?}/{group_count}");
            group.bench_with_input(BenchmarkId::new(id, item_count), &items, |b, items| {
                b.iter(|| black_box(compute_layout(items, &groups, &view, &config)))
            });
        }
    }
    group.finish();
}

fn bench_restack(c: &mut Criterion) {
    let view = ViewState::new(TimeWindow::new(0.0, 192.0 * HOUR), 2400.0);
    let groups = groups(20);
    let items = items(2_000, 20);
    let config = LayoutConfig {
        stack_mode: StackMode::Stack,
        ..LayoutConfig::default()
    };
    let layout = compute_layout(&items, &groups, &view, &config);
    c.bench_function("restack/incremental", |b| {
        b.iter(|| {
            let mut layout = layout.clone();
            black_box(layout.restack(StackMode::Stack, config.line_height, false).height)
        })
    });
    c.bench_function("restack/forced", |b| {
        b.iter(|| {
            let mut layout = layout.clone();
            black_box(layout.restack(StackMode::Stack, config.line_height, true).height)
        })
    });
}

criterion_group!(benches, bench_layout, bench_restack);
criterion_main!(benches);
