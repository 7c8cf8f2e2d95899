use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use orbit_layout::logging::{LogEvent, LogSink};
use orbit_layout::{
    AlignOptions, Block, Logger, LoggingResult, Point, SearchOptions, align, layout,
};

#[derive(Clone, Default)]
struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _event: &LogEvent) -> LoggingResult<()> {
        Ok(())
    }
}

fn children(count: usize) -> Vec<Block> {
    (0..count)
        .map(|i| {
            let block = Block::new(40.0 + (i % 7) as f64 * 23.0, 30.0 + (i % 5) as f64 * 17.0);
            if i % 4 == 0 {
                block.with_children(vec![Block::new(10.0, 10.0)])
            } else {
                block
            }
        })
        .collect()
}

fn align_single_ring(c: &mut Criterion) {
    let center = Block::new(400.0, 300.0);
    let children = children(24);
    let options = AlignOptions::new()
        .with_center_margin(120.0)
        .with_children_margin(8.0);

    c.bench_function("align_single_ring", |b| {
        b.iter(|| {
            let _ = align(black_box(&center), black_box(&children), &options);
        });
    });
}

fn two_tier_search(c: &mut Criterion) {
    let center = Block::new(400.0, 300.0);
    let children = children(24);
    let options = SearchOptions::new()
        .with_children_margin(8.0)
        .with_margin_range(0.0, 1_000.0);

    c.bench_function("two_tier_search", |b| {
        b.iter(|| {
            layout(&center, Point::default(), black_box(&children), &options)
                .expect("layout");
        });
    });
}

fn two_tier_search_logged(c: &mut Criterion) {
    let center = Block::new(400.0, 300.0);
    let children = children(24);
    let options = SearchOptions::new()
        .with_children_margin(8.0)
        .with_margin_range(0.0, 1_000.0)
        .with_logger(Logger::new(NullSink));

    c.bench_function("two_tier_search_logged", |b| {
        b.iter(|| {
            layout(&center, Point::default(), black_box(&children), &options)
                .expect("layout");
        });
    });
}

criterion_group!(
    benches,
    align_single_ring,
    two_tier_search,
    two_tier_search_logged
);
criterion_main!(benches);
