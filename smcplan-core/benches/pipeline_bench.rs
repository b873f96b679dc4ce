//! Criterion benchmarks for the plan pipeline.
//!
//! Benchmarks:
//! 1. ATR estimate over typical window sizes
//! 2. Swing detection with default and wide windows
//! 3. Full plan build (ATR + swings + trend + levels)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use smcplan_core::domain::Candle;
use smcplan_core::indicators::atr;
use smcplan_core::plan::{build, build_with_config};
use smcplan_core::structure::detect_swings;
use smcplan_core::PipelineConfig;

// ── Helpers ──────────────────────────────────────────────────────────

fn make_candles(n: usize) -> Vec<Candle> {
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0 + (i as f64 * 0.37).cos() * 2.0;
            let open = close - 0.3;
            let high = close + 1.5;
            let low = close - 1.5;
            Candle::new(i as i64 * 900_000, open, high, low, close, 1_000.0)
        })
        .collect()
}

const SIZES: [usize; 3] = [100, 500, 1000];

// ── 1. ATR ───────────────────────────────────────────────────────────

fn bench_atr(c: &mut Criterion) {
    let mut group = c.benchmark_group("atr");

    for &n in &SIZES {
        let candles = make_candles(n);
        group.bench_with_input(BenchmarkId::new("period_14", n), &n, |b, _| {
            b.iter(|| atr::estimate(black_box(&candles), 14));
        });
    }

    group.finish();
}

// ── 2. Swing Detection ───────────────────────────────────────────────

fn bench_swings(c: &mut Criterion) {
    let mut group = c.benchmark_group("swings");

    for &n in &SIZES {
        let candles = make_candles(n);
        group.bench_with_input(BenchmarkId::new("left2_right2", n), &n, |b, _| {
            b.iter(|| detect_swings(black_box(&candles), 2, 2));
        });
        group.bench_with_input(BenchmarkId::new("left10_right10", n), &n, |b, _| {
            b.iter(|| detect_swings(black_box(&candles), 10, 10));
        });
    }

    group.finish();
}

// ── 3. Full Build ────────────────────────────────────────────────────

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for &n in &SIZES {
        let candles = make_candles(n);
        group.bench_with_input(BenchmarkId::new("default", n), &n, |b, _| {
            b.iter(|| build(black_box(&candles), "15m"));
        });
    }

    // Wide swing window, the slowest realistic configuration
    let candles = make_candles(1000);
    let config = PipelineConfig {
        atr_period: 50,
        swing_left: 10,
        swing_right: 10,
    };
    group.bench_function("wide_window_1000", |b| {
        b.iter(|| build_with_config(black_box(&candles), "1h", black_box(&config)));
    });

    group.finish();
}

criterion_group!(benches, bench_atr, bench_swings, bench_build);
criterion_main!(benches);
