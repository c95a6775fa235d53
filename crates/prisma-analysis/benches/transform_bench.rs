//! Criterion benchmarks for the direct and fast transforms
//!
//! Run with: cargo bench -p prisma-analysis

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use prisma_analysis::{Dft, Fft};
use std::f64::consts::TAU;

const SAMPLE_RATE: f64 = 44100.0;

/// Generate a test signal with a few harmonics
fn generate_signal(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE;
            (TAU * 440.0 * t).sin() + 0.5 * (TAU * 880.0 * t).sin() + 0.25 * (TAU * 1320.0 * t).sin()
        })
        .collect()
}

fn bench_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("Forward");

    for size in [64usize, 256, 512, 1024] {
        let signal = generate_signal(size);
        group.bench_with_input(BenchmarkId::new("dft", size), &signal, |b, s| {
            b.iter(|| Dft::new().forward(black_box(s)))
        });
        group.bench_with_input(BenchmarkId::new("fft", size), &signal, |b, s| {
            b.iter(|| Fft::new().forward(black_box(s)))
        });
    }

    group.finish();
}

fn bench_fft_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("FFT_Roundtrip");

    for size in [1024usize, 4096, 16384, 65536] {
        let signal = generate_signal(size);
        let fft = Fft::new();
        group.bench_with_input(BenchmarkId::from_parameter(size), &signal, |b, s| {
            b.iter(|| fft.inverse(&fft.forward(black_box(s))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_forward, bench_fft_sizes);
criterion_main!(benches);
