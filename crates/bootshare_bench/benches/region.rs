//! Retained region benchmarks.

use bootshare_bench::payload;
use bootshare_storage::{FileRegion, InMemoryRegion, RetainedRegion};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tempfile::TempDir;

/// Benchmark InMemoryRegion writes.
fn bench_inmemory_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("inmemory_write");

    for size in [4, 64, 256, 1024].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let mut region = InMemoryRegion::new(4096);
            let data = payload(size);

            b.iter(|| {
                region.write(black_box(16), black_box(&data)).unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark FileRegion writes.
fn bench_file_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_write");

    for size in [4, 64, 256, 1024].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let dir = TempDir::new().unwrap();
            let mut region = FileRegion::open(&dir.path().join("bench.bin"), 4096).unwrap();
            let data = payload(size);

            b.iter(|| {
                region.write(black_box(16), black_box(&data)).unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark clearing a region.
fn bench_clear(c: &mut Criterion) {
    let mut group = c.benchmark_group("clear");

    group.bench_function("inmemory_4k", |b| {
        let mut region = InMemoryRegion::new(4096);
        b.iter(|| region.clear().unwrap());
    });

    group.bench_function("file_4k", |b| {
        let dir = TempDir::new().unwrap();
        let mut region = FileRegion::open(&dir.path().join("bench.bin"), 4096).unwrap();
        b.iter(|| region.clear().unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_inmemory_write, bench_file_write, bench_clear);
criterion_main!(benches);
