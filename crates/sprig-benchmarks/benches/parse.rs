//! Lockfile and manifest parsing performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sprig_benchmarks::{
    criterion_config, synthetic_package_lock, synthetic_yarn_lock, PROJECT_SIZES,
};
use sprig_config::lock::parse_package_lock;
use sprig_config::yarn::parse_yarn_lock;

/// Benchmark yarn.lock parsing
fn bench_yarn_lock_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("yarn_lock_parsing");

    for size in PROJECT_SIZES.iter() {
        let content = synthetic_yarn_lock(*size);
        group.throughput(Throughput::Bytes(content.len() as u64));

        group.bench_with_input(BenchmarkId::new("packages", size), &content, |b, content| {
            b.iter(|| black_box(parse_yarn_lock(content).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark package-lock.json parsing
fn bench_package_lock_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("package_lock_parsing");

    for size in PROJECT_SIZES.iter() {
        let content = synthetic_package_lock(*size);
        group.throughput(Throughput::Bytes(content.len() as u64));

        group.bench_with_input(BenchmarkId::new("packages", size), &content, |b, content| {
            b.iter(|| black_box(parse_package_lock(content).unwrap()));
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_yarn_lock_parsing, bench_package_lock_parsing
}
criterion_main!(benches);
