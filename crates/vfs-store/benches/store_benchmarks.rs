use agent_vfs_store::{Snapshot, Store};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// Builds a store with `count` files spread over ten directories.
fn create_store_with_files(count: usize) -> Store {
    let mut store = Store::new();
    for i in 0..count {
        store
            .create_file(
                format!("/workspace/dir_{}/file_{i}.ts", i % 10),
                format!("export const VALUE_{i} = {i};"),
            )
            .unwrap();
    }
    store
}

/// Benchmark `read_file` across store sizes
fn bench_read_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_file");

    for size in [10, 100, 1000, 10000] {
        let store = create_store_with_files(size);
        let path = format!("/workspace/dir_{}/file_{}.ts", (size / 2) % 10, size / 2);

        group.bench_with_input(BenchmarkId::new("read", size), &path, |b, path| {
            b.iter(|| store.read_file(black_box(path)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark `exists` for present and missing paths
fn bench_exists(c: &mut Criterion) {
    let mut group = c.benchmark_group("exists");

    for size in [10, 100, 1000, 10000] {
        let store = create_store_with_files(size);
        let present = format!("/workspace/dir_0/file_{}.ts", 0);
        let missing = "/workspace/dir_0/missing.ts";

        group.bench_with_input(BenchmarkId::new("exists_true", size), &present, |b, path| {
            b.iter(|| store.exists(black_box(path)));
        });

        group.bench_with_input(BenchmarkId::new("exists_false", size), &missing, |b, path| {
            b.iter(|| store.exists(black_box(path)));
        });
    }

    group.finish();
}

/// Benchmark `list_directory`
fn bench_list_directory(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_directory");

    for size in [10, 100, 1000] {
        let store = create_store_with_files(size);

        group.bench_with_input(BenchmarkId::new("list", size), &size, |b, _| {
            b.iter(|| store.list_directory(black_box("/workspace/dir_1")).unwrap());
        });
    }

    group.finish();
}

/// Benchmark sequential file creation
fn bench_create_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_file");

    for size in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |b, &size| {
            b.iter(|| create_store_with_files(size));
        });
    }

    group.finish();
}

/// Benchmark renaming a populated directory (rewrites every descendant)
fn bench_rename_directory(c: &mut Criterion) {
    let mut group = c.benchmark_group("rename_directory");

    for size in [100, 1000] {
        let store = create_store_with_files(size);

        group.bench_with_input(BenchmarkId::new("rename", size), &size, |b, _| {
            b.iter_batched(
                || store.clone(),
                |mut store| {
                    store
                        .rename_node(black_box("/workspace"), black_box("/moved/workspace"))
                        .unwrap();
                    store
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// Benchmark snapshot JSON round trip
fn bench_snapshot_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    for size in [100, 1000] {
        let store = create_store_with_files(size);
        let json = store.serialize().to_json().unwrap();

        group.bench_with_input(BenchmarkId::new("serialize", size), &size, |b, _| {
            b.iter(|| store.serialize().to_json().unwrap());
        });

        group.bench_with_input(BenchmarkId::new("restore", size), &json, |b, json| {
            b.iter(|| Store::from_snapshot(&Snapshot::from_json(black_box(json)).unwrap()).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_read_file,
    bench_exists,
    bench_list_directory,
    bench_create_file,
    bench_rename_directory,
    bench_snapshot_round_trip
);
criterion_main!(benches);
