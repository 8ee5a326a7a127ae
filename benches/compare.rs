//! Throughput comparison against `hashbrown::HashMap`, in the spirit of the
//! teacher's `main.rs` manual benchmark loop (`benchmark_find!`), ported to
//! `criterion` for the repeated/statistical measurement the ambient test
//! tooling in this crate uses.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use swissdict::OrderedMap;

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_1m_u64");
    group.bench_function("swissdict::OrderedMap", |b| {
        b.iter(|| {
            let mut table = OrderedMap::with_capacity(1_000_000);
            let mut rng = fastrand::Rng::with_seed(123);
            for _ in 0..1_000_000u64 {
                let key = rng.u64(..);
                table.insert(key, key).unwrap();
            }
            black_box(table.len());
        });
    });
    group.bench_function("hashbrown::HashMap", |b| {
        b.iter(|| {
            let mut table = hashbrown::HashMap::with_capacity(1_000_000);
            let mut rng = fastrand::Rng::with_seed(123);
            for _ in 0..1_000_000u64 {
                let key = rng.u64(..);
                table.insert(key, key);
            }
            black_box(table.len());
        });
    });
    group.finish();
}

fn bench_find(c: &mut Criterion) {
    let mut swiss: OrderedMap<u64, u64> = OrderedMap::with_capacity(1_000_000);
    let mut hb: hashbrown::HashMap<u64, u64> = hashbrown::HashMap::with_capacity(1_000_000);
    let mut rng = fastrand::Rng::with_seed(123);
    for _ in 0..1_000_000u64 {
        let key = rng.u64(..);
        swiss.insert(key, key).unwrap();
        hb.insert(key, key);
    }

    let mut group = c.benchmark_group("find_1m_u64");
    group.bench_function("swissdict::OrderedMap", |b| {
        let mut rng = fastrand::Rng::with_seed(456);
        b.iter(|| black_box(swiss.get(&rng.u64(..))));
    });
    group.bench_function("hashbrown::HashMap", |b| {
        let mut rng = fastrand::Rng::with_seed(456);
        b.iter(|| black_box(hb.get(&rng.u64(..))));
    });
    group.finish();
}

criterion_group!(benches, bench_insert, bench_find);
criterion_main!(benches);
