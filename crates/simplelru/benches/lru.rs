use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use simplelru::{Config, SimpleLru};

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_hit");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_1k_resident", |b| {
        let mut cache = SimpleLru::with_config(Config::new(1000).preallocate(true)).unwrap();
        for i in 0..1000u64 {
            cache.set(i, vec![b'x'; 64]);
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(&(counter % 1000)));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_get_50_set", |b| {
        let mut cache = SimpleLru::new(1000).unwrap();
        for i in 0..1000u64 {
            cache.set(i, i);
        }

        let mut counter = 0u64;
        b.iter(|| {
            if counter % 2 == 0 {
                black_box(cache.get(&(counter % 1500)));
            } else {
                cache.set(counter % 1500, counter);
            }
            counter += 1;
        });
    });

    group.finish();
}

fn bench_eviction_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("eviction");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("set_distinct_keys", |b| {
        let mut cache = SimpleLru::new(100).unwrap();

        // Every set misses and evicts the oldest entry
        let mut counter = 0u64;
        b.iter(|| {
            cache.set(counter, counter);
            counter += 1;
        });
    });

    group.bench_function("delete_scattered", |b| {
        b.iter(|| {
            let mut cache = SimpleLru::new(256).unwrap();
            for i in 0..256u64 {
                cache.set(i, i);
            }
            // Punch gaps, then drain from both ends
            for i in (0..256u64).step_by(3) {
                cache.delete(&i);
            }
            for i in 0..256u64 {
                black_box(cache.delete(&i));
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_get_hit,
    bench_mixed_50_50,
    bench_eviction_churn
);
criterion_main!(benches);
