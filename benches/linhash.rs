use linhash::{Config, LinearHashIndex, TriggerPolicy};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const SIZES: [i64; 5] = [8, 64, 512, 4096, 32768];

fn filled(numel: i64, trigger: TriggerPolicy) -> LinearHashIndex {
    let mut index = LinearHashIndex::with_config(Config::default().with_trigger(trigger))
        .expect("default configuration is valid");

    for i in 0..numel {
        index.insert(i).expect("integer keys are valid");
    }

    index
}

fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("linhash: insertion");

    for (name, trigger) in [
        ("overflow", TriggerPolicy::OnOverflow),
        ("load factor", TriggerPolicy::on_load_factor()),
    ] {
        for numel in SIZES {
            group.bench_with_input(BenchmarkId::new(name, numel), &numel, |b, &numel| {
                let mut index = filled(numel, trigger);
                let mut key = numel;

                b.iter(|| {
                    key += 1;
                    index.insert(black_box(key))
                })
            });
        }
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("linhash: search");

    for (name, trigger) in [
        ("overflow", TriggerPolicy::OnOverflow),
        ("load factor", TriggerPolicy::on_load_factor()),
    ] {
        for numel in SIZES {
            let index = filled(numel, trigger);

            group.bench_with_input(BenchmarkId::new(name, numel), &numel, |b, &numel| {
                b.iter(|| index.search(black_box(&(numel / 2))))
            });
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insertion,
    bench_search,
);
criterion_main!(benches);
