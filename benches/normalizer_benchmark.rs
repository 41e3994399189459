use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use rugeo::fields::extract_fields;
use rugeo::normalizer::normalize;
use rugeo::tokenizer::ngrams;

fn bench_normalizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("Normalizer");

    group.bench_function("normalize_short", |b| {
        b.iter(|| normalize(black_box("Мира 25")))
    });

    group.bench_function("normalize_full", |b| {
        b.iter(|| normalize(black_box(".г Москва, ул. Тверская, д. 10, корп. 2, стр. 1, лит. А")))
    });

    let canonical = normalize("б-р Яна Райниса д.4 корп.1 стр.2");
    group.bench_function("extract_fields", |b| {
        b.iter(|| extract_fields(black_box(&canonical)))
    });

    group.bench_function("ngrams_canonical", |b| {
        b.iter(|| ngrams(black_box(&canonical), 3))
    });

    group.finish();
}

criterion_group!(benches, bench_normalizer);
criterion_main!(benches);
