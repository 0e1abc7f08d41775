use criterion::{black_box, criterion_group, criterion_main, Criterion};
use parashara::detectors::nitya::band_index;
use parashara::pipeline::normalize::{lookup_key, normalize};
use parashara::rules::{DignityEvaluator, HouseLordMap};
use parashara::Planet;

fn bench_lord_map(c: &mut Criterion) {
    c.bench_function("house_lord_map", |b| {
        b.iter(|| {
            for asc in 1..=12u8 {
                let map = HouseLordMap::for_ascendant(black_box(asc)).unwrap();
                black_box(map.houses_ruled_by(Planet::Saturn));
            }
        })
    });
}

fn bench_dignity(c: &mut Criterion) {
    let evaluator = DignityEvaluator::new();

    c.bench_function("dignity", |b| {
        b.iter(|| {
            for sign in 1..=12u8 {
                black_box(evaluator.dignity(black_box(Planet::Jupiter), sign).unwrap());
            }
        })
    });
}

fn bench_normalize(c: &mut Criterion) {
    let names = [
        "Gajakesari",
        "gaja_kesari yoga",
        "Manglik Dosha",
        "Budhaditya Yoga",
        "7th Lord in 10th House",
        "Imaginary Yoga",
    ];

    c.bench_function("normalize_names", |b| {
        b.iter(|| {
            for name in names {
                black_box(normalize(black_box(name)));
            }
        })
    });
    c.bench_function("lookup_key", |b| {
        b.iter(|| lookup_key(black_box("Dharma-Karmadhipati  Yoga")))
    });
}

fn bench_nitya_band(c: &mut Criterion) {
    c.bench_function("nitya_band_index", |b| {
        b.iter(|| band_index(black_box(45.0), black_box(280.0)))
    });
}

criterion_group!(benches, bench_lord_map, bench_dignity, bench_normalize, bench_nitya_band);
criterion_main!(benches);
