use criterion::{black_box, criterion_group, criterion_main, Criterion};
use parashara::detectors;
use parashara::pipeline;
use parashara::{Chart, ChartContext, EngineConfig, Planet, YogaEngine};

fn sample_chart() -> Chart {
    // Leo rising, whole-sign houses
    let placements = [
        (Planet::Sun, 6, 280.0),
        (Planet::Moon, 10, 45.0),
        (Planet::Mars, 3, 200.0),
        (Planet::Mercury, 5, 265.0),
        (Planet::Jupiter, 12, 95.0),
        (Planet::Venus, 7, 300.0),
        (Planet::Saturn, 6, 290.0),
        (Planet::Rahu, 9, 15.0),
        (Planet::Ketu, 3, 195.0),
    ];
    let mut builder = Chart::builder().ascendant(5).ascendant_longitude(130.0);
    for (planet, house, lon) in placements {
        builder = builder.place(planet, house).longitude(planet, lon);
    }
    builder.build()
}

fn bench_detect(c: &mut Criterion) {
    let engine = YogaEngine::default();
    let chart = sample_chart();

    c.bench_function("detect", |b| b.iter(|| engine.detect(black_box(&chart))));
}

fn bench_run_all(c: &mut Criterion) {
    let chart = sample_chart();
    let config = EngineConfig::default();

    c.bench_function("run_all_detectors", |b| {
        b.iter(|| {
            let ctx = ChartContext::new(black_box(&chart), &config);
            detectors::run_all(&ctx)
        })
    });
}

fn bench_process(c: &mut Criterion) {
    let chart = sample_chart();
    let config = EngineConfig::default();
    let ctx = ChartContext::new(&chart, &config);
    let records = detectors::run_all(&ctx).records;

    c.bench_function("process_records", |b| {
        b.iter(|| pipeline::process(black_box(records.clone())))
    });
}

criterion_group!(benches, bench_detect, bench_run_all, bench_process);
criterion_main!(benches);
