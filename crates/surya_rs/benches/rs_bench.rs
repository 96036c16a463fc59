use criterion::{Criterion, black_box, criterion_group, criterion_main};
use surya_rs::{Body, Calculator, ModelConfig, NullSink};

fn position_bench(c: &mut Criterion) {
    let mut logged = Calculator::new();
    let mut silent = Calculator::with_sink(ModelConfig::default(), NullSink).unwrap();

    let mut group = c.benchmark_group("position");
    group.bench_function("mars_logged", |b| {
        b.iter(|| {
            logged.clear_log();
            logged.position(Body::Mars, black_box(2000), 1, 1)
        })
    });
    group.bench_function("mars_null_sink", |b| {
        b.iter(|| silent.position(Body::Mars, black_box(2000), 1, 1))
    });
    group.finish();
}

fn analysis_bench(c: &mut Criterion) {
    let mut calc = Calculator::with_sink(ModelConfig::default(), NullSink).unwrap();

    let mut group = c.benchmark_group("analysis");
    group.bench_function("lunar_phenomena", |b| {
        b.iter(|| calc.lunar_phenomena(black_box(2024), 1, 15))
    });
    group.bench_function("conjunctions", |b| {
        b.iter(|| calc.conjunctions(black_box(2024), 1, 15))
    });
    group.bench_function("validate", |b| b.iter(|| calc.validate()));
    group.finish();
}

criterion_group!(benches, position_bench, analysis_bench);
criterion_main!(benches);
