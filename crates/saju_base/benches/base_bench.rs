use criterion::{Criterion, black_box, criterion_group, criterion_main};
use saju_base::{
    Branch, Pillar, build_chart, element_vector, index_of, interaction_events, strength,
};
use saju_time::LocalDateTime;

fn sexagenary_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("sexagenary");
    group.bench_function("index_of", |b| {
        let p = Pillar::from_index(47);
        b.iter(|| index_of(black_box(p.stem), black_box(p.branch)))
    });
    group.finish();
}

fn chart_bench(c: &mut Criterion) {
    let birth = LocalDateTime::new(1990, 7, 15, 8, 30).unwrap();
    let chart = build_chart(&birth).unwrap().chart;

    let mut group = c.benchmark_group("chart");
    group.bench_function("build_chart", |b| b.iter(|| build_chart(black_box(&birth))));
    group.bench_function("element_vector_hidden", |b| {
        b.iter(|| element_vector(black_box(&chart), true))
    });
    group.bench_function("interaction_events", |b| {
        let natal = chart.branches();
        b.iter(|| interaction_events(black_box(&natal), black_box(Branch::O)))
    });
    group.bench_function("strength", |b| b.iter(|| strength(black_box(&chart))));
    group.finish();
}

criterion_group!(benches, sexagenary_bench, chart_bench);
criterion_main!(benches);
