use criterion::{Criterion, black_box, criterion_group, criterion_main};
use saju_base::{BirthInput, Pillar, build_chart};
use saju_fortune::{
    NatalContext, ReadingConfig, ScoringConfig, build_reading, compute_volatility,
    pick_deterministic, score_two_stage, seed_hash,
};

fn score_bench(c: &mut Criterion) {
    let birth = BirthInput::parse("1990-07-15", "08:30", "F").unwrap();
    let chart = build_chart(&birth.instant).unwrap().chart;
    let natal = NatalContext::new(&chart);
    let cfg = ScoringConfig::default();

    let mut group = c.benchmark_group("score");
    group.bench_function("score_two_stage", |b| {
        let pillar = Pillar::from_index(23);
        b.iter(|| score_two_stage(black_box(&natal), black_box(pillar), &cfg))
    });
    group.bench_function("all_sixty_pillars", |b| {
        b.iter(|| {
            (0..60u8)
                .map(|i| score_two_stage(&natal, Pillar::from_index(i), &cfg).0.categories.love)
                .sum::<f64>()
        })
    });
    group.bench_function("volatility_71", |b| {
        let totals: Vec<f64> = (0..71).map(|i| f64::from(40 + (i * 37) % 55)).collect();
        b.iter(|| compute_volatility(black_box(&totals)))
    });
    group.finish();
}

fn reading_bench(c: &mut Criterion) {
    let birth = BirthInput::parse("1990-07-15", "08:30", "F").unwrap();
    let cfg = ReadingConfig::default();

    let mut group = c.benchmark_group("reading");
    group.bench_function("build_reading", |b| {
        b.iter(|| build_reading(black_box(&birth), &cfg))
    });
    group.finish();
}

fn text_bench(c: &mut Criterion) {
    let pool: Vec<String> = (0..16).map(|i| format!("phrase {i}")).collect();

    let mut group = c.benchmark_group("text");
    group.bench_function("seed_hash", |b| {
        b.iter(|| seed_hash(black_box("홍길동|month|2024-03|career")))
    });
    group.bench_function("pick_deterministic", |b| {
        b.iter(|| pick_deterministic(black_box(&pool), black_box("홍길동|year|2024|love")))
    });
    group.finish();
}

criterion_group!(benches, score_bench, reading_bench, text_bench);
criterion_main!(benches);
