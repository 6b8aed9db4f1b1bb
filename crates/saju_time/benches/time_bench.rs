use criterion::{Criterion, black_box, criterion_group, criterion_main};
use saju_time::{
    LocalDateTime, SolarTerm, boundaries_for_civil_year, boundary_after, boundary_for,
    gregorian_to_jdn,
};

fn calendar_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("calendar");
    group.bench_function("gregorian_to_jdn", |b| {
        b.iter(|| gregorian_to_jdn(black_box(2024), black_box(2), black_box(4)))
    });
    group.bench_function("local_minutes_roundtrip", |b| {
        let t = LocalDateTime::new(2024, 2, 4, 10, 0).unwrap();
        b.iter(|| LocalDateTime::from_minutes(black_box(t).to_minutes()))
    });
    group.finish();
}

fn solar_term_bench(c: &mut Criterion) {
    let birth = LocalDateTime::new(1990, 7, 15, 8, 30).unwrap();

    let mut group = c.benchmark_group("solar_term");
    group.bench_function("boundary_for", |b| {
        b.iter(|| boundary_for(black_box(2024), SolarTerm::Lichun))
    });
    group.bench_function("boundaries_for_civil_year", |b| {
        b.iter(|| boundaries_for_civil_year(black_box(2024)))
    });
    group.bench_function("boundary_after", |b| {
        b.iter(|| boundary_after(black_box(&birth)))
    });
    group.finish();
}

criterion_group!(benches, calendar_bench, solar_term_bench);
criterion_main!(benches);
