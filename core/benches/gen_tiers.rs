use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sweeper_core::*;

fn generate_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for level in [Level::Beginner, Level::Intermediate, Level::Expert] {
        group.bench_function(level.name(), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                Minefield::generate(black_box(level.config()), seed).unwrap()
            })
        });
    }
    group.finish();
}

fn flood_fill_empty_expert(c: &mut Criterion) {
    let (rows, cols) = Level::Expert.config().size;
    let minefield = Minefield::from_mine_coords((rows, cols), &[]).unwrap();

    c.bench_function("flood_fill/expert_empty", |b| {
        b.iter(|| {
            let mut session = Session::new(minefield.clone());
            session.reveal(black_box((rows / 2, cols / 2))).unwrap()
        })
    });
}

criterion_group!(benches, generate_levels, flood_fill_empty_expert);
criterion_main!(benches);
