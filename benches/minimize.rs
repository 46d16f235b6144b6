use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mealy_moore::prelude::*;

/// A ring of `size` states where `x0` advances and `x1` returns to the start. Outputs
/// repeat with period three, so minimization has something to merge.
fn ring(size: u32) -> MealyTable {
    let states = (0..size).map(|i| State::new('q', i)).collect();
    let transitions = vec![State::new('x', 0), State::new('x', 1)];
    let advance = (0..size)
        .map(|i| MealyState::new(State::new('q', (i + 1) % size), Signal::new('a', i % 3)))
        .collect();
    let reset = (0..size)
        .map(|i| MealyState::new(State::new('q', 0), Signal::new('a', (i + 1) % 2)))
        .collect();
    MealyTable::new(states, transitions, vec![advance, reset]).unwrap()
}

fn conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("mealy_to_moore");
    for size in [16, 64, 256] {
        let table = ring(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| MooreTable::from_mealy(black_box(table)).unwrap())
        });
    }
    group.finish();
}

fn minimization(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimize");
    for size in [16, 64, 256] {
        let mealy = ring(size);
        let moore = MooreTable::from_mealy(&mealy).unwrap();
        group.bench_with_input(BenchmarkId::new("mealy", size), &mealy, |b, table| {
            b.iter(|| {
                let mut table = table.clone();
                table.minimize().unwrap();
                table
            })
        });
        group.bench_with_input(BenchmarkId::new("moore", size), &moore, |b, table| {
            b.iter(|| {
                let mut table = table.clone();
                table.minimize().unwrap();
                table
            })
        });
    }
    group.finish();
}

criterion_group!(benches, conversion, minimization);
criterion_main!(benches);
