use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use degen_core::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn sparse_board(size: Coord, mines: CellCount, seed: u64) -> Board {
    let mut board = Board::new(size, size).unwrap();
    let mut rng = SmallRng::seed_from_u64(seed);
    board.place_mines(mines, (size / 2, size / 2), &mut rng).unwrap();
    board
}

fn bench_placement(c: &mut Criterion) {
    c.bench_function("place hard", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            black_box(sparse_board(24, 99, seed))
        })
    });

    c.bench_function("place crowded 24x24", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            black_box(sparse_board(24, 570, seed))
        })
    });
}

fn bench_flood_fill(c: &mut Criterion) {
    let board = sparse_board(255, 1, 7);
    c.bench_function("flood 255x255", |b| {
        b.iter_batched_ref(
            || board.clone(),
            |board| black_box(board.reveal((127, 127))),
            criterion::BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_placement, bench_flood_fill);
criterion_main!(benches);
