use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use connect4_engine::bitboard::Position;
use connect4_engine::engine::Engine;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    moves: &'static str,
}

// quiet positions, nothing forced, so every run pays for a full search
const CASES: &[BenchCase] = &[
    BenchCase {
        name: "empty_board",
        moves: "",
    },
    BenchCase {
        name: "centre_pair",
        moves: "4455",
    },
    BenchCase {
        name: "midgame",
        moves: "45452323",
    },
];

fn bench_play(c: &mut Criterion) {
    let mut group = c.benchmark_group("play");

    for &depth in [3usize, 4, 5, 6].iter() {
        for case in CASES.iter() {
            let position = Position::from_moves(case.moves).expect("valid move string");
            let engine = Engine::new().with_depth(depth);

            group.bench_with_input(
                BenchmarkId::new(case.name, depth),
                &position,
                |b, &position| {
                    b.iter(|| engine.play(black_box(position)).expect("playable position"))
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_play);
criterion_main!(benches);
