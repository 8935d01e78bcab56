use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use quince_chess::attacks::tables::AttackTables;
use quince_chess::game_state::game_state::GameState;
use quince_chess::search::board_scoring::MaterialPstScorer;
use quince_chess::search::negamax::{search_position, SearchConfig};

const POSITIONS: &[(&str, &str)] = &[
    (
        "startpos",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "open_middlegame",
        "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
    ),
    (
        "rook_endgame",
        "8/5pk1/R7/5r2/8/8/5PK1/8 w - - 0 1",
    ),
];

fn search_benchmark(c: &mut Criterion) {
    let tables = AttackTables::global();
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    for &(name, fen) in POSITIONS {
        for depth in [3u8, 4, 5] {
            group.bench_with_input(BenchmarkId::new(name, depth), &depth, |bencher, &depth| {
                let config = SearchConfig {
                    max_depth: depth,
                    movetime_ms: None,
                };
                bencher.iter(|| {
                    let mut state = GameState::from_fen(fen).expect("bench FEN is valid");
                    let result =
                        search_position(black_box(&mut state), tables, &MaterialPstScorer, &config);
                    assert!(result.best_move.is_some());
                    result.nodes
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, search_benchmark);
criterion_main!(benches);
