use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use quince_chess::attacks::tables::AttackTables;
use quince_chess::game_state::game_state::GameState;
use quince_chess::move_generation::perft::perft;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
    expected_nodes: &'static [u64],
}

const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const CASES_QUICK: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: STARTPOS_FEN,
        expected_nodes: &[20, 400, 8_902],
    },
    BenchCase {
        name: "tactical_middlegame",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_nodes: &[48, 2_039],
    },
    BenchCase {
        name: "pinned_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2_812],
    },
];

const CASES_STANDARD: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: STARTPOS_FEN,
        expected_nodes: &[20, 400, 8_902, 197_281, 4_865_609],
    },
    BenchCase {
        name: "tactical_middlegame",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_nodes: &[48, 2_039, 97_862],
    },
    BenchCase {
        name: "pinned_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2_812, 43_238, 674_624],
    },
    BenchCase {
        name: "promotion_heavy",
        fen: "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        expected_nodes: &[6, 264, 9_467, 422_333],
    },
];

fn selected_cases() -> &'static [BenchCase] {
    match std::env::var("QUINCE_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("standard") => CASES_STANDARD,
        _ => CASES_QUICK,
    }
}

fn perft_benchmark(c: &mut Criterion) {
    let tables = AttackTables::global();
    let mut group = c.benchmark_group("perft");

    for case in selected_cases() {
        for (depth_idx, &expected) in case.expected_nodes.iter().enumerate() {
            let depth = (depth_idx + 1) as u8;
            group.throughput(Throughput::Elements(expected));
            group.bench_with_input(
                BenchmarkId::new(case.name, depth),
                &depth,
                |bencher, &depth| {
                    let mut state = GameState::from_fen(case.fen).expect("bench FEN is valid");
                    bencher.iter(|| {
                        let nodes = perft(black_box(&mut state), tables, depth);
                        assert_eq!(nodes, expected, "perft mismatch in {}", case.name);
                        nodes
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, perft_benchmark);
criterion_main!(benches);
