//! Perft: exhaustive move-generation verification.
//!
//! Counts leaf nodes of the full game tree to a fixed depth by making every
//! legal move and restoring afterwards. Matching the published node counts
//! exercises generation, make/restore, castling, en passant, promotion, and
//! check detection in one sweep.

use crate::attacks::tables::AttackTables;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{try_make_move, MoveFilter};
use crate::move_generation::legal_move_generator::generate_moves;
use crate::moves::move_list::MoveList;

/// Leaf-node count of the legal move tree rooted at `state`.
pub fn perft(state: &mut GameState, tables: &AttackTables, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut list = MoveList::new();
    generate_moves(state, tables, &mut list);

    let mut nodes = 0u64;
    for i in 0..list.len() {
        let mv = list[i];
        let undo = state.snapshot();
        if !try_make_move(state, tables, mv, MoveFilter::AllMoves) {
            continue;
        }
        nodes += perft(state, tables, depth - 1);
        state.restore_snapshot(&undo);
    }
    nodes
}

/// Per-root-move breakdown, the classic tool for diffing against a reference
/// engine when a total disagrees.
pub fn perft_divide(
    state: &mut GameState,
    tables: &AttackTables,
    depth: u8,
) -> Vec<(crate::moves::move_descriptions::MoveDescription, u64)> {
    let mut list = MoveList::new();
    generate_moves(state, tables, &mut list);

    let mut out = Vec::new();
    for i in 0..list.len() {
        let mv = list[i];
        let undo = state.snapshot();
        if !try_make_move(state, tables, mv, MoveFilter::AllMoves) {
            continue;
        }
        let nodes = if depth <= 1 {
            1
        } else {
            perft(state, tables, depth - 1)
        };
        state.restore_snapshot(&undo);
        out.push((mv, nodes));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perft_from(fen: &str, depth: u8) -> u64 {
        let mut state = GameState::from_fen(fen).expect("valid FEN");
        perft(&mut state, AttackTables::global(), depth)
    }

    const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn startpos_shallow_depths_match_published_counts() {
        assert_eq!(perft_from(STARTPOS, 1), 20);
        assert_eq!(perft_from(STARTPOS, 2), 400);
        assert_eq!(perft_from(STARTPOS, 3), 8_902);
    }

    #[test]
    fn startpos_depth_four_matches_published_count() {
        assert_eq!(perft_from(STARTPOS, 4), 197_281);
    }

    #[test]
    #[ignore = "several-second run; exercised routinely by the criterion bench"]
    fn startpos_depth_five_matches_published_count() {
        assert_eq!(perft_from(STARTPOS, 5), 4_865_609);
    }

    #[test]
    fn tactical_middlegame_position_matches_published_counts() {
        // Heavy on castling, pins, en passant, and promotions.
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        assert_eq!(perft_from(fen, 1), 48);
        assert_eq!(perft_from(fen, 2), 2_039);
        assert_eq!(perft_from(fen, 3), 97_862);
    }

    #[test]
    fn endgame_position_with_en_passant_pins_matches_published_counts() {
        let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
        assert_eq!(perft_from(fen, 1), 14);
        assert_eq!(perft_from(fen, 2), 191);
        assert_eq!(perft_from(fen, 3), 2_812);
        assert_eq!(perft_from(fen, 4), 43_238);
    }

    #[test]
    fn promotion_heavy_position_matches_published_counts() {
        let fen = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";
        assert_eq!(perft_from(fen, 1), 6);
        assert_eq!(perft_from(fen, 2), 264);
        assert_eq!(perft_from(fen, 3), 9_467);
    }

    #[test]
    fn divide_totals_agree_with_perft() {
        let mut state = GameState::from_fen(STARTPOS).expect("valid FEN");
        let tables = AttackTables::global();
        let divided = perft_divide(&mut state, tables, 3);
        assert_eq!(divided.len(), 20);
        let total: u64 = divided.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 8_902);
    }
}
