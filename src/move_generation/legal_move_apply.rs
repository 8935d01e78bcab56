//! Move application with folded legality checking.
//!
//! `try_make_move` mutates the state in place and answers whether the move
//! was legal. The discipline is copy/snapshot, mutate, validate, rollback:
//! the whole position is snapshotted up front, every mutation is applied,
//! and if the mover's own king ends up attacked the snapshot is restored so
//! the caller sees a bit-for-bit identical state. Search depends on that
//! guarantee to backtrack cleanly through thousands of trial moves.

use crate::attacks::tables::AttackTables;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::move_descriptions::MoveDescription;

/// Which generated moves make-move will accept.
///
/// Quiescence search passes `CapturesOnly` so quiet moves are rejected
/// outright without simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveFilter {
    AllMoves,
    CapturesOnly,
}

/// Apply `mv` to `state`. Returns `false`, with the state unchanged, when
/// the move is filtered out or would leave the mover's king attacked.
pub fn try_make_move(
    state: &mut GameState,
    tables: &AttackTables,
    mv: MoveDescription,
    filter: MoveFilter,
) -> bool {
    if filter == MoveFilter::CapturesOnly && !mv.is_capture() {
        return false;
    }

    let color = mv.piece_color();
    let enemy = color.opposite();
    debug_assert_eq!(color, state.side_to_move, "move does not belong to side to move");

    let undo = state.snapshot();

    let source = mv.source();
    let target = mv.target();
    let source_mask = 1u64 << source;
    let target_mask = 1u64 << target;

    // Move the piece on its own bitboard.
    let kind = mv.piece_kind();
    state.pieces[color.index()][kind.index()] &= !source_mask;
    state.pieces[color.index()][kind.index()] |= target_mask;

    // Remove a directly captured enemy piece: scan its boards at the target.
    if mv.is_capture() && !mv.is_en_passant() {
        for victim in PieceKind::ALL {
            if state.pieces[enemy.index()][victim.index()] & target_mask != 0 {
                state.pieces[enemy.index()][victim.index()] &= !target_mask;
                break;
            }
        }
    }

    // En passant: the captured pawn stands behind the landing square.
    if mv.is_en_passant() {
        let victim_square = match color {
            Color::White => target - 8,
            Color::Black => target + 8,
        };
        state.pieces[enemy.index()][PieceKind::Pawn.index()] &= !(1u64 << victim_square);
    }

    // Promotion: the pawn that just arrived becomes the chosen piece.
    if let Some(promotion) = mv.promotion() {
        state.pieces[color.index()][PieceKind::Pawn.index()] &= !target_mask;
        state.pieces[color.index()][promotion.index()] |= target_mask;
    }

    // En passant is available for exactly one reply, so the square resets
    // unconditionally before a double push re-arms it.
    state.en_passant_square = None;
    if mv.is_double_pawn_push() {
        state.en_passant_square = Some(match color {
            Color::White => target - 8,
            Color::Black => target + 8,
        });
    }

    // Castling moved the king two files; relocate the matching rook.
    if mv.is_castling() {
        let rooks = &mut state.pieces[color.index()][PieceKind::Rook.index()];
        match target {
            G1 => *rooks = (*rooks & !(1u64 << H1)) | (1u64 << F1),
            C1 => *rooks = (*rooks & !(1u64 << A1)) | (1u64 << D1),
            G8 => *rooks = (*rooks & !(1u64 << H8)) | (1u64 << F8),
            C8 => *rooks = (*rooks & !(1u64 << A8)) | (1u64 << D8),
            _ => unreachable!("castling move with target {target}"),
        }
    }

    // Both squares are consulted: leaving a home square and capturing onto
    // one each revoke the corresponding right.
    state.castling_rights &= CASTLING_RIGHTS_MASK[source as usize];
    state.castling_rights &= CASTLING_RIGHTS_MASK[target as usize];

    if kind == PieceKind::Pawn || mv.is_capture() {
        state.halfmove_clock = 0;
    } else {
        state.halfmove_clock = state.halfmove_clock.saturating_add(1);
    }
    if color == Color::Black {
        state.fullmove_number = state.fullmove_number.saturating_add(1);
    }

    state.recalc_occupancy();
    state.side_to_move = enemy;

    // The mover's king must not be left attacked by the new side to move.
    if is_king_in_check(state, tables, color) {
        state.restore_snapshot(&undo);
        return false;
    }

    true
}
