//! Attack probes against the current position.
//!
//! `is_square_attacked` answers "could `by` capture on this square right
//! now" by intersecting each piece kind's attack set with that kind's
//! bitboard. Pawns use the inverted-color trick: white pawns attack a square
//! exactly when a black pawn standing there would attack them.

use crate::attacks::tables::AttackTables;
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::game_state::GameState;

/// Whether `square` is attacked by any piece of `by`.
pub fn is_square_attacked(
    state: &GameState,
    tables: &AttackTables,
    square: Square,
    by: Color,
) -> bool {
    let pieces = &state.pieces[by.index()];
    let occupancy = state.occupancy_all;

    if tables.pawn[by.opposite().index()][square as usize] & pieces[PieceKind::Pawn.index()] != 0 {
        return true;
    }
    if tables.knight[square as usize] & pieces[PieceKind::Knight.index()] != 0 {
        return true;
    }
    if tables.king[square as usize] & pieces[PieceKind::King.index()] != 0 {
        return true;
    }
    if tables.bishop_attacks(square, occupancy) & pieces[PieceKind::Bishop.index()] != 0 {
        return true;
    }
    if tables.rook_attacks(square, occupancy) & pieces[PieceKind::Rook.index()] != 0 {
        return true;
    }
    if tables.queen_attacks(square, occupancy) & pieces[PieceKind::Queen.index()] != 0 {
        return true;
    }

    false
}

/// Whether `color`'s king currently stands attacked.
#[inline]
pub fn is_king_in_check(state: &GameState, tables: &AttackTables, color: Color) -> bool {
    is_square_attacked(state, tables, state.king_square(color), color.opposite())
}
