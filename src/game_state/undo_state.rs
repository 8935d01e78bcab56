//! Full-state snapshot records for make/unmake.
//!
//! The engine restores positions by copying whole state back, never by
//! incrementally inverting a move. Reconstructing captured-piece identity and
//! castling-rights history from a move alone is where engines breed subtle
//! bugs; a full snapshot makes restore trivially bit-exact.

use crate::game_state::chess_types::*;

/// Complete copy of the board state, taken before a trial move.
///
/// `GameState::snapshot` produces one; `GameState::restore_snapshot` puts the
/// position back exactly. Equality is derived so tests can assert the
/// round-trip bit for bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub pieces: [[u64; 6]; 2],
    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}
