//! Core board state representation.
//!
//! `GameState` is the central model for the engine. It stores piece
//! bitboards, occupancy caches, the side to move, castling rights, and the
//! en-passant square, and supports whole-state snapshot/restore used by
//! make/unmake workflows and search backtracking.

use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::UndoState;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

/// Bitboard position state optimized for fast move making and restoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // --- Bitboard representation ---
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    // Occupancy caches, always the fold of the piece boards.
    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl GameState {
    /// Empty board, white to move, no rights. Pieces are placed by the caller.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, String> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Colored piece occupying `square`, if any.
    pub fn piece_on_square(&self, square: Square) -> Option<(Color, PieceKind)> {
        let mask = 1u64 << square;
        if self.occupancy_all & mask == 0 {
            return None;
        }
        let color = if self.occupancy_by_color[Color::White.index()] & mask != 0 {
            Color::White
        } else {
            Color::Black
        };
        for kind in PieceKind::ALL {
            if self.pieces[color.index()][kind.index()] & mask != 0 {
                return Some((color, kind));
            }
        }
        None
    }

    /// Square of `color`'s king.
    ///
    /// # Panics
    /// Panics when that king is missing; a kingless position is a broken
    /// precondition, not a state this engine recovers from.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        let king = self.pieces[color.index()][PieceKind::King.index()];
        assert!(king != 0, "position has no {color:?} king");
        king.trailing_zeros() as Square
    }

    /// Rebuild the occupancy caches from the twelve piece boards.
    #[inline]
    pub fn recalc_occupancy(&mut self) {
        self.occupancy_by_color[Color::White.index()] = self.pieces[Color::White.index()]
            .iter()
            .fold(0u64, |acc, bb| acc | bb);
        self.occupancy_by_color[Color::Black.index()] = self.pieces[Color::Black.index()]
            .iter()
            .fold(0u64, |acc, bb| acc | bb);
        self.occupancy_all = self.occupancy_by_color[Color::White.index()]
            | self.occupancy_by_color[Color::Black.index()];
    }

    /// Capture the whole state before a trial move.
    #[inline]
    pub fn snapshot(&self) -> UndoState {
        UndoState {
            pieces: self.pieces,
            occupancy_by_color: self.occupancy_by_color,
            occupancy_all: self.occupancy_all,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant_square: self.en_passant_square,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    /// Restore the exact state captured by [`GameState::snapshot`].
    #[inline]
    pub fn restore_snapshot(&mut self, undo: &UndoState) {
        self.pieces = undo.pieces;
        self.occupancy_by_color = undo.occupancy_by_color;
        self.occupancy_all = undo.occupancy_all;
        self.side_to_move = undo.side_to_move;
        self.castling_rights = undo.castling_rights;
        self.en_passant_square = undo.en_passant_square;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
    }

    /// Structural invariants: piece boards pairwise disjoint and occupancy
    /// caches equal to their folds. Test/debug support.
    pub fn occupancy_is_consistent(&self) -> bool {
        let mut seen = 0u64;
        for color in [Color::White, Color::Black] {
            for kind in PieceKind::ALL {
                let bb = self.pieces[color.index()][kind.index()];
                if seen & bb != 0 {
                    return false;
                }
                seen |= bb;
            }
        }

        let white = self.pieces[Color::White.index()]
            .iter()
            .fold(0u64, |acc, bb| acc | bb);
        let black = self.pieces[Color::Black.index()]
            .iter()
            .fold(0u64, |acc, bb| acc | bb);

        self.occupancy_by_color[Color::White.index()] == white
            && self.occupancy_by_color[Color::Black.index()] == black
            && self.occupancy_all == (white | black)
    }
}
