//! Precomputed attack tables.
//!
//! Built once at startup from board geometry alone and read-only afterwards.
//! Leapers are direct per-square lookups; sliders go through the magic index
//! `((occupancy & mask) * magic) >> (64 - relevant_bits)` into full-size
//! per-square tables (4096 entries for rooks, 512 for bishops).

use std::sync::OnceLock;

use crate::attacks::leapers::{king_attack_mask, knight_attack_mask, pawn_attack_mask};
use crate::attacks::magics::{
    BISHOP_MAGICS, BISHOP_RELEVANT_BITS, ROOK_MAGICS, ROOK_RELEVANT_BITS,
};
use crate::attacks::sliders::{
    relevant_occupancy_mask, set_occupancy, sliding_attack, BISHOP_DELTAS, ROOK_DELTAS,
};
use crate::game_state::chess_types::{Color, Square};

const ROOK_TABLE_SIZE: usize = 1 << 12;
const BISHOP_TABLE_SIZE: usize = 1 << 9;

/// All per-square attack lookups used by move generation and attack probes.
pub struct AttackTables {
    pub pawn: [[u64; 64]; 2],
    pub knight: [u64; 64],
    pub king: [u64; 64],

    rook_masks: [u64; 64],
    bishop_masks: [u64; 64],
    rook_table: Vec<[u64; ROOK_TABLE_SIZE]>,
    bishop_table: Vec<[u64; BISHOP_TABLE_SIZE]>,
}

static ATTACK_TABLES: OnceLock<AttackTables> = OnceLock::new();

impl AttackTables {
    /// Process-wide tables, built on first use.
    pub fn global() -> &'static AttackTables {
        ATTACK_TABLES.get_or_init(AttackTables::new)
    }

    /// Build every table. Pure function of board geometry; cannot fail at
    /// runtime, but panics if a shipped magic number turns out to collide,
    /// which is a broken configuration rather than a recoverable condition.
    pub fn new() -> Self {
        let mut pawn = [[0u64; 64]; 2];
        let mut knight = [0u64; 64];
        let mut king = [0u64; 64];
        let mut rook_masks = [0u64; 64];
        let mut bishop_masks = [0u64; 64];
        let mut rook_table = vec![[0u64; ROOK_TABLE_SIZE]; 64];
        let mut bishop_table = vec![[0u64; BISHOP_TABLE_SIZE]; 64];

        for square in 0..64 {
            pawn[Color::White.index()][square] = pawn_attack_mask(Color::White, square);
            pawn[Color::Black.index()][square] = pawn_attack_mask(Color::Black, square);
            knight[square] = knight_attack_mask(square);
            king[square] = king_attack_mask(square);

            rook_masks[square] = relevant_occupancy_mask(square, &ROOK_DELTAS);
            bishop_masks[square] = relevant_occupancy_mask(square, &BISHOP_DELTAS);

            fill_slider_table(
                square,
                rook_masks[square],
                ROOK_RELEVANT_BITS[square],
                ROOK_MAGICS[square],
                &ROOK_DELTAS,
                &mut rook_table[square],
            );
            fill_slider_table(
                square,
                bishop_masks[square],
                BISHOP_RELEVANT_BITS[square],
                BISHOP_MAGICS[square],
                &BISHOP_DELTAS,
                &mut bishop_table[square],
            );
        }

        Self {
            pawn,
            knight,
            king,
            rook_masks,
            bishop_masks,
            rook_table,
            bishop_table,
        }
    }

    /// Rook attack set for the current occupancy.
    #[inline]
    pub fn rook_attacks(&self, square: Square, occupancy: u64) -> u64 {
        let square = square as usize;
        let relevant = occupancy & self.rook_masks[square];
        let index =
            (relevant.wrapping_mul(ROOK_MAGICS[square]) >> (64 - ROOK_RELEVANT_BITS[square])) as usize;
        self.rook_table[square][index]
    }

    /// Bishop attack set for the current occupancy.
    #[inline]
    pub fn bishop_attacks(&self, square: Square, occupancy: u64) -> u64 {
        let square = square as usize;
        let relevant = occupancy & self.bishop_masks[square];
        let index = (relevant.wrapping_mul(BISHOP_MAGICS[square])
            >> (64 - BISHOP_RELEVANT_BITS[square])) as usize;
        self.bishop_table[square][index]
    }

    /// Queen attacks are the union of the rook and bishop lookups.
    #[inline]
    pub fn queen_attacks(&self, square: Square, occupancy: u64) -> u64 {
        self.rook_attacks(square, occupancy) | self.bishop_attacks(square, occupancy)
    }
}

impl Default for AttackTables {
    fn default() -> Self {
        Self::new()
    }
}

/// Populate one square's slider table, verifying the magic mapping while
/// filling: two distinct attack sets landing on one index is a collision,
/// meaning the shipped constant is wrong.
fn fill_slider_table(
    square: usize,
    mask: u64,
    relevant_bits: u32,
    magic: u64,
    deltas: &[(i8, i8)],
    table: &mut [u64],
) {
    let mut written = vec![false; table.len()];

    for index in 0..(1usize << relevant_bits) {
        let occupancy = set_occupancy(index, relevant_bits, mask);
        let attacks = sliding_attack(square, deltas, occupancy);
        let slot = (occupancy.wrapping_mul(magic) >> (64 - relevant_bits)) as usize;

        if written[slot] && table[slot] != attacks {
            panic!("magic number collision on square {square}: fatal configuration error");
        }
        table[slot] = attacks;
        written[slot] = true;
    }
}
