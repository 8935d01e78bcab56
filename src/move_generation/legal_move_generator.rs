//! Pseudo-legal move generation.
//!
//! Produces every move consistent with piece movement and occupancy for the
//! side to move. King safety is *not* checked here: make-move has to simulate
//! the move anyway to validate it, so legality is folded into
//! `try_make_move`'s rejection instead of a separate filter pass.

use crate::attacks::tables::AttackTables;
use crate::game_state::chess_rules::{PROMOTION_RANKS, RANK_4, RANK_5};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::moves::move_descriptions::{
    MoveDescription, FLAG_CAPTURE, FLAG_CASTLING, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT,
};
use crate::moves::move_list::MoveList;

/// Generate all pseudo-legal moves for the side to move into `list`.
///
/// The list is reset first; afterwards it holds every generated move in
/// generation order (ordering quality is the search's concern, not ours).
pub fn generate_moves(state: &GameState, tables: &AttackTables, list: &mut MoveList) {
    list.clear();

    generate_pawn_pushes(state, list);
    generate_pawn_captures(state, tables, list);
    generate_castling_moves(state, tables, list);
    generate_leaper_moves(state, tables, list, PieceKind::Knight);
    generate_slider_moves(state, tables, list, PieceKind::Bishop);
    generate_slider_moves(state, tables, list, PieceKind::Rook);
    generate_slider_moves(state, tables, list, PieceKind::Queen);
    generate_leaper_moves(state, tables, list, PieceKind::King);
}

/// Kind of the enemy piece standing on `target`. Caller guarantees the
/// square is enemy-occupied.
#[inline]
fn enemy_kind_on(state: &GameState, enemy: Color, target: Square) -> Option<PieceKind> {
    let mask = 1u64 << target;
    PieceKind::ALL
        .into_iter()
        .find(|kind| state.pieces[enemy.index()][kind.index()] & mask != 0)
}

/// Append a push move, expanded into the four promotion choices when it
/// lands on the back rank. No plain move is generated for a back-rank push.
fn push_pawn_move(
    list: &mut MoveList,
    source: Square,
    target: Square,
    color: Color,
    captured: Option<PieceKind>,
    flags: u32,
) {
    if (1u64 << target) & PROMOTION_RANKS != 0 {
        for promotion in PieceKind::PROMOTIONS {
            list.push(MoveDescription::new(
                source,
                target,
                color,
                PieceKind::Pawn,
                captured,
                Some(promotion),
                flags,
            ));
        }
    } else {
        list.push(MoveDescription::new(
            source,
            target,
            color,
            PieceKind::Pawn,
            captured,
            None,
            flags,
        ));
    }
}

fn generate_pawn_pushes(state: &GameState, list: &mut MoveList) {
    let color = state.side_to_move;
    let pawns = state.pieces[color.index()][PieceKind::Pawn.index()];
    let occupancy = state.occupancy_all;

    let (mut single_targets, mut double_targets) = match color {
        Color::White => (
            (pawns << 8) & !occupancy,
            (pawns << 16) & RANK_4 & !(occupancy | (occupancy << 8)),
        ),
        Color::Black => (
            (pawns >> 8) & !occupancy,
            (pawns >> 16) & RANK_5 & !(occupancy | (occupancy >> 8)),
        ),
    };

    while single_targets != 0 {
        let target = single_targets.trailing_zeros() as Square;
        single_targets &= single_targets - 1;
        let source = match color {
            Color::White => target - 8,
            Color::Black => target + 8,
        };
        push_pawn_move(list, source, target, color, None, 0);
    }

    while double_targets != 0 {
        let target = double_targets.trailing_zeros() as Square;
        double_targets &= double_targets - 1;
        let source = match color {
            Color::White => target - 16,
            Color::Black => target + 16,
        };
        list.push(MoveDescription::new(
            source,
            target,
            color,
            PieceKind::Pawn,
            None,
            None,
            FLAG_DOUBLE_PAWN_PUSH,
        ));
    }
}

fn generate_pawn_captures(state: &GameState, tables: &AttackTables, list: &mut MoveList) {
    let color = state.side_to_move;
    let enemy = color.opposite();
    let enemy_occupancy = state.occupancy_by_color[enemy.index()];
    let mut pawns = state.pieces[color.index()][PieceKind::Pawn.index()];

    while pawns != 0 {
        let source = pawns.trailing_zeros() as Square;
        pawns &= pawns - 1;
        let attack_mask = tables.pawn[color.index()][source as usize];

        let mut captures = attack_mask & enemy_occupancy;
        while captures != 0 {
            let target = captures.trailing_zeros() as Square;
            captures &= captures - 1;
            let captured = enemy_kind_on(state, enemy, target);
            push_pawn_move(list, source, target, color, captured, FLAG_CAPTURE);
        }

        // En passant lands on an empty square; the victim sits behind it.
        if let Some(ep_square) = state.en_passant_square {
            if attack_mask & (1u64 << ep_square) != 0 {
                list.push(MoveDescription::new(
                    source,
                    ep_square,
                    color,
                    PieceKind::Pawn,
                    Some(PieceKind::Pawn),
                    None,
                    FLAG_CAPTURE | FLAG_EN_PASSANT,
                ));
            }
        }
    }
}

fn generate_castling_moves(state: &GameState, tables: &AttackTables, list: &mut MoveList) {
    let color = state.side_to_move;
    let enemy = color.opposite();
    let occupancy = state.occupancy_all;

    // Per side: (right bit, king start, kingside transit/landing, queenside
    // path). Queenside needs the b-, c-, and d-file squares all empty: the
    // rook crosses b and d, the king crosses d and lands on c.
    let (kingside_right, queenside_right, king_from, f_sq, g_sq, b_sq, c_sq, d_sq) = match color {
        Color::White => (
            CASTLE_WHITE_KINGSIDE,
            CASTLE_WHITE_QUEENSIDE,
            E1,
            F1,
            G1,
            B1,
            C1,
            D1,
        ),
        Color::Black => (
            CASTLE_BLACK_KINGSIDE,
            CASTLE_BLACK_QUEENSIDE,
            E8,
            F8,
            G8,
            B8,
            C8,
            D8,
        ),
    };

    if state.castling_rights & kingside_right != 0
        && occupancy & ((1u64 << f_sq) | (1u64 << g_sq)) == 0
        && !is_square_attacked(state, tables, king_from, enemy)
        && !is_square_attacked(state, tables, f_sq, enemy)
    {
        // The landing square's safety falls out of make-move's king check.
        list.push(MoveDescription::new(
            king_from,
            g_sq,
            color,
            PieceKind::King,
            None,
            None,
            FLAG_CASTLING,
        ));
    }

    if state.castling_rights & queenside_right != 0
        && occupancy & ((1u64 << b_sq) | (1u64 << c_sq) | (1u64 << d_sq)) == 0
        && !is_square_attacked(state, tables, king_from, enemy)
        && !is_square_attacked(state, tables, d_sq, enemy)
    {
        list.push(MoveDescription::new(
            king_from,
            c_sq,
            color,
            PieceKind::King,
            None,
            None,
            FLAG_CASTLING,
        ));
    }
}

fn generate_leaper_moves(
    state: &GameState,
    tables: &AttackTables,
    list: &mut MoveList,
    kind: PieceKind,
) {
    let color = state.side_to_move;
    let enemy = color.opposite();
    let own_occupancy = state.occupancy_by_color[color.index()];
    let enemy_occupancy = state.occupancy_by_color[enemy.index()];
    let mut sources = state.pieces[color.index()][kind.index()];

    while sources != 0 {
        let source = sources.trailing_zeros() as Square;
        sources &= sources - 1;

        let attack_table = match kind {
            PieceKind::Knight => &tables.knight,
            PieceKind::King => &tables.king,
            _ => unreachable!("leaper generation called for {kind:?}"),
        };
        let mut targets = attack_table[source as usize] & !own_occupancy;

        while targets != 0 {
            let target = targets.trailing_zeros() as Square;
            targets &= targets - 1;

            let is_capture = enemy_occupancy & (1u64 << target) != 0;
            let captured = if is_capture {
                enemy_kind_on(state, enemy, target)
            } else {
                None
            };
            list.push(MoveDescription::new(
                source,
                target,
                color,
                kind,
                captured,
                None,
                if is_capture { FLAG_CAPTURE } else { 0 },
            ));
        }
    }
}

fn generate_slider_moves(
    state: &GameState,
    tables: &AttackTables,
    list: &mut MoveList,
    kind: PieceKind,
) {
    let color = state.side_to_move;
    let enemy = color.opposite();
    let own_occupancy = state.occupancy_by_color[color.index()];
    let enemy_occupancy = state.occupancy_by_color[enemy.index()];
    let occupancy = state.occupancy_all;
    let mut sources = state.pieces[color.index()][kind.index()];

    while sources != 0 {
        let source = sources.trailing_zeros() as Square;
        sources &= sources - 1;

        let attacks = match kind {
            PieceKind::Bishop => tables.bishop_attacks(source, occupancy),
            PieceKind::Rook => tables.rook_attacks(source, occupancy),
            PieceKind::Queen => tables.queen_attacks(source, occupancy),
            _ => unreachable!("slider generation called for {kind:?}"),
        };
        let mut targets = attacks & !own_occupancy;

        while targets != 0 {
            let target = targets.trailing_zeros() as Square;
            targets &= targets - 1;

            let is_capture = enemy_occupancy & (1u64 << target) != 0;
            let captured = if is_capture {
                enemy_kind_on(state, enemy, target)
            } else {
                None
            };
            list.push(MoveDescription::new(
                source,
                target,
                color,
                kind,
                captured,
                None,
                if is_capture { FLAG_CAPTURE } else { 0 },
            ));
        }
    }
}
