//! FEN-to-GameState parser.
//!
//! Builds fully populated board state from a Forsyth-Edwards Notation
//! string. The clock fields are optional: the interface contract's short
//! form (`placement side castling ep`) and the full six-field form both
//! parse. Malformed input is an error; there is no partial recovery.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<GameState, String> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or("Missing board layout in FEN")?;
    let side_part = parts.next().ok_or("Missing side-to-move in FEN")?;
    let castling_part = parts.next().ok_or("Missing castling rights in FEN")?;
    let en_passant_part = parts.next().ok_or("Missing en-passant square in FEN")?;
    let halfmove_part = parts.next();
    let fullmove_part = parts.next();

    if parts.next().is_some() {
        return Err("FEN has extra trailing fields".to_owned());
    }

    let mut state = GameState::new_empty();

    parse_board(board_part, &mut state)?;
    state.side_to_move = parse_side_to_move(side_part)?;
    state.castling_rights = parse_castling_rights(castling_part)?;
    state.en_passant_square = parse_en_passant_square(en_passant_part)?;
    state.halfmove_clock = match halfmove_part {
        Some(text) => text
            .parse::<u16>()
            .map_err(|_| format!("Invalid halfmove clock: {text}"))?,
        None => 0,
    };
    state.fullmove_number = match fullmove_part {
        Some(text) => text
            .parse::<u16>()
            .map_err(|_| format!("Invalid fullmove number: {text}"))?,
        None => 1,
    };

    state.recalc_occupancy();
    Ok(state)
}

fn parse_board(board_part: &str, state: &mut GameState) -> Result<(), String> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err("Board layout must contain 8 ranks".to_owned());
    }

    // FEN runs rank 8 down to rank 1, each rank file a through h.
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(format!("Invalid empty-square count '{ch}'"));
                }
                file += empty_count as usize;
                continue;
            }

            let (color, kind) = piece_from_fen_char(ch)
                .ok_or_else(|| format!("Invalid piece character '{ch}' in board layout"))?;

            if file >= 8 {
                return Err("Board rank has too many files".to_owned());
            }

            let square = board_rank * 8 + file;
            state.pieces[color.index()][kind.index()] |= 1u64 << square;
            file += 1;
        }

        if file != 8 {
            return Err("Board rank does not sum to 8 files".to_owned());
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, String> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(format!("Invalid side-to-move field: {side_part}")),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, String> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => return Err(format!("Invalid castling rights character: {ch}")),
        }
    }
    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, String> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    Ok(Some(algebraic_to_square(en_passant_part)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    #[test]
    fn starting_fen_parses_to_a_consistent_position() {
        let state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert!(state.occupancy_is_consistent());
        assert_eq!(state.side_to_move, Color::White);
        assert_eq!(state.castling_rights, CASTLE_ALL);
        assert_eq!(state.halfmove_clock, 0);
        assert_eq!(state.fullmove_number, 1);
    }

    #[test]
    fn short_form_without_clocks_parses_with_defaults() {
        let state = parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -")
            .expect("short FEN should parse");
        assert_eq!(state.halfmove_clock, 0);
        assert_eq!(state.fullmove_number, 1);
    }

    #[test]
    fn en_passant_square_and_partial_rights_parse() {
        let state = parse_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w Kq d6 0 3")
            .expect("valid FEN");
        assert_eq!(state.en_passant_square, Some(43));
        assert_eq!(state.castling_rights, CASTLE_WHITE_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
    }

    #[test]
    fn malformed_fens_are_rejected_not_guessed() {
        assert!(parse_fen("").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq -").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq -").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq -").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -").is_err());
        assert!(parse_fen("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -").is_err());
        assert!(parse_fen("rnbXkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -").is_err());
    }
}
