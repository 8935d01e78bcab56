//! GameState-to-FEN serializer, the inverse of the parser.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::utils::algebraic::square_to_algebraic;

pub fn generate_fen(state: &GameState) -> String {
    let mut fen = String::with_capacity(90);

    for board_rank in (0..8).rev() {
        let mut empty_run = 0u32;
        for file in 0..8 {
            let square = (board_rank * 8 + file) as Square;
            match state.piece_on_square(square) {
                Some((color, kind)) => {
                    if empty_run > 0 {
                        fen.push(char::from(b'0' + empty_run as u8));
                        empty_run = 0;
                    }
                    fen.push(piece_to_fen_char(color, kind));
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            fen.push(char::from(b'0' + empty_run as u8));
        }
        if board_rank > 0 {
            fen.push('/');
        }
    }

    fen.push(' ');
    fen.push(match state.side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    });

    fen.push(' ');
    if state.castling_rights == 0 {
        fen.push('-');
    } else {
        if state.castling_rights & CASTLE_WHITE_KINGSIDE != 0 {
            fen.push('K');
        }
        if state.castling_rights & CASTLE_WHITE_QUEENSIDE != 0 {
            fen.push('Q');
        }
        if state.castling_rights & CASTLE_BLACK_KINGSIDE != 0 {
            fen.push('k');
        }
        if state.castling_rights & CASTLE_BLACK_QUEENSIDE != 0 {
            fen.push('q');
        }
    }

    fen.push(' ');
    match state.en_passant_square {
        Some(square) => {
            fen.push_str(&square_to_algebraic(square).expect("en-passant square in bounds"))
        }
        None => fen.push('-'),
    }

    fen.push_str(&format!(
        " {} {}",
        state.halfmove_clock, state.fullmove_number
    ));
    fen
}
