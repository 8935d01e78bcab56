//! PGN game-record writer.
//!
//! Serializes a move history to PGN text for interchange with other tools.
//! Movetext uses long algebraic coordinates; headers carry the real local
//! date and, for non-standard starts, the initial FEN.

use std::collections::BTreeMap;

use chrono::Local;

use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::MoveDescription;
use crate::utils::long_algebraic::move_to_long_algebraic;

pub fn write_pgn(
    initial_state: &GameState,
    move_history: &[MoveDescription],
    result: &str,
) -> Result<String, String> {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Quince Chess Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), Local::now().format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), normalize_result(result).to_owned());

    let initial_fen = initial_state.get_fen();
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen);
    }

    let mut out = String::new();
    for (key, value) in &headers {
        out.push_str(&format!("[{key} \"{value}\"]\n"));
    }
    out.push('\n');

    let mut move_number = initial_state.fullmove_number;
    let mut to_move = initial_state.side_to_move;
    for (i, mv) in move_history.iter().enumerate() {
        let text = move_to_long_algebraic(*mv)?;
        match to_move {
            Color::White => out.push_str(&format!("{move_number}. {text} ")),
            Color::Black => {
                if i == 0 {
                    out.push_str(&format!("{move_number}... {text} "));
                } else {
                    out.push_str(&format!("{text} "));
                }
                move_number += 1;
            }
        }
        to_move = to_move.opposite();
    }

    out.push_str(normalize_result(result));
    out.push('\n');
    Ok(out)
}

fn normalize_result(result: &str) -> &str {
    match result {
        "1-0" | "0-1" | "1/2-1/2" => result,
        _ => "*",
    }
}
