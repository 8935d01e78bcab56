//! Long algebraic move text (`e2e4`, `a7a8q`).
//!
//! Parsing yields the coordinate triple only; resolving it against the
//! position's generated moves is the engine facade's job, which keeps this
//! module free of board knowledge.

use crate::game_state::chess_types::{PieceKind, Square};
use crate::moves::move_descriptions::MoveDescription;
use crate::utils::algebraic::{
    algebraic_to_square, promotion_from_char, promotion_to_char, square_to_algebraic,
};

/// Parse `"e2e4"` or `"a7a8q"` into (source, target, promotion).
pub fn parse_long_algebraic(text: &str) -> Result<(Square, Square, Option<PieceKind>), String> {
    if text.len() != 4 && text.len() != 5 {
        return Err(format!("Invalid long algebraic move: {text}"));
    }

    let source = algebraic_to_square(&text[0..2])?;
    let target = algebraic_to_square(&text[2..4])?;
    let promotion = match text.chars().nth(4) {
        Some(ch) => Some(promotion_from_char(ch)?),
        None => None,
    };

    Ok((source, target, promotion))
}

/// Render a move as long algebraic text.
pub fn move_to_long_algebraic(mv: MoveDescription) -> Result<String, String> {
    let mut out = String::with_capacity(5);
    out.push_str(&square_to_algebraic(mv.source())?);
    out.push_str(&square_to_algebraic(mv.target())?);
    if let Some(promotion) = mv.promotion() {
        out.push(promotion_to_char(promotion)?);
    }
    Ok(out)
}
