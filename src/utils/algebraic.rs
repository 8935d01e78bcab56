//! Square and promotion-letter conversions for coordinate notation.
//!
//! Converts between human-readable coordinates (for example `e4`) and
//! internal square indices, reused by the FEN and move-text components.

use crate::game_state::chess_types::{PieceKind, Square};

/// Convert algebraic coordinates (for example `"e4"`) to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, String> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(format!("Invalid algebraic square: {square}"));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(format!("Invalid algebraic file: {}", file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(format!("Invalid algebraic rank: {}", rank as char));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// Convert a square index (`0..=63`) to algebraic coordinates.
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, String> {
    if square > 63 {
        return Err(format!("Square index out of bounds: {square}"));
    }

    let file_char = char::from(b'a' + square % 8);
    let rank_char = char::from(b'1' + square / 8);
    Ok(format!("{file_char}{rank_char}"))
}

/// Promotion letter used in long algebraic move text.
#[inline]
pub fn promotion_to_char(kind: PieceKind) -> Result<char, String> {
    match kind {
        PieceKind::Knight => Ok('n'),
        PieceKind::Bishop => Ok('b'),
        PieceKind::Rook => Ok('r'),
        PieceKind::Queen => Ok('q'),
        _ => Err(format!("Invalid promotion piece: {kind:?}")),
    }
}

/// Promotion piece for a long algebraic promotion letter.
#[inline]
pub fn promotion_from_char(ch: char) -> Result<PieceKind, String> {
    match ch.to_ascii_lowercase() {
        'n' => Ok(PieceKind::Knight),
        'b' => Ok(PieceKind::Bishop),
        'r' => Ok(PieceKind::Rook),
        'q' => Ok(PieceKind::Queen),
        _ => Err(format!("Invalid promotion letter: {ch}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squares_round_trip_through_text() {
        for square in 0..64u8 {
            let text = square_to_algebraic(square).expect("in bounds");
            assert_eq!(algebraic_to_square(&text), Ok(square));
        }
        assert_eq!(algebraic_to_square("a1"), Ok(0));
        assert_eq!(algebraic_to_square("h8"), Ok(63));
        assert_eq!(algebraic_to_square("e4"), Ok(28));
    }

    #[test]
    fn malformed_coordinates_are_rejected() {
        assert!(algebraic_to_square("").is_err());
        assert!(algebraic_to_square("e").is_err());
        assert!(algebraic_to_square("i4").is_err());
        assert!(algebraic_to_square("a9").is_err());
        assert!(algebraic_to_square("e44").is_err());
        assert!(square_to_algebraic(64).is_err());
    }

    #[test]
    fn promotion_letters_cover_the_four_choices() {
        for kind in PieceKind::PROMOTIONS {
            let ch = promotion_to_char(kind).expect("valid promotion");
            assert_eq!(promotion_from_char(ch), Ok(kind));
        }
        assert!(promotion_to_char(PieceKind::King).is_err());
        assert!(promotion_from_char('x').is_err());
    }
}
