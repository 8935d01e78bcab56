//! ASCII board rendering for the console shell and test diagnostics.

use crate::game_state::chess_types::{piece_to_fen_char, Color, Square};
use crate::game_state::game_state::GameState;
use crate::utils::algebraic::square_to_algebraic;

pub fn render_game_state(state: &GameState) -> String {
    let mut out = String::new();
    out.push_str("  +------------------------+\n");

    for rank in (0..8).rev() {
        out.push_str(&format!("{} |", rank + 1));
        for file in 0..8 {
            let square = (rank * 8 + file) as Square;
            let ch = state
                .piece_on_square(square)
                .map_or('.', |(color, kind)| piece_to_fen_char(color, kind));
            out.push_str(&format!(" {ch} "));
        }
        out.push_str("|\n");
    }

    out.push_str("  +------------------------+\n");
    out.push_str("    a  b  c  d  e  f  g  h\n\n");

    out.push_str(&format!(
        "side to move: {}\n",
        match state.side_to_move {
            Color::White => "white",
            Color::Black => "black",
        }
    ));
    out.push_str(&format!(
        "en passant:   {}\n",
        state
            .en_passant_square
            .and_then(|sq| square_to_algebraic(sq).ok())
            .unwrap_or_else(|| "-".to_owned())
    ));
    out.push_str(&format!("fen:          {}\n", state.get_fen()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_startpos_shows_both_back_ranks() {
        let rendered = render_game_state(&GameState::new_game());
        assert!(rendered.contains(" r  n  b  q  k  b  n  r "));
        assert!(rendered.contains(" R  N  B  Q  K  B  N  R "));
        assert!(rendered.contains("side to move: white"));
        assert!(rendered.contains("en passant:   -"));
    }
}
