//! Engine facade: the contract the surrounding command shell talks to.
//!
//! Owns one position plus the global attack tables and the scorer, and
//! exposes position setup, move application by coordinates or text, best-move
//! search, FEN serialization, perft, and a PGN record of the game so far.
//! Malformed text surfaces as a parse error; unmatched or illegal moves are
//! simply `false`.

use crate::attacks::tables::AttackTables;
use crate::game_state::chess_types::{PieceKind, Square};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{try_make_move, MoveFilter};
use crate::move_generation::legal_move_generator::generate_moves;
use crate::move_generation::perft::perft;
use crate::moves::move_descriptions::MoveDescription;
use crate::moves::move_list::MoveList;
use crate::search::board_scoring::MaterialPstScorer;
use crate::search::negamax::{search_position, SearchConfig, SearchResult};
use crate::utils::long_algebraic::parse_long_algebraic;
use crate::utils::pgn::write_pgn;

pub struct Engine {
    state: GameState,
    tables: &'static AttackTables,
    scorer: MaterialPstScorer,
    initial_state: GameState,
    move_history: Vec<MoveDescription>,
}

impl Engine {
    /// Engine at the standard starting position.
    pub fn new() -> Self {
        let state = GameState::new_game();
        Self {
            initial_state: state.clone(),
            state,
            tables: AttackTables::global(),
            scorer: MaterialPstScorer,
            move_history: Vec::new(),
        }
    }

    /// Replace the position wholesale from a FEN string, clearing history.
    pub fn set_position(&mut self, fen: &str) -> Result<(), String> {
        let state = GameState::from_fen(fen)?;
        self.initial_state = state.clone();
        self.state = state;
        self.move_history.clear();
        Ok(())
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn fen(&self) -> String {
        self.state.get_fen()
    }

    /// Every legal move in the current position.
    pub fn legal_moves(&self) -> Vec<MoveDescription> {
        let mut list = MoveList::new();
        generate_moves(&self.state, self.tables, &mut list);

        let mut scratch = self.state.clone();
        let undo = scratch.snapshot();
        list.iter()
            .copied()
            .filter(|&mv| {
                let legal = try_make_move(&mut scratch, self.tables, mv, MoveFilter::AllMoves);
                if legal {
                    scratch.restore_snapshot(&undo);
                }
                legal
            })
            .collect()
    }

    /// Resolve a (source, target, promotion) triple against the generated
    /// moves and apply the match. `false` when nothing matches or the match
    /// leaves the king attacked.
    pub fn make_move_coordinates(
        &mut self,
        source: Square,
        target: Square,
        promotion: Option<PieceKind>,
    ) -> bool {
        let mut list = MoveList::new();
        generate_moves(&self.state, self.tables, &mut list);

        let Some(mv) = list
            .iter()
            .copied()
            .find(|m| m.source() == source && m.target() == target && m.promotion() == promotion)
        else {
            return false;
        };

        if try_make_move(&mut self.state, self.tables, mv, MoveFilter::AllMoves) {
            self.move_history.push(mv);
            return true;
        }
        false
    }

    /// Apply a move given as long algebraic text (`"e2e4"`, `"a7a8q"`).
    pub fn make_move_algebraic(&mut self, text: &str) -> Result<bool, String> {
        let (source, target, promotion) = parse_long_algebraic(text)?;
        Ok(self.make_move_coordinates(source, target, promotion))
    }

    /// Run the search and report the chosen move plus its evaluation, signed
    /// so positive always favors whoever's turn it was at the call.
    pub fn best_move(&mut self, config: &SearchConfig) -> SearchResult {
        search_position(&mut self.state, self.tables, &self.scorer, config)
    }

    /// Leaf-node count of the legal move tree from the current position.
    pub fn perft(&self, depth: u8) -> u64 {
        let mut scratch = self.state.clone();
        perft(&mut scratch, self.tables, depth)
    }

    /// PGN record of the moves played through this facade.
    pub fn game_pgn(&self, result: &str) -> Result<String, String> {
        write_pgn(&self.initial_state, &self.move_history, result)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::Color;

    #[test]
    fn opening_moves_play_through_coordinates_and_text() {
        let mut engine = Engine::new();
        assert!(engine.make_move_algebraic("e2e4").expect("parses"));
        assert!(engine.make_move_coordinates(52, 36, None)); // e7e5
        assert_eq!(engine.state().side_to_move, Color::White);
        assert_eq!(
            engine.fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
        );
    }

    #[test]
    fn illegal_and_unmatched_moves_return_false_without_state_change() {
        let mut engine = Engine::new();
        let before = engine.fen();

        // No rook move exists from a1 at the start.
        assert!(!engine.make_move_algebraic("a1a4").expect("parses"));
        // Moving the king into nothing: e1e2 is blocked by the e-pawn.
        assert!(!engine.make_move_coordinates(4, 12, None));
        assert_eq!(engine.fen(), before);

        // Garbage text is a parse error, not a silent false.
        assert!(engine.make_move_algebraic("castle!").is_err());
    }

    #[test]
    fn set_position_resets_history_and_legal_moves_match_perft_depth_one() {
        let mut engine = Engine::new();
        engine
            .set_position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .expect("valid FEN");
        assert_eq!(engine.legal_moves().len(), 48);
        assert_eq!(engine.perft(1), 48);
        assert_eq!(engine.perft(2), 2_039);
    }

    #[test]
    fn promotion_by_text_places_the_chosen_piece() {
        let mut engine = Engine::new();
        engine.set_position("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("valid FEN");
        assert!(engine.make_move_algebraic("a7a8n").expect("parses"));
        assert_eq!(
            engine.state().piece_on_square(56),
            Some((Color::White, PieceKind::Knight))
        );
    }

    #[test]
    fn en_passant_sequence_matches_the_interface_contract() {
        // After e2e4, a quiet black reply, e4e5, then d7d5: the en-passant
        // square is d6 and exactly one en-passant reply exists for white.
        let mut engine = Engine::new();
        for mv in ["e2e4", "g8f6", "e4e5", "d7d5"] {
            assert!(engine.make_move_algebraic(mv).expect("parses"), "move {mv} must apply");
        }
        assert_eq!(engine.state().en_passant_square, Some(43)); // d6

        let ep_moves: Vec<_> = engine
            .legal_moves()
            .into_iter()
            .filter(|m| m.is_en_passant())
            .collect();
        assert_eq!(ep_moves.len(), 1);
        assert_eq!(ep_moves[0].target(), 43);

        assert!(engine.make_move_algebraic("e5d6").expect("parses"));
        // The captured pawn came off d5, not d6.
        assert_eq!(engine.state().piece_on_square(35), None);
    }

    #[test]
    fn best_move_from_start_is_legal_and_recorded_in_pv() {
        let mut engine = Engine::new();
        let legal = engine.legal_moves();
        let result = engine.best_move(&SearchConfig {
            max_depth: 3,
            movetime_ms: None,
        });
        let best = result.best_move.expect("a best move exists");
        assert!(legal.contains(&best));
        assert_eq!(result.principal_variation.first().copied(), Some(best));
    }

    #[test]
    fn pgn_record_reflects_played_moves() {
        let mut engine = Engine::new();
        engine.make_move_algebraic("d2d4").expect("parses");
        engine.make_move_algebraic("d7d5").expect("parses");

        let pgn = engine.game_pgn("*").expect("pgn writes");
        assert!(pgn.contains("1. d2d4 d7d5 "));

        engine.set_position(STARTING_POSITION_FEN).expect("valid FEN");
        let fresh = engine.game_pgn("*").expect("pgn writes");
        assert!(!fresh.contains("d2d4"));
    }
}
