//! Depth-bounded adversarial search.
//!
//! Negamax with fail-hard alpha-beta pruning, quiescence search at the
//! horizon, killer/history/MVV-LVA move ordering, and principal-variation
//! tracking, wrapped in an iterative-deepening driver. Time budgets are
//! honored between completed depths only; there is no cancellation inside a
//! single fixed-depth search, so the last fully completed depth is what gets
//! reported.

use std::time::{Duration, Instant};

use crate::attacks::tables::AttackTables;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{try_make_move, MoveFilter};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::generate_moves;
use crate::moves::move_descriptions::MoveDescription;
use crate::moves::move_list::MoveList;
use crate::search::board_scoring::BoardScorer;
use crate::search::heuristics::SearchHeuristics;

/// Hard ceiling on search depth in plies; also bounds quiescence recursion.
pub const MAX_PLY: usize = 64;

/// Root search window bound. No heuristic score ever leaves `[-50000, 50000]`.
pub const INFINITY_SCORE: i32 = 50_000;

/// Magnitude of a mate-in-zero; actual mate scores are offset by the ply at
/// which they occur so the fastest mate scores best.
pub const MATE_VALUE: i32 = 49_000;

/// Scores beyond this magnitude are forced mates.
pub const MATE_THRESHOLD: i32 = 48_000;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub movetime_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            movetime_ms: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub best_move: Option<MoveDescription>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub nps: u64,
    pub principal_variation: Vec<MoveDescription>,
}

struct SearchContext<'a, S: BoardScorer> {
    tables: &'a AttackTables,
    scorer: &'a S,
    heuristics: Box<SearchHeuristics>,
    nodes: u64,
    ply: usize,
}

/// Run the full search for the position: iterative deepening from depth 1 to
/// `config.max_depth`, with scratch tables reset once up front.
pub fn search_position<S: BoardScorer>(
    state: &mut GameState,
    tables: &AttackTables,
    scorer: &S,
    config: &SearchConfig,
) -> SearchResult {
    let started = Instant::now();
    let deadline = config
        .movetime_ms
        .map(|ms| started + Duration::from_millis(ms.max(1)));

    let mut ctx = SearchContext {
        tables,
        scorer,
        heuristics: SearchHeuristics::new(),
        nodes: 0,
        ply: 0,
    };
    let mut result = SearchResult::default();

    for depth in 1..=config.max_depth {
        if let Some(limit) = deadline {
            if Instant::now() >= limit {
                break;
            }
        }

        ctx.ply = 0;
        let score = ctx.negamax(state, -INFINITY_SCORE, INFINITY_SCORE, depth);

        result.best_score = score;
        result.reached_depth = depth;
        result.principal_variation = ctx.heuristics.principal_variation();
        result.best_move = result.principal_variation.first().copied();
    }

    result.nodes = ctx.nodes;
    result.elapsed_ms = started.elapsed().as_millis() as u64;
    result.nps = if result.elapsed_ms == 0 {
        0
    } else {
        result.nodes.saturating_mul(1000) / result.elapsed_ms
    };
    result
}

impl<S: BoardScorer> SearchContext<'_, S> {
    fn negamax(&mut self, state: &mut GameState, mut alpha: i32, beta: i32, depth: u8) -> i32 {
        self.heuristics.pv_length[self.ply] = self.ply;

        if depth == 0 {
            return self.quiescence(state, alpha, beta);
        }
        if self.ply >= MAX_PLY - 1 {
            return self.scorer.score(state);
        }
        self.nodes += 1;

        let in_check = is_king_in_check(state, self.tables, state.side_to_move);
        // Check extension: forced lines get one extra ply so they are not
        // misjudged as quiet at the horizon.
        let depth = if in_check { depth.saturating_add(1) } else { depth };

        let mut list = MoveList::new();
        generate_moves(state, self.tables, &mut list);
        self.heuristics.order_moves(list.as_mut_slice(), self.ply);

        let mut legal_moves = 0u32;
        for i in 0..list.len() {
            let mv = list[i];
            let undo = state.snapshot();
            if !try_make_move(state, self.tables, mv, MoveFilter::AllMoves) {
                continue;
            }
            legal_moves += 1;

            self.ply += 1;
            let score = -self.negamax(state, -beta, -alpha, depth - 1);
            self.ply -= 1;
            state.restore_snapshot(&undo);

            if score >= beta {
                // Fail-hard cutoff; quiet cutoff moves become killers.
                if !mv.is_capture() {
                    self.heuristics.record_killer(self.ply, mv);
                }
                return beta;
            }
            if score > alpha {
                alpha = score;
                if !mv.is_capture() {
                    self.heuristics.record_history(mv, depth);
                }
                self.heuristics.record_pv(self.ply, mv);
            }
        }

        if legal_moves == 0 {
            // Offset by ply so shorter forced mates score more negatively
            // for the mated side, preferring the fastest mate.
            return if in_check {
                -MATE_VALUE + self.ply as i32
            } else {
                0
            };
        }

        alpha
    }

    fn quiescence(&mut self, state: &mut GameState, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;

        let stand_pat = self.scorer.score(state);
        if self.ply >= MAX_PLY - 1 {
            return stand_pat;
        }
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut list = MoveList::new();
        generate_moves(state, self.tables, &mut list);
        self.heuristics.order_moves(list.as_mut_slice(), self.ply);

        for i in 0..list.len() {
            let mv = list[i];
            let undo = state.snapshot();
            // Non-captures are rejected outright by the filter.
            if !try_make_move(state, self.tables, mv, MoveFilter::CapturesOnly) {
                continue;
            }

            self.ply += 1;
            let score = -self.quiescence(state, -beta, -alpha);
            self.ply -= 1;
            state.restore_snapshot(&undo);

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }
}
