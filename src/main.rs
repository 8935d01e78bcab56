//! Minimal interactive console shell around the engine core.
//!
//! Reads long algebraic moves and a handful of commands from stdin, replies
//! with the engine's search move. Everything interesting lives in the
//! library; this binary is glue.

use std::io::{self, BufRead, Write};

use quince_chess::engine::Engine;
use quince_chess::search::negamax::{SearchConfig, MATE_THRESHOLD};
use quince_chess::utils::long_algebraic::move_to_long_algebraic;
use quince_chess::utils::render_game_state::render_game_state;

fn main() {
    let mut engine = Engine::new();
    let mut config = SearchConfig::default();

    println!("{}", render_game_state(engine.state()));
    println!("enter moves like e2e4 (a7a8q to promote); commands: new, fen <fen>, perft <n>, go, depth <n>, pgn, quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let (command, rest) = match input.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (input, ""),
        };

        match command {
            "quit" | "exit" => break,
            "new" => {
                engine = Engine::new();
                println!("{}", render_game_state(engine.state()));
            }
            "fen" => match engine.set_position(rest) {
                Ok(()) => println!("{}", render_game_state(engine.state())),
                Err(message) => println!("bad fen: {message}"),
            },
            "depth" => match rest.parse::<u8>() {
                Ok(depth) if depth > 0 => {
                    config.max_depth = depth;
                    println!("search depth set to {depth}");
                }
                _ => println!("usage: depth <1-64>"),
            },
            "perft" => match rest.parse::<u8>() {
                Ok(depth) => println!("perft({depth}) = {}", engine.perft(depth)),
                Err(_) => println!("usage: perft <depth>"),
            },
            "go" => reply_with_engine_move(&mut engine, &config),
            "pgn" => match engine.game_pgn("*") {
                Ok(pgn) => println!("{pgn}"),
                Err(message) => println!("pgn failed: {message}"),
            },
            _ => match engine.make_move_algebraic(input) {
                Ok(true) => {
                    println!("{}", render_game_state(engine.state()));
                    reply_with_engine_move(&mut engine, &config);
                }
                Ok(false) => println!("illegal move: {input}"),
                Err(message) => println!("{message}"),
            },
        }
    }
}

fn reply_with_engine_move(engine: &mut Engine, config: &SearchConfig) {
    let result = engine.best_move(config);

    let Some(best) = result.best_move else {
        if result.best_score < -MATE_THRESHOLD {
            println!("checkmate.");
        } else {
            println!("stalemate.");
        }
        return;
    };

    let text = move_to_long_algebraic(best).unwrap_or_else(|_| "????".to_owned());
    println!(
        "engine plays {text} (score {} at depth {}, {} nodes)",
        result.best_score, result.reached_depth, result.nodes
    );
    engine.make_move_coordinates(best.source(), best.target(), best.promotion());
    println!("{}", render_game_state(engine.state()));
}
