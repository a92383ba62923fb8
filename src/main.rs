//! Makruk AI CLI
//!
//! Console front end: an interactive game loop plus one-shot commands
//! for inspecting legal moves, running a search and scoring a position
//! from FEN input.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::time::Instant;

use makruk_ai::{
    best_move_from_fen, difficulty_depth, get_node_count, parse_fen, reset_node_count, Color,
    GameConfig, GameEnd, GameSession, Move, MoveOutcome, DEFAULT_MOVE_LIMIT,
};

#[derive(Parser)]
#[command(name = "makruk-ai")]
#[command(about = "Makruk (Thai chess) engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game on the console
    Play {
        /// White AI difficulty (1-Easy, 2-Medium, 3-Hard); omit for human
        #[arg(long)]
        white_ai: Option<u32>,

        /// Black AI difficulty (1-Easy, 2-Medium, 3-Hard); omit for human
        #[arg(long)]
        black_ai: Option<u32>,

        /// Maximum number of moves before declaring a draw
        #[arg(long, default_value_t = DEFAULT_MOVE_LIMIT)]
        move_limit: u32,
    },

    /// List legal moves for the side to move
    Moves {
        /// FEN string
        #[arg(long)]
        fen: String,
    },

    /// Search for the best move
    Best {
        /// FEN string
        #[arg(long)]
        fen: String,

        /// Search depth
        #[arg(long, default_value = "3")]
        depth: u32,

        /// JSON output
        #[arg(long)]
        json: bool,
    },

    /// Static evaluation of a position (White perspective)
    Score {
        /// FEN string
        #[arg(long)]
        fen: String,

        /// JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct BestResponse {
    #[serde(rename = "move")]
    mv: Option<String>,
    score: f64,
    depth: u32,
    nodes: u64,
    elapsed_ms: f64,
    nps: f64,
}

#[derive(Serialize)]
struct ScoreResponse {
    fen: String,
    turn: String,
    score: f64,
}

fn calc_nps(nodes: u64, elapsed_secs: f64) -> f64 {
    if elapsed_secs > 0.0 {
        nodes as f64 / elapsed_secs
    } else {
        0.0
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            white_ai,
            black_ai,
            move_limit,
        } => {
            let config = match play_config(white_ai, black_ai, move_limit) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            run_game(config);
        }

        Commands::Moves { fen } => match parse_fen(&fen) {
            Ok(state) => {
                let moves = state.board.moves_for(state.turn);
                println!("Legal moves for {} ({}):", state.turn, moves.len());
                for mv in &moves {
                    println!("  {}", mv);
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },

        Commands::Best { fen, depth, json } => {
            reset_node_count();
            let start = Instant::now();

            match best_move_from_fen(&fen, depth) {
                Ok(result) => {
                    let elapsed = start.elapsed().as_secs_f64();
                    let nodes = get_node_count();
                    let nps = calc_nps(nodes, elapsed);

                    if json {
                        let response = BestResponse {
                            mv: result.best_move.map(|m| m.to_string()),
                            score: result.score,
                            depth,
                            nodes,
                            elapsed_ms: elapsed * 1000.0,
                            nps,
                        };
                        println!("{}", serde_json::to_string_pretty(&response).unwrap());
                    } else {
                        match result.best_move {
                            Some(mv) => println!("Best move: {} (score: {:.2})", mv, result.score),
                            None => println!("No move available (score: {:.2})", result.score),
                        }
                        println!(
                            "Stats: depth={}, nodes={}, time={:.3}s, nps={:.0}",
                            depth, nodes, elapsed, nps
                        );
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Score { fen, json } => match parse_fen(&fen) {
            Ok(state) => {
                let score = state.board.evaluate();
                if json {
                    let response = ScoreResponse {
                        fen: fen.clone(),
                        turn: state.turn.to_string(),
                        score,
                    };
                    println!("{}", serde_json::to_string_pretty(&response).unwrap());
                } else {
                    println!("Evaluation (White perspective): {:.2}", score);
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }
}

/// Translate difficulty presets into a game configuration
fn play_config(
    white_ai: Option<u32>,
    black_ai: Option<u32>,
    move_limit: u32,
) -> Result<GameConfig, String> {
    let depth_for = |side: &str, level: Option<u32>| -> Result<Option<u32>, String> {
        match level {
            None => Ok(None),
            Some(l) => difficulty_depth(l)
                .map(Some)
                .ok_or_else(|| format!("Invalid {} difficulty: {} (expected 1-3)", side, l)),
        }
    };
    Ok(GameConfig {
        white_depth: depth_for("white", white_ai)?,
        black_depth: depth_for("black", black_ai)?,
        move_limit,
    })
}

/// Interactive console game loop
fn run_game(config: GameConfig) {
    let mut session = GameSession::new(config);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("\n{}", session.board());

    let end = loop {
        let mover = session.turn();
        println!("{}'s turn", mover);

        if let Some(depth) = session.current_depth() {
            println!("{} AI is thinking at depth {}...", mover, depth);
            reset_node_count();
            let start = Instant::now();

            match session.ai_move() {
                Ok(Some((mv, outcome))) => {
                    let elapsed = start.elapsed().as_secs_f64();
                    log::info!(
                        "ai stats: depth={}, nodes={}, time={:.3}s",
                        depth,
                        get_node_count(),
                        elapsed
                    );
                    println!("{}", describe_move(mover, true, mv, &outcome));
                }
                Ok(None) => break Some(GameEnd::NoMoves(mover)),
                Err(e) => {
                    // The search returned an illegal move: engine bug.
                    eprintln!("{}", e);
                    break None;
                }
            }
        } else {
            print!("Enter your move (e.g., e3e4 or 'exit' to quit): ");
            let _ = io::stdout().flush();

            let input = match lines.next() {
                Some(Ok(line)) => line,
                _ => break None,
            };
            let input = input.trim();
            if input.eq_ignore_ascii_case("exit") {
                println!("Game ended by user.");
                break None;
            }

            match session.human_move(input) {
                Ok((mv, outcome)) => println!("{}", describe_move(mover, false, mv, &outcome)),
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            }
        }

        println!("\n{}", session.board());

        if let Some(end) = session.finish_turn() {
            break Some(end);
        }
    };

    if let Some(end) = end {
        println!("{}", end);
    }

    println!("\nFinal Captured Pieces:");
    for color in [Color::White, Color::Black] {
        let names: Vec<&str> = session
            .board()
            .captured_pieces(color.opposite())
            .iter()
            .map(|p| p.kind.name())
            .collect();
        println!("{} has captured: {:?}", color, names);
    }
}

/// Move confirmation line for the console
fn describe_move(mover: Color, is_ai: bool, mv: Move, outcome: &MoveOutcome) -> String {
    let actor = if is_ai {
        format!("{} AI", mover)
    } else {
        mover.to_string()
    };
    let mut message = format!("{} moved from {} to {}", actor, mv.from, mv.to);
    if let Some(captured) = outcome.captured {
        message.push_str(&format!(", capturing {} {}", captured.color, captured.kind));
    }
    if outcome.promoted {
        message.push_str(" (promoted to Met)");
    }
    message
}
