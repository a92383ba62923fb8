//! Makruk (Thai chess) engine
//!
//! Board representation, per-piece move rules, static evaluation and a
//! fixed-depth exhaustive minimax search, plus the console game session
//! built on top of them.

pub mod board;
pub mod fen;
pub mod game;
pub mod rules;
pub mod search;
pub mod types;

pub use board::{Board, MoveOutcome};
pub use fen::{board_from_fen, board_to_fen, parse_fen, FenState, INITIAL_FEN};
pub use game::{
    difficulty_depth, GameConfig, GameEnd, GameSession, InputError, DEFAULT_MOVE_LIMIT,
    MAX_REPETITIONS,
};
pub use search::{
    best_move_from_fen, get_node_count, minimax, reset_node_count, SearchResult,
};
pub use types::{Color, GameResult, Move, MoveError, Piece, PieceKind, Position};
