//! Game session layer
//!
//! Owns everything the board does not: the side to move, the
//! fingerprint history used for threefold-repetition draws, the move
//! counter and cap, and per-side AI depth. The session is an explicit
//! struct threaded through the driving loop, never a singleton.

use std::collections::HashMap;
use std::fmt;

use log::{debug, info};

use crate::board::{Board, MoveOutcome};
use crate::search::minimax;
use crate::types::{Color, Move, MoveError};

/// Repetitions of one placement that end the game as a draw
pub const MAX_REPETITIONS: u32 = 3;

/// Default cap on total moves before declaring a draw
pub const DEFAULT_MOVE_LIMIT: u32 = 1000;

/// Difficulty preset to search depth (1-Easy, 2-Medium, 3-Hard)
pub fn difficulty_depth(level: u32) -> Option<u32> {
    match level {
        1..=3 => Some(level),
        _ => None,
    }
}

/// Per-game configuration; a `None` depth means human control
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub white_depth: Option<u32>,
    pub black_depth: Option<u32>,
    pub move_limit: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            white_depth: None,
            black_depth: None,
            move_limit: DEFAULT_MOVE_LIMIT,
        }
    }
}

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    Win(Color),
    DrawByRepetition,
    DrawByMoveLimit,
    /// The side to move has no legal moves (Khun still on the board)
    NoMoves(Color),
}

impl fmt::Display for GameEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEnd::Win(color) => write!(f, "{} wins the game!", color),
            GameEnd::DrawByRepetition => {
                write!(f, "The game is a draw due to repetition of board states.")
            }
            GameEnd::DrawByMoveLimit => write!(
                f,
                "The game is a draw due to reaching the maximum number of moves."
            ),
            GameEnd::NoMoves(color) => write!(f, "{} has no moves left. Game over.", color),
        }
    }
}

/// Rejection of a human move before or during application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// Text not matching the 4-character notation, or off-board squares
    Malformed,
    /// The piece on the source square belongs to the other side
    WrongMover,
    /// Rejected by the board
    Move(MoveError),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Malformed => {
                write!(f, "Invalid input format. Please enter moves like 'e3e4'.")
            }
            InputError::WrongMover => write!(f, "You cannot move your opponent's pieces."),
            InputError::Move(e) => write!(f, "{}", e),
        }
    }
}

/// One game in progress
pub struct GameSession {
    board: Board,
    turn: Color,
    config: GameConfig,
    /// Occurrence count per placement fingerprint
    history: HashMap<String, u32>,
    move_count: u32,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        let board = Board::new();
        let mut history = HashMap::new();
        history.insert(board.fingerprint(), 1);
        GameSession {
            board,
            turn: Color::White,
            config,
            history,
            move_count: 0,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Search depth for the side to move, or None for human control
    pub fn current_depth(&self) -> Option<u32> {
        match self.turn {
            Color::White => self.config.white_depth,
            Color::Black => self.config.black_depth,
        }
    }

    /// Pick and apply an AI move for the side to move
    ///
    /// Returns `Ok(None)` when the search finds no move. An illegal
    /// move coming back from the search is an engine bug, reported as
    /// a hard error rather than a recoverable rejection.
    pub fn ai_move(&mut self) -> Result<Option<(Move, MoveOutcome)>, String> {
        let depth = self
            .current_depth()
            .ok_or_else(|| format!("{} is not AI-controlled", self.turn))?;

        let maximizing = self.turn == Color::White;
        let result = minimax(&self.board, depth, maximizing);
        debug!(
            "{} search depth {} score {:.2} best {:?}",
            self.turn, depth, result.score, result.best_move
        );

        let mv = match result.best_move {
            Some(mv) => mv,
            None => return Ok(None),
        };

        let outcome = self
            .board
            .apply_move(mv)
            .map_err(|e| format!("AI attempted an invalid move {}: {}", mv, e))?;
        Ok(Some((mv, outcome)))
    }

    /// Parse and apply a human move for the side to move
    pub fn human_move(&mut self, input: &str) -> Result<(Move, MoveOutcome), InputError> {
        let mv = Move::from_notation(input).ok_or(InputError::Malformed)?;

        match self.board.piece_at(mv.from) {
            None => return Err(InputError::Move(MoveError::NoPieceAtSource)),
            Some(p) if p.color != self.turn => return Err(InputError::WrongMover),
            Some(_) => {}
        }

        let outcome = self.board.apply_move(mv).map_err(InputError::Move)?;
        Ok((mv, outcome))
    }

    /// Bookkeeping after an applied move: counter, win check, repetition
    /// check, move cap, then hand the turn over
    ///
    /// Returns the game end, or None when play continues. Check order
    /// matters: a decisive position wins before any draw rule fires.
    pub fn finish_turn(&mut self) -> Option<GameEnd> {
        self.move_count += 1;

        if let Some(winner) = self.board.game_result().winner() {
            return Some(GameEnd::Win(winner));
        }

        let count = self
            .history
            .entry(self.board.fingerprint())
            .and_modify(|c| *c += 1)
            .or_insert(1);
        if *count >= MAX_REPETITIONS {
            info!("position repeated {} times after move {}", count, self.move_count);
            return Some(GameEnd::DrawByRepetition);
        }

        if self.move_count >= self.config.move_limit {
            return Some(GameEnd::DrawByMoveLimit);
        }

        self.turn = self.turn.opposite();
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn human_vs_human(move_limit: u32) -> GameSession {
        GameSession::new(GameConfig {
            white_depth: None,
            black_depth: None,
            move_limit,
        })
    }

    fn play(session: &mut GameSession, input: &str) -> Option<GameEnd> {
        session.human_move(input).unwrap();
        session.finish_turn()
    }

    #[test]
    fn test_difficulty_presets() {
        assert_eq!(difficulty_depth(1), Some(1));
        assert_eq!(difficulty_depth(3), Some(3));
        assert_eq!(difficulty_depth(0), None);
        assert_eq!(difficulty_depth(4), None);
    }

    #[test]
    fn test_human_move_validation() {
        let mut session = human_vs_human(DEFAULT_MOVE_LIMIT);
        assert_eq!(session.human_move("e3e9"), Err(InputError::Malformed));
        assert_eq!(session.human_move("nope"), Err(InputError::Malformed));
        assert_eq!(session.human_move("e6e5"), Err(InputError::WrongMover));
        assert_eq!(
            session.human_move("e4e5"),
            Err(InputError::Move(MoveError::NoPieceAtSource))
        );
        assert_eq!(
            session.human_move("a1a5"),
            Err(InputError::Move(MoveError::IllegalMove))
        );

        assert!(session.human_move("e3e4").is_ok());
        assert_eq!(session.finish_turn(), None);
        assert_eq!(session.turn(), Color::Black);
        assert_eq!(session.move_count(), 1);
    }

    #[test]
    fn test_repetition_draw_on_third_recurrence() {
        let mut session = human_vs_human(DEFAULT_MOVE_LIMIT);
        // Knight shuffle: each 4-move cycle restores the start
        // placement, so its fingerprint reaches 3 on the 8th move.
        let cycle = ["b1d2", "b8d7", "d2b1", "d7b8"];
        for input in cycle {
            assert_eq!(play(&mut session, input), None);
        }
        for input in &cycle[..3] {
            assert_eq!(play(&mut session, input), None);
        }
        assert_eq!(play(&mut session, "d7b8"), Some(GameEnd::DrawByRepetition));
    }

    #[test]
    fn test_move_limit_draw_exactly_at_cap() {
        let mut session = human_vs_human(2);
        assert_eq!(play(&mut session, "e3e4"), None);
        assert_eq!(play(&mut session, "e6e5"), Some(GameEnd::DrawByMoveLimit));
    }

    #[test]
    fn test_win_beats_draw_rules() {
        // Move limit 1, but reaching a decisive position on the same
        // move must report the win, not the draw.
        let mut session = human_vs_human(1);
        session.board = crate::fen::board_from_fen("4k3/8/8/8/8/8/8/K3R3 w").unwrap();
        session.human_move("e1e8").unwrap();
        assert_eq!(session.finish_turn(), Some(GameEnd::Win(Color::White)));
    }

    #[test]
    fn test_ai_vs_ai_progresses() {
        let mut session = GameSession::new(GameConfig {
            white_depth: Some(1),
            black_depth: Some(1),
            move_limit: DEFAULT_MOVE_LIMIT,
        });
        for _ in 0..6 {
            let applied = session.ai_move().unwrap();
            assert!(applied.is_some());
            if session.finish_turn().is_some() {
                break;
            }
        }
        assert!(session.move_count() >= 1);
    }

    #[test]
    fn test_ai_move_rejected_for_human_side() {
        let mut session = human_vs_human(DEFAULT_MOVE_LIMIT);
        assert!(session.ai_move().is_err());
    }
}
