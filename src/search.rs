//! Fixed-depth minimax search
//!
//! Exhaustive game-tree search with no pruning: every candidate move is
//! explored on an independent deep copy of the board, so sibling
//! branches and the caller's board are never mutated. Cost is
//! exponential in depth times branching factor; the depth limit is the
//! only throttle.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::board::Board;
use crate::fen::parse_fen;
use crate::types::{Color, Move};

/// Global node counter for search statistics
pub static NODE_COUNT: AtomicU64 = AtomicU64::new(0);

/// Reset the node counter
pub fn reset_node_count() {
    NODE_COUNT.store(0, Ordering::Relaxed);
}

/// Current node count
pub fn get_node_count() -> u64 {
    NODE_COUNT.load(Ordering::Relaxed)
}

/// Score and best move returned by a search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// Evaluation from White's perspective
    pub score: f64,
    /// Extremal move, or None at a leaf or when no move is available
    pub best_move: Option<Move>,
}

/// Exhaustive minimax without pruning
///
/// White maximizes. At depth 0 or a decided position the static
/// evaluation is returned with no move. An empty candidate list (after
/// reverse-move exclusion) also falls back to the static evaluation;
/// stalemate is not scored as a win or loss. Ties keep the first move
/// in enumeration order, which makes the search fully deterministic.
pub fn minimax(board: &Board, depth: u32, maximizing: bool) -> SearchResult {
    NODE_COUNT.fetch_add(1, Ordering::Relaxed);

    if depth == 0 || board.game_result().is_over() {
        return SearchResult {
            score: board.evaluate(),
            best_move: None,
        };
    }

    let color = if maximizing {
        Color::White
    } else {
        Color::Black
    };
    let moves = board.moves_excluding_reverse(color);

    if moves.is_empty() {
        return SearchResult {
            score: board.evaluate(),
            best_move: None,
        };
    }

    let mut best_move = None;
    let mut best_score = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };

    for mv in moves {
        // Copy-per-branch: explore on an independent clone.
        let mut child = board.clone();
        if child.apply_move(mv).is_err() {
            continue;
        }
        let result = minimax(&child, depth - 1, !maximizing);

        let better = if maximizing {
            result.score > best_score
        } else {
            result.score < best_score
        };
        if better {
            best_score = result.score;
            best_move = Some(mv);
        }
    }

    SearchResult {
        score: best_score,
        best_move,
    }
}

/// Run a search for the side to move in a FEN position
pub fn best_move_from_fen(fen: &str, depth: u32) -> Result<SearchResult, String> {
    let state = parse_fen(fen)?;
    let maximizing = state.turn == Color::White;
    Ok(minimax(&state.board, depth, maximizing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::board_from_fen;
    use crate::types::{Piece, PieceKind, Position};

    fn mv(s: &str) -> Move {
        Move::from_notation(s).unwrap()
    }

    #[test]
    fn test_depth_zero_is_static_eval() {
        let board = Board::new();
        let result = minimax(&board, 0, true);
        assert_eq!(result.score, board.evaluate());
        assert!(result.best_move.is_none());
    }

    #[test]
    fn test_search_is_deterministic() {
        let a = minimax(&Board::new(), 2, true);
        let b = minimax(&Board::new(), 2, true);
        assert_eq!(a.score, b.score);
        assert_eq!(a.best_move, b.best_move);
    }

    #[test]
    fn test_search_does_not_mutate_board() {
        let board = Board::new();
        let before = board.fingerprint();
        minimax(&board, 2, true);
        assert_eq!(board.fingerprint(), before);
        assert!(board.last_move().is_none());
        assert!(board.captured_pieces(Color::White).is_empty());
        assert!(board.captured_pieces(Color::Black).is_empty());
    }

    #[test]
    fn test_depth_one_matches_recomputed_maximum() {
        // The returned move must be the strict-> maximum of the static
        // evaluation over all depth-1 candidates, first move winning
        // ties in enumeration order.
        let board = Board::new();
        let result = minimax(&board, 1, true);

        let mut expected_move = None;
        let mut expected_score = f64::NEG_INFINITY;
        for cand in board.moves_excluding_reverse(Color::White) {
            let mut child = board.clone();
            child.apply_move(cand).unwrap();
            let score = child.evaluate();
            if score > expected_score {
                expected_score = score;
                expected_move = Some(cand);
            }
        }

        assert_eq!(result.best_move, expected_move);
        assert_eq!(result.score, expected_score);
    }

    #[test]
    fn test_takes_hanging_khun() {
        // White Rua on the same file as the Black Khun: depth 1 must
        // grab the decisive material.
        let board = board_from_fen("4k3/8/8/8/8/8/8/K3R3 w").unwrap();
        let result = minimax(&board, 1, true);
        assert_eq!(result.best_move, Some(mv("e1e8")));
        assert!(result.score > 900.0);
    }

    #[test]
    fn test_minimizing_side_avoids_loss() {
        // Black to move with the Khun attacked by a Rua; at depth 2 the
        // minimizing side must not leave the Khun on the attacked file.
        let board = board_from_fen("4k3/8/8/8/8/8/8/K3R3 b").unwrap();
        let result = minimax(&board, 2, false);
        let best = result.best_move.unwrap();
        let mut child = board.clone();
        child.apply_move(best).unwrap();
        let reply = minimax(&child, 1, true);
        if let Some(white_reply) = reply.best_move {
            let mut after = child.clone();
            after.apply_move(white_reply).unwrap();
            assert!(
                after.game_result().winner() != Some(Color::White),
                "Black's reply {} still loses the Khun",
                best
            );
        }
    }

    #[test]
    fn test_terminal_position_returns_no_move() {
        let mut board = Board::empty();
        board.set_piece(
            Position::new(0, 4),
            Some(Piece::new(PieceKind::Khun, Color::Black)),
        );
        let result = minimax(&board, 3, true);
        assert!(result.best_move.is_none());
        assert!(result.score < -900.0);
    }

    #[test]
    fn test_node_counter() {
        reset_node_count();
        minimax(&Board::new(), 1, true);
        // Root plus one leaf per candidate move.
        assert_eq!(get_node_count(), 24);
    }

    #[test]
    fn test_best_move_from_fen() {
        let result = best_move_from_fen("4k3/8/8/8/8/8/8/K3R3 w", 1).unwrap();
        assert_eq!(result.best_move, Some(mv("e1e8")));
        assert!(best_move_from_fen("bad fen", 1).is_err());
    }
}
