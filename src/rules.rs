//! Per-kind move generation (the piece rule set)
//!
//! Pure functions mapping (board, occupied square) to the set of legal
//! destinations for the piece standing there. No higher-level rule is
//! consulted here: there is no check or royal-safety filtering, because
//! capturing the Khun is itself the win condition.
//!
//! Direction tables are iterated in a fixed order; that order flows
//! through move enumeration into the search tie-break, so it must not
//! be reordered.

use crate::board::Board;
use crate::types::{Piece, PieceKind, Position};

/// All eight king directions
const KHUN_DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The four diagonals
const MET_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// The four orthogonal rays
const RUA_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// The eight knight jumps
const MA_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Legal destinations for the piece on `from`
///
/// Returns an empty set if the square is empty.
pub fn destinations(board: &Board, from: Position) -> Vec<Position> {
    let piece = match board.piece_at(from) {
        Some(p) => p,
        None => return Vec::new(),
    };

    match piece.kind {
        PieceKind::Khun => step_moves(board, piece, from, &KHUN_DIRECTIONS),
        PieceKind::Met => step_moves(board, piece, from, &MET_DIRECTIONS),
        PieceKind::Rua => rua_moves(board, piece, from),
        PieceKind::Ma => step_moves(board, piece, from, &MA_OFFSETS),
        PieceKind::Khon => khon_moves(board, piece, from),
        PieceKind::Bia => bia_moves(board, piece, from),
    }
}

/// A step target is legal when on the board and not held by a friendly piece
#[inline]
fn can_move_to(board: &Board, mover: Piece, pos: Position) -> bool {
    if !pos.is_valid() {
        return false;
    }
    match board.piece_at(pos) {
        None => true,
        Some(target) => target.color != mover.color,
    }
}

/// Single-step (or single-jump) movement over a fixed offset table
fn step_moves(board: &Board, piece: Piece, from: Position, offsets: &[(i8, i8)]) -> Vec<Position> {
    let mut moves = Vec::with_capacity(offsets.len());
    for &(dr, dc) in offsets {
        let to = from.offset(dr, dc);
        if can_move_to(board, piece, to) {
            moves.push(to);
        }
    }
    moves
}

/// Rua slides each orthogonal ray until the edge, a friendly piece
/// (excluded) or an enemy piece (included, then stop)
fn rua_moves(board: &Board, piece: Piece, from: Position) -> Vec<Position> {
    let mut moves = Vec::with_capacity(14);
    for (dr, dc) in RUA_DIRECTIONS {
        let mut to = from.offset(dr, dc);
        while to.is_valid() {
            match board.piece_at(to) {
                None => moves.push(to),
                Some(target) => {
                    if target.color != piece.color {
                        moves.push(to);
                    }
                    break;
                }
            }
            to = to.offset(dr, dc);
        }
    }
    moves
}

/// Khon steps one square forward or diagonally forward
fn khon_moves(board: &Board, piece: Piece, from: Position) -> Vec<Position> {
    let fwd = piece.color.forward();
    let offsets = [(fwd, -1), (fwd, 0), (fwd, 1)];
    step_moves(board, piece, from, &offsets)
}

/// Bia advances onto an empty square only and captures diagonally
/// forward only (never straight ahead)
fn bia_moves(board: &Board, piece: Piece, from: Position) -> Vec<Position> {
    let mut moves = Vec::with_capacity(3);
    let fwd = piece.color.forward();

    let ahead = from.offset(fwd, 0);
    if ahead.is_valid() && board.piece_at(ahead).is_none() {
        moves.push(ahead);
    }

    for dc in [-1, 1] {
        let diag = from.offset(fwd, dc);
        if !diag.is_valid() {
            continue;
        }
        if let Some(target) = board.piece_at(diag) {
            if target.color != piece.color {
                moves.push(diag);
            }
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::board_from_fen;

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    #[test]
    fn test_khun_moves_all_eight() {
        let board = board_from_fen("8/8/8/8/3K4/8/8/7k w").unwrap();
        let moves = destinations(&board, pos("d4"));
        assert_eq!(moves.len(), 8);
    }

    #[test]
    fn test_khun_blocked_by_friendly() {
        let board = board_from_fen("8/8/8/3P4/3K4/8/8/7k w").unwrap();
        let moves = destinations(&board, pos("d4"));
        assert_eq!(moves.len(), 7);
        assert!(!moves.contains(&pos("d5")));
    }

    #[test]
    fn test_met_diagonals_only() {
        let board = board_from_fen("8/8/8/8/3Q4/8/8/7k w").unwrap();
        let moves = destinations(&board, pos("d4"));
        assert_eq!(moves.len(), 4);
        assert!(moves.contains(&pos("c5")));
        assert!(moves.contains(&pos("e5")));
        assert!(moves.contains(&pos("c3")));
        assert!(moves.contains(&pos("e3")));
    }

    #[test]
    fn test_rua_open_board() {
        let board = board_from_fen("8/8/8/8/3R4/8/8/7k w").unwrap();
        let moves = destinations(&board, pos("d4"));
        assert_eq!(moves.len(), 14);
    }

    #[test]
    fn test_rua_stops_inclusive_on_enemy_exclusive_on_friendly() {
        // Enemy pawn above on d6, friendly pawn on f4.
        let board = board_from_fen("8/8/3p4/8/3R1P2/8/8/7k w").unwrap();
        let moves = destinations(&board, pos("d4"));
        // Up the file: d5 then the capture on d6, not beyond.
        assert!(moves.contains(&pos("d5")));
        assert!(moves.contains(&pos("d6")));
        assert!(!moves.contains(&pos("d7")));
        // Right along the rank: e4 only, f4 is friendly.
        assert!(moves.contains(&pos("e4")));
        assert!(!moves.contains(&pos("f4")));
    }

    #[test]
    fn test_ma_jumps_ignore_blockers() {
        // Surround the Ma with friendly pawns; the jumps are unaffected.
        let board = board_from_fen("8/8/8/2PPP3/2PNP3/2PPP3/8/7k w").unwrap();
        let moves = destinations(&board, pos("d4"));
        assert_eq!(moves.len(), 8);
    }

    #[test]
    fn test_khon_forward_depends_on_color() {
        let board = board_from_fen("8/8/8/8/3B4/8/8/7k w").unwrap();
        let moves = destinations(&board, pos("d4"));
        assert_eq!(moves.len(), 3);
        assert!(moves.contains(&pos("c5")));
        assert!(moves.contains(&pos("d5")));
        assert!(moves.contains(&pos("e5")));

        let board = board_from_fen("8/8/8/3b4/8/8/8/7k b").unwrap();
        let moves = destinations(&board, pos("d5"));
        assert_eq!(moves.len(), 3);
        assert!(moves.contains(&pos("c4")));
        assert!(moves.contains(&pos("d4")));
        assert!(moves.contains(&pos("e4")));
    }

    #[test]
    fn test_bia_never_captures_straight() {
        // Black pawn directly ahead: no forward move, no capture.
        let board = board_from_fen("8/8/8/3p4/3P4/8/8/7k w").unwrap();
        let moves = destinations(&board, pos("d4"));
        assert!(moves.is_empty());
    }

    #[test]
    fn test_bia_captures_diagonally_only_onto_enemy() {
        // Enemy on c5, empty e5: diagonal capture allowed, diagonal
        // move onto the empty square is not.
        let board = board_from_fen("8/8/8/2p5/3P4/8/8/7k w").unwrap();
        let moves = destinations(&board, pos("d4"));
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&pos("d5")));
        assert!(moves.contains(&pos("c5")));
        assert!(!moves.contains(&pos("e5")));
    }

    #[test]
    fn test_empty_square_has_no_moves() {
        let board = board_from_fen("8/8/8/8/8/8/8/K6k w").unwrap();
        assert!(destinations(&board, pos("d4")).is_empty());
    }
}
