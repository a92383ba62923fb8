//! Makruk board state
//!
//! Owns the 8x8 grid, capture bookkeeping, move application with Bia
//! promotion, terminal detection, static evaluation and full legal-move
//! enumeration. `Clone` performs the structural deep copy the search
//! relies on: one array copy plus the small auxiliary fields.

use std::fmt;

use crate::rules;
use crate::types::{Color, GameResult, Move, MoveError, Piece, PieceKind, Position};

/// Result of a successfully applied move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Piece removed from the destination square, if any
    pub captured: Option<Piece>,
    /// Whether a Bia was promoted to Met by this move
    pub promoted: bool,
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move executed.")?;
        if let Some(captured) = self.captured {
            write!(f, " Captured {}.", captured)?;
        }
        if self.promoted {
            write!(f, " Bia promoted to Met.")?;
        }
        Ok(())
    }
}

/// 8x8 board with capture lists and last-move bookkeeping
#[derive(Debug, Clone)]
pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
    /// Last applied move; enumeration may exclude its exact reversal
    last_move: Option<Move>,
    /// Captured pieces, indexed by the victim's color
    captured: [Vec<Piece>; 2],
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    /// Board with the fixed Makruk starting layout
    pub fn new() -> Self {
        let mut board = Board::empty();
        board.setup_pieces();
        board
    }

    /// Completely empty board, for building test positions and FEN parsing
    pub fn empty() -> Self {
        Board {
            grid: [[None; 8]; 8],
            last_move: None,
            captured: [Vec::new(), Vec::new()],
        }
    }

    /// Place the initial pieces: back-rank majors in fixed order, Bia on
    /// the third rank from each back rank, mirrored for both colors
    fn setup_pieces(&mut self) {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rua,
            PieceKind::Ma,
            PieceKind::Khon,
            PieceKind::Met,
            PieceKind::Khun,
            PieceKind::Khon,
            PieceKind::Ma,
            PieceKind::Rua,
        ];

        for col in 0..8 {
            self.grid[2][col] = Some(Piece::new(PieceKind::Bia, Color::Black));
            self.grid[5][col] = Some(Piece::new(PieceKind::Bia, Color::White));
            self.grid[0][col] = Some(Piece::new(BACK_RANK[col], Color::Black));
            self.grid[7][col] = Some(Piece::new(BACK_RANK[col], Color::White));
        }
    }

    /// Bounds check
    #[inline]
    pub fn is_on_board(&self, pos: Position) -> bool {
        pos.is_valid()
    }

    /// Piece on the given square, if any
    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        if !pos.is_valid() {
            return None;
        }
        self.grid[pos.row as usize][pos.col as usize]
    }

    /// Place or clear a square directly (setup and FEN parsing only)
    pub fn set_piece(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.is_valid() {
            self.grid[pos.row as usize][pos.col as usize] = piece;
        }
    }

    /// Last applied move
    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Pieces captured so far, indexed by the victim's color
    pub fn captured_pieces(&self, color: Color) -> &[Piece] {
        &self.captured[color.index()]
    }

    /// Validate and apply a move
    ///
    /// On success the piece is relocated, any victim is appended to its
    /// color's capture list, a Bia reaching its terminal row becomes a
    /// Met, and the move is recorded as `last_move`.
    pub fn apply_move(&mut self, mv: Move) -> Result<MoveOutcome, MoveError> {
        let piece = self.piece_at(mv.from).ok_or(MoveError::NoPieceAtSource)?;

        let legal = rules::destinations(self, mv.from);
        if !legal.contains(&mv.to) {
            return Err(MoveError::IllegalMove);
        }

        let target = self.piece_at(mv.to);

        self.grid[mv.to.row as usize][mv.to.col as usize] = Some(piece);
        self.grid[mv.from.row as usize][mv.from.col as usize] = None;

        if let Some(victim) = target {
            self.captured[victim.color.index()].push(victim);
        }

        // Bia promotion: the pawn identity is destroyed, never kept
        let mut promoted = false;
        if piece.kind == PieceKind::Bia {
            let promotion_row = match piece.color {
                Color::White => 0,
                Color::Black => 7,
            };
            if mv.to.row == promotion_row {
                self.grid[mv.to.row as usize][mv.to.col as usize] =
                    Some(Piece::new(PieceKind::Met, piece.color));
                promoted = true;
                log::debug!("{} Bia promoted to Met on {}", piece.color, mv.to);
            }
        }

        self.last_move = Some(mv);

        Ok(MoveOutcome {
            captured: target,
            promoted,
        })
    }

    /// Every move available to `color`, row-major over source squares,
    /// per-piece rule order within each source
    pub fn moves_for(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(40);
        for row in 0..8 {
            for col in 0..8 {
                let from = Position::new(row, col);
                match self.piece_at(from) {
                    Some(p) if p.color == color => {
                        for to in rules::destinations(self, from) {
                            moves.push(Move::new(from, to));
                        }
                    }
                    _ => {}
                }
            }
        }
        moves
    }

    /// Same as `moves_for`, minus the exact reversal of the last move
    ///
    /// Discourages immediate back-and-forth shuffling during search; it
    /// is not a repetition rule and does not prevent longer cycles.
    pub fn moves_excluding_reverse(&self, color: Color) -> Vec<Move> {
        let mut moves = self.moves_for(color);
        if let Some(last) = self.last_move {
            let reversed = last.reversed();
            moves.retain(|m| *m != reversed);
        }
        moves
    }

    /// Whether either Khun is entirely absent from the board
    ///
    /// The White Khun is checked first, so the unreachable both-absent
    /// position reports a Black win.
    pub fn game_result(&self) -> GameResult {
        let mut white_khun = false;
        let mut black_khun = false;
        for row in &self.grid {
            for square in row {
                if let Some(p) = square {
                    if p.kind == PieceKind::Khun {
                        match p.color {
                            Color::White => white_khun = true,
                            Color::Black => black_khun = true,
                        }
                    }
                }
            }
        }
        if !white_khun {
            GameResult::BlackWins
        } else if !black_khun {
            GameResult::WhiteWins
        } else {
            GameResult::Ongoing
        }
    }

    /// Static evaluation from White's perspective
    ///
    /// Per piece: material value, +0.1 inside the central 4x4, otherwise
    /// -0.1 on any edge rank or file, plus 0.05 per legal destination.
    /// White contributions are added, Black subtracted. The summation
    /// order is fixed (row-major) so scores are reproducible.
    pub fn evaluate(&self) -> f64 {
        let mut total = 0.0;
        for row in 0..8i8 {
            for col in 0..8i8 {
                let pos = Position::new(row, col);
                let piece = match self.piece_at(pos) {
                    Some(p) => p,
                    None => continue,
                };

                let mut value = piece.kind.value();

                if (2..=5).contains(&row) && (2..=5).contains(&col) {
                    value += 0.1;
                } else if row == 0 || row == 7 || col == 0 || col == 7 {
                    value -= 0.1;
                }

                value += 0.05 * rules::destinations(self, pos).len() as f64;

                match piece.color {
                    Color::White => total += value,
                    Color::Black => total -= value,
                }
            }
        }
        total
    }

    /// Placement-only fingerprint for repetition detection
    ///
    /// One symbol per square, row-major; side to move is deliberately
    /// not encoded, so placements collide regardless of the mover.
    pub fn fingerprint(&self) -> String {
        let mut state = String::with_capacity(64);
        for row in &self.grid {
            for square in row {
                match square {
                    Some(p) => state.push(p.abbreviation()),
                    None => state.push('.'),
                }
            }
        }
        state
    }
}

impl fmt::Display for Board {
    /// Text diagram with rank and file labels
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for (i, row) in self.grid.iter().enumerate() {
            write!(f, "{} ", 8 - i)?;
            for square in row {
                match square {
                    Some(p) => write!(f, "{} ", p.abbreviation())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f, "{}", 8 - i)?;
        }
        writeln!(f, "  a b c d e f g h")
    }
}
