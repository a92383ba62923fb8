//! Core Makruk type definitions
//!
//! Basic value types shared by the board, rules and search modules.

use std::fmt;

/// Piece color / side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The opposing side
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta for one step forward (White advances toward row 0)
    #[inline]
    pub fn forward(&self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Index into per-color tables (captured lists)
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Parse from a FEN turn character
    pub fn from_fen_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }

    /// Convert to a FEN turn character
    pub fn to_fen_char(&self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Piece kind
///
/// A closed set: Makruk has exactly six kinds, so move generation is a
/// kind-based switch rather than open-ended polymorphism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// King; its removal from the board ends the game
    Khun,
    /// Queen-analog, one step diagonally; also the Bia promotion target
    Met,
    /// Rook, unlimited orthogonal slide
    Rua,
    /// Knight, standard L-jumps
    Ma,
    /// One step forward or diagonally forward
    Khon,
    /// Pawn: forward onto empty, captures diagonally forward only
    Bia,
}

impl PieceKind {
    /// Parse from a FEN character (case-insensitive)
    pub fn from_fen_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'k' => Some(PieceKind::Khun),
            'q' => Some(PieceKind::Met),
            'r' => Some(PieceKind::Rua),
            'n' => Some(PieceKind::Ma),
            'b' => Some(PieceKind::Khon),
            'p' => Some(PieceKind::Bia),
            _ => None,
        }
    }

    /// Convert to a FEN character (lowercase)
    pub fn to_fen_char(&self) -> char {
        match self {
            PieceKind::Khun => 'k',
            PieceKind::Met => 'q',
            PieceKind::Rua => 'r',
            PieceKind::Ma => 'n',
            PieceKind::Khon => 'b',
            PieceKind::Bia => 'p',
        }
    }

    /// Material value; the Khun dominates everything else so its loss
    /// swamps all positional terms
    pub fn value(&self) -> f64 {
        match self {
            PieceKind::Khun => 1000.0,
            PieceKind::Met => 9.0,
            PieceKind::Rua => 5.0,
            PieceKind::Ma => 3.0,
            PieceKind::Khon => 3.0,
            PieceKind::Bia => 1.0,
        }
    }

    /// Thai piece name, used in move confirmations
    pub fn name(&self) -> &'static str {
        match self {
            PieceKind::Khun => "Khun",
            PieceKind::Met => "Met",
            PieceKind::Rua => "Rua",
            PieceKind::Ma => "Ma",
            PieceKind::Khon => "Khon",
            PieceKind::Bia => "Bia",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An immutable piece value: kind plus color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color }
    }

    /// Single-character board symbol: uppercase White, lowercase Black
    pub fn abbreviation(&self) -> char {
        let c = self.kind.to_fen_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parse a board symbol back into a piece
    pub fn from_abbreviation(c: char) -> Option<Piece> {
        let kind = PieceKind::from_fen_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece { kind, color })
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

/// Board position (row, col)
///
/// row: 0-7 (0 is Black's back rank, rank 8 in algebraic notation)
/// col: 0-7 (file a to file h, left to right)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub fn new(row: i8, col: i8) -> Self {
        Position { row, col }
    }

    /// Bounds check against the 8x8 board
    #[inline]
    pub fn is_valid(&self) -> bool {
        (0..8).contains(&self.row) && (0..8).contains(&self.col)
    }

    /// Position plus a (row, col) delta
    #[inline]
    pub fn offset(&self, row_delta: i8, col_delta: i8) -> Position {
        Position {
            row: self.row + row_delta,
            col: self.col + col_delta,
        }
    }

    /// Parse algebraic notation ("a8" is row 0, col 0)
    pub fn from_algebraic(s: &str) -> Option<Position> {
        let mut chars = s.chars();
        let file = chars.next()?.to_ascii_lowercase();
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let col = match file {
            'a'..='h' => (file as i8) - ('a' as i8),
            _ => return None,
        };
        let row = match rank {
            '1'..='8' => 8 - ((rank as i8) - ('0' as i8)),
            _ => return None,
        };
        Some(Position { row, col })
    }

    /// Format as algebraic notation
    pub fn to_algebraic(&self) -> String {
        let file = (b'a' + self.col as u8) as char;
        format!("{}{}", file, 8 - self.row)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

/// A move from one square to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Move { from, to }
    }

    /// The same squares traversed the other way
    pub fn reversed(&self) -> Move {
        Move {
            from: self.to,
            to: self.from,
        }
    }

    /// Parse 4-character notation like "e3e4"
    pub fn from_notation(s: &str) -> Option<Move> {
        let s = s.trim();
        if !s.is_ascii() || s.len() != 4 {
            return None;
        }
        let from = Position::from_algebraic(&s[0..2])?;
        let to = Position::from_algebraic(&s[2..4])?;
        Some(Move { from, to })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Failure modes of applying a move; all locally recoverable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// No piece on the source square
    NoPieceAtSource,
    /// Destination not in the piece's legal-destination set
    IllegalMove,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::NoPieceAtSource => write!(f, "No piece at the source position."),
            MoveError::IllegalMove => write!(f, "Invalid move for that piece."),
        }
    }
}

impl std::error::Error for MoveError {}

/// Game outcome as seen by the board
///
/// Draws are decided by the session layer (repetition, move limit),
/// never by the board itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Ongoing,
    WhiteWins,
    BlackWins,
}

impl GameResult {
    #[inline]
    pub fn is_over(&self) -> bool {
        *self != GameResult::Ongoing
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            GameResult::Ongoing => None,
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
        }
    }
}
