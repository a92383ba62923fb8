//! FEN parsing and generation
//!
//! Format: `<board> <turn>`
//!
//! Board: 8 rows from rank 8 (row 0) down to rank 1, separated by `/`,
//! digits for runs of empty squares.
//!
//! Piece symbols:
//! - White: K (Khun) Q (Met) R (Rua) N (Ma) B (Khon) P (Bia)
//! - Black: k q r n b p
//!
//! Turn: `w` or `b`.

use crate::board::Board;
use crate::types::{Color, Piece, Position};

/// A parsed FEN position
#[derive(Debug, Clone)]
pub struct FenState {
    pub board: Board,
    pub turn: Color,
}

/// Parse a FEN string
pub fn parse_fen(fen: &str) -> Result<FenState, String> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(format!(
            "Invalid FEN format: expected '<board> <turn>', got: {}",
            fen
        ));
    }

    let board = parse_board(parts[0])?;
    let turn = Color::from_fen_char(parts[1].chars().next().unwrap_or('w'))
        .ok_or_else(|| format!("Invalid turn: {}", parts[1]))?;

    Ok(FenState { board, turn })
}

/// Parse the board field
fn parse_board(board_str: &str) -> Result<Board, String> {
    let rows: Vec<&str> = board_str.split('/').collect();
    if rows.len() != 8 {
        return Err(format!("Invalid board: expected 8 rows, got {}", rows.len()));
    }

    let mut board = Board::empty();

    for (row_idx, row_str) in rows.iter().enumerate() {
        let row = row_idx as i8;
        let mut col: i8 = 0;

        for ch in row_str.chars() {
            if col >= 8 {
                return Err(format!("Row {} overflows 8 columns", 8 - row));
            }

            if ch.is_ascii_digit() {
                col += (ch as i8) - ('0' as i8);
            } else {
                let piece = Piece::from_abbreviation(ch)
                    .ok_or_else(|| format!("Invalid piece char: {}", ch))?;
                board.set_piece(Position::new(row, col), Some(piece));
                col += 1;
            }
        }

        if col != 8 {
            return Err(format!("Row {} has {} columns, expected 8", 8 - row, col));
        }
    }

    Ok(board)
}

/// Convenience: parse a FEN and keep only the board
pub fn board_from_fen(fen: &str) -> Result<Board, String> {
    Ok(parse_fen(fen)?.board)
}

/// Generate the FEN string for a board and side to move
pub fn board_to_fen(board: &Board, turn: Color) -> String {
    let mut fen = String::with_capacity(72);

    for row in 0..8i8 {
        if row > 0 {
            fen.push('/');
        }
        let mut empty_run = 0;
        for col in 0..8i8 {
            match board.piece_at(Position::new(row, col)) {
                Some(piece) => {
                    if empty_run > 0 {
                        fen.push((b'0' + empty_run) as char);
                        empty_run = 0;
                    }
                    fen.push(piece.abbreviation());
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            fen.push((b'0' + empty_run) as char);
        }
    }

    fen.push(' ');
    fen.push(turn.to_fen_char());
    fen
}

/// FEN for the fixed starting position
pub const INITIAL_FEN: &str = "rnbqkbnr/8/pppppppp/8/8/PPPPPPPP/8/RNBQKBNR w";
