//! 10x12 mailbox square addressing.
//!
//! The board is modeled as a flat 120-cell array: 12 rows of 10 columns,
//! with the 64 playable squares embedded inside a two-file-wide sentinel
//! border. Rows `2..=9` are playable; within a playable row, files `1..=8`
//! are playable. Column 0 and column 9 of every row, plus rows 0, 1, 10, 11
//! entirely, are border cells. This lets off-board detection be a single
//! cell read instead of a pair of range checks against rank/file.

use crate::error::{ChessError, ChessResult};
use std::fmt;

/// Index into the 120-cell mailbox array.
pub type Square = u8;

pub const BOARD_CELLS: usize = 120;

/// Directions a rook slides along.
pub const ORTHOGONAL_DELTAS: [i8; 4] = [-10, -1, 10, 1];
/// Directions a bishop slides along.
pub const DIAGONAL_DELTAS: [i8; 4] = [-11, -9, 9, 11];
/// All eight queen/king ray directions (orthogonal then diagonal).
pub const ALL_SLIDER_DELTAS: [i8; 8] = [-10, -1, 10, 1, -11, -9, 9, 11];
/// Knight jump offsets.
pub const KNIGHT_DELTAS: [i8; 8] = [-21, -19, -12, -8, 8, 12, 19, 21];
/// King step offsets (identical to the slider deltas, taken one step).
pub const KING_DELTAS: [i8; 8] = ALL_SLIDER_DELTAS;

/// Row (0..=11) of a mailbox index.
#[inline]
pub const fn row_of(sq: Square) -> i8 {
    (sq / 10) as i8
}

/// Column (0..=9) of a mailbox index.
#[inline]
pub const fn col_of(sq: Square) -> i8 {
    (sq % 10) as i8
}

/// True iff `sq` falls inside the playable 8x8 region (rows 2..=9, files 1..=8).
#[inline]
pub const fn is_playable(sq: Square) -> bool {
    let row = row_of(sq);
    let col = col_of(sq);
    row >= 2 && row <= 9 && col >= 1 && col <= 8
}

/// Build a mailbox index from a 1-based file (1..=8, a..=h) and a 1-based
/// rank (1..=8).
#[inline]
pub const fn from_file_rank(file: u8, rank: u8) -> Square {
    ((rank as i8 + 1) * 10 + file as i8) as Square
}

/// 1-based file (1..=8) of a playable square.
#[inline]
pub const fn file_of(sq: Square) -> u8 {
    col_of(sq) as u8
}

/// 1-based rank (1..=8) of a playable square.
#[inline]
pub const fn rank_of(sq: Square) -> u8 {
    (row_of(sq) - 1) as u8
}

/// Zero-based file (0..=7), the index used by Zobrist en-passant-file keys.
#[inline]
pub const fn file_index(sq: Square) -> u8 {
    file_of(sq) - 1
}

/// Apply a delta to a mailbox index without bounds checking. Callers must
/// check [`is_playable`] on the result before treating it as a board cell.
#[inline]
pub fn step(sq: Square, delta: i8) -> Option<Square> {
    let next = sq as i16 + delta as i16;
    if (0..BOARD_CELLS as i16).contains(&next) {
        Some(next as Square)
    } else {
        None
    }
}

/// Parse a square in algebraic notation, e.g. `"e4"`.
pub fn parse_algebraic(text: &str) -> ChessResult<Square> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidAlgebraicSquare(text.to_owned()));
    }
    let file = match bytes[0] {
        b'a'..=b'h' => bytes[0] - b'a' + 1,
        _ => return Err(ChessError::InvalidAlgebraicSquare(text.to_owned())),
    };
    let rank = match bytes[1] {
        b'1'..=b'8' => bytes[1] - b'1' + 1,
        _ => return Err(ChessError::InvalidAlgebraicSquare(text.to_owned())),
    };
    Ok(from_file_rank(file, rank))
}

/// Render a playable square in algebraic notation, e.g. `"e4"`.
pub fn to_algebraic(sq: Square) -> String {
    debug_assert!(is_playable(sq), "square {sq} is off-board");
    let file = (b'a' + file_index(sq)) as char;
    let rank = (b'1' + rank_of(sq) - 1) as char;
    format!("{file}{rank}")
}

/// Thin wrapper used only where a `Display` impl reads better than the raw
/// index in diagnostics (debug assertions, test failure messages).
pub struct DisplaySquare(pub Square);

impl fmt::Display for DisplaySquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_playable(self.0) {
            write!(f, "{}", to_algebraic(self.0))
        } else {
            write!(f, "<off-board:{}>", self.0)
        }
    }
}
