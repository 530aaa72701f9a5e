//! Conversions between board points and GTP coordinate strings.
//!
//! GTP columns use the letters A-Z without `I`; rows count from 1 at the
//! bottom. Points are `row * (size + 1) + col`.

use crate::board::{Move, Point};
use crate::constants::{COLUMN_LETTERS, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::MoveError;

/// Split a point into its 1-based `(row, col)`.
#[inline]
pub fn point_to_coord(pt: Point, size: usize) -> (usize, usize) {
    (pt / (size + 1), pt % (size + 1))
}

/// Inverse of [`point_to_coord`].
#[inline]
pub fn coord_to_point(row: usize, col: usize, size: usize) -> Point {
    row * (size + 1) + col
}

/// Format a 1-based coordinate as e.g. `"C4"`.
pub fn format_coord(row: usize, col: usize) -> Result<String, MoveError> {
    if !(1..=MAX_BOARD_SIZE).contains(&row) || !(1..=MAX_BOARD_SIZE).contains(&col) {
        return Err(MoveError::CoordOutOfRange { row, col });
    }
    Ok(format!("{}{row}", COLUMN_LETTERS[col - 1] as char))
}

/// Format a move for a board of the given size. Passes print as `"pass"`.
pub fn format_move(mv: Move, size: usize) -> Result<String, MoveError> {
    match mv {
        Move::Pass => Ok("pass".into()),
        Move::Play(pt) => {
            let (row, col) = point_to_coord(pt, size);
            if row > size || col > size {
                return Err(MoveError::CoordOutOfRange { row, col });
            }
            format_coord(row, col)
        }
    }
}

/// Parse a GTP vertex such as `"c4"` or `"PASS"` for a board of the given size.
pub fn parse_move(s: &str, size: usize) -> Result<Move, MoveError> {
    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        return Err(MoveError::BoardSize(size));
    }
    let lower = s.trim().to_ascii_lowercase();
    if lower == "pass" {
        return Ok(Move::Pass);
    }
    let invalid = || MoveError::InvalidPoint(lower.clone());

    let mut chars = lower.chars();
    let col_c = chars.next().ok_or_else(invalid)?;
    if !col_c.is_ascii_lowercase() || col_c == 'i' {
        return Err(invalid());
    }
    let mut col = (col_c as u8 - b'a') as usize;
    if col_c < 'i' {
        col += 1;
    }
    let row_str = chars.as_str();
    if row_str.is_empty() || !row_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let row: usize = row_str.parse().map_err(|_| invalid())?;
    if row < 1 {
        return Err(invalid());
    }
    if col > size || row > size {
        return Err(MoveError::PointOffBoard(lower));
    }
    Ok(Move::Play(coord_to_point(row, col, size)))
}
