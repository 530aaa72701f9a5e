//! NoGo board representation and move execution.
//!
//! The board is a 1D array with padding: each row is `NS = size + 1` cells
//! wide, column 0 of every row is border, and rows 0 and `size + 1` are
//! border. A point is `row * NS + col` with 1-based `row` and `col`.
//!
//! NoGo differs from Go in that a move may never capture: a placement that
//! takes the last liberty of an opponent block is illegal, as is suicide.

use std::fmt;

use crate::constants::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::MoveError;

/// A point on the board, represented as an index into the 1D board array.
pub type Point = usize;

/// Contents of a board cell, or a side to move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Empty,
    Black,
    White,
    Border,
}

impl Color {
    /// The other player. Non-player markers map to themselves.
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
            other => other,
        }
    }

    #[inline]
    pub fn is_stone(self) -> bool {
        matches!(self, Color::Black | Color::White)
    }
}

/// A move: a stone at a point, or a pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Play(Point),
    Pass,
}

/// A NoGo position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    ns: usize,
    cells: Vec<Color>,
    current_player: Color,
}

impl Board {
    /// Create an empty board with Black to move.
    pub fn new(size: usize) -> Result<Self, MoveError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(MoveError::BoardSize(size));
        }
        let ns = size + 1;
        // One extra cell so the SE diagonal of the last point stays in bounds.
        let mut cells = vec![Color::Border; (size + 1) * (size + 2) + 1];
        for row in 1..=size {
            let start = row * ns + 1;
            cells[start..start + size].fill(Color::Empty);
        }
        Ok(Self {
            size,
            ns,
            cells,
            current_player: Color::Black,
        })
    }

    /// Parse a board diagram: one line per row from the top row (`size`) down
    /// to row 1, `X` for Black, `O` for White, `.` for empty. Whitespace inside
    /// a row is ignored. Black is to move.
    pub fn from_diagram(text: &str) -> Result<Self, MoveError> {
        let rows: Vec<Vec<char>> = text
            .lines()
            .map(|l| l.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|r| !r.is_empty())
            .collect();
        let mut board = Board::new(rows.len())?;
        let size = board.size;
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(MoveError::Diagram(format!(
                    "row {} has {} points, expected {size}",
                    i + 1,
                    row.len()
                )));
            }
            let r = size - i;
            for (c, ch) in row.iter().enumerate() {
                let color = match ch {
                    'X' | 'x' => Color::Black,
                    'O' | 'o' => Color::White,
                    '.' => Color::Empty,
                    other => {
                        return Err(MoveError::Diagram(format!("unexpected '{other}'")));
                    }
                };
                let pt = r * board.ns + c + 1;
                board.cells[pt] = color;
            }
        }
        Ok(board)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row stride of the 1D array.
    #[inline]
    pub fn ns(&self) -> usize {
        self.ns
    }

    #[inline]
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    /// Color at a point. Anything outside the array reads as border.
    #[inline]
    pub fn get(&self, pt: Point) -> Color {
        self.cells.get(pt).copied().unwrap_or(Color::Border)
    }

    #[inline]
    pub fn is_on_board(&self, pt: Point) -> bool {
        self.get(pt) != Color::Border
    }

    /// All on-board points in ascending index order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (1..=self.size).flat_map(move |row| (1..=self.size).map(move |col| row * self.ns + col))
    }

    pub fn empty_points(&self) -> Vec<Point> {
        self.points().filter(|&p| self.cells[p] == Color::Empty).collect()
    }

    /// The 4 orthogonal neighbors of an on-board point.
    #[inline]
    pub fn neighbors(&self, pt: Point) -> [Point; 4] {
        debug_assert!(self.is_on_board(pt), "point {pt} is not on the board");
        [pt - self.ns, pt - 1, pt + 1, pt + self.ns]
    }

    /// The 8 surrounding points, row by row, center skipped.
    ///
    /// Any `pt` is accepted: offsets wrap instead of underflowing, and points
    /// outside the array read as border through [`Board::get`].
    #[inline]
    pub fn neighbors8(&self, pt: Point) -> [Point; 8] {
        let ns = self.ns;
        [
            pt.wrapping_sub(ns + 1),
            pt.wrapping_sub(ns),
            pt.wrapping_sub(ns - 1),
            pt.wrapping_sub(1),
            pt.wrapping_add(1),
            pt.wrapping_add(ns - 1),
            pt.wrapping_add(ns),
            pt.wrapping_add(ns + 1),
        ]
    }

    /// Check whether `color` may place a stone at `pt`.
    pub fn is_legal(&self, pt: Point, color: Color) -> bool {
        self.check_placement(pt, color).is_ok()
    }

    /// Legal points for `color`, in ascending index order.
    pub fn legal_moves(&self, color: Color) -> Vec<Point> {
        self.points().filter(|&p| self.is_legal(p, color)).collect()
    }

    /// Play a move for `color`. On success the opponent is to move.
    pub fn play(&mut self, mv: Move, color: Color) -> Result<(), MoveError> {
        if !color.is_stone() {
            return Err(MoveError::NotAStone(color));
        }
        if let Move::Play(pt) = mv {
            self.check_placement(pt, color)?;
            self.cells[pt] = color;
        }
        self.current_player = color.opponent();
        Ok(())
    }

    /// Like [`Board::play`], but leaves `self` untouched and returns the result.
    pub fn apply(&self, mv: Move, color: Color) -> Result<Board, MoveError> {
        let mut next = self.clone();
        next.play(mv, color)?;
        Ok(next)
    }

    /// Place a stone already known to be legal.
    #[inline]
    pub(crate) fn place(&mut self, pt: Point, color: Color) {
        debug_assert!(self.is_legal(pt, color));
        self.cells[pt] = color;
        self.current_player = color.opponent();
    }

    /// Hand the turn to the other player.
    #[inline]
    pub(crate) fn pass(&mut self) {
        self.current_player = self.current_player.opponent();
    }

    fn check_placement(&self, pt: Point, color: Color) -> Result<(), MoveError> {
        if !color.is_stone() {
            return Err(MoveError::NotAStone(color));
        }
        if !self.is_on_board(pt) {
            return Err(MoveError::OffBoard(pt));
        }
        if self.cells[pt] != Color::Empty {
            return Err(MoveError::Occupied);
        }
        let opp = color.opponent();
        for n in self.neighbors(pt) {
            if self.cells[n] == opp && !self.block_has_liberty(n, pt, color) {
                return Err(MoveError::Capture);
            }
        }
        if !self.block_has_liberty(pt, pt, color) {
            return Err(MoveError::Suicide);
        }
        Ok(())
    }

    /// Flood-fill the block at `start` as if `placed` held a `placed_color`
    /// stone, stopping at the first liberty found.
    fn block_has_liberty(&self, start: Point, placed: Point, placed_color: Color) -> bool {
        let color_at = |p: Point| if p == placed { placed_color } else { self.cells[p] };
        let color = color_at(start);
        let mut visited = vec![false; self.cells.len()];
        let mut stack = vec![start];
        visited[start] = true;

        while let Some(p) = stack.pop() {
            for n in self.neighbors(p) {
                let c = color_at(n);
                if c == Color::Empty {
                    return true;
                }
                if c == color && !visited[n] {
                    visited[n] = true;
                    stack.push(n);
                }
            }
        }
        false
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=self.size).rev() {
            for col in 1..=self.size {
                let ch = match self.cells[row * self.ns + col] {
                    Color::Black => 'X',
                    Color::White => 'O',
                    _ => '.',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
