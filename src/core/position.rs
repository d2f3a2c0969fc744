use std::fmt::{Debug, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::PositionParseError;

/** Square on the board, stored as a 0x88 code.
 * Bits 6-4 -- row index (0 is row 1)
 * Bits 2-0 -- column index (0 is column 'a')
 * Bits 7 and 3 are always clear for a valid square. */
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position(u8);

impl Position {
    /// Square at `row` (1..=8) and `col` ('a'..='h').
    pub fn new(row: u8, col: char) -> Option<Position> {
        if !(1..=8).contains(&row) || !('a'..='h').contains(&col) {
            return None;
        }
        Some(Position(compact_pos(row - 1, col as u8 - b'a')))
    }

    /// Square on a row and column known to be on the board.
    pub(crate) const fn at(row: u8, col: char) -> Position {
        Position(compact_pos(row - 1, col as u8 - b'a'))
    }

    pub(crate) fn from_code(code: u8) -> Option<Position> {
        is_valid_coord(code).then_some(Position(code))
    }

    #[inline]
    pub(crate) fn code(self) -> u8 {
        self.0
    }

    /// Index into a 128 slot 0x88 array.
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    pub fn row(self) -> u8 {
        ((self.0 & 0xf0) >> 4) + 1
    }

    pub fn col(self) -> char {
        (b'a' + (self.0 & 0x0f)) as char
    }

    #[inline]
    pub(crate) fn rank_index(self) -> i8 {
        ((self.0 & 0xf0) >> 4) as i8
    }

    #[inline]
    pub(crate) fn file_index(self) -> i8 {
        (self.0 & 0x0f) as i8
    }

    /// Row and column deltas from `self` to `other`.
    pub(crate) fn delta(self, other: Position) -> (i8, i8) {
        (
            other.rank_index() - self.rank_index(),
            other.file_index() - self.file_index(),
        )
    }

    /// All 64 squares, row by row starting from a1.
    pub fn all() -> impl Iterator<Item = Position> {
        ITER_INDEX.iter().map(|&code| Position(code))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.col(), self.row())
    }
}

impl Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Position({self})")
    }
}

impl FromStr for Position {
    type Err = PositionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let (Some(col), Some(row), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(PositionParseError::Length(s.to_string()));
        };
        let col = col.to_ascii_lowercase();
        if !('a'..='h').contains(&col) {
            return Err(PositionParseError::Column(col));
        }
        row.to_digit(10)
            .and_then(|digit| Position::new(digit as u8, col))
            .ok_or(PositionParseError::Row(row))
    }
}

#[inline]
pub(crate) fn is_valid_coord(coord: u8) -> bool {
    coord & 0x88 == 0x00
}

#[inline]
pub(crate) const fn compact_pos(rank: u8, file: u8) -> u8 {
    rank << 4 | file
}

const ITER_INDEX: [u8; 64] = {
    let mut arr = [0; 64];
    let mut idx = 0;
    while idx < 64 {
        arr[idx] = ((idx / 8) << 4 | idx % 8) as u8;
        idx += 1;
    }
    arr
};
