use crate::core::position::Position;

/// Walks the squares strictly between two aligned squares.
#[derive(Debug)]
pub struct BetweenIterator {
    current: u8,
    target: u8,
    step: u8,
}

impl Iterator for BetweenIterator {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.current = self.current.wrapping_add(self.step);
        if self.current == self.target {
            None
        } else {
            Position::from_code(self.current)
        }
    }
}

/// Squares strictly between `from` and `to`, or `None` when they don't share a
/// row, column or diagonal.
pub fn between(from: Position, to: Position) -> Option<BetweenIterator> {
    if !is_in_straight_line(from, to) && !is_in_diagonal_line(from, to) {
        return None;
    }
    let (d_row, d_col) = from.delta(to);
    Some(BetweenIterator {
        current: from.code(),
        target: to.code(),
        step: direction_step(d_row.signum(), d_col.signum()),
    })
}

/// Walks from a square (exclusive) towards the board edge.
pub struct DirectionIterator {
    position: u8,
    direction: u8,
}

impl Iterator for DirectionIterator {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.position = self.position.wrapping_add(self.direction);
        Position::from_code(self.position)
    }
}

/// Squares from `position` (exclusive) in the given unit direction. The walk
/// is fused: the first off-board step ends it.
pub fn in_direction(position: Position, d_row: i8, d_col: i8) -> std::iter::Fuse<DirectionIterator> {
    DirectionIterator {
        position: position.code(),
        direction: direction_step(d_row, d_col),
    }
    .fuse()
}

pub fn is_in_straight_line(a: Position, b: Position) -> bool {
    let (d_row, d_col) = a.delta(b);
    a != b && (d_row == 0 || d_col == 0)
}

pub fn is_in_diagonal_line(a: Position, b: Position) -> bool {
    let (d_row, d_col) = a.delta(b);
    a != b && d_row.abs() == d_col.abs()
}

/// King-step distance between two squares.
pub fn distance(a: Position, b: Position) -> u8 {
    let (d_row, d_col) = a.delta(b);
    d_row.unsigned_abs().max(d_col.unsigned_abs())
}

#[inline]
fn direction_step(d_row: i8, d_col: i8) -> u8 {
    (d_row as u8).wrapping_shl(4).wrapping_add(d_col as u8)
}
