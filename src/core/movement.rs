//! Movement rules: the geometric patterns a figure may follow.
//!
//! A rule looks at one candidate step `from`-`to` for a figure against a board
//! snapshot and either accepts it or names the reason it doesn't apply. Rules
//! know nothing about turn order, ownership of the source square or check;
//! those belong to [`crate::core::validator::MoveValidator`].

use log::trace;
use thiserror::Error;

use crate::core::engine::{Board, Figure, FigureKind};
use crate::core::position::Position;
use crate::core::utils::{between, distance, is_in_diagonal_line, is_in_straight_line};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MovementRule {
    /// One square straight ahead onto an empty square
    PawnStep,
    /// Two squares straight ahead from the start row over empty squares
    PawnDoubleStep,
    /// One square diagonally ahead, only onto an enemy figure
    PawnCapture,
    /// Any number of squares along a row or column
    Straight,
    /// Any number of squares along a diagonal
    Diagonal,
    /// L-shaped jump, ignoring anything in between
    KnightJump,
    /// One square in any direction
    KingStep,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("figure must leave its square")]
    NoMovement,
    #[error("not this figure's geometry")]
    WrongGeometry,
    #[error("path obstructed")]
    PathObstructed,
    #[error("destination occupied")]
    DestinationOccupied,
    #[error("nothing to capture")]
    NothingToCapture,
    #[error("pawn is not on its start row")]
    NotOnStartRow,
}

impl MovementRule {
    pub fn validate(
        self,
        figure: &Figure,
        from: Position,
        to: Position,
        board: &Board,
    ) -> Result<(), RuleViolation> {
        if from == to {
            return Err(RuleViolation::NoMovement);
        }
        let (d_row, d_col) = from.delta(to);
        let forward = figure.color.forward();
        match self {
            MovementRule::PawnStep => {
                if d_col != 0 || d_row != forward {
                    Err(RuleViolation::WrongGeometry)
                } else if !board.is_empty(to) {
                    Err(RuleViolation::DestinationOccupied)
                } else {
                    Ok(())
                }
            }
            MovementRule::PawnDoubleStep => {
                if d_col != 0 || d_row != 2 * forward {
                    Err(RuleViolation::WrongGeometry)
                } else if from.row() != figure.color.pawn_row() {
                    Err(RuleViolation::NotOnStartRow)
                } else if !path_is_clear(from, to, board) {
                    Err(RuleViolation::PathObstructed)
                } else if !board.is_empty(to) {
                    Err(RuleViolation::DestinationOccupied)
                } else {
                    Ok(())
                }
            }
            MovementRule::PawnCapture => {
                if d_col.abs() != 1 || d_row != forward {
                    Err(RuleViolation::WrongGeometry)
                } else {
                    match board.get(to) {
                        Some(target) if target.color != figure.color => Ok(()),
                        _ => Err(RuleViolation::NothingToCapture),
                    }
                }
            }
            MovementRule::Straight => sliding(is_in_straight_line(from, to), from, to, board),
            MovementRule::Diagonal => sliding(is_in_diagonal_line(from, to), from, to, board),
            MovementRule::KnightJump => {
                if matches!((d_row.abs(), d_col.abs()), (1, 2) | (2, 1)) {
                    Ok(())
                } else {
                    Err(RuleViolation::WrongGeometry)
                }
            }
            MovementRule::KingStep => {
                if distance(from, to) == 1 {
                    Ok(())
                } else {
                    Err(RuleViolation::WrongGeometry)
                }
            }
        }
    }
}

fn sliding(aligned: bool, from: Position, to: Position, board: &Board) -> Result<(), RuleViolation> {
    if !aligned {
        Err(RuleViolation::WrongGeometry)
    } else if !path_is_clear(from, to, board) {
        Err(RuleViolation::PathObstructed)
    } else {
        Ok(())
    }
}

fn path_is_clear(from: Position, to: Position, board: &Board) -> bool {
    between(from, to).is_some_and(|mut path| path.all(|position| board.is_empty(position)))
}

/// Lookup from figure kind to its movement rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct MovementStrategy;

impl MovementStrategy {
    /// Rules for `kind`, in evaluation order. Independent of any board state.
    pub fn rules_for(&self, kind: FigureKind) -> &'static [MovementRule] {
        match kind {
            FigureKind::Pawn => &[
                MovementRule::PawnStep,
                MovementRule::PawnDoubleStep,
                MovementRule::PawnCapture,
            ],
            FigureKind::Knight => &[MovementRule::KnightJump],
            FigureKind::Bishop => &[MovementRule::Diagonal],
            FigureKind::Rook => &[MovementRule::Straight],
            FigureKind::Queen => &[MovementRule::Straight, MovementRule::Diagonal],
            FigureKind::King => &[MovementRule::KingStep],
        }
    }
}

/** Try each rule in order; the first one accepting the move wins.
 * When none accept, the reason of the last rule tried is reported, not the
 * first or the most specific one. Pure: the board is only read. */
pub fn validate_movements(
    figure: &Figure,
    rules: &[MovementRule],
    from: Position,
    to: Position,
    board: &Board,
) -> Result<MovementRule, RuleViolation> {
    let mut last_failure = RuleViolation::WrongGeometry;
    for &rule in rules {
        match rule.validate(figure, from, to, board) {
            Ok(()) => {
                trace!("{:?} {from}-{to} accepted by {rule:?}", figure.kind);
                return Ok(rule);
            }
            Err(reason) => {
                trace!("{:?} {from}-{to} rejected by {rule:?}: {reason}", figure.kind);
                last_failure = reason;
            }
        }
    }
    Err(last_failure)
}
