//! Error types for move validation and board mutation.
//!
//! Every error here is local and recoverable: the engine reports it, restores
//! the input selection and keeps the same player on move.

use thiserror::Error;

use crate::core::definitions::CastlingSide;
use crate::core::engine::{Color, FigureKind};
use crate::core::movement::RuleViolation;
use crate::core::position::Position;

/// Why a move attempt was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// No figure at the source square
    #[error("no figure at {0}")]
    EmptySource(Position),

    /// Source figure belongs to the other player
    #[error("figure at {position} belongs to {owner}")]
    NotYourFigure { position: Position, owner: Color },

    /// Destination holds a figure of the moving color
    #[error("{0} is occupied by an allied figure")]
    OccupiedByAlly(Position),

    /// No movement rule of the figure accepts the move
    #[error("{kind:?} can't move {from}-{to}: {reason}")]
    IllegalGeometry {
        kind: FigureKind,
        from: Position,
        to: Position,
        reason: RuleViolation,
    },

    /// King or rook is missing from its home square, or has already moved
    #[error("{side} castling is forfeited: {reason}")]
    CastlingForfeited {
        side: CastlingSide,
        reason: CastlingForfeit,
    },

    /// Castling path is not clear or crosses an attacked square
    #[error("{side} castling is blocked: {reason}")]
    CastlingBlocked {
        side: CastlingSide,
        reason: CastlingBlock,
    },

    /// Move would leave the mover's own king attacked
    #[error("move {from}-{to} would leave the {color} king in check")]
    SelfCheck {
        color: Color,
        from: Position,
        to: Position,
    },

    /// Board input while a promotion choice is outstanding
    #[error("promotion at {0} must be resolved first")]
    PromotionPending(Position),

    /// Promotion choice with nothing to promote
    #[error("no promotion is pending")]
    NoPromotionPending,

    /// Promotion to a kind outside of rook, knight, bishop and queen
    #[error("pawn can't be promoted to {0:?}")]
    InvalidPromotion(FigureKind),

    /// Board input while the menu is shown
    #[error("menu is open")]
    MenuOpen,

    /// Board refused a mutation the validator had accepted
    #[error(transparent)]
    Board(#[from] BoardError),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastlingForfeit {
    #[error("no king on {0}")]
    KingMissing(Position),
    #[error("king has already moved")]
    KingMoved,
    #[error("no rook on {0}")]
    RookMissing(Position),
    #[error("rook on {0} has already moved")]
    RookMoved(Position),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastlingBlock {
    #[error("path between king and rook is not clear")]
    PathObstructed,
    #[error("{0} is under attack")]
    SquareAttacked(Position),
}

/// Raw board mutation failures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("square {0} is already occupied")]
    SquareOccupied(Position),
    #[error("square {0} is empty")]
    SquareEmpty(Position),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionParseError {
    #[error("square must be a column letter and a row digit, got {0:?}")]
    Length(String),
    #[error("column must be within 'a'..='h', got {0:?}")]
    Column(char),
    #[error("row must be within 1..=8, got {0:?}")]
    Row(char),
}

/// Result type alias for move validation
pub type MoveResult<T> = Result<T, MoveError>;
