use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::core::engine::{Board, Color, Figure, FigureKind};
use crate::core::error::MoveError;
use crate::core::position::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    /// Column step of the king towards this side.
    pub fn direction(self) -> i8 {
        match self {
            CastlingSide::KingSide => 1,
            CastlingSide::QueenSide => -1,
        }
    }

    pub fn rook_column(self) -> char {
        match self {
            CastlingSide::KingSide => 'h',
            CastlingSide::QueenSide => 'a',
        }
    }

    pub fn king_destination_column(self) -> char {
        match self {
            CastlingSide::KingSide => 'g',
            CastlingSide::QueenSide => 'c',
        }
    }

    pub fn rook_destination_column(self) -> char {
        match self {
            CastlingSide::KingSide => 'f',
            CastlingSide::QueenSide => 'd',
        }
    }
}

impl Display for CastlingSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            CastlingSide::KingSide => "king side",
            CastlingSide::QueenSide => "queen side",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveType {
    Normal,
    Capture,
    CastleKingSide,
    CastleQueenSide,
    Promotion,
}

/// One committed or attempted transition, as reported to the score keeper.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub move_type: MoveType,
    /// Letter of the figure standing on `to` after the move; `None` for pawns.
    /// For a promotion it is the chosen kind, once known.
    pub figure_letter: Option<char>,
    pub capture: bool,
}

impl Move {
    pub fn is_castling(&self) -> bool {
        matches!(
            self.move_type,
            MoveType::CastleKingSide | MoveType::CastleQueenSide
        )
    }

    pub fn is_promotion(&self) -> bool {
        self.move_type == MoveType::Promotion
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.move_type {
            MoveType::CastleKingSide => return f.write_str("O-O"),
            MoveType::CastleQueenSide => return f.write_str("O-O-O"),
            _ => (),
        }
        let separator = if self.capture { 'x' } else { '-' };
        match (self.move_type, self.figure_letter) {
            (MoveType::Promotion, letter) => {
                write!(f, "{}{separator}{}", self.from, self.to)?;
                if let Some(letter) = letter {
                    write!(f, "{letter}")?;
                }
                Ok(())
            }
            (_, Some(letter)) => write!(f, "{letter}{}{separator}{}", self.from, self.to),
            (_, None) => write!(f, "{}{separator}{}", self.from, self.to),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub color: Color,
    trophies: Vec<Figure>,
}

impl Player {
    pub fn new(name: impl Into<String>, color: Color) -> Player {
        Player {
            name: name.into(),
            color,
            trophies: Vec::new(),
        }
    }

    /// Figures this player has captured, in capture order.
    pub fn trophies(&self) -> &[Figure] {
        &self.trophies
    }

    pub(crate) fn take_trophy(&mut self, figure: Figure) {
        self.trophies.push(figure);
    }

    /// Material value of the captured figures.
    pub fn material(&self) -> u32 {
        self.trophies.iter().map(|figure| figure.kind.value()).sum()
    }
}

/// A pawn that reached the last row and waits for its replacement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromotionContext {
    pub pawn: Figure,
    pub position: Position,
    pub(crate) pending: Move,
}

impl PromotionContext {
    pub fn color(&self) -> Color {
        self.pawn.color
    }
}

/** Collaborators around the engine: renderers and score keepers.
 * All callbacks run synchronously inside the engine call that caused them. */
pub trait GameObserver {
    /// Game start.
    fn initialize(&mut self, _players: &[Player], _board: &Board) {}

    /// After every committed board mutation.
    fn render_board(&mut self, _board: &Board) {}

    /// Completed move. `next` is the player on move afterwards.
    fn record_move(&mut self, _move: &Move, _mover: &Player, _next: Option<&Player>) {}

    /// Move attempt that was refused; the same player stays on move.
    fn record_rejection(&mut self, _player: &Player, _error: &MoveError) {}

    /// A pawn of `player` reached `position`; the choice comes back through
    /// [`crate::GameEngine::resolve_promotion`].
    fn request_promotion(&mut self, _player: &Player, _position: Position, _choices: &[FigureKind]) {}
}

impl GameObserver for () {}
