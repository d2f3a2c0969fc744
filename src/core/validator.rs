//! Move validation: ownership and occupancy preconditions, movement rules,
//! check detection and castling.
//!
//! The validator only ever reads the board it was built over. Planning a move
//! produces the resulting board as a new value, so a refused move leaves
//! nothing behind to roll back.

use std::iter::once;

use log::{debug, trace};

use crate::core::definitions::{CastlingSide, Move, MoveType, PromotionContext};
use crate::core::engine::{Board, Color, Figure, FigureKind};
use crate::core::error::{CastlingBlock, CastlingForfeit, MoveError, MoveResult};
use crate::core::movement::{validate_movements, MovementRule, MovementStrategy};
use crate::core::position::Position;
use crate::core::utils::in_direction;

/// Rook companion move of a castling, as found by
/// [`MoveValidator::check_if_castling_possible`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastlingPlan {
    pub side: CastlingSide,
    pub king_from: Position,
    pub king_to: Position,
    pub rook: Figure,
    pub rook_from: Position,
    pub rook_to: Position,
}

/// Outcome of a validated move, not yet committed.
#[derive(Clone, Debug)]
pub struct Transition {
    /// Board after the move
    pub board: Board,
    pub mv: Move,
    /// Enemy figure taken off the destination square
    pub captured: Option<Figure>,
    pub castling: Option<CastlingPlan>,
    /// Set when a pawn reached its last row
    pub promotion: Option<PromotionContext>,
}

pub struct MoveValidator<'a> {
    board: &'a Board,
    strategy: MovementStrategy,
}

impl<'a> MoveValidator<'a> {
    pub fn new(board: &'a Board) -> Self {
        MoveValidator {
            board,
            strategy: MovementStrategy,
        }
    }

    /// The source square must hold a figure of `color`.
    pub fn check_ownership(&self, color: Color, from: Position) -> MoveResult<Figure> {
        match self.board.get(from) {
            None => Err(MoveError::EmptySource(from)),
            Some(figure) if figure.color != color => Err(MoveError::NotYourFigure {
                position: from,
                owner: figure.color,
            }),
            Some(figure) => Ok(figure),
        }
    }

    /// The destination may be empty or hold an enemy, never an ally.
    pub fn check_destination(&self, color: Color, to: Position) -> MoveResult<Option<Figure>> {
        match self.board.get(to) {
            Some(figure) if figure.color == color => Err(MoveError::OccupiedByAlly(to)),
            target => Ok(target),
        }
    }

    pub fn validate_geometry(
        &self,
        figure: &Figure,
        from: Position,
        to: Position,
    ) -> MoveResult<MovementRule> {
        let rules = figure.movements(&self.strategy);
        validate_movements(figure, rules, from, to, self.board).map_err(|reason| {
            MoveError::IllegalGeometry {
                kind: figure.kind,
                from,
                to,
                reason,
            }
        })
    }

    /// Ownership, occupancy and movement rules, in that order. Check safety is
    /// not part of it.
    pub fn validate(&self, color: Color, from: Position, to: Position) -> MoveResult<Figure> {
        let figure = self.check_ownership(color, from)?;
        self.check_destination(color, to)?;
        self.validate_geometry(&figure, from, to)?;
        Ok(figure)
    }

    /** Whether a `color` king standing on `test_position` could be captured.
     * With a castling side, the two squares the king crosses towards that
     * side are tested as well. */
    pub fn king_is_under_attack(
        &self,
        color: Color,
        test_position: Position,
        castling: Option<CastlingSide>,
    ) -> bool {
        self.first_attacked_square(color, test_position, castling)
            .is_some()
    }

    fn first_attacked_square(
        &self,
        color: Color,
        test_position: Position,
        castling: Option<CastlingSide>,
    ) -> Option<Position> {
        let crossed = castling
            .into_iter()
            .flat_map(|side| in_direction(test_position, 0, side.direction()).take(2));
        once(test_position)
            .chain(crossed)
            .find(|&square| self.square_is_attacked(color, square))
    }

    /// Runs every enemy figure's rules against a king of `color` placed on
    /// `square`, stopping at the first one that gets through.
    fn square_is_attacked(&self, color: Color, square: Position) -> bool {
        let mut hypothetical = self.board.clone();
        if let Some(king) = self.board.king_position(color) {
            hypothetical.remove_figure(king);
        }
        hypothetical.remove_figure(square);
        if hypothetical
            .add_figure(square, Figure::new(FigureKind::King, color))
            .is_err()
        {
            return false;
        }
        let validator = MoveValidator::new(&hypothetical);
        let attacker = hypothetical
            .figures_of(color.opposite())
            .find(|&(from, _)| validator.validate(color.opposite(), from, square).is_ok());
        if let Some((from, figure)) = attacker {
            trace!("{square} is attacked by {:?} on {from}", figure.kind);
        }
        attacker.is_some()
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.board
            .king_position(color)
            .is_some_and(|king| self.king_is_under_attack(color, king, None))
    }

    /// Checks the joint king and rook preconditions of castling and returns
    /// the rook's companion move.
    pub fn check_if_castling_possible(
        &self,
        color: Color,
        side: CastlingSide,
    ) -> MoveResult<CastlingPlan> {
        let row = color.home_row();
        let king_from = Position::at(row, 'e');
        let rook_from = Position::at(row, side.rook_column());
        let rook_to = Position::at(row, side.rook_destination_column());
        let forfeited = |reason| MoveError::CastlingForfeited { side, reason };
        let blocked = |reason| MoveError::CastlingBlocked { side, reason };

        let king = self
            .board
            .get(king_from)
            .filter(|figure| figure.color == color && figure.kind == FigureKind::King)
            .ok_or(forfeited(CastlingForfeit::KingMissing(king_from)))?;
        if king.has_moved() {
            return Err(forfeited(CastlingForfeit::KingMoved));
        }
        let rook = self
            .board
            .get(rook_from)
            .filter(|figure| figure.color == color && figure.kind == FigureKind::Rook)
            .ok_or(forfeited(CastlingForfeit::RookMissing(rook_from)))?;
        if rook.has_moved() {
            return Err(forfeited(CastlingForfeit::RookMoved(rook_from)));
        }

        // The rook reaching the square next to the king clears the whole path.
        if self.validate_geometry(&rook, rook_from, rook_to).is_err()
            || !self.board.is_empty(rook_to)
        {
            return Err(blocked(CastlingBlock::PathObstructed));
        }
        if let Some(square) = self.first_attacked_square(color, king_from, Some(side)) {
            return Err(blocked(CastlingBlock::SquareAttacked(square)));
        }

        Ok(CastlingPlan {
            side,
            king_from,
            king_to: Position::at(row, side.king_destination_column()),
            rook,
            rook_from,
            rook_to,
        })
    }

    /// A king two columns away along its home row from the e-file asks for
    /// castling rather than a plain step.
    pub fn castling_side(&self, figure: &Figure, from: Position, to: Position) -> Option<CastlingSide> {
        let (d_row, d_col) = from.delta(to);
        let home = Position::at(figure.color.home_row(), 'e');
        if figure.kind != FigureKind::King || from != home || d_row != 0 {
            return None;
        }
        match d_col {
            2 => Some(CastlingSide::KingSide),
            -2 => Some(CastlingSide::QueenSide),
            _ => None,
        }
    }

    /// Validates a move of `color` and computes the board after it. The
    /// board this validator reads is never touched.
    pub fn plan(&self, color: Color, from: Position, to: Position) -> MoveResult<Transition> {
        let figure = self.check_ownership(color, from)?;
        self.check_destination(color, to)?;

        if let Some(side) = self.castling_side(&figure, from, to) {
            return self.plan_castling(color, side);
        }

        self.validate_geometry(&figure, from, to)?;
        let mut board = self.board.clone();
        let captured = board.move_figure_at_position(from, to)?;
        if MoveValidator::new(&board).is_in_check(color) {
            debug!("{color} {from}-{to} exposes the king");
            return Err(MoveError::SelfCheck { color, from, to });
        }

        let promotes = figure.kind == FigureKind::Pawn && to.row() == color.promotion_row();
        let move_type = if promotes {
            MoveType::Promotion
        } else if captured.is_some() {
            MoveType::Capture
        } else {
            MoveType::Normal
        };
        let mv = Move {
            from,
            to,
            move_type,
            figure_letter: (figure.kind != FigureKind::Pawn).then(|| figure.kind.letter()),
            capture: captured.is_some(),
        };
        let promotion = promotes.then(|| PromotionContext {
            pawn: figure.into_moved(),
            position: to,
            pending: mv.clone(),
        });
        Ok(Transition {
            board,
            mv,
            captured,
            castling: None,
            promotion,
        })
    }

    fn plan_castling(&self, color: Color, side: CastlingSide) -> MoveResult<Transition> {
        let plan = self.check_if_castling_possible(color, side)?;
        let mut board = self.board.clone();
        board.move_figure_at_position(plan.king_from, plan.king_to)?;
        board.move_figure_at_position(plan.rook_from, plan.rook_to)?;
        if MoveValidator::new(&board).is_in_check(color) {
            return Err(MoveError::SelfCheck {
                color,
                from: plan.king_from,
                to: plan.king_to,
            });
        }
        let move_type = match side {
            CastlingSide::KingSide => MoveType::CastleKingSide,
            CastlingSide::QueenSide => MoveType::CastleQueenSide,
        };
        Ok(Transition {
            board,
            mv: Move {
                from: plan.king_from,
                to: plan.king_to,
                move_type,
                figure_letter: Some(FigureKind::King.letter()),
                capture: false,
            },
            captured: None,
            castling: Some(plan),
            promotion: None,
        })
    }
}
