use std::mem;

use log::{debug, info, warn};

use crate::core::definitions::{GameObserver, Move, Player, PromotionContext};
use crate::core::engine::{Board, Figure, FigureKind};
use crate::core::error::{MoveError, MoveResult};
use crate::core::position::Position;
use crate::core::validator::{MoveValidator, Transition};

/// Which input the engine accepts next.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum EngineState {
    /// Waiting for the player on move to pick one of their figures
    #[default]
    AwaitingSelection,
    /// A figure is picked, waiting for its destination
    AwaitingDestination { from: Position },
    /// A pawn reached the last row; only a promotion choice is accepted
    PromotionPending(PromotionContext),
    /// Menu is shown over the board; board input is suspended
    MenuOpen { resume: Box<EngineState> },
}

/// What a handled input led to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Selected(Position),
    Deselected,
    Moved(Move),
    PromotionRequested(Position),
    Promoted(Move),
}

pub struct GameEngine<O: GameObserver> {
    board: Board,
    players: Vec<Player>,
    current_player: usize,
    state: EngineState,
    observer: O,
}

impl<O: GameObserver> GameEngine<O> {
    /// Game from the standard starting layout. Players move in array order.
    pub fn new(players: [Player; 2], observer: O) -> Self {
        GameEngine::with_board(players, Board::initialize(), observer)
    }

    pub fn with_board(players: [Player; 2], board: Board, mut observer: O) -> Self {
        let players = Vec::from(players);
        observer.initialize(&players, &board);
        observer.render_board(&board);
        info!(
            "New game: {} ({}) vs {} ({})",
            players[0].name, players[0].color, players[1].name, players[1].color
        );
        GameEngine {
            board,
            players,
            current_player: 0,
            state: EngineState::AwaitingSelection,
            observer,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player]
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Whether the player on move is in check.
    pub fn in_check(&self) -> bool {
        MoveValidator::new(&self.board).is_in_check(self.current_player().color)
    }

    /// Squares the current player's figure on `from` can legally move to.
    pub fn legal_destinations(&self, from: Position) -> Vec<Position> {
        let color = self.current_player().color;
        let validator = MoveValidator::new(&self.board);
        Position::all()
            .filter(|&to| validator.plan(color, from, to).is_ok())
            .collect()
    }

    /// Handles one square selection from the input collaborator.
    pub fn select(&mut self, position: Position) -> MoveResult<Outcome> {
        match self.state.clone() {
            EngineState::MenuOpen { .. } => Err(MoveError::MenuOpen),
            EngineState::PromotionPending(context) => {
                Err(MoveError::PromotionPending(context.position))
            }
            EngineState::AwaitingSelection => {
                let color = self.current_player().color;
                if let Err(err) = MoveValidator::new(&self.board).check_ownership(color, position) {
                    return Err(self.reject(err));
                }
                debug!("{color} selected {position}");
                self.state = EngineState::AwaitingDestination { from: position };
                Ok(Outcome::Selected(position))
            }
            EngineState::AwaitingDestination { from } if from == position => {
                debug!("Selection of {from} dropped");
                self.state = EngineState::AwaitingSelection;
                Ok(Outcome::Deselected)
            }
            EngineState::AwaitingDestination { from } => {
                self.state = EngineState::AwaitingSelection;
                self.try_move(from, position)
            }
        }
    }

    /// Both selections of a move gesture at once. A half-made selection is
    /// dropped first.
    pub fn play(&mut self, from: Position, to: Position) -> MoveResult<Outcome> {
        if let EngineState::AwaitingDestination { from: pending } = self.state {
            debug!("Selection of {pending} dropped");
            self.state = EngineState::AwaitingSelection;
        }
        self.select(from)?;
        self.select(to)
    }

    fn try_move(&mut self, from: Position, to: Position) -> MoveResult<Outcome> {
        let color = self.current_player().color;
        let transition = match MoveValidator::new(&self.board).plan(color, from, to) {
            Ok(transition) => transition,
            Err(err) => return Err(self.reject(err)),
        };
        Ok(self.commit(transition))
    }

    fn commit(&mut self, transition: Transition) -> Outcome {
        let Transition {
            board,
            mv,
            captured,
            castling,
            promotion,
        } = transition;
        self.board = board;
        if let Some(trophy) = captured {
            self.players[self.current_player].take_trophy(trophy);
        }
        if let Some(plan) = castling {
            info!(
                "{} castles {}: rook {}-{}",
                self.current_player().color,
                plan.side,
                plan.rook_from,
                plan.rook_to
            );
        }
        self.observer.render_board(&self.board);

        if let Some(context) = promotion {
            let position = context.position;
            info!("{} pawn reached {position}, waiting for promotion", context.color());
            self.observer.request_promotion(
                &self.players[self.current_player],
                position,
                &FigureKind::PROMOTIONS,
            );
            self.state = EngineState::PromotionPending(context);
            return Outcome::PromotionRequested(position);
        }

        self.finish_turn(&mv);
        Outcome::Moved(mv)
    }

    /// Swaps the pending pawn for a fresh figure of `kind` and passes the turn.
    pub fn resolve_promotion(&mut self, kind: FigureKind) -> MoveResult<Outcome> {
        let EngineState::PromotionPending(context) = &self.state else {
            return Err(MoveError::NoPromotionPending);
        };
        if !kind.is_promotion_choice() {
            return Err(MoveError::InvalidPromotion(kind));
        }
        let PromotionContext {
            pawn,
            position,
            pending,
        } = context.clone();
        self.board.remove_figure(position);
        self.board.add_figure(position, Figure::new(kind, pawn.color))?;
        self.state = EngineState::AwaitingSelection;
        info!("{} pawn on {position} promoted to {kind:?}", pawn.color);
        self.observer.render_board(&self.board);

        let mv = Move {
            figure_letter: Some(kind.letter()),
            ..pending
        };
        self.finish_turn(&mv);
        Ok(Outcome::Promoted(mv))
    }

    pub fn open_menu(&mut self) {
        if matches!(self.state, EngineState::MenuOpen { .. }) {
            return;
        }
        let resume = mem::take(&mut self.state);
        self.state = EngineState::MenuOpen {
            resume: Box::new(resume),
        };
    }

    pub fn close_menu(&mut self) {
        if let EngineState::MenuOpen { resume } = &mut self.state {
            let resume = mem::take(resume.as_mut());
            self.state = resume;
        } else {
            warn!("Menu closed while not open");
        }
    }

    fn finish_turn(&mut self, mv: &Move) {
        let mover = self.current_player;
        self.current_player = (self.current_player + 1) % self.players.len();
        info!("{} played {mv}", self.players[mover].name);
        self.observer.record_move(
            mv,
            &self.players[mover],
            self.players.get(self.current_player),
        );
    }

    fn reject(&mut self, err: MoveError) -> MoveError {
        warn!("{} move rejected: {err}", self.current_player().color);
        self.state = EngineState::AwaitingSelection;
        self.observer
            .record_rejection(&self.players[self.current_player], &err);
        err
    }
}
