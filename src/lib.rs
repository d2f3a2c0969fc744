pub mod core;

// module re-exports
pub use self::core::*;

pub use self::core::definitions::{CastlingSide, GameObserver, Move, MoveType, Player, PromotionContext};
pub use self::core::engine::{Board, Color, Figure, FigureKind};
pub use self::core::error::{MoveError, MoveResult};
pub use self::core::game::{EngineState, GameEngine, Outcome};
pub use self::core::movement::{MovementRule, MovementStrategy, RuleViolation};
pub use self::core::position::Position;
pub use self::core::score::ScoreLog;
pub use self::core::validator::{CastlingPlan, MoveValidator};
