use std::fmt::Display;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::definitions::{GameObserver, Move, Player};
use crate::core::engine::Color;
use crate::core::error::MoveError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub color: Color,
    pub player: String,
    pub mv: Move,
}

/// Move record kept by the score collaborator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLog {
    entries: Vec<ScoreEntry>,
    rejected: usize,
}

impl ScoreLog {
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.entries.last().map(|entry| &entry.mv)
    }

    /// Number of refused move attempts seen so far.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        postcard::to_allocvec(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<ScoreLog, postcard::Error> {
        postcard::from_bytes(bytes)
    }
}

impl GameObserver for ScoreLog {
    fn record_move(&mut self, mv: &Move, mover: &Player, _next: Option<&Player>) {
        self.entries.push(ScoreEntry {
            color: mover.color,
            player: mover.name.clone(),
            mv: mv.clone(),
        });
    }

    fn record_rejection(&mut self, player: &Player, error: &MoveError) {
        debug!("Score log: {} attempt refused ({error})", player.name);
        self.rejected += 1;
    }
}

impl Display for ScoreLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (number, pair) in self.entries.chunks(2).enumerate() {
            write!(f, "{}.", number + 1)?;
            for entry in pair {
                write!(f, " {}", entry.mv)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
