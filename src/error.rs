//! Error taxonomy for game operations.

use crate::store::StoreError;
use crate::types::{Assignment, Phase, PlayerName};

pub type GameResult<T> = Result<T, GameError>;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Bad or missing input, or a pool too small to continue
    #[error("{0}")]
    Validation(String),

    #[error("operation requires the {expected} phase, current phase is {actual}")]
    Phase { expected: Phase, actual: Phase },

    #[error("invalid item index {index}")]
    Index { index: i64 },

    #[error("no assignment recorded for {0}")]
    NotFound(PlayerName),

    /// Not a hard failure: carries the assignment already on record
    #[error("{player} has already drawn this round")]
    AlreadyDrawn {
        player: PlayerName,
        assignment: Assignment,
    },

    #[error("nothing left to draw")]
    EmptyPool,

    #[error("failed to persist game state: {0}")]
    Store(#[from] StoreError),
}

impl GameError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Fail unless `actual` is the phase an operation needs
    pub fn require_phase(expected: Phase, actual: Phase) -> GameResult<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::Phase { expected, actual })
        }
    }
}
