use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;
use uuid::Uuid;

use crate::GamePhase;

/// Engine error taxonomy. Every variant is recoverable: illegal transitions
/// and unknown numbers are caller-contract violations reported as no-ops,
/// and store failures leave session state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    #[error("cannot {action} during the {phase:?} phase")]
    InvalidTransition { action: String, phase: GamePhase },

    #[error("no unused puzzle for number {number}")]
    PuzzleNotFound { number: u8 },

    #[error("no '{letter}' remaining in the letter pool")]
    LetterUnavailable { letter: char },

    #[error("invalid puzzle {number}: {reason}")]
    InvalidPuzzle { number: u8, reason: String },

    #[error("session {id} not found")]
    SessionNotFound { id: Uuid },

    #[error("persistence failure: {message}")]
    PersistenceFailure { message: String },
}

impl GameError {
    pub fn invalid_transition(action: &str, phase: GamePhase) -> Self {
        GameError::InvalidTransition {
            action: action.to_string(),
            phase,
        }
    }
}
