use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameMode {
    Competitive, // players alternate turns, points go to the acting player
    Cooperative, // both players share every puzzle and split the points
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GamePhase {
    Selecting, // waiting for a number to be picked
    Playing,   // letters revealed, countdown running
    Result,    // turn committed, waiting to advance
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameStatus {
    Waiting,  // session created, not yet started
    Playing,  // session in progress
    Finished, // all numbers used or explicitly ended
}

/// The persisted session record. Player order matters: index 0/1 is
/// referenced directly by the turn logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionState {
    pub id: Uuid,
    pub players: Vec<Player>,
    pub used_numbers: BTreeSet<u8>,
    pub mode: GameMode,
    /// Index of the player on turn. Always `Some` in competitive mode,
    /// always `None` in cooperative mode.
    pub active_player_index: Option<usize>,
    pub phase: GamePhase,
    pub status: GameStatus,
    pub created_at: String, // ISO 8601 string
    pub ended_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RejectReason {
    TooShort,
    NotInDictionary,
    CannotFormWord,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            RejectReason::TooShort => "too short",
            RejectReason::NotInDictionary => "not in dictionary",
            RejectReason::CannotFormWord => "cannot be formed",
        };
        write!(f, "{message}")
    }
}

/// Outcome of checking a single word attempt against the dictionary and
/// the turn's letter pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum WordVerdict {
    Accepted { points: u32 },
    Rejected { reason: RejectReason },
}

impl WordVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, WordVerdict::Accepted { .. })
    }
}
