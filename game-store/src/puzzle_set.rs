use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::Deserialize;

use game_core::PuzzleSource;
use game_types::{GameError, Puzzle};

/// Letter sets for the stock board, one per number 1..=20.
const STANDARD_BANK: [&str; 20] = [
    "sparkletome",
    "grapevines",
    "thundering",
    "campfires",
    "wonderlamp",
    "blacksmith",
    "overgrown",
    "pinwheels",
    "starboard",
    "moonlight",
    "driftwoods",
    "lavenders",
    "telescopes",
    "hurricanes",
    "goldenrams",
    "butterclaw",
    "crystaline",
    "whispering",
    "fortunates",
    "marvelous",
];

/// On-disk puzzle bank record.
#[derive(Debug, Deserialize)]
struct PuzzleRecord {
    number: u8,
    letters: String,
}

/// Immutable numbered puzzle bank.
pub struct PuzzleSet {
    puzzles: HashMap<u8, Puzzle>,
}

impl PuzzleSet {
    /// Build a bank, rejecting duplicate numbers.
    pub fn new(puzzles: Vec<Puzzle>) -> Result<Self, GameError> {
        let mut map = HashMap::new();
        for puzzle in puzzles {
            let number = puzzle.number;
            if map.insert(number, puzzle).is_some() {
                return Err(GameError::InvalidPuzzle {
                    number,
                    reason: "duplicate puzzle number".to_string(),
                });
            }
        }
        Ok(Self { puzzles: map })
    }

    /// Load a bank from a JSON array of `{ "number": n, "letters": "..." }`
    /// records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<PuzzleRecord> =
            serde_json::from_str(json).context("failed to parse puzzle bank")?;
        let puzzles = records
            .into_iter()
            .map(|record| Puzzle::new(record.number, &record.letters))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(puzzles)?)
    }

    /// The stock 20-puzzle board.
    pub fn standard() -> Self {
        let puzzles = STANDARD_BANK
            .iter()
            .enumerate()
            .map(|(i, letters)| Puzzle::new(i as u8 + 1, letters))
            .collect::<Result<Vec<_>, _>>()
            .expect("stock puzzle bank is valid");
        Self::new(puzzles).expect("stock puzzle bank has unique numbers")
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }
}

impl PuzzleSource for PuzzleSet {
    fn get_by_number(&self, number: u8) -> Option<Puzzle> {
        self.puzzles.get(&number).cloned()
    }
}
