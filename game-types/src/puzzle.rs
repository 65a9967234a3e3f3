use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::GameError;

/// Numbers offered on the selection board, 1..=BOARD_SIZE.
pub const BOARD_SIZE: usize = 20;

pub const MIN_PUZZLE_LETTERS: usize = 8;
pub const MAX_PUZZLE_LETTERS: usize = 15;

/// A numbered letter set offered for a single turn. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Puzzle {
    pub number: u8,
    pub letters: Vec<char>,
}

impl Puzzle {
    /// Build a puzzle, normalizing letters to lowercase. Rejects numbers
    /// outside the board, letter counts outside 8..=15, and anything that
    /// is not a plain ASCII letter.
    pub fn new(number: u8, letters: &str) -> Result<Self, GameError> {
        if number == 0 || number as usize > BOARD_SIZE {
            return Err(GameError::InvalidPuzzle {
                number,
                reason: format!("number must be between 1 and {BOARD_SIZE}"),
            });
        }

        let letters: Vec<char> = letters
            .trim()
            .chars()
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if letters.len() < MIN_PUZZLE_LETTERS || letters.len() > MAX_PUZZLE_LETTERS {
            return Err(GameError::InvalidPuzzle {
                number,
                reason: format!(
                    "expected {MIN_PUZZLE_LETTERS}..={MAX_PUZZLE_LETTERS} letters, got {}",
                    letters.len()
                ),
            });
        }

        if let Some(bad) = letters.iter().find(|c| !c.is_ascii_alphabetic()) {
            return Err(GameError::InvalidPuzzle {
                number,
                reason: format!("'{bad}' is not a letter"),
            });
        }

        Ok(Self { number, letters })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_puzzle_construction() {
        let puzzle = Puzzle::new(5, "TREASURES").unwrap();
        assert_eq!(puzzle.number, 5);
        assert_eq!(puzzle.letters, vec!['t', 'r', 'e', 'a', 's', 'u', 'r', 'e', 's']);
    }

    #[test]
    fn test_puzzle_rejects_bad_numbers() {
        assert!(Puzzle::new(0, "TREASURES").is_err());
        assert!(Puzzle::new(21, "TREASURES").is_err());
        assert!(Puzzle::new(20, "TREASURES").is_ok());
    }

    #[test]
    fn test_puzzle_rejects_bad_lengths() {
        assert!(Puzzle::new(1, "short").is_err()); // 5 letters
        assert!(Puzzle::new(1, "exactlyeight").is_ok()); // 12 letters
        assert!(Puzzle::new(1, "averyverylongletterset").is_err()); // 22 letters
    }

    #[test]
    fn test_puzzle_rejects_non_letters() {
        assert!(Puzzle::new(1, "letters12").is_err());
        assert!(Puzzle::new(1, "let ters!").is_err());
    }
}
