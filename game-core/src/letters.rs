use std::collections::HashMap;

use game_types::GameError;

/// The letter pool for one turn: a multiset of the puzzle's letters with
/// per-letter consumption tracking for the tile UI.
///
/// Invariant: for every letter, consumed never exceeds the original count,
/// so `remaining + consumed == original` at all times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterPool {
    original: HashMap<char, u32>,
    consumed: HashMap<char, u32>,
}

impl LetterPool {
    /// Build counts from a letter sequence, normalized to lowercase.
    pub fn from_letters<I>(letters: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut original = HashMap::new();
        for letter in letters {
            *original.entry(letter.to_ascii_lowercase()).or_insert(0) += 1;
        }
        Self {
            original,
            consumed: HashMap::new(),
        }
    }

    pub fn original_count(&self, letter: char) -> u32 {
        self.original
            .get(&letter.to_ascii_lowercase())
            .copied()
            .unwrap_or(0)
    }

    pub fn remaining(&self, letter: char) -> u32 {
        let letter = letter.to_ascii_lowercase();
        let consumed = self.consumed.get(&letter).copied().unwrap_or(0);
        self.original_count(letter) - consumed
    }

    /// Take one instance of a letter out of the pool.
    pub fn consume(&mut self, letter: char) -> Result<(), GameError> {
        let letter = letter.to_ascii_lowercase();
        if self.remaining(letter) == 0 {
            return Err(GameError::LetterUnavailable { letter });
        }
        *self.consumed.entry(letter).or_insert(0) += 1;
        Ok(())
    }

    /// Put one consumed instance of a letter back.
    pub fn release(&mut self, letter: char) -> Result<(), GameError> {
        let letter = letter.to_ascii_lowercase();
        match self.consumed.get_mut(&letter) {
            Some(count) if *count > 0 => {
                *count -= 1;
                Ok(())
            }
            _ => Err(GameError::LetterUnavailable { letter }),
        }
    }

    /// Return every consumed letter to the pool.
    pub fn reset(&mut self) {
        self.consumed.clear();
    }

    /// Multiset inclusion against the full, unconsumed pool: a word using
    /// "ll" needs at least two l's in the puzzle, and the check does not
    /// consume anything. Tile clicks tracked via `consume` have no effect
    /// on the answer.
    pub fn can_form(&self, word: &str) -> bool {
        let mut needed: HashMap<char, u32> = HashMap::new();
        for letter in word.chars() {
            if !letter.is_ascii_alphabetic() {
                return false;
            }
            *needed.entry(letter.to_ascii_lowercase()).or_insert(0) += 1;
        }
        needed
            .iter()
            .all(|(letter, count)| self.original_count(*letter) >= *count)
    }

    pub fn total_original(&self) -> u32 {
        self.original.values().sum()
    }

    pub fn total_consumed(&self) -> u32 {
        self.consumed.values().sum()
    }

    pub fn total_remaining(&self) -> u32 {
        self.total_original() - self.total_consumed()
    }
}
