use std::collections::BTreeSet;
use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;

use game_types::{GameError, Puzzle};

/// Read-only puzzle bank lookup, shared across sessions.
pub trait PuzzleSource: Send + Sync {
    fn get_by_number(&self, number: u8) -> Option<Puzzle>;
}

/// Shuffle letters in place, re-rolling until the order differs from the
/// stored canonical one. A distinct order exists whenever there are at
/// least two differing letters, so the loop terminates in O(1) expected
/// rolls; degenerate pools (one letter, or all letters identical) are left
/// as-is.
pub fn scramble_letters<R: Rng>(rng: &mut R, letters: &mut [char]) {
    if letters.len() < 2 || letters.iter().all(|&c| c == letters[0]) {
        return;
    }
    let canonical: Vec<char> = letters.to_vec();
    loop {
        letters.shuffle(rng);
        if *letters != canonical[..] {
            break;
        }
    }
}

pub struct PuzzleSelector {
    source: Arc<dyn PuzzleSource>,
}

impl PuzzleSelector {
    pub fn new(source: Arc<dyn PuzzleSource>) -> Self {
        Self { source }
    }

    /// Look up a puzzle by number and return it with its letters scrambled.
    /// Numbers with no backing puzzle, or already committed this game, are
    /// both reported as `PuzzleNotFound`.
    pub fn select(&self, number: u8, used_numbers: &BTreeSet<u8>) -> Result<Puzzle, GameError> {
        if used_numbers.contains(&number) {
            return Err(GameError::PuzzleNotFound { number });
        }

        let mut puzzle = self
            .source
            .get_by_number(number)
            .ok_or(GameError::PuzzleNotFound { number })?;

        scramble_letters(&mut rand::thread_rng(), &mut puzzle.letters);
        Ok(puzzle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OnePuzzle(Puzzle);

    impl PuzzleSource for OnePuzzle {
        fn get_by_number(&self, number: u8) -> Option<Puzzle> {
            (number == self.0.number).then(|| self.0.clone())
        }
    }

    fn selector() -> PuzzleSelector {
        let puzzle = Puzzle::new(7, "treasures").unwrap();
        PuzzleSelector::new(Arc::new(OnePuzzle(puzzle)))
    }

    #[test]
    fn test_scramble_is_a_non_identity_permutation() {
        let canonical: Vec<char> = "abcdefgh".chars().collect();
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let mut letters = canonical.clone();
            scramble_letters(&mut rng, &mut letters);
            assert_ne!(letters, canonical);

            let mut sorted = letters.clone();
            sorted.sort_unstable();
            let mut expected = canonical.clone();
            expected.sort_unstable();
            assert_eq!(sorted, expected);
        }
    }

    #[test]
    fn test_scramble_leaves_degenerate_pools_alone() {
        let mut single = vec!['a'];
        scramble_letters(&mut rand::thread_rng(), &mut single);
        assert_eq!(single, vec!['a']);

        let mut uniform: Vec<char> = "aaaaaaaa".chars().collect();
        let before = uniform.clone();
        scramble_letters(&mut rand::thread_rng(), &mut uniform);
        assert_eq!(uniform, before);
    }

    #[test]
    fn test_select_scrambles_letters() {
        let selector = selector();
        let canonical: Vec<char> = "treasures".chars().collect();
        for _ in 0..20 {
            let puzzle = selector.select(7, &BTreeSet::new()).unwrap();
            assert_ne!(puzzle.letters, canonical);

            let mut sorted = puzzle.letters.clone();
            sorted.sort_unstable();
            let mut expected = canonical.clone();
            expected.sort_unstable();
            assert_eq!(sorted, expected);
        }
    }

    #[test]
    fn test_select_unknown_number() {
        let selector = selector();
        assert_eq!(
            selector.select(3, &BTreeSet::new()),
            Err(GameError::PuzzleNotFound { number: 3 })
        );
    }

    #[test]
    fn test_select_rejects_used_numbers() {
        let selector = selector();
        let used = BTreeSet::from([7]);
        assert_eq!(
            selector.select(7, &used),
            Err(GameError::PuzzleNotFound { number: 7 })
        );
    }
}
