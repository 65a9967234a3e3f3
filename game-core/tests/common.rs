use std::collections::HashSet;
use std::sync::Arc;

use game_core::{Dictionary, PuzzleSelector, PuzzleSource, Session, WordValidator};
use game_types::{BOARD_SIZE, GameMode, Player, Puzzle};
use uuid::Uuid;

/// Dictionary backed by a fixed word set.
pub struct TestDictionary(HashSet<String>);

impl Dictionary for TestDictionary {
    fn contains(&self, word: &str) -> bool {
        self.0.contains(&word.trim().to_ascii_lowercase())
    }
}

/// Creates a validator over a known set of words.
pub fn create_test_validator() -> WordValidator {
    let words = ["cat", "wobble", "fantastic", "even", "late", "stable"];
    let dictionary = TestDictionary(words.iter().map(|w| w.to_string()).collect());
    WordValidator::new(Arc::new(dictionary))
}

/// Puzzle bank where every number on the board maps to the same letter set.
pub struct UniformBank {
    letters: String,
}

impl PuzzleSource for UniformBank {
    fn get_by_number(&self, number: u8) -> Option<Puzzle> {
        (number >= 1 && number as usize <= BOARD_SIZE)
            .then(|| Puzzle::new(number, &self.letters).unwrap())
    }
}

/// Selector over a full board of "catwobbles" puzzles: "cat" and "wobble"
/// are always formable.
pub fn create_test_selector() -> PuzzleSelector {
    PuzzleSelector::new(Arc::new(UniformBank {
        letters: "catwobbles".to_string(),
    }))
}

/// Selector whose puzzles carry exactly two e's ("grapevine"), for words
/// that need both.
pub fn create_two_e_selector() -> PuzzleSelector {
    PuzzleSelector::new(Arc::new(UniformBank {
        letters: "grapevine".to_string(),
    }))
}

pub fn create_test_player(name: &str, color: &str) -> Player {
    Player::new(name, color)
}

/// Creates a started session with Alice and Bob.
pub fn create_started_session(mode: GameMode) -> Session {
    let players = [
        create_test_player("Alice", "teal"),
        create_test_player("Bob", "coral"),
    ];
    let mut session = Session::new(Uuid::new_v4(), players, mode);
    session.start().unwrap();
    session
}

/// Plays one full turn: select `number`, submit `word`, advance past the
/// result screen. Panics if any step is an illegal transition.
pub fn play_turn(
    session: &mut Session,
    selector: &PuzzleSelector,
    validator: &WordValidator,
    number: u8,
    word: &str,
) {
    session.select_number(number, selector).unwrap();
    let outcome = session.submit_word(word, validator).unwrap();
    assert!(
        matches!(outcome, game_core::TurnOutcome::Accepted { .. }),
        "expected {word:?} to be accepted, got {outcome:?}"
    );
    session.auto_advance().unwrap();
}
