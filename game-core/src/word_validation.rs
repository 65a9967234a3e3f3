use std::sync::Arc;

use game_types::{RejectReason, WordVerdict};

use crate::{LetterPool, ScoringEngine};

/// Words shorter than this are never playable.
pub const MIN_WORD_LENGTH: usize = 3;

/// Case-insensitive exact-match word lookup. Implementations are read-only
/// and shared across any number of concurrent sessions.
pub trait Dictionary: Send + Sync {
    fn contains(&self, word: &str) -> bool;
}

pub struct WordValidator {
    dictionary: Arc<dyn Dictionary>,
}

impl WordValidator {
    pub fn new(dictionary: Arc<dyn Dictionary>) -> Self {
        Self { dictionary }
    }

    /// Check one word attempt: length floor, then dictionary membership,
    /// then multiset availability against the turn's full letter pool.
    /// Pure in its inputs plus the dictionary snapshot; calling it twice
    /// with the same inputs yields the same verdict.
    pub fn validate(&self, word: &str, pool: &LetterPool) -> WordVerdict {
        let word = word.trim().to_ascii_lowercase();

        if word.chars().count() < MIN_WORD_LENGTH {
            return WordVerdict::Rejected {
                reason: RejectReason::TooShort,
            };
        }

        if !self.dictionary.contains(&word) {
            return WordVerdict::Rejected {
                reason: RejectReason::NotInDictionary,
            };
        }

        if !pool.can_form(&word) {
            return WordVerdict::Rejected {
                reason: RejectReason::CannotFormWord,
            };
        }

        WordVerdict::Accepted {
            points: ScoringEngine::score_word(&word),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct TestDictionary(HashSet<String>);

    impl TestDictionary {
        fn new(words: &[&str]) -> Arc<Self> {
            Arc::new(Self(words.iter().map(|w| w.to_string()).collect()))
        }
    }

    impl Dictionary for TestDictionary {
        fn contains(&self, word: &str) -> bool {
            self.0.contains(&word.trim().to_ascii_lowercase())
        }
    }

    fn validator() -> WordValidator {
        WordValidator::new(TestDictionary::new(&["cat", "wobble", "fantastic", "at"]))
    }

    fn pool() -> LetterPool {
        LetterPool::from_letters("catwobblesfni".chars())
    }

    #[test]
    fn test_short_words_rejected_regardless_of_dictionary() {
        let validator = validator();
        // "at" is in the dictionary and formable, but below the floor.
        assert_eq!(
            validator.validate("at", &pool()),
            WordVerdict::Rejected {
                reason: RejectReason::TooShort
            }
        );
        assert_eq!(
            validator.validate("", &pool()),
            WordVerdict::Rejected {
                reason: RejectReason::TooShort
            }
        );
    }

    #[test]
    fn test_dictionary_miss_rejected() {
        assert_eq!(
            validator().validate("cbt", &pool()),
            WordVerdict::Rejected {
                reason: RejectReason::NotInDictionary
            }
        );
    }

    #[test]
    fn test_unformable_word_rejected() {
        // "fantastic" needs two a's and two t's; the pool has one of each.
        assert_eq!(
            validator().validate("fantastic", &pool()),
            WordVerdict::Rejected {
                reason: RejectReason::CannotFormWord
            }
        );
    }

    #[test]
    fn test_valid_word_scores() {
        assert_eq!(
            validator().validate("wobble", &pool()),
            WordVerdict::Accepted { points: 8 }
        );
        assert_eq!(
            validator().validate("CAT", &pool()),
            WordVerdict::Accepted { points: 3 }
        );
    }

    #[test]
    fn test_validation_is_idempotent() {
        let validator = validator();
        let pool = pool();
        for word in ["cat", "wobble", "xyz", "at"] {
            assert_eq!(validator.validate(word, &pool), validator.validate(word, &pool));
        }
    }
}
