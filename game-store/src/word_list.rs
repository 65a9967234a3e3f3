use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use game_core::{Dictionary, MIN_WORD_LENGTH};

/// In-memory dictionary loaded from a plain word-list file.
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    /// Parse a word list: one word per line, '#' comments and blank lines
    /// skipped, entries lowercased. Words below the playable length floor
    /// are dropped up front.
    pub fn from_word_list(word_list: &str) -> Self {
        let words: HashSet<String> = word_list
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|word| word.to_ascii_lowercase())
            .filter(|word| word.chars().count() >= MIN_WORD_LENGTH)
            .collect();

        Self { words }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read word list {}", path.display()))?;
        let list = Self::from_word_list(&contents);
        info!(path = %path.display(), words = list.len(), "word list loaded");
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordList {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.trim().to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_list_parsing() {
        let list = WordList::from_word_list("apple\nbanana\n# comment\n\n  Cherry  \nab");
        assert_eq!(list.len(), 3); // "ab" is below the floor
        assert!(list.contains("apple"));
        assert!(list.contains("cherry"));
        assert!(!list.contains("ab"));
        assert!(!list.contains("# comment"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let list = WordList::from_word_list("Apple");
        assert!(list.contains("apple"));
        assert!(list.contains("APPLE"));
        assert!(list.contains(" apple "));
    }

    #[test]
    fn test_empty_word_list() {
        let list = WordList::from_word_list("");
        assert!(list.is_empty());
        assert!(!list.contains("anything"));
    }
}
