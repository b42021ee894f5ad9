//! Ordered set of bookmarked words. Equality is case-sensitive and insertion order is kept.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct BookmarkSet {
    words: Vec<String>,
}

impl BookmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Appends `word` if absent. Returns false when nothing changed.
    pub fn insert(&mut self, word: &str) -> bool {
        if self.contains(word) {
            return false;
        }
        self.words.push(word.to_string());
        true
    }

    /// Removes every entry equal to `word`. Returns false when nothing changed.
    pub fn remove(&mut self, word: &str) -> bool {
        let before = self.words.len();
        self.words.retain(|w| w != word);
        self.words.len() != before
    }
}

impl From<Vec<String>> for BookmarkSet {
    /// Keeps the first occurrence of each word
    fn from(words: Vec<String>) -> Self {
        let mut set = BookmarkSet::new();
        for word in words {
            if !set.contains(&word) {
                set.words.push(word);
            }
        }
        set
    }
}

impl From<BookmarkSet> for Vec<String> {
    fn from(set: BookmarkSet) -> Self {
        set.words
    }
}
