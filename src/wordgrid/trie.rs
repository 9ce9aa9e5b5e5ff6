//! Prefix-tree dictionaries.

use std::collections::BTreeMap;

/// A set of words stored as a tree of shared prefixes.
///
/// The solver walks this tree in lockstep with the grid paths; a missing
/// child proves no dictionary word starts with the path's letters, which
/// is what makes the search tractable.
#[derive(Debug, Default)]
pub struct Trie {
    word_end: bool,
    children: BTreeMap<char, Trie>,
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from anything yielding words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Trie::new();
        for word in words {
            trie.insert(word.as_ref());
        }
        trie
    }

    pub fn insert(&mut self, word: &str) {
        let mut node = self;
        for letter in word.chars() {
            node = node.children.entry(letter).or_default();
        }
        node.word_end = true;
    }

    pub fn contains(&self, word: &str) -> bool {
        let mut node = self;
        for letter in word.chars() {
            match node.children.get(&letter) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.word_end
    }

    /// Subtree of words continuing with `letter`, if any do.
    pub fn child(&self, letter: char) -> Option<&Trie> {
        self.children.get(&letter)
    }

    /// True if the path from the root to this node spells a whole word.
    pub fn is_word(&self) -> bool {
        self.word_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_only_inserted_words() {
        let trie = Trie::from_words(["hen", "her", "here"]);

        assert!(trie.contains("hen"));
        assert!(trie.contains("her"));
        assert!(trie.contains("here"));
        assert!(!trie.contains("he"));
        assert!(!trie.contains("herd"));
        assert!(!trie.contains("fox"));
    }

    #[test]
    fn test_prefixes_share_nodes() {
        let trie = Trie::from_words(["her", "here"]);

        let h = trie.child('h').unwrap();
        let e = h.child('e').unwrap();
        let r = e.child('r').unwrap();

        assert!(r.is_word());
        assert!(r.child('e').unwrap().is_word());
        assert!(e.child('n').is_none());
    }

    #[test]
    fn test_empty_trie_matches_nothing() {
        let trie = Trie::new();
        assert!(!trie.contains("a"));
        assert!(!trie.contains(""));
    }

    #[test]
    fn test_empty_word_is_storable() {
        let mut trie = Trie::new();
        trie.insert("");
        assert!(trie.contains(""));
        assert!(!trie.contains("a"));
    }
}
