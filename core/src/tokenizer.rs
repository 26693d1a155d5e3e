use std::collections::HashSet;

/// Split text into words separated by the space character.
///
/// Only `' '` is a separator: tabs, newlines and punctuation stay part of the
/// word. Runs of spaces never produce empty words.
pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|w| !w.is_empty()).collect()
}

/// Words excluded from both indexing and queries.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new() -> Self { Self::default() }

    /// Register every space-delimited word of `text`. Registering a word twice is a no-op.
    pub fn add(&mut self, text: &str) {
        self.words.extend(split_into_words(text).into_iter().map(str::to_string));
    }

    pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }

    /// Keep the words of `tokens` that are not stop words, in order.
    pub fn filter<'a>(&self, tokens: Vec<&'a str>) -> Vec<&'a str> {
        tokens.into_iter().filter(|w| !self.contains(w)).collect()
    }

    /// Tokenize `text` and drop stop words.
    pub fn split_no_stop<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.filter(split_into_words(text))
    }
}
