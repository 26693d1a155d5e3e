use crate::tokenizer::StopWords;
use std::collections::BTreeSet;

const MINUS_MARKER: char = '-';

/// A single classified query token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryWord<'a> {
    Include(&'a str),
    Exclude(&'a str),
}

impl<'a> QueryWord<'a> {
    /// Classify a token by its leading marker. A bare `-` carries no word and
    /// yields `None`.
    pub fn classify(token: &'a str) -> Option<Self> {
        match token.strip_prefix(MINUS_MARKER) {
            Some("") => None,
            Some(rest) => Some(Self::Exclude(rest)),
            None => Some(Self::Include(token)),
        }
    }
}

/// Parsed query. `plus_words` and `minus_words` are always disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

impl Query {
    pub fn is_empty(&self) -> bool { self.plus_words.is_empty() && self.minus_words.is_empty() }

    /// Whether any minus word occurs in `words`.
    pub fn excludes(&self, words: &BTreeSet<String>) -> bool {
        self.minus_words.iter().any(|w| words.contains(w))
    }
}

/// Tokenize, drop stop words and split the rest into plus and minus words.
/// A word present both ways is only kept as a minus word.
pub fn parse_query(text: &str, stop_words: &StopWords) -> Query {
    let tokens: BTreeSet<&str> = stop_words.split_no_stop(text).into_iter().collect();

    let mut plus = BTreeSet::new();
    let mut minus = BTreeSet::new();
    for word in tokens.into_iter().filter_map(QueryWord::classify) {
        match word {
            QueryWord::Include(w) => plus.insert(w.to_string()),
            QueryWord::Exclude(w) => minus.insert(w.to_string()),
        };
    }

    let plus_words: BTreeSet<String> = plus.difference(&minus).cloned().collect();
    tracing::debug!(text, ?plus_words, ?minus, "parsed query");
    Query { plus_words, minus_words: minus }
}
