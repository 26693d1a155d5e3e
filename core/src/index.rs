use crate::{DocId, DocumentStatus, Result, SearchError};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Per-document metadata kept after the text itself is discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct DocMeta {
    /// Distinct indexed words of the document.
    pub words: BTreeSet<String>,
    pub status: DocumentStatus,
    pub rating: i32,
}

/// Word to per-document term frequency, plus document metadata.
///
/// Every word in a document's word set has a posting for that document and
/// every posting points at a document with metadata.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, BTreeMap<DocId, f64>>, // doc ids ascending
    docs: BTreeMap<DocId, DocMeta>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Index a document from its already tokenized, stop-filtered words.
    ///
    /// An id that is already indexed is rejected and the index is left as it
    /// was. An empty word list is accepted: the document gets an empty word
    /// set, still counts toward [`Self::document_count`] and never matches.
    pub fn add_document(&mut self, id: DocId, words: &[&str], status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        if self.docs.contains_key(&id) {
            tracing::warn!(id, "rejecting duplicate document id");
            return Err(SearchError::DuplicateDocument(id));
        }

        let mut tf: BTreeMap<&str, f64> = BTreeMap::new();
        if !words.is_empty() {
            let inverse_word_count = 1.0 / words.len() as f64;
            for &word in words {
                *tf.entry(word).or_insert(0.0) += inverse_word_count;
            }
        }
        let meta = DocMeta {
            words: tf.keys().map(|w| w.to_string()).collect(),
            status,
            rating: average_rating(ratings),
        };

        for (word, freq) in tf {
            self.postings.entry(word.to_string()).or_default().insert(id, freq);
        }
        tracing::debug!(id, %status, rating = meta.rating, distinct_words = meta.words.len(), "indexed document");
        self.docs.insert(id, meta);
        Ok(())
    }

    /// Number of distinct indexed document ids. Also the `N` of IDF.
    pub fn document_count(&self) -> usize { self.docs.len() }

    pub fn postings(&self, word: &str) -> Option<&BTreeMap<DocId, f64>> { self.postings.get(word) }

    pub fn document(&self, id: DocId) -> Option<&DocMeta> { self.docs.get(&id) }

    /// Document ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ { self.docs.keys().copied() }

    /// `ln(N / df)` for an indexed word, `None` if no document contains it.
    pub fn inverse_document_frequency(&self, word: &str) -> Option<f64> {
        let df = self.postings.get(word)?.len();
        Some((self.docs.len() as f64 / df as f64).ln())
    }
}

/// Truncating mean of `ratings`; zero when there are none.
pub fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}
