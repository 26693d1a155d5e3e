use crate::config::SearchConfig;
use crate::corpus::InputDoc;
use crate::index::InvertedIndex;
use crate::query::parse_query;
use crate::tokenizer::StopWords;
use crate::{matcher, rank, DocId, Document, DocumentStatus, Result};

/// Stop words, index and ranking settings behind one API.
///
/// All mutation goes through `&mut self`, so a reader never sees a document
/// half ingested. Share it across threads behind a lock.
#[derive(Debug, Default)]
pub struct SearchEngine {
    stop_words: StopWords,
    index: InvertedIndex,
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new() -> Self { Self::default() }

    pub fn with_config(config: SearchConfig) -> Self {
        Self { config, ..Self::default() }
    }

    pub fn config(&self) -> &SearchConfig { &self.config }

    pub fn index(&self) -> &InvertedIndex { &self.index }

    /// Add the space-delimited words of `text` to the stop word set. Affects
    /// documents and queries processed afterwards.
    pub fn set_stop_words(&mut self, text: &str) {
        self.stop_words.add(text);
    }

    pub fn add_document(&mut self, id: DocId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        let words = self.stop_words.split_no_stop(text);
        self.index.add_document(id, &words, status, ratings)
    }

    /// Add every document in order, stopping at the first rejected one.
    /// Returns how many were added.
    pub fn ingest<I>(&mut self, docs: I) -> Result<usize>
    where
        I: IntoIterator<Item = InputDoc>,
    {
        let mut added = 0;
        for doc in docs {
            self.add_document(doc.id, &doc.text, doc.status, &doc.ratings)?;
            added += 1;
        }
        tracing::info!(added, total = self.document_count(), "ingested documents");
        Ok(added)
    }

    /// Best matches for `raw_query` among documents accepted by `predicate`.
    pub fn find_top_documents_with<F>(&self, raw_query: &str, predicate: F) -> Vec<Document>
    where
        F: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let query = parse_query(raw_query, &self.stop_words);
        let found = rank::find_all_documents(&self.index, &query, predicate);
        tracing::debug!(raw_query, candidates = found.len(), "ranking documents");
        rank::sort_and_truncate(found, &self.config)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Vec<Document> {
        self.find_top_documents_with(raw_query, move |_, doc_status, _| doc_status == status)
    }

    /// Best matches among [`DocumentStatus::Actual`] documents.
    pub fn find_top_documents(&self, raw_query: &str) -> Vec<Document> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn match_document(&self, raw_query: &str, id: DocId) -> Result<(Vec<String>, DocumentStatus)> {
        let query = parse_query(raw_query, &self.stop_words);
        matcher::match_document(&self.index, &query, id)
    }

    pub fn document_count(&self) -> usize { self.index.document_count() }
}
