use serde::Deserialize;

pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Tunables for result ranking.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Upper bound on the number of documents a search returns.
    pub max_results: usize,
    /// Relevances closer than this are treated as equal and ordered by rating.
    pub relevance_epsilon: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_results: MAX_RESULT_DOCUMENT_COUNT, relevance_epsilon: RELEVANCE_EPSILON }
    }
}
