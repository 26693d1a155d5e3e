use crate::config::SearchConfig;
use crate::index::InvertedIndex;
use crate::query::Query;
use crate::{DocId, Document, DocumentStatus};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Score every document that matches `query` and passes `predicate`.
///
/// Relevance is the sum over plus words of `idf(word) * tf(word, doc)`.
/// Documents containing a minus word are skipped. Results come out in
/// ascending id order.
pub fn find_all_documents<F>(index: &InvertedIndex, query: &Query, predicate: F) -> Vec<Document>
where
    F: Fn(DocId, DocumentStatus, i32) -> bool,
{
    let mut relevance: BTreeMap<DocId, f64> = BTreeMap::new();

    for word in query.plus_words.difference(&query.minus_words) {
        let (Some(postings), Some(idf)) = (index.postings(word), index.inverse_document_frequency(word)) else {
            continue;
        };
        for (&id, &tf) in postings {
            let Some(meta) = index.document(id) else { continue };
            if query.excludes(&meta.words) || !predicate(id, meta.status, meta.rating) {
                continue;
            }
            *relevance.entry(id).or_insert(0.0) += idf * tf;
        }
    }

    relevance
        .into_iter()
        .filter_map(|(id, relevance)| {
            index.document(id).map(|meta| Document { id, relevance, rating: meta.rating })
        })
        .collect()
}

/// Order by relevance descending, near-equal relevances by rating descending,
/// then keep at most `config.max_results`.
///
/// "Near-equal" is not transitive, so the documents are first put in a strict
/// order (relevance, rating, id) and the results are then picked one at a
/// time: each pick is the first document that no remaining document ranks
/// above. When near-ties chain into a cycle and every candidate is outranked,
/// the highest rated candidate is taken. Every pick lies within epsilon of the
/// best relevance still remaining.
pub fn sort_and_truncate(mut documents: Vec<Document>, config: &SearchConfig) -> Vec<Document> {
    documents.sort_by(|lhs, rhs| {
        rhs.relevance
            .total_cmp(&lhs.relevance)
            .then_with(|| rhs.rating.cmp(&lhs.rating))
            .then_with(|| lhs.id.cmp(&rhs.id))
    });

    let mut top = Vec::with_capacity(config.max_results.min(documents.len()));
    while top.len() < config.max_results && !documents.is_empty() {
        let pick = next_best(&documents, config.relevance_epsilon);
        top.push(documents.remove(pick));
    }
    top
}

/// Whether `lhs` belongs strictly before `rhs` in search results.
pub fn ranks_above(lhs: &Document, rhs: &Document, epsilon: f64) -> bool {
    if (lhs.relevance - rhs.relevance).abs() < epsilon {
        lhs.rating > rhs.rating
    } else {
        lhs.relevance > rhs.relevance
    }
}

// `sorted` is non-empty and in strict order.
fn next_best(sorted: &[Document], epsilon: f64) -> usize {
    let best = sorted[0].relevance;
    let window = sorted.iter().take_while(|d| best - d.relevance < epsilon).count().max(1);
    (0..window).find(|&i| !outranked(sorted, i, epsilon)).unwrap_or_else(|| {
        sorted[..window]
            .iter()
            .enumerate()
            .min_by_key(|(_, d)| Reverse(d.rating))
            .map_or(0, |(i, _)| i)
    })
}

// Only documents within epsilon of `sorted[i]` can outrank it: anything
// further above is outside the candidate window.
fn outranked(sorted: &[Document], i: usize, epsilon: f64) -> bool {
    let doc = &sorted[i];
    sorted
        .iter()
        .skip_while(|d| d.relevance - doc.relevance >= epsilon)
        .take_while(|d| doc.relevance - d.relevance < epsilon)
        .any(|d| ranks_above(d, doc, epsilon))
}
