use crate::index::InvertedIndex;
use crate::query::Query;
use crate::{DocId, DocumentStatus, Result, SearchError};

/// Plus words of `query` found in document `id`, in ascending order, with the
/// document's status. Any minus word in the document forces an empty list.
pub fn match_document(index: &InvertedIndex, query: &Query, id: DocId) -> Result<(Vec<String>, DocumentStatus)> {
    let meta = index.document(id).ok_or(SearchError::DocumentNotFound(id))?;
    if query.excludes(&meta.words) {
        return Ok((Vec::new(), meta.status));
    }
    let matched = query.plus_words.iter().filter(|w| meta.words.contains(*w)).cloned().collect();
    Ok((matched, meta.status))
}
