use crate::DocId;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("document {0} not found")]
    DocumentNotFound(DocId),
    #[error("document {0} is already indexed")]
    DuplicateDocument(DocId),
    #[error("unknown document status: {0}")]
    UnknownStatus(String),
}
