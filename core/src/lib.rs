//! In-memory TF-IDF document search.
//!
//! Documents are tokenized on spaces, stripped of stop words and stored in an
//! [`InvertedIndex`]. Queries use a plus/minus grammar: `-word` excludes every
//! document containing `word`, all other words contribute TF-IDF relevance.

pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod index;
pub mod matcher;
pub mod query;
pub mod rank;
pub mod tokenizer;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use config::SearchConfig;
pub use engine::SearchEngine;
pub use error::{Result, SearchError};
pub use index::InvertedIndex;
pub use query::{Query, QueryWord};
pub use tokenizer::StopWords;

/// Caller-assigned document id. Unsigned, so negative ids are rejected when
/// corpus files, query strings or CLI flags are parsed.
pub type DocId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Actual => "ACTUAL",
            Self::Irrelevant => "IRRELEVANT",
            Self::Banned => "BANNED",
            Self::Removed => "REMOVED",
        };
        f.write_str(name)
    }
}

impl FromStr for DocumentStatus {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "actual" => Ok(Self::Actual),
            "irrelevant" => Ok(Self::Irrelevant),
            "banned" => Ok(Self::Banned),
            "removed" => Ok(Self::Removed),
            _ => Err(SearchError::UnknownStatus(s.to_string())),
        }
    }
}

/// One ranked hit. Produced per query, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}
