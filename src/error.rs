use std::path::PathBuf;
use thiserror::Error;

use crate::parser::RejectReason;

#[derive(Error, Debug)]
pub enum LexiconError {
    // Ingestion
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: RejectReason },

    #[error("dataset has no valid entries ({rejected} lines rejected)")]
    EmptyDataset { rejected: usize },

    // Façade
    #[error("no lexicon snapshot has been loaded")]
    NotLoaded,

    #[error("no dataset source configured")]
    NoSource,

    // Query
    #[error("invalid letter filter: {0:?}")]
    InvalidLetter(String),

    // Dataset sources
    #[error("IO error reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("source error: {0}")]
    Source(String),
}

impl LexiconError {
    /// The 1-based source line a malformed record came from.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedRecord { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Whether a load can continue after this error.
    ///
    /// Only malformed records are recoverable: they are tallied and the load
    /// keeps going. Everything else aborts the load or query that raised it,
    /// and for a reload the previously published snapshot stays active.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }
}
