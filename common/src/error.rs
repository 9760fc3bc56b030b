use std::path::PathBuf;

use thiserror::Error;

// Errors raised while loading a conversation dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to open dataset at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("Decode error on line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Malformed query id '{query_id}' on line {line}: expected '<conversation>#<turn>'")]
    MalformedQueryId { line: usize, query_id: String },
    #[error("Conversation '{conversation_id}' reappears on line {line} after it was closed")]
    ConversationReopened {
        conversation_id: String,
        line: usize,
    },
    #[error("Index {index} out of range for dataset with {len} conversations")]
    IndexOutOfRange { index: usize, len: usize },
}

impl DatasetError {
    /// Line of the source file the error points at, when there is one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Read { line, .. }
            | Self::Decode { line, .. }
            | Self::MalformedQueryId { line, .. }
            | Self::ConversationReopened { line, .. } => Some(*line),
            Self::Io { .. } | Self::IndexOutOfRange { .. } => None,
        }
    }
}
