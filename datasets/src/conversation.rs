//! Dataset-independent conversation records.

use std::path::Path;

use common::error::DatasetError;
use serde::Serialize;

/// A user turn: the issued query and its standalone rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicRecord {
    /// Turn identifier within the conversation.
    pub id: String,
    /// Query text as issued, possibly depending on earlier turns.
    pub text: String,
    /// Manually decontextualized form of `text`.
    pub decontextualized: String,
}

impl TopicRecord {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        decontextualized: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            decontextualized: decontextualized.into(),
        }
    }

    pub fn decontextualized_text(&self) -> &str {
        &self.decontextualized
    }

    /// Numeric turn index, when the identifier is one.
    pub fn turn_number(&self) -> Option<u32> {
        self.id.parse().ok()
    }
}

/// A system turn: the gold answer with the documents judged for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerRecord {
    pub answer: String,
    pub documents: Vec<String>,
    /// Relevance label per entry of `documents`.
    pub document_relevances: Vec<i64>,
}

impl AnswerRecord {
    /// Documents with a non-zero relevance label.
    pub fn relevant_documents(&self) -> impl Iterator<Item = &str> + '_ {
        self.documents
            .iter()
            .zip(&self.document_relevances)
            .filter(|(_, label)| **label != 0)
            .map(|(document, _)| document.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConversationNode {
    Topic(TopicRecord),
    Answer(AnswerRecord),
}

impl ConversationNode {
    pub fn as_topic(&self) -> Option<&TopicRecord> {
        match self {
            Self::Topic(topic) => Some(topic),
            Self::Answer(_) => None,
        }
    }

    pub fn as_answer(&self) -> Option<&AnswerRecord> {
        match self {
            Self::Answer(answer) => Some(answer),
            Self::Topic(_) => None,
        }
    }
}

/// One conversation, oldest turn first, as alternating topic and answer nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationTree {
    pub conversation_id: String,
    pub nodes: Vec<ConversationNode>,
}

impl ConversationTree {
    pub fn new(conversation_id: impl Into<String>, nodes: Vec<ConversationNode>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            nodes,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Topic/answer pairs in chronological order.
    pub fn turns(&self) -> impl Iterator<Item = (&TopicRecord, &AnswerRecord)> + '_ {
        self.nodes.chunks_exact(2).filter_map(|pair| match pair {
            [ConversationNode::Topic(topic), ConversationNode::Answer(answer)] => {
                Some((topic, answer))
            }
            _ => None,
        })
    }

    pub fn topics(&self) -> impl Iterator<Item = &TopicRecord> + '_ {
        self.nodes.iter().filter_map(ConversationNode::as_topic)
    }

    pub fn last_topic(&self) -> Option<&TopicRecord> {
        self.nodes.iter().rev().find_map(ConversationNode::as_topic)
    }
}

/// A dataset backed by a single readable file.
pub trait FileDataset {
    fn path(&self) -> &Path;
}

/// Access to the conversations of a dataset.
///
/// `conversations` streams trees straight from the source; `len` and `get`
/// go through the materialized list returned by `trees`.
pub trait ConversationDataset {
    type Conversations: Iterator<Item = Result<ConversationTree, DatasetError>>;

    fn conversations(&self) -> Result<Self::Conversations, DatasetError>;

    fn trees(&self) -> Result<&[ConversationTree], DatasetError>;

    fn len(&self) -> Result<usize, DatasetError> {
        Ok(self.trees()?.len())
    }

    fn is_empty(&self) -> Result<bool, DatasetError> {
        Ok(self.trees()?.is_empty())
    }

    fn get(&self, index: usize) -> Result<&ConversationTree, DatasetError> {
        let trees = self.trees()?;
        trees.get(index).ok_or(DatasetError::IndexOutOfRange {
            index,
            len: trees.len(),
        })
    }
}
