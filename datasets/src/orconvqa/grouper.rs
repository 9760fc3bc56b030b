use std::{collections::HashSet, mem};

use common::error::DatasetError;
use tracing::trace;

use crate::conversation::{AnswerRecord, ConversationNode, ConversationTree, TopicRecord};

use super::{entries::NumberedEntry, entry::DatasetEntry};

/// How the grouper treats a conversation id that shows up again after
/// another conversation started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupingMode {
    /// Start a new tree under the same id.
    #[default]
    Trusting,
    /// Fail with [`DatasetError::ConversationReopened`].
    Strict,
}

/// Folds a stream of turns into one tree per conversation.
///
/// Turns of a conversation must be contiguous in the input; a new tree starts
/// whenever the conversation id changes. An empty input yields no tree.
pub struct ConversationGrouper<I> {
    entries: I,
    mode: GroupingMode,
    current_id: Option<String>,
    pending: Vec<ConversationNode>,
    closed: HashSet<String>,
    finished: bool,
}

impl<I> ConversationGrouper<I>
where
    I: Iterator<Item = Result<NumberedEntry, DatasetError>>,
{
    pub fn new(entries: I, mode: GroupingMode) -> Self {
        Self {
            entries,
            mode,
            current_id: None,
            pending: Vec::new(),
            closed: HashSet::new(),
            finished: false,
        }
    }

    fn fail(&mut self, err: DatasetError) -> Option<Result<ConversationTree, DatasetError>> {
        self.finished = true;
        Some(Err(err))
    }

    /// Closes the pending conversation, if one is open.
    fn flush(&mut self) -> Option<ConversationTree> {
        let conversation_id = self.current_id.take()?;
        let nodes = mem::take(&mut self.pending);
        trace!(
            conversation_id = %conversation_id,
            nodes = nodes.len(),
            "Emitting conversation tree"
        );
        if self.mode == GroupingMode::Strict {
            self.closed.insert(conversation_id.clone());
        }
        Some(ConversationTree::new(conversation_id, nodes))
    }

    fn push_turn(&mut self, turn_number: String, entry: DatasetEntry) {
        self.pending.push(ConversationNode::Topic(TopicRecord::new(
            turn_number,
            entry.query,
            entry.rewrite,
        )));
        self.pending.push(ConversationNode::Answer(AnswerRecord {
            answer: entry.answer.text,
            documents: entry.evidences,
            document_relevances: entry.retrieval_labels,
        }));
    }
}

impl<I> Iterator for ConversationGrouper<I>
where
    I: Iterator<Item = Result<NumberedEntry, DatasetError>>,
{
    type Item = Result<ConversationTree, DatasetError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let (line, entry) = match self.entries.next() {
                Some(Ok(numbered)) => numbered,
                Some(Err(err)) => return self.fail(err),
                None => {
                    self.finished = true;
                    return self.flush().map(Ok);
                }
            };

            let Some((conversation_id, turn_number)) = entry
                .split_query_id()
                .map(|(cid, turn)| (cid.to_string(), turn.to_string()))
            else {
                let query_id = entry.query_id;
                return self.fail(DatasetError::MalformedQueryId { line, query_id });
            };

            let mut completed = None;
            if self.current_id.as_deref() != Some(conversation_id.as_str()) {
                if self.closed.contains(&conversation_id) {
                    return self.fail(DatasetError::ConversationReopened {
                        conversation_id,
                        line,
                    });
                }
                completed = self.flush();
                self.current_id = Some(conversation_id);
            }

            self.push_turn(turn_number, entry);

            if completed.is_some() {
                return completed.map(Ok);
            }
        }

        None
    }
}
