use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use common::error::DatasetError;
use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::debug;

use crate::conversation::{ConversationDataset, ConversationTree, FileDataset};

use super::{
    entries::OrConvQaEntries,
    grouper::{ConversationGrouper, GroupingMode},
};

/// An OrConvQA split stored as a line-delimited JSON file.
///
/// Trees are read from disk on first use of [`ConversationDataset::trees`]
/// and kept for the lifetime of the value. Re-reading the file needs a new
/// dataset.
#[derive(Debug)]
pub struct OrConvQaDataset {
    path: PathBuf,
    mode: GroupingMode,
    trees: OnceCell<Vec<ConversationTree>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub conversations: usize,
    pub turns: usize,
    pub max_turns: usize,
    pub evidences: usize,
    pub relevant_evidences: usize,
}

impl OrConvQaDataset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_mode(path, GroupingMode::default())
    }

    pub fn with_mode(path: impl Into<PathBuf>, mode: GroupingMode) -> Self {
        Self {
            path: path.into(),
            mode,
            trees: OnceCell::new(),
        }
    }

    pub fn mode(&self) -> GroupingMode {
        self.mode
    }

    /// Raw turns in file order, without grouping.
    pub fn entries(&self) -> Result<OrConvQaEntries<BufReader<File>>, DatasetError> {
        OrConvQaEntries::open(&self.path)
    }

    pub fn summary(&self) -> Result<DatasetSummary, DatasetError> {
        let mut summary = DatasetSummary::default();
        for tree in self.trees()? {
            let turns = tree.turns().count();
            summary.conversations = summary.conversations.saturating_add(1);
            summary.turns = summary.turns.saturating_add(turns);
            summary.max_turns = summary.max_turns.max(turns);
            for (_, answer) in tree.turns() {
                summary.evidences = summary.evidences.saturating_add(answer.documents.len());
                summary.relevant_evidences = summary
                    .relevant_evidences
                    .saturating_add(answer.relevant_documents().count());
            }
        }
        Ok(summary)
    }

    fn load(&self) -> Result<Vec<ConversationTree>, DatasetError> {
        let trees = self.conversations()?.collect::<Result<Vec<_>, _>>()?;
        debug!(
            path = %self.path.display(),
            conversations = trees.len(),
            "Loaded OrConvQA dataset"
        );
        Ok(trees)
    }
}

impl FileDataset for OrConvQaDataset {
    fn path(&self) -> &Path {
        &self.path
    }
}

impl ConversationDataset for OrConvQaDataset {
    type Conversations = ConversationGrouper<OrConvQaEntries<BufReader<File>>>;

    fn conversations(&self) -> Result<Self::Conversations, DatasetError> {
        Ok(ConversationGrouper::new(self.entries()?, self.mode))
    }

    fn trees(&self) -> Result<&[ConversationTree], DatasetError> {
        self.trees.get_or_try_init(|| self.load()).map(Vec::as_slice)
    }
}
