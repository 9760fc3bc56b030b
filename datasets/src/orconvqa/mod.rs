//! OrConvQA: open-retrieval conversational QA over QuAC conversations.
//!
//! Each line of a dataset file is one turn; turns of a conversation are stored
//! contiguously and share the `qid` prefix before the last `#`.

mod dataset;
mod entries;
mod entry;
mod grouper;

pub use dataset::{DatasetSummary, OrConvQaDataset};
pub use entries::{NumberedEntry, OrConvQaEntries};
pub use entry::{DatasetEntry, OrConvQaAnswer, OrConvQaHistoryEntry};
pub use grouper::{ConversationGrouper, GroupingMode};
