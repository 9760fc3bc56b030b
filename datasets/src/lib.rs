//! Conversational question-answering datasets for retrieval experiments.
//!
//! Datasets are line-delimited JSON files with one record per turn; loaders
//! regroup those turns into [`ConversationTree`]s.

pub mod conversation;
pub mod orconvqa;

pub use common::error::DatasetError;
pub use conversation::{
    AnswerRecord, ConversationDataset, ConversationNode, ConversationTree, FileDataset,
    TopicRecord,
};
pub use orconvqa::{GroupingMode, OrConvQaDataset};
