use serde::{Deserialize, Serialize};

/// Gold answer span for a turn.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OrConvQaAnswer {
    pub text: String,
    pub answer_start: i64,
    /// Passage block the span was taken from, absent in most records.
    #[serde(default)]
    pub bid: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OrConvQaHistoryEntry {
    pub question: String,
    pub answer: OrConvQaAnswer,
}

/// One conversational turn as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatasetEntry {
    /// `<conversation_id>#<turn_number>`
    #[serde(rename = "qid")]
    pub query_id: String,
    /// The last issued query
    #[serde(rename = "question")]
    pub query: String,
    /// Manually rewritten query
    pub rewrite: String,
    /// Earlier questions of the conversation with their answers
    pub history: Vec<OrConvQaHistoryEntry>,
    pub answer: OrConvQaAnswer,
    /// Evidence passages for this turn
    pub evidences: Vec<String>,
    /// Relevance status for each evidence
    pub retrieval_labels: Vec<i64>,
}

impl DatasetEntry {
    /// Splits `query_id` on its last `#` into conversation id and turn number.
    pub fn split_query_id(&self) -> Option<(&str, &str)> {
        self.query_id.rsplit_once('#')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_record_with_optional_bid() {
        let line = r#"{"qid":"C_0aaa#2","question":"what about it?","rewrite":"what about the castle?","answer":{"text":"It burned.","answer_start":14,"bid":3},"history":[{"question":"where is the castle?","answer":{"text":"In Prague.","answer_start":0}}],"evidences":["e1","e2"],"retrieval_labels":[1,0]}"#;
        let entry: DatasetEntry = serde_json::from_str(line).unwrap();

        assert_eq!(entry.query, "what about it?");
        assert_eq!(entry.answer.bid, Some(3));
        assert_eq!(entry.history.len(), 1);
        assert_eq!(entry.history[0].answer.bid, None);
        assert_eq!(entry.split_query_id(), Some(("C_0aaa", "2")));
    }

    #[test]
    fn splits_on_last_hash_only() {
        let line = r#"{"qid":"C#x#7","question":"q","rewrite":"r","answer":{"text":"a","answer_start":0,"bid":null},"history":[],"evidences":[],"retrieval_labels":[]}"#;
        let entry: DatasetEntry = serde_json::from_str(line).unwrap();
        assert_eq!(entry.split_query_id(), Some(("C#x", "7")));
        assert_eq!(entry.answer.bid, None);
    }

    #[test]
    fn missing_field_fails_to_decode() {
        let line = r#"{"qid":"C#1","question":"q","answer":{"text":"a","answer_start":0},"history":[],"evidences":[],"retrieval_labels":[]}"#;
        let err = serde_json::from_str::<DatasetEntry>(line).unwrap_err();
        assert!(err.to_string().contains("rewrite"));
    }
}
