use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    path::Path,
};

use common::error::DatasetError;
use serde::de::Error as _;

use super::entry::DatasetEntry;

/// A decoded entry with the 1-based line it was read from.
pub type NumberedEntry = (usize, DatasetEntry);

/// Single pass over a line-delimited OrConvQA file.
///
/// The first read or decode failure is yielded once and ends the iteration.
/// Blank lines are only accepted at the end of the file. The underlying
/// reader is released when the iterator is dropped.
pub struct OrConvQaEntries<R> {
    lines: Lines<R>,
    line: usize,
    /// First blank line seen since the last record.
    blank_line: Option<usize>,
    failed: bool,
}

impl OrConvQaEntries<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, DatasetError> {
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> OrConvQaEntries<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
            blank_line: None,
            failed: false,
        }
    }
}

impl<R: BufRead> Iterator for OrConvQaEntries<R> {
    type Item = Result<NumberedEntry, DatasetError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let raw = self.lines.next()?;
            self.line = self.line.saturating_add(1);
            let line = self.line;

            let raw = match raw {
                Ok(raw) => raw,
                Err(source) => {
                    self.failed = true;
                    return Some(Err(DatasetError::Read { line, source }));
                }
            };
            if raw.trim().is_empty() {
                self.blank_line.get_or_insert(line);
                continue;
            }

            // a record after a blank line makes that blank line a bad record
            if let Some(blank) = self.blank_line.take() {
                self.failed = true;
                let source = serde_json::Error::custom("blank line between records");
                return Some(Err(DatasetError::Decode {
                    line: blank,
                    source,
                }));
            }

            return Some(match serde_json::from_str::<DatasetEntry>(&raw) {
                Ok(entry) => Ok((line, entry)),
                Err(source) => {
                    self.failed = true;
                    Err(DatasetError::Decode { line, source })
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn record(qid: &str) -> String {
        format!(
            r#"{{"qid":"{qid}","question":"q {qid}","rewrite":"r {qid}","answer":{{"text":"a","answer_start":0}},"history":[],"evidences":["e"],"retrieval_labels":[1]}}"#
        )
    }

    #[test]
    fn yields_entries_with_line_numbers() {
        let input = format!("{}\n{}\n\n  \n", record("A#1"), record("A#2"));
        let entries: Vec<_> = OrConvQaEntries::from_reader(Cursor::new(input))
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, 1);
        assert_eq!(entries[0].1.query_id, "A#1");
        assert_eq!(entries[1].0, 2);
        assert_eq!(entries[1].1.rewrite, "r A#2");
    }

    #[test]
    fn blank_line_between_records_is_a_decode_error() {
        let input = format!("{}\n\n{}\n", record("A#1"), record("A#2"));
        let mut entries = OrConvQaEntries::from_reader(Cursor::new(input));

        assert!(entries.next().unwrap().is_ok());
        match entries.next() {
            Some(Err(DatasetError::Decode { line, .. })) => assert_eq!(line, 2),
            other => panic!("expected decode error, got {other:?}"),
        }
        assert!(entries.next().is_none());
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let mut input = record("A#1").into_bytes();
        input.extend_from_slice(b"\n\xff\xfe\n");
        input.extend_from_slice(record("A#2").as_bytes());
        let mut entries = OrConvQaEntries::from_reader(Cursor::new(input));

        assert_eq!(entries.next().unwrap().unwrap().0, 1);
        match entries.next() {
            Some(Err(DatasetError::Read { line, .. })) => assert_eq!(line, 2),
            other => panic!("expected read error, got {other:?}"),
        }
        assert!(entries.next().is_none());
    }

    #[test]
    fn stops_after_first_decode_error() {
        let input = format!("{}\nnot json\n{}\n", record("A#1"), record("A#2"));
        let mut entries = OrConvQaEntries::from_reader(Cursor::new(input));

        assert!(entries.next().unwrap().is_ok());
        match entries.next() {
            Some(Err(DatasetError::Decode { line, .. })) => assert_eq!(line, 2),
            other => panic!("expected decode error, got {other:?}"),
        }
        assert!(entries.next().is_none());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        match OrConvQaEntries::open(&path) {
            Err(DatasetError::Io { path: reported, .. }) => assert_eq!(reported, path),
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("opening a missing file succeeded"),
        }
    }
}
