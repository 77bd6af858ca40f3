//! Lexer
//!
//!     Lexing reads the input line by line and classifies every line into a
//!     [`LineRecord`]. Token lines are normalized on the spot, so downstream stages only
//!     ever see canonical labels.
//!
//!     Malformed lines are not errors. They become [`LineRecord::Malformed`], get logged
//!     with their line number, and the state machine skips them. The only failure the
//!     lexer reports is an I/O failure of the underlying reader (including invalid
//!     UTF-8), which is fatal for the whole run.

pub mod line_classification;

use std::io::{BufRead, Lines};

pub use line_classification::LineClassifier;

use super::error::{ConvertError, Result};
use super::layout::LayoutProfile;
use super::token::LineRecord;

/// Streaming iterator of `(line_number, record)` pairs. Line numbers start at 1.
pub struct Records<R> {
    lines: Lines<R>,
    classifier: LineClassifier,
    line_number: usize,
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<(usize, LineRecord)>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        self.line_number += 1;
        let line_number = self.line_number;

        Some(match line {
            Ok(line) => {
                let record = self.classifier.classify(&line);
                if let LineRecord::Malformed { columns } = record {
                    tracing::warn!(line = line_number, columns, "skipping malformed record");
                }
                Ok((line_number, record))
            }
            Err(source) => Err(ConvertError::Read {
                line: line_number,
                source,
            }),
        })
    }
}

/// Lex a reader lazily.
pub fn records<R: BufRead>(reader: R, profile: &LayoutProfile) -> Records<R> {
    Records {
        lines: reader.lines(),
        classifier: LineClassifier::new(profile),
        line_number: 0,
    }
}

/// Lex an in-memory source. Reading from a string cannot fail.
pub fn lex(source: &str, profile: &LayoutProfile) -> Vec<LineRecord> {
    let classifier = LineClassifier::new(profile);
    source.lines().map(|line| classifier.classify(line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_lex_counts_lines() {
        let records = lex("Paris\tLOCATION\n\nis\tO\n", &LayoutProfile::legacy());
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], LineRecord::Blank);
    }

    #[test]
    fn test_crlf_line_endings() {
        let records = lex("Paris\tLOCATION\r\n\r\n", &LayoutProfile::legacy());
        assert_eq!(records.len(), 2);
        assert!(matches!(records[0], LineRecord::Token { .. }));
        assert_eq!(records[1], LineRecord::Blank);
    }

    #[test]
    fn test_records_numbers_lines() {
        let input = Cursor::new("EU NNP B-NP B-ORG\nbroken\n");
        let numbered: Vec<_> = records(input, &LayoutProfile::conll())
            .collect::<Result<_>>()
            .expect("in-memory reads succeed");

        assert_eq!(numbered[0].0, 1);
        assert_eq!(numbered[1], (2, LineRecord::Malformed { columns: 1 }));
    }

    #[test]
    fn test_records_reports_invalid_utf8() {
        let input = Cursor::new(b"ok NN B-NP O\n\xff\xfe NN B-NP O\n".to_vec());
        let results: Vec<_> = records(input, &LayoutProfile::conll()).collect();

        assert!(results[0].is_ok());
        match &results[1] {
            Err(ConvertError::Read { line, .. }) => assert_eq!(*line, 2),
            other => panic!("Expected read error, got {other:?}"),
        }
    }
}
