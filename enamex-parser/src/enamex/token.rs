//! Tokens and line records
//!
//!     The lexing stage turns every raw input line into exactly one [`LineRecord`].
//!     Records are what the span state machine consumes; it never sees raw text.

use serde::Serialize;

use super::labels::CanonicalLabel;

/// A token as read from the input. Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub raw_label: String,
}

impl Token {
    pub fn new(text: impl Into<String>, raw_label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            raw_label: raw_label.into(),
        }
    }
}

/// The classification of one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineRecord {
    /// Empty or whitespace only: a sentence boundary.
    Blank,

    /// A document separator line (conll layout only).
    DocumentStart,

    /// A token with its normalized label. `sense` is the optional third legacy column.
    Token {
        token: Token,
        label: CanonicalLabel,
        sense: Option<String>,
    },

    /// A non-blank line with an unusable column count. Skipped by the state machine.
    Malformed { columns: usize },
}

impl LineRecord {
    pub fn is_malformed(&self) -> bool {
        matches!(self, LineRecord::Malformed { .. })
    }
}
