//! Separator inference
//!
//!     The input is pre-tokenized and carries no whitespace information, so the
//!     separator between two tokens has to be guessed. The heuristic is deliberately
//!     coarse: a token containing any punctuation character from the layout's set is
//!     glued to its predecessor, everything else gets a single space.
//!
//!     The conll layout runs the check over the markup-escaped text. Characters that
//!     escape to entities (`&amp;`, `&lt;`, ...) therefore glue as well, because every
//!     entity ends in `;`.
//!
//!     Suppression at sentence starts and right after a split span opening is not the
//!     spacer's business; the state machine tracks those positions.

use super::formats::escape_markup;

/// The separator emitted between tokens.
pub const SEPARATOR: &str = " ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spacer {
    punctuation: Vec<char>,
    inspect_escaped: bool,
}

impl Spacer {
    pub fn new(punctuation: impl IntoIterator<Item = char>, inspect_escaped: bool) -> Self {
        Self {
            punctuation: punctuation.into_iter().collect(),
            inspect_escaped,
        }
    }

    pub fn needs_separator_before(&self, token: &str) -> bool {
        if self.inspect_escaped {
            !self.contains_punctuation(&escape_markup(token))
        } else {
            !self.contains_punctuation(token)
        }
    }

    fn contains_punctuation(&self, text: &str) -> bool {
        text.chars().any(|c| self.punctuation.contains(&c))
    }
}
